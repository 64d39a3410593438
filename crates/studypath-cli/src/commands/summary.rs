//! The `studypath summary` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use studypath_core::summary::{SummaryPanel, Trigger};
use studypath_render::terminal::to_text;
use studypath_render::{render_generated_summary, render_static_summary};
use studypath_sources::create_summary_service;

use super::App;

fn log_trigger(trigger: &Trigger) {
    tracing::debug!(enabled = trigger.enabled, "summary trigger: {}", trigger.label);
}

pub async fn execute(config_path: Option<PathBuf>, dynamic: bool) -> Result<()> {
    let app = App::load(config_path.as_deref())?;
    let selected = app.selection()?.require_module()?;
    let mut panel = SummaryPanel::new();

    let page = if dynamic {
        let service = create_summary_service(&app.config)?.context(
            "no summary backend configured; set summary_url in studypath.toml or STUDYPATH_SUMMARY_URL",
        )?;
        let summary = panel
            .show_generated(service.as_ref(), &selected, &mut log_trigger)
            .await?;
        render_generated_summary(&summary)
    } else {
        let module = app
            .source
            .module(&selected.subject, selected.level, &selected.module_id)
            .await
            .with_context(|| format!("failed to load content for {selected}"))?;
        let summary = panel.show_static(Some(&module), &mut log_trigger)?;
        render_static_summary(Some(&summary))
    };

    print!("{}", to_text(&page));
    Ok(())
}
