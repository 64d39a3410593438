//! The `studypath module` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use studypath_render::render_module;

use super::{show, App};

pub async fn execute(config_path: Option<PathBuf>, html: Option<PathBuf>) -> Result<()> {
    let app = App::load(config_path.as_deref())?;
    let selected = app.selection()?.require_module()?;

    let module = app
        .source
        .module(&selected.subject, selected.level, &selected.module_id)
        .await
        .with_context(|| format!("failed to load content for {selected}"))?;

    let title = module.title.clone();
    show(&title, &render_module(&module), html.as_ref())
}
