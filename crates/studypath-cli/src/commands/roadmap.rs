//! The `studypath roadmap` command.

use std::path::PathBuf;

use anyhow::Result;

use studypath_core::progress::ProgressRecord;
use studypath_render::{render_roadmap, subject_display_name};

use super::{show, App};

pub async fn execute(
    config_path: Option<PathBuf>,
    subject: String,
    html: Option<PathBuf>,
) -> Result<()> {
    let app = App::load(config_path.as_deref())?;
    let curriculum = app.source.curriculum(&subject).await;
    let progress = ProgressRecord::load(app.store.as_ref())?;

    let page = render_roadmap(&subject, curriculum.as_ref(), Some(&progress));
    let title = format!("{} Roadmap", subject_display_name(&subject));
    show(&title, &page, html.as_ref())?;

    let curriculum = curriculum?;
    println!(
        "\n{} modules. Pick one with: studypath select --subject {subject} --level <level> --module <id>",
        curriculum.module_count()
    );
    Ok(())
}
