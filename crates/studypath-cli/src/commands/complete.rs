//! The `studypath complete` command: the legacy completed-module marker.

use std::path::PathBuf;

use anyhow::Result;

use studypath_core::progress::CompletedModules;

use super::App;

pub async fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let app = App::load(config_path.as_deref())?;
    let selected = app.selection()?.require_module()?;

    let mut completed =
        CompletedModules::load(app.store.as_ref(), &selected.subject, selected.level)?;
    if completed.mark_completed(app.store.as_ref(), &selected.module_id)? {
        println!("Marked {} as completed.", selected.module_id);
    } else {
        println!("{} was already completed.", selected.module_id);
    }

    match app.source.curriculum(&selected.subject).await {
        Ok(curriculum) => {
            let total = curriculum.modules(selected.level).len();
            println!(
                "{} level progress: {}% ({} of {total} modules)",
                selected.level,
                completed.percent_of(total),
                completed.modules().len().min(total)
            );
        }
        Err(e) => tracing::warn!("could not load curriculum for level progress: {e:#}"),
    }
    Ok(())
}
