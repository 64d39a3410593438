//! The `studypath select` command.

use std::path::PathBuf;

use anyhow::Result;

use studypath_core::error::StudyError;
use studypath_core::model::{Level, ModuleRef};
use studypath_core::selection::Selection;

use super::App;

pub async fn execute(
    config_path: Option<PathBuf>,
    subject: String,
    level: Level,
    module: Option<String>,
) -> Result<()> {
    let app = App::load(config_path.as_deref())?;

    match module {
        Some(module_id) => {
            let curriculum = app.source.curriculum(&subject).await?;
            let summary = curriculum.find(level, &module_id).ok_or_else(|| {
                StudyError::NotFound(format!("module {module_id} in {subject}/{level}"))
            })?;
            let module = ModuleRef::new(&subject, level, &module_id);
            Selection::choose_module(app.store.as_ref(), &module)?;
            println!("Selected {} ({module})", summary.module_name);
        }
        None => {
            Selection::choose_level(app.store.as_ref(), &subject, level)?;
            println!("Selected {subject}/{level}");
        }
    }
    Ok(())
}
