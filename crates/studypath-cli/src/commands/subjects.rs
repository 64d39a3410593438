//! The `studypath subjects` command.

use std::path::PathBuf;

use anyhow::Result;

use studypath_render::subject_display_name;

use super::App;

pub async fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let app = App::load(config_path.as_deref())?;
    let subjects = app.source.subjects().await?;

    if subjects.is_empty() {
        println!("No subjects available from the {} source.", app.source.name());
        return Ok(());
    }
    for subject in &subjects {
        println!("  {subject:<16} {}", subject_display_name(subject));
    }
    Ok(())
}
