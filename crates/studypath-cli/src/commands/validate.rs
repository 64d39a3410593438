//! The `studypath validate` command.

use std::path::PathBuf;

use anyhow::Result;

use studypath_core::validate::validate_content_dir;

pub fn execute(content_dir: PathBuf) -> Result<()> {
    let warnings = validate_content_dir(&content_dir)?;

    for w in &warnings {
        let mut prefix = String::from("  ");
        if let Some(file) = &w.file {
            prefix.push_str(&format!("{file}: "));
        }
        if let Some(id) = &w.module_id {
            prefix.push_str(&format!("[{id}] "));
        }
        println!("{prefix}WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("All content valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
