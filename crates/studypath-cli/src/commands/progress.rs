//! The `studypath progress` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};
use serde::Serialize;

use studypath_core::progress::ProgressRecord;
use studypath_core::progression::PASS_THRESHOLD;
use studypath_sources::load_config_from;

use super::open_store;

#[derive(Serialize)]
struct ProgressExport<'a> {
    exported_at: String,
    progress: &'a ProgressRecord,
}

pub fn execute(config_path: Option<PathBuf>, export: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let store = open_store(&config);
    let progress = ProgressRecord::load(store.as_ref())?;

    if progress.is_empty() {
        println!("No quiz scores recorded yet.");
    } else {
        let mut table = Table::new();
        table.set_header(vec!["Subject", "Level", "Module", "Best Score", "Status"]);
        for (subject, level, module_id, score) in progress.entries() {
            let status = if score >= PASS_THRESHOLD {
                "Passed"
            } else {
                "Review"
            };
            table.add_row(vec![
                Cell::new(subject),
                Cell::new(level),
                Cell::new(module_id),
                Cell::new(format!("{score}%")),
                Cell::new(status),
            ]);
        }
        println!("{table}");
    }

    if let Some(path) = export {
        let export = ProgressExport {
            exported_at: chrono::Utc::now().to_rfc3339(),
            progress: &progress,
        };
        let json = serde_json::to_string_pretty(&export)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, json)
            .with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("Progress exported to: {}", path.display());
    }
    Ok(())
}
