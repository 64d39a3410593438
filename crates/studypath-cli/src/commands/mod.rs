//! Subcommand implementations and the state they share.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;

use studypath_core::selection::Selection;
use studypath_core::traits::ContentSource;
use studypath_render::html::write_html_page;
use studypath_render::terminal::to_text;
use studypath_render::Instruction;
use studypath_sources::{create_source, load_config_from, StudypathConfig};
use studypath_storage::FileStore;

pub mod complete;
pub mod flashcards;
pub mod init;
pub mod module;
pub mod progress;
pub mod quiz;
pub mod roadmap;
pub mod select;
pub mod subjects;
pub mod summary;
pub mod validate;

/// Configuration, content source and store for one invocation.
pub struct App {
    pub config: StudypathConfig,
    pub source: Arc<dyn ContentSource>,
    pub store: Arc<FileStore>,
}

impl App {
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = load_config_from(config_path)?;
        let source = create_source(&config)?;
        let store = open_store(&config);
        Ok(Self {
            config,
            source,
            store,
        })
    }

    pub fn selection(&self) -> Result<Selection> {
        Selection::load(self.store.as_ref())
    }
}

pub fn open_store(config: &StudypathConfig) -> Arc<FileStore> {
    Arc::new(FileStore::new(config.store_path.clone()))
}

/// Print instructions as terminal text, and write them as an HTML page too
/// when a path is given.
pub fn show(title: &str, instructions: &[Instruction], html: Option<&PathBuf>) -> Result<()> {
    print!("{}", to_text(instructions));
    if let Some(path) = html {
        write_html_page(path, title, instructions)?;
        eprintln!("HTML page: {}", path.display());
    }
    Ok(())
}
