//! studypath-storage: file-backed key-value store.
//!
//! Persists the same string keys a browser would keep in local storage
//! (`selectedSubject`, `userProgress`, `completed_{topic}_{level}`, ...) as a
//! single JSON object on disk.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

use studypath_core::error::StudyError;
use studypath_core::traits::KeyValueStore;

/// A `KeyValueStore` backed by one JSON file.
///
/// Every operation re-reads the file, so changes made by another process are
/// seen on the next call. Writes replace the whole file through a temp file
/// and rename. Two processes writing at once race and the last rename wins.
pub struct FileStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    guard: Mutex<()>,
}

impl FileStore {
    /// Open (or lazily create) the store at `path`. Parent directories are
    /// created on the first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(StudyError::Storage(format!(
                    "failed to read {}: {e}",
                    self.path.display()
                ))
                .into())
            }
        };
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|e| {
            StudyError::Storage(format!("corrupt store {}: {e}", self.path.display())).into()
        })
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create store directory: {}", dir.display()))?;

        let json = serde_json::to_string_pretty(entries).context("failed to serialize store")?;
        let mut tmp = NamedTempFile::new_in(&dir).context("failed to create temp file")?;
        tmp.write_all(json.as_bytes())
            .context("failed to write temp file")?;
        tmp.persist(&self.path).map_err(|e| {
            StudyError::Storage(format!("failed to replace {}: {}", self.path.display(), e.error))
        })?;
        tracing::debug!("wrote {} keys to {}", entries.len(), self.path.display());
        Ok(())
    }

    fn update<T>(&self, f: impl FnOnce(&mut BTreeMap<String, String>) -> T) -> Result<T> {
        let _lock = self
            .guard
            .lock()
            .map_err(|_| StudyError::Storage("file store lock poisoned".into()))?;
        let mut entries = self.read_all()?;
        let out = f(&mut entries);
        self.write_all(&entries)?;
        Ok(out)
    }

    /// Every stored key and value, sorted by key.
    pub fn entries(&self) -> Result<BTreeMap<String, String>> {
        self.read_all()
    }
}

impl std::fmt::Debug for FileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileStore")
            .field("path", &self.path)
            .finish()
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.update(|entries| {
            entries.remove(key);
        })
    }
}
