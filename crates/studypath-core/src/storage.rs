//! Storage keys and the in-memory key-value store.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::StudyError;
use crate::model::Level;
use crate::traits::KeyValueStore;

/// Persisted key names. Legacy keys are read as fallbacks but never written.
pub mod keys {
    pub const SELECTED_SUBJECT: &str = "selectedSubject";
    pub const SELECTED_TOPIC: &str = "selectedTopic";
    pub const SELECTED_LEVEL: &str = "selectedLevel";
    pub const SELECTED_MODULE_ID: &str = "selectedModuleId";
    pub const SELECTED_MODULE: &str = "selectedModule";
    pub const USER_PROGRESS: &str = "userProgress";
}

/// Key of the legacy completed-module list for a topic and level.
pub fn completed_key(topic: &str, level: Level) -> String {
    format!("completed_{topic}_{level}")
}

/// A `KeyValueStore` held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> anyhow::Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| StudyError::Storage("memory store lock poisoned".into()).into())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> anyhow::Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}
