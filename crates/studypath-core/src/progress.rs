//! Persisted progress records.
//!
//! Two records live in the key-value store:
//! - `userProgress`: subject → level → module_id → best quiz percentage.
//! - `completed_{topic}_{level}`: the legacy ordered list of completed modules.
//!
//! Both are saved as whole JSON blobs; there is no partial update.

use std::collections::BTreeMap;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::StudyError;
use crate::model::Level;
use crate::storage::{completed_key, keys};
use crate::traits::KeyValueStore;

/// Best score per module, nested by subject and level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressRecord {
    scores: BTreeMap<String, BTreeMap<Level, BTreeMap<String, u8>>>,
}

impl ProgressRecord {
    /// Read the record; a missing key yields an empty record.
    pub fn load(store: &dyn KeyValueStore) -> anyhow::Result<Self> {
        match store.get(keys::USER_PROGRESS)? {
            Some(raw) if !raw.trim().is_empty() => serde_json::from_str(&raw)
                .map_err(|e| StudyError::Storage(format!("corrupt {}: {e}", keys::USER_PROGRESS)))
                .context("failed to read progress record"),
            _ => Ok(Self::default()),
        }
    }

    /// Persist the whole record, replacing what was stored.
    pub fn save(&self, store: &dyn KeyValueStore) -> anyhow::Result<()> {
        let json = serde_json::to_string(self).context("failed to serialize progress record")?;
        store.set(keys::USER_PROGRESS, &json)
    }

    /// Best stored score for a module.
    pub fn best_score(&self, subject: &str, level: Level, module_id: &str) -> Option<u8> {
        self.scores
            .get(subject)
            .and_then(|levels| levels.get(&level))
            .and_then(|modules| modules.get(module_id))
            .copied()
    }

    /// Record a score, keeping the maximum of the old and new value.
    /// Returns the stored best score.
    pub fn record(&mut self, subject: &str, level: Level, module_id: &str, score: u8) -> u8 {
        let entry = self
            .scores
            .entry(subject.to_string())
            .or_default()
            .entry(level)
            .or_default()
            .entry(module_id.to_string())
            .or_insert(0);
        *entry = (*entry).max(score.min(100));
        *entry
    }

    /// Scores recorded for one subject and level.
    pub fn level_scores(&self, subject: &str, level: Level) -> Option<&BTreeMap<String, u8>> {
        self.scores.get(subject).and_then(|levels| levels.get(&level))
    }

    /// Iterate every (subject, level, module_id, score) entry.
    pub fn entries(&self) -> impl Iterator<Item = (&str, Level, &str, u8)> + '_ {
        self.scores.iter().flat_map(|(subject, levels)| {
            levels.iter().flat_map(move |(level, modules)| {
                modules
                    .iter()
                    .map(move |(id, score)| (subject.as_str(), *level, id.as_str(), *score))
            })
        })
    }

    pub fn is_empty(&self) -> bool {
        self.entries().next().is_none()
    }
}

/// Legacy completed-module list for one topic and level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedModules {
    topic: String,
    level: Level,
    modules: Vec<String>,
}

impl CompletedModules {
    pub fn load(store: &dyn KeyValueStore, topic: &str, level: Level) -> anyhow::Result<Self> {
        let key = completed_key(topic, level);
        let modules = match store.get(&key)? {
            Some(raw) if !raw.trim().is_empty() => serde_json::from_str::<Vec<String>>(&raw)
                .map_err(|e| StudyError::Storage(format!("corrupt {key}: {e}")))?,
            _ => Vec::new(),
        };
        Ok(Self {
            topic: topic.to_string(),
            level,
            modules,
        })
    }

    /// Append a module if not already present and persist the list.
    /// Returns `true` when the module was newly added.
    pub fn mark_completed(
        &mut self,
        store: &dyn KeyValueStore,
        module: &str,
    ) -> anyhow::Result<bool> {
        if self.modules.iter().any(|m| m == module) {
            return Ok(false);
        }
        self.modules.push(module.to_string());
        let json = serde_json::to_string(&self.modules)?;
        store.set(&completed_key(&self.topic, self.level), &json)?;
        Ok(true)
    }

    pub fn modules(&self) -> &[String] {
        &self.modules
    }

    pub fn contains(&self, module: &str) -> bool {
        self.modules.iter().any(|m| m == module)
    }

    /// Completion percentage against a level's module count, rounded half up.
    pub fn percent_of(&self, total: usize) -> u8 {
        if total == 0 {
            return 0;
        }
        crate::quiz::percentage(self.modules.len().min(total), total)
    }
}
