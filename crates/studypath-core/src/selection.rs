//! The user's current (subject, level, module) selection, carried across
//! pages through the key-value store.

use crate::error::StudyError;
use crate::model::{Level, ModuleRef};
use crate::storage::keys;
use crate::traits::KeyValueStore;

/// The single active selection. Any part may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub subject: Option<String>,
    pub level: Option<Level>,
    pub module_id: Option<String>,
}

impl Selection {
    /// Read the selection, preferring current key names over legacy ones.
    pub fn load(store: &dyn KeyValueStore) -> anyhow::Result<Self> {
        let subject = read_first(store, &[keys::SELECTED_SUBJECT, keys::SELECTED_TOPIC])?;
        let level = match store.get(keys::SELECTED_LEVEL)? {
            Some(raw) if !raw.is_empty() => match raw.parse::<Level>() {
                Ok(level) => Some(level),
                Err(e) => {
                    tracing::warn!("ignoring stored level: {e}");
                    None
                }
            },
            _ => None,
        };
        let module_id = read_first(store, &[keys::SELECTED_MODULE_ID, keys::SELECTED_MODULE])?;

        Ok(Self {
            subject,
            level,
            module_id,
        })
    }

    /// Overwrite the stored selection with a subject and level, clearing any
    /// previously selected module.
    pub fn choose_level(
        store: &dyn KeyValueStore,
        subject: &str,
        level: Level,
    ) -> anyhow::Result<()> {
        anyhow::ensure!(!subject.trim().is_empty(), StudyError::MissingSelection("subject"));
        store.set(keys::SELECTED_SUBJECT, subject)?;
        store.set(keys::SELECTED_LEVEL, level.as_str())?;
        store.remove(keys::SELECTED_MODULE_ID)?;
        store.remove(keys::SELECTED_MODULE)?;
        Ok(())
    }

    /// Overwrite the stored selection with a full module triple.
    pub fn choose_module(store: &dyn KeyValueStore, module: &ModuleRef) -> anyhow::Result<()> {
        store.set(keys::SELECTED_SUBJECT, &module.subject)?;
        store.set(keys::SELECTED_LEVEL, module.level.as_str())?;
        store.set(keys::SELECTED_MODULE_ID, &module.module_id)?;
        tracing::debug!("selected {module}");
        Ok(())
    }

    /// Subject and level, or an input error naming what is missing.
    pub fn require_level(&self) -> Result<(String, Level), StudyError> {
        let subject = self
            .subject
            .clone()
            .ok_or(StudyError::MissingSelection("subject"))?;
        let level = self.level.ok_or(StudyError::MissingSelection("level"))?;
        Ok((subject, level))
    }

    /// The full module triple, or an input error naming what is missing.
    pub fn require_module(&self) -> Result<ModuleRef, StudyError> {
        let (subject, level) = self.require_level()?;
        let module_id = self
            .module_id
            .clone()
            .ok_or(StudyError::MissingSelection("module"))?;
        Ok(ModuleRef {
            subject,
            level,
            module_id,
        })
    }
}

fn read_first(store: &dyn KeyValueStore, names: &[&str]) -> anyhow::Result<Option<String>> {
    for name in names {
        if let Some(value) = store.get(name)? {
            if !value.is_empty() {
                return Ok(Some(value));
            }
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn empty_store_has_no_selection() {
        let store = MemoryStore::new();
        let sel = Selection::load(&store).unwrap();
        assert_eq!(sel, Selection::default());
        assert!(matches!(
            sel.require_module(),
            Err(StudyError::MissingSelection("subject"))
        ));
    }

    #[test]
    fn choose_module_round_trips() {
        let store = MemoryStore::new();
        let module = ModuleRef::new("aiml", Level::Intermediate, "svm");
        Selection::choose_module(&store, &module).unwrap();
        let sel = Selection::load(&store).unwrap();
        assert_eq!(sel.require_module().unwrap(), module);
    }

    #[test]
    fn legacy_keys_are_read() {
        let store = MemoryStore::new();
        store.set("selectedTopic", "ethics").unwrap();
        store.set("selectedLevel", "beginner").unwrap();
        store.set("selectedModule", "bias_in_data").unwrap();
        let module = Selection::load(&store).unwrap().require_module().unwrap();
        assert_eq!(module.subject, "ethics");
        assert_eq!(module.module_id, "bias_in_data");
    }

    #[test]
    fn current_keys_win_over_legacy() {
        let store = MemoryStore::new();
        store.set("selectedTopic", "old").unwrap();
        store.set("selectedSubject", "new").unwrap();
        let sel = Selection::load(&store).unwrap();
        assert_eq!(sel.subject.as_deref(), Some("new"));
    }

    #[test]
    fn choose_level_clears_module() {
        let store = MemoryStore::new();
        Selection::choose_module(&store, &ModuleRef::new("aiml", Level::Beginner, "knn")).unwrap();
        Selection::choose_level(&store, "aiml", Level::Advanced).unwrap();
        let sel = Selection::load(&store).unwrap();
        assert_eq!(sel.level, Some(Level::Advanced));
        assert!(sel.module_id.is_none());
        assert!(matches!(
            sel.require_module(),
            Err(StudyError::MissingSelection("module"))
        ));
    }

    #[test]
    fn choose_level_rejects_blank_subject() {
        let store = MemoryStore::new();
        assert!(Selection::choose_level(&store, "  ", Level::Beginner).is_err());
    }

    #[test]
    fn unparseable_level_is_treated_as_missing() {
        let store = MemoryStore::new();
        store.set("selectedSubject", "aiml").unwrap();
        store.set("selectedLevel", "expert").unwrap();
        let sel = Selection::load(&store).unwrap();
        assert!(matches!(
            sel.require_level(),
            Err(StudyError::MissingSelection("level"))
        ));
    }
}
