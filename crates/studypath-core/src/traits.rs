//! Core trait definitions for content sources, the summary backend, and
//! persisted key-value state.
//!
//! The async traits are implemented by `studypath-sources`; `KeyValueStore`
//! is implemented here by [`crate::storage::MemoryStore`] and by the
//! file-backed store in `studypath-storage`.

use async_trait::async_trait;

use crate::model::{Curriculum, Flashcard, Level, Module, Quiz};
use crate::summary::{GeneratedSummary, SummaryRequest};

// ---------------------------------------------------------------------------
// Content source trait
// ---------------------------------------------------------------------------

/// Read-only access to curriculum content.
///
/// Implementations convert whatever shape they fetch into the canonical model
/// and report failures as [`crate::error::StudyError`] wrapped in `anyhow`.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Human-readable source name (e.g. "api").
    fn name(&self) -> &str;

    /// List the subjects this source offers.
    async fn subjects(&self) -> anyhow::Result<Vec<String>>;

    /// Fetch the full curriculum for a subject.
    async fn curriculum(&self, subject: &str) -> anyhow::Result<Curriculum>;

    /// Fetch one module record.
    async fn module(&self, subject: &str, level: Level, module_id: &str)
        -> anyhow::Result<Module>;

    /// Fetch the quiz for a module when it is not embedded in the module record.
    async fn quiz(&self, subject: &str, level: Level, module_id: &str) -> anyhow::Result<Quiz>;

    /// Fetch the flashcard deck for a subject and level.
    async fn flashcards(&self, subject: &str, level: Level) -> anyhow::Result<Vec<Flashcard>>;
}

// ---------------------------------------------------------------------------
// Summary backend trait
// ---------------------------------------------------------------------------

/// A backend that generates module summaries on demand.
#[async_trait]
pub trait SummaryService: Send + Sync {
    async fn summarize(&self, request: &SummaryRequest) -> anyhow::Result<GeneratedSummary>;
}

// ---------------------------------------------------------------------------
// Key-value store trait
// ---------------------------------------------------------------------------

/// Process-wide string key-value storage, the equivalent of browser local
/// storage. Values are opaque strings; structured records are stored as JSON.
///
/// There is no compare-and-swap: concurrent writers to the same key race and
/// the last write wins.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;

    fn remove(&self, key: &str) -> anyhow::Result<()>;
}
