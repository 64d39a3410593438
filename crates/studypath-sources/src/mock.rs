//! In-memory content source and summary service for tests and demos.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use studypath_core::error::StudyError;
use studypath_core::model::{Curriculum, Flashcard, Level, Module, Quiz};
use studypath_core::summary::{GeneratedSummary, SummaryRequest};
use studypath_core::traits::{ContentSource, SummaryService};

type ModuleKey = (String, Level, String);

/// A content source serving fixed records.
///
/// Lookups that have no record fail with `StudyError::NotFound`, like a
/// server answering 404.
#[derive(Default)]
pub struct MockSource {
    curricula: HashMap<String, Curriculum>,
    modules: HashMap<ModuleKey, Module>,
    quizzes: HashMap<ModuleKey, Quiz>,
    flashcards: HashMap<(String, Level), Vec<Flashcard>>,
    /// Number of fetches made.
    call_count: AtomicU32,
    /// When set, every fetch fails with this network error.
    offline: Option<String>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_curriculum(mut self, curriculum: Curriculum) -> Self {
        self.curricula.insert(curriculum.subject.clone(), curriculum);
        self
    }

    pub fn with_module(mut self, subject: &str, level: Level, module: Module) -> Self {
        self.modules
            .insert((subject.to_string(), level, module.module_id.clone()), module);
        self
    }

    pub fn with_quiz(mut self, subject: &str, level: Level, quiz: Quiz) -> Self {
        self.quizzes
            .insert((subject.to_string(), level, quiz.module_id.clone()), quiz);
        self
    }

    pub fn with_flashcards(mut self, subject: &str, level: Level, cards: Vec<Flashcard>) -> Self {
        self.flashcards.insert((subject.to_string(), level), cards);
        self
    }

    /// Make every fetch fail as if the server were unreachable.
    pub fn offline(mut self, reason: &str) -> Self {
        self.offline = Some(reason.to_string());
        self
    }

    /// Number of fetches made to this source.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    fn begin(&self) -> anyhow::Result<()> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        match &self.offline {
            Some(reason) => Err(StudyError::Network(reason.clone()).into()),
            None => Ok(()),
        }
    }
}

fn key(subject: &str, level: Level, module_id: &str) -> ModuleKey {
    (subject.to_string(), level, module_id.to_string())
}

#[async_trait]
impl ContentSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn subjects(&self) -> anyhow::Result<Vec<String>> {
        self.begin()?;
        let mut subjects: Vec<String> = self.curricula.keys().cloned().collect();
        subjects.sort();
        Ok(subjects)
    }

    async fn curriculum(&self, subject: &str) -> anyhow::Result<Curriculum> {
        self.begin()?;
        self.curricula
            .get(subject)
            .cloned()
            .ok_or_else(|| StudyError::NotFound(format!("{subject} curriculum")).into())
    }

    async fn module(&self, subject: &str, level: Level, module_id: &str) -> anyhow::Result<Module> {
        self.begin()?;
        self.modules
            .get(&key(subject, level, module_id))
            .cloned()
            .ok_or_else(|| StudyError::NotFound(format!("module {module_id}")).into())
    }

    async fn quiz(&self, subject: &str, level: Level, module_id: &str) -> anyhow::Result<Quiz> {
        self.begin()?;
        self.quizzes
            .get(&key(subject, level, module_id))
            .cloned()
            .ok_or_else(|| StudyError::NotFound(format!("a quiz for module {module_id}")).into())
    }

    async fn flashcards(&self, subject: &str, level: Level) -> anyhow::Result<Vec<Flashcard>> {
        self.begin()?;
        self.flashcards
            .get(&(subject.to_string(), level))
            .cloned()
            .ok_or_else(|| StudyError::NotFound(format!("flashcards for {subject}/{level}")).into())
    }
}

/// A summary service returning a fixed summary, or a fixed failure.
pub struct MockSummaryService {
    response: Result<GeneratedSummary, String>,
    call_count: AtomicU32,
    last_request: Mutex<Option<SummaryRequest>>,
}

impl MockSummaryService {
    pub fn with_summary(summary: GeneratedSummary) -> Self {
        Self {
            response: Ok(summary),
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    pub fn last_request(&self) -> Option<SummaryRequest> {
        self.last_request.lock().ok().and_then(|r| r.clone())
    }
}

#[async_trait]
impl SummaryService for MockSummaryService {
    async fn summarize(&self, request: &SummaryRequest) -> anyhow::Result<GeneratedSummary> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request.clone());
        }
        self.response
            .clone()
            .map_err(|m| StudyError::NotFound(m).into())
    }
}
