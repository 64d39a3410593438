//! Static-asset content source.
//!
//! Reads the pre-built JSON files a static site would serve, either over
//! HTTP or straight from a directory on disk:
//!
//! ```text
//! {subject}_curriculum.json
//! modules/{subject}/{level}/{module_id}.json   (optional)
//! quizzes/{subject}_quizzes.json
//! {subject}/{level}/flashcards.json
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use tracing::instrument;

use studypath_core::error::StudyError;
use studypath_core::model::{Curriculum, Flashcard, Level, Module, ModuleRef, Quiz};
use studypath_core::schema;
use studypath_core::traits::ContentSource;

use crate::http::{is_not_found, HttpFetcher};

const CURRICULUM_SUFFIX: &str = "_curriculum.json";

#[derive(Debug)]
enum Backend {
    Http(HttpFetcher),
    Directory(PathBuf),
}

/// Content source over static JSON assets.
#[derive(Debug)]
pub struct StaticSource {
    backend: Backend,
    subjects: Vec<String>,
}

impl StaticSource {
    /// Serve assets from a static web root. `subjects` lists the curricula
    /// available, since a static server cannot be asked for a listing.
    pub fn http(
        base_url: &str,
        subjects: Vec<String>,
        timeout: Option<Duration>,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            backend: Backend::Http(HttpFetcher::new(base_url, timeout)?),
            subjects,
        })
    }

    /// Read assets from a local directory. Only subjects with a
    /// `*_curriculum.json` file are listed; an empty `subjects` lists them all.
    pub fn directory(root: impl Into<PathBuf>, subjects: Vec<String>) -> Self {
        Self {
            backend: Backend::Directory(root.into()),
            subjects,
        }
    }

    async fn read(&self, rel: &str) -> anyhow::Result<String> {
        match &self.backend {
            Backend::Http(http) => http.get_text(rel).await,
            Backend::Directory(root) => read_file(root, rel).await,
        }
    }

    async fn curriculum_text(&self, subject: &str) -> anyhow::Result<String> {
        self.read(&format!("{subject}{CURRICULUM_SUFFIX}")).await
    }
}

async fn read_file(root: &Path, rel: &str) -> anyhow::Result<String> {
    let path = root.join(rel);
    tracing::debug!("reading {}", path.display());
    match tokio::fs::read_to_string(&path).await {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(StudyError::NotFound(rel.to_string()).into())
        }
        Err(e) => Err(e).with_context(|| format!("failed to read {}", path.display())),
    }
}

async fn discover_subjects(root: &Path) -> anyhow::Result<Vec<String>> {
    let mut subjects = Vec::new();
    let mut entries = tokio::fs::read_dir(root)
        .await
        .with_context(|| format!("failed to read directory: {}", root.display()))?;
    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name();
        if let Some(subject) = name.to_str().and_then(|n| n.strip_suffix(CURRICULUM_SUFFIX)) {
            subjects.push(subject.to_string());
        }
    }
    subjects.sort();
    Ok(subjects)
}

#[async_trait]
impl ContentSource for StaticSource {
    fn name(&self) -> &str {
        match self.backend {
            Backend::Http(_) => "static",
            Backend::Directory(_) => "directory",
        }
    }

    async fn subjects(&self) -> anyhow::Result<Vec<String>> {
        let root = match &self.backend {
            Backend::Http(_) => return Ok(self.subjects.clone()),
            Backend::Directory(root) => root,
        };
        let present = discover_subjects(root).await?;
        if self.subjects.is_empty() {
            return Ok(present);
        }
        Ok(self
            .subjects
            .iter()
            .filter(|s| present.contains(s))
            .cloned()
            .collect())
    }

    #[instrument(skip(self))]
    async fn curriculum(&self, subject: &str) -> anyhow::Result<Curriculum> {
        let body = self.curriculum_text(subject).await?;
        Ok(schema::parse_curriculum_str(&body, subject)?)
    }

    /// Module lookup tries the per-module file first and falls back to the
    /// full record inside the curriculum file.
    #[instrument(skip(self))]
    async fn module(&self, subject: &str, level: Level, module_id: &str) -> anyhow::Result<Module> {
        let hint = ModuleRef::new(subject, level, module_id);
        match self
            .read(&format!("modules/{subject}/{level}/{module_id}.json"))
            .await
        {
            Ok(body) => return Ok(schema::parse_module_str(&body, &hint)?),
            Err(e) if is_not_found(&e) => {
                tracing::debug!("no module file for {hint}, searching curriculum");
            }
            Err(e) => return Err(e),
        }

        let body = self.curriculum_text(subject).await?;
        schema::find_module_in_curriculum_str(&body, &hint)?
            .ok_or_else(|| StudyError::NotFound(format!("module {hint}")).into())
    }

    #[instrument(skip(self))]
    async fn quiz(&self, subject: &str, level: Level, module_id: &str) -> anyhow::Result<Quiz> {
        let body = self.read(&format!("quizzes/{subject}_quizzes.json")).await?;
        schema::parse_quiz_file_str(&body)?
            .remove(module_id)
            .ok_or_else(|| StudyError::NotFound(format!("a quiz for module {module_id}")).into())
    }

    #[instrument(skip(self))]
    async fn flashcards(&self, subject: &str, level: Level) -> anyhow::Result<Vec<Flashcard>> {
        let body = self
            .read(&format!("{subject}/{level}/flashcards.json"))
            .await?;
        Ok(schema::parse_flashcards_str(&body)?)
    }
}
