//! Network content source.
//!
//! Talks to a content server exposing:
//! - `GET /topics` → `{topics: [...]}`
//! - `GET /modules/{subject}/{level}` → `{modules: [name, ...]}`
//! - `GET /module/{subject}/{level}/{module}` → module record
//! - `GET /quizzes/{subject}/{level}` → `{easy, medium, hard}` question banks
//! - `GET /flashcards/{subject}/{level}` → `[{front, back}]`

use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use futures::future::try_join_all;
use tracing::instrument;

use studypath_core::model::{
    Curriculum, Flashcard, Level, Module, ModuleRef, ModuleSummary, Quiz,
};
use studypath_core::schema;
use studypath_core::traits::ContentSource;

use crate::http::{is_not_found, HttpFetcher};

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Content source backed by the content server API.
#[derive(Debug)]
pub struct ApiSource {
    http: HttpFetcher,
}

impl ApiSource {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let base = if base_url.is_empty() {
            DEFAULT_BASE_URL
        } else {
            base_url
        };
        Ok(Self {
            http: HttpFetcher::new(base, timeout)?,
        })
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    /// Module list for one level. A level the server does not know is empty.
    async fn level_modules(
        &self,
        subject: &str,
        level: Level,
    ) -> anyhow::Result<(Level, Vec<ModuleSummary>)> {
        match self.http.get_text(&format!("modules/{subject}/{level}")).await {
            Ok(body) => Ok((level, schema::parse_module_names(&body)?)),
            Err(e) if is_not_found(&e) => {
                tracing::debug!("no {level} modules for {subject}");
                Ok((level, Vec::new()))
            }
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl ContentSource for ApiSource {
    fn name(&self) -> &str {
        "api"
    }

    #[instrument(skip(self))]
    async fn subjects(&self) -> anyhow::Result<Vec<String>> {
        let body = self
            .http
            .get_text("topics")
            .await
            .context("failed to list topics")?;
        Ok(schema::parse_topics_str(&body)?)
    }

    #[instrument(skip(self))]
    async fn curriculum(&self, subject: &str) -> anyhow::Result<Curriculum> {
        let levels = try_join_all(Level::ALL.map(|level| self.level_modules(subject, level)))
            .await
            .with_context(|| format!("failed to load {subject} roadmap"))?;
        Ok(Curriculum {
            subject: subject.to_string(),
            levels: levels.into_iter().collect::<BTreeMap<_, _>>(),
        })
    }

    #[instrument(skip(self))]
    async fn module(&self, subject: &str, level: Level, module_id: &str) -> anyhow::Result<Module> {
        let body = self
            .http
            .get_text(&format!("module/{subject}/{level}/{module_id}"))
            .await?;
        Ok(schema::parse_module_str(
            &body,
            &ModuleRef::new(subject, level, module_id),
        )?)
    }

    #[instrument(skip(self))]
    async fn quiz(&self, subject: &str, level: Level, module_id: &str) -> anyhow::Result<Quiz> {
        let body = self
            .http
            .get_text(&format!("quizzes/{subject}/{level}"))
            .await?;
        Ok(schema::parse_quiz_bank_str(&body, level, module_id)?)
    }

    #[instrument(skip(self))]
    async fn flashcards(&self, subject: &str, level: Level) -> anyhow::Result<Vec<Flashcard>> {
        let body = self
            .http
            .get_text(&format!("flashcards/{subject}/{level}"))
            .await?;
        Ok(schema::parse_flashcards_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use studypath_core::error::StudyError;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount_json(server: &MockServer, p: &str, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(p))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn curriculum_fetches_every_level() {
        let server = MockServer::start().await;
        mount_json(
            &server,
            "/modules/ethics/beginner",
            serde_json::json!({"modules": ["fairness", "privacy"]}),
        )
        .await;
        mount_json(
            &server,
            "/modules/ethics/intermediate",
            serde_json::json!({"modules": ["accountability"]}),
        )
        .await;
        // advanced is not mounted: wiremock answers 404

        let source = ApiSource::new(&server.uri(), None).unwrap();
        let c = source.curriculum("ethics").await.unwrap();
        assert_eq!(c.modules(Level::Beginner).len(), 2);
        assert_eq!(c.modules(Level::Beginner)[1].module_id, "privacy");
        assert_eq!(c.modules(Level::Intermediate).len(), 1);
        assert!(c.modules(Level::Advanced).is_empty());
    }

    #[tokio::test]
    async fn curriculum_fails_on_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let source = ApiSource::new(&server.uri(), None).unwrap();
        let err = source.curriculum("ethics").await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StudyError>(),
            Some(StudyError::Http { status: 503, .. })
        ));
    }

    #[tokio::test]
    async fn module_in_plain_shape() {
        let server = MockServer::start().await;
        mount_json(
            &server,
            "/module/ethics/beginner/fairness",
            serde_json::json!({
                "title": "Fairness",
                "content": ["Equal treatment.", "Equal outcomes."],
                "industry_insight": "Regulators care."
            }),
        )
        .await;

        let source = ApiSource::new(&server.uri(), None).unwrap();
        let m = source
            .module("ethics", Level::Beginner, "fairness")
            .await
            .unwrap();
        assert_eq!(m.module_id, "fairness");
        assert_eq!(m.title, "Fairness");
        assert_eq!(m.industry_insight.as_deref(), Some("Regulators care."));
    }

    #[tokio::test]
    async fn quiz_uses_level_difficulty() {
        let server = MockServer::start().await;
        mount_json(
            &server,
            "/quizzes/ethics/advanced",
            serde_json::json!({
                "easy": [{"question": "e?", "options": ["a", "b"], "answer": "a"}],
                "medium": [],
                "hard": [
                    {"question": "h1?", "options": ["x", "y", "z"], "answer": "z"},
                    {"question": "h2?", "options": ["x", "y"], "answer": "x"}
                ]
            }),
        )
        .await;

        let source = ApiSource::new(&server.uri(), None).unwrap();
        let quiz = source
            .quiz("ethics", Level::Advanced, "fairness")
            .await
            .unwrap();
        assert_eq!(quiz.questions.len(), 2);
        assert_eq!(quiz.questions[0].question, "h1?");
        assert_eq!(quiz.questions[0].correct, 2);
    }

    #[tokio::test]
    async fn topics_and_flashcards() {
        let server = MockServer::start().await;
        mount_json(&server, "/topics", serde_json::json!({"topics": ["ethics"]})).await;
        mount_json(
            &server,
            "/flashcards/ethics/beginner",
            serde_json::json!([{"front": "Bias", "back": "Systematic skew"}]),
        )
        .await;

        let source = ApiSource::new(&server.uri(), None).unwrap();
        assert_eq!(source.subjects().await.unwrap(), ["ethics"]);
        let cards = source.flashcards("ethics", Level::Beginner).await.unwrap();
        assert_eq!(cards[0].front, "Bias");
    }

    #[tokio::test]
    async fn missing_module_is_not_found() {
        let server = MockServer::start().await;
        let source = ApiSource::new(&server.uri(), None).unwrap();
        let err = source
            .module("ethics", Level::Beginner, "nope")
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StudyError>(),
            Some(StudyError::NotFound(_))
        ));
    }
}
