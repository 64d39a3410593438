//! Client for the summary-generation backend.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use tracing::instrument;

use studypath_core::error::StudyError;
use studypath_core::summary::{GeneratedSummary, SummaryRequest, SummaryResponse};
use studypath_core::traits::SummaryService;

use crate::http::HttpFetcher;

/// Requests generated summaries with `POST /summarize`.
#[derive(Debug)]
pub struct SummaryClient {
    http: HttpFetcher,
}

impl SummaryClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> anyhow::Result<Self> {
        Ok(Self {
            http: HttpFetcher::new(base_url, timeout)?,
        })
    }
}

#[async_trait]
impl SummaryService for SummaryClient {
    #[instrument(skip(self), fields(module = %request.module_id))]
    async fn summarize(&self, request: &SummaryRequest) -> anyhow::Result<GeneratedSummary> {
        let body = self
            .http
            .post_json("summarize", request)
            .await
            .context("summary request failed")?;
        let response: SummaryResponse = serde_json::from_str(&body)
            .map_err(|e| StudyError::InvalidContent(format!("malformed summary response: {e}")))?;
        Ok(response.into_result()?)
    }
}
