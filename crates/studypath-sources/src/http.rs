//! Shared HTTP plumbing for the network-backed sources.

use std::time::Duration;

use anyhow::Context;
use serde::Serialize;

use studypath_core::error::StudyError;

/// Build a client. Without a timeout, requests wait until the server
/// answers or the connection fails.
pub(crate) fn build_client(timeout: Option<Duration>) -> anyhow::Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder();
    if let Some(t) = timeout {
        builder = builder.timeout(t);
    }
    builder.build().context("failed to build HTTP client")
}

/// A base URL plus a client; paths are joined onto the base.
#[derive(Clone)]
pub(crate) struct HttpFetcher {
    base_url: String,
    client: reqwest::Client,
}

impl HttpFetcher {
    pub(crate) fn new(base_url: &str, timeout: Option<Duration>) -> anyhow::Result<Self> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: build_client(timeout)?,
        })
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GET a path and return the body text.
    pub(crate) async fn get_text(&self, path: &str) -> anyhow::Result<String> {
        let url = self.url(path);
        tracing::debug!("GET {url}");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| network_error(&self.base_url, e))?;
        read_body(response, path).await
    }

    /// POST a JSON body to a path and return the response text.
    pub(crate) async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> anyhow::Result<String> {
        let url = self.url(path);
        tracing::debug!("POST {url}");
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| network_error(&self.base_url, e))?;
        read_body(response, path).await
    }
}

impl std::fmt::Debug for HttpFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpFetcher")
            .field("base_url", &self.base_url)
            .finish()
    }
}

fn network_error(base_url: &str, e: reqwest::Error) -> StudyError {
    if e.is_timeout() {
        StudyError::Network(format!("request to {base_url} timed out"))
    } else if e.is_connect() {
        StudyError::Network(format!(
            "content server not reachable at {base_url}. Is it running?"
        ))
    } else {
        StudyError::Network(e.to_string())
    }
}

async fn read_body(response: reqwest::Response, path: &str) -> anyhow::Result<String> {
    let status = response.status().as_u16();
    if status == 404 {
        return Err(StudyError::NotFound(path.trim_start_matches('/').to_string()).into());
    }
    if status >= 400 {
        let body = response.text().await.unwrap_or_default();
        return Err(StudyError::Http {
            status,
            message: body,
        }
        .into());
    }
    response
        .text()
        .await
        .map_err(|e| StudyError::Network(format!("failed to read response body: {e}")).into())
}

/// Whether an error is a missing-resource error.
pub(crate) fn is_not_found(e: &anyhow::Error) -> bool {
    matches!(e.downcast_ref::<StudyError>(), Some(StudyError::NotFound(_)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn status_codes_map_to_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/broken"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(&format!("{}/", server.uri()), None).unwrap();
        let err = fetcher.get_text("/missing").await.unwrap_err();
        assert!(is_not_found(&err));

        let err = fetcher.get_text("broken").await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StudyError>(),
            Some(StudyError::Http { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn unreachable_server_is_network_error() {
        let fetcher = HttpFetcher::new("http://127.0.0.1:1", None).unwrap();
        let err = fetcher.get_text("topics").await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StudyError>(),
            Some(StudyError::Network(_))
        ));
    }
}
