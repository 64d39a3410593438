//! Configuration and source factory.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use studypath_core::traits::{ContentSource, SummaryService};

use crate::api::ApiSource;
use crate::static_source::StaticSource;
use crate::summary::SummaryClient;

/// Where curriculum content comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SourceConfig {
    /// The content server API.
    Api {
        #[serde(default = "default_api_url")]
        base_url: String,
    },
    /// Static JSON assets served over HTTP.
    Static { base_url: String },
    /// Static JSON assets in a local directory.
    Directory { path: PathBuf },
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::Api {
            base_url: default_api_url(),
        }
    }
}

fn default_api_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

/// Top-level studypath configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudypathConfig {
    #[serde(default)]
    pub source: SourceConfig,
    /// Base URL of the summary backend. Dynamic summaries are unavailable
    /// without it.
    #[serde(default)]
    pub summary_url: Option<String>,
    /// File holding selection and progress.
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
    /// Request timeout. Fetches wait indefinitely when unset.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Subjects offered by static sources.
    #[serde(default = "default_subjects")]
    pub subjects: Vec<String>,
}

fn default_store_path() -> PathBuf {
    PathBuf::from("./.studypath/storage.json")
}
fn default_subjects() -> Vec<String> {
    ["mathematics", "aiml", "programming_c"]
        .map(String::from)
        .to_vec()
}

impl Default for StudypathConfig {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            summary_url: None,
            store_path: default_store_path(),
            timeout_secs: None,
            subjects: default_subjects(),
        }
    }
}

impl StudypathConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// One left-to-right pass: substituted values are copied as-is and never
/// scanned again. An unterminated `${` is kept literally.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start + 2..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + 2 + len];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + 2 + len + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_source_config(config: &SourceConfig) -> SourceConfig {
    match config {
        SourceConfig::Api { base_url } => SourceConfig::Api {
            base_url: resolve_env_vars(base_url),
        },
        SourceConfig::Static { base_url } => SourceConfig::Static {
            base_url: resolve_env_vars(base_url),
        },
        SourceConfig::Directory { path } => SourceConfig::Directory {
            path: PathBuf::from(resolve_env_vars(&path.to_string_lossy())),
        },
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `studypath.toml` in the current directory
/// 2. `~/.config/studypath/config.toml`
///
/// Environment variable overrides: `STUDYPATH_API_URL`, `STUDYPATH_SUMMARY_URL`.
pub fn load_config() -> Result<StudypathConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<StudypathConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("studypath.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => StudypathConfig::default(),
    };

    apply_env_overrides(&mut config);
    Ok(config)
}

fn parse_config(content: &str) -> Result<StudypathConfig> {
    let mut config: StudypathConfig = toml::from_str(content)?;
    config.source = resolve_source_config(&config.source);
    config.summary_url = config.summary_url.as_deref().map(resolve_env_vars);
    config.store_path = PathBuf::from(resolve_env_vars(&config.store_path.to_string_lossy()));
    Ok(config)
}

fn apply_env_overrides(config: &mut StudypathConfig) {
    if let Ok(url) = std::env::var("STUDYPATH_API_URL") {
        config.source = match std::mem::take(&mut config.source) {
            SourceConfig::Static { .. } => SourceConfig::Static { base_url: url },
            // A URL override turns a local directory into the API source.
            SourceConfig::Api { .. } | SourceConfig::Directory { .. } => {
                SourceConfig::Api { base_url: url }
            }
        };
    }
    if let Ok(url) = std::env::var("STUDYPATH_SUMMARY_URL") {
        config.summary_url = Some(url);
    }
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("studypath"))
}

/// Create the content source described by the configuration.
pub fn create_source(config: &StudypathConfig) -> Result<Arc<dyn ContentSource>> {
    let timeout = config.timeout();
    let source: Arc<dyn ContentSource> = match &config.source {
        SourceConfig::Api { base_url } => Arc::new(ApiSource::new(base_url, timeout)?),
        SourceConfig::Static { base_url } => Arc::new(StaticSource::http(
            base_url,
            config.subjects.clone(),
            timeout,
        )?),
        SourceConfig::Directory { path } => {
            if !path.is_dir() {
                anyhow::bail!("content directory not found: {}", path.display());
            }
            Arc::new(StaticSource::directory(path.clone(), config.subjects.clone()))
        }
    };
    tracing::debug!("using {} content source", source.name());
    Ok(source)
}

/// Create the summary backend client, if one is configured.
pub fn create_summary_service(
    config: &StudypathConfig,
) -> Result<Option<Arc<dyn SummaryService>>> {
    match config.summary_url.as_deref().filter(|u| !u.trim().is_empty()) {
        Some(url) => Ok(Some(Arc::new(SummaryClient::new(url, config.timeout())?))),
        None => Ok(None),
    }
}
