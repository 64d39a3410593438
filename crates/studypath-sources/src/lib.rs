//! studypath-sources: where curriculum content comes from.
//!
//! Implements `ContentSource` for the content server API and for static
//! JSON assets (over HTTP or from a local directory), plus the summary
//! backend client and the configuration that picks between them.

pub mod api;
pub mod config;
mod http;
pub mod mock;
pub mod static_source;
pub mod summary;

pub use api::ApiSource;
pub use config::{
    create_source, create_summary_service, load_config, load_config_from, SourceConfig,
    StudypathConfig,
};
pub use mock::{MockSource, MockSummaryService};
pub use static_source::StaticSource;
pub use summary::SummaryClient;
