//! Error taxonomy shared by every studypath crate.
//!
//! Content sources, stores, and the quiz engine all report failures through
//! [`StudyError`] so hosts can classify them without string matching. Trait
//! methods return `anyhow::Result`; callers recover the typed error with
//! `downcast_ref::<StudyError>()`.

use thiserror::Error;

/// Errors that can occur while browsing a curriculum or taking a quiz.
#[derive(Debug, Error)]
pub enum StudyError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with an error status.
    #[error("HTTP error (status {status}): {message}")]
    Http { status: u16, message: String },

    /// A module, quiz, summary, or deck does not exist for the given key.
    #[error("not found: {0}")]
    NotFound(String),

    /// Content exists but does not match any known schema.
    #[error("invalid content: {0}")]
    InvalidContent(String),

    /// A quiz was submitted with questions left blank.
    #[error("please answer all questions ({remaining} remaining)")]
    Unanswered { remaining: usize },

    /// An answer refers to a question or option that does not exist, or the
    /// quiz is not accepting answers.
    #[error("invalid answer: {0}")]
    InvalidAnswer(String),

    /// The selection state lacks a subject, level, or module.
    #[error("no {0} selected")]
    MissingSelection(&'static str),

    /// Reading or writing persisted state failed.
    #[error("storage error: {0}")]
    Storage(String),
}

/// Broad failure classes. Every class is reported the same way (logged and
/// surfaced to the user) and none is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    MissingData,
    Input,
    Storage,
}

impl StudyError {
    /// Classify this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            StudyError::Network(_) | StudyError::Http { .. } => ErrorCategory::Network,
            StudyError::NotFound(_) | StudyError::InvalidContent(_) => ErrorCategory::MissingData,
            StudyError::Unanswered { .. }
            | StudyError::InvalidAnswer(_)
            | StudyError::MissingSelection(_) => ErrorCategory::Input,
            StudyError::Storage(_) => ErrorCategory::Storage,
        }
    }

    /// The blocking message shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            StudyError::Unanswered { remaining } => {
                format!("Please answer all questions! ({remaining} remaining)")
            }
            StudyError::MissingSelection(what) => {
                format!("No {what} selected. Pick one from the roadmap first.")
            }
            StudyError::NotFound(what) => format!("Could not find {what}."),
            other => format!("Something went wrong: {other}"),
        }
    }
}

/// Classify an `anyhow` error, treating anything untyped as a network failure.
pub fn categorize(err: &anyhow::Error) -> ErrorCategory {
    err.downcast_ref::<StudyError>()
        .map(StudyError::category)
        .unwrap_or(ErrorCategory::Network)
}
