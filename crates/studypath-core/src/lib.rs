//! studypath-core: curriculum model, quiz engine, and progression tracking.
//!
//! This crate defines the canonical data model, the legacy-schema adapter,
//! the traits that content sources and stores implement, and the quiz and
//! progression logic the rest of studypath builds on.

pub mod error;
pub mod flashcards;
pub mod model;
pub mod progress;
pub mod progression;
pub mod quiz;
pub mod schema;
pub mod selection;
pub mod storage;
pub mod summary;
pub mod traits;
pub mod validate;
