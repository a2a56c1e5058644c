//! Block Explorer Assistant
//!
//! Answers natural-language questions about wallet transactions:
//! - Extracts a wallet identifier and a date from the query
//! - Looks up transactions from a (mock) transaction source
//! - Serializes them into a plain-text context
//! - Asks an extractive question-answering model for the answer span
//!
//! PIPELINE:
//! QUERY → EXTRACT → LOOKUP → CONTEXT → QA MODEL → DISPLAY

pub mod api;
pub mod config;
pub mod context;
pub mod demo;
pub mod error;
pub mod extractor;
pub mod models;
pub mod qa;
pub mod resolver;
pub mod source;

pub use error::{ExplorerError, Result};

// Re-export common types
pub use config::{ExplorerConfig, QaBackend};
pub use extractor::EntityExtractor;
pub use models::*;
pub use resolver::AnswerResolver;
