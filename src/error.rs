//! Error types for the block explorer assistant

use thiserror::Error;

/// Result type alias for explorer operations
pub type Result<T> = std::result::Result<T, ExplorerError>;

#[derive(Error, Debug)]
pub enum ExplorerError {

    // =============================
    // Pipeline Errors
    // =============================

    /// The question-answering model failed to load or to answer.
    #[error("Model invocation error: {0}")]
    ModelInvocation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    // =============================
    // External Library Conversions
    // =============================

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExplorerError {
    pub fn is_model_failure(&self) -> bool {
        matches!(self, ExplorerError::ModelInvocation(_))
    }
}
