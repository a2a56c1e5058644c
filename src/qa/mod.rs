//! Question-answering model capability
//!
//! The resolver only knows `question, context -> answer span`. Backends are
//! chosen once at startup and shared read-only for the life of the process.

use crate::config::{QaBackend, QaConfig};
use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

pub mod huggingface;
pub mod lexical;
pub use huggingface::HuggingFaceQaModel;
pub use lexical::LexicalQaModel;

/// Answer span extracted from a context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaAnswer {
    pub answer: String,
    #[serde(default)]
    pub score: Option<f32>,
    #[serde(default)]
    pub start: Option<usize>,
    #[serde(default)]
    pub end: Option<usize>,
}

/// Extractive question answering over a plain-text context
#[async_trait]
pub trait QaModel: Send + Sync {
    /// Return the best-matching span of `context` for `question`.
    ///
    /// Any failure is reported as `ExplorerError::ModelInvocation`.
    async fn answer(&self, question: &str, context: &str) -> Result<QaAnswer>;

    fn name(&self) -> &str;
}

/// Load the configured model
pub fn create_model(config: &QaConfig) -> Result<Arc<dyn QaModel>> {
    let model: Arc<dyn QaModel> = match config.backend {
        QaBackend::Lexical => Arc::new(LexicalQaModel::new()),
        QaBackend::HuggingFace => Arc::new(HuggingFaceQaModel::new(config)?),
    };

    info!(backend = %config.backend, model = model.name(), "QA model ready");
    Ok(model)
}
