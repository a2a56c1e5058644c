//! Configuration for the block explorer assistant
//!
//! Read from the process environment (after `.env` has been loaded by the
//! binaries).

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;

use crate::error::ExplorerError;
use crate::Result;

pub const DEFAULT_QA_MODEL: &str = "distilbert-base-cased-distilled-squad";
pub const DEFAULT_QA_API_URL: &str = "https://api-inference.huggingface.co/models";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_PORT: u16 = 8080;

/// Which question-answering model serves the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QaBackend {
    /// Offline term-overlap span picker
    Lexical,
    /// Hosted Hugging Face inference endpoint
    HuggingFace,
}

impl FromStr for QaBackend {
    type Err = ExplorerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "lexical" | "local" => Ok(QaBackend::Lexical),
            "huggingface" | "hf" => Ok(QaBackend::HuggingFace),
            other => Err(ExplorerError::Config(format!(
                "Unknown QA backend: {} (expected lexical or huggingface)",
                other
            ))),
        }
    }
}

impl fmt::Display for QaBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            QaBackend::Lexical => "lexical",
            QaBackend::HuggingFace => "huggingface",
        };
        write!(f, "{}", s)
    }
}

/// Question-answering model settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QaConfig {
    pub backend: QaBackend,
    pub model: String,
    pub api_url: String,
    /// Bearer token for the hosted endpoint; anonymous calls when absent
    #[serde(skip_serializing)]
    pub api_token: Option<String>,
    pub timeout_secs: u64,
}

impl Default for QaConfig {
    fn default() -> Self {
        Self {
            backend: QaBackend::Lexical,
            model: DEFAULT_QA_MODEL.to_string(),
            api_url: DEFAULT_QA_API_URL.to_string(),
            api_token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl QaConfig {
    /// Full inference URL for the configured model
    pub fn endpoint(&self) -> String {
        format!("{}/{}", self.api_url.trim_end_matches('/'), self.model)
    }
}

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorerConfig {
    pub qa: QaConfig,
    pub port: u16,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            qa: QaConfig::default(),
            port: DEFAULT_PORT,
        }
    }
}

impl ExplorerConfig {
    /// Build configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let backend = match non_empty("QA_BACKEND") {
            Some(value) => value.parse()?,
            None => defaults.qa.backend,
        };

        let timeout_secs = match non_empty("QA_TIMEOUT_SECS") {
            Some(value) => value.trim().parse().map_err(|_| {
                ExplorerError::Config(format!("QA_TIMEOUT_SECS must be an integer, got {}", value))
            })?,
            None => defaults.qa.timeout_secs,
        };

        let port = match non_empty("PORT").or_else(|| non_empty("API_PORT")) {
            Some(value) => value.trim().parse().map_err(|_| {
                ExplorerError::Config(format!("PORT must be a valid port number, got {}", value))
            })?,
            None => defaults.port,
        };

        Ok(Self {
            qa: QaConfig {
                backend,
                model: non_empty("QA_MODEL").unwrap_or(defaults.qa.model),
                api_url: non_empty("QA_API_URL").unwrap_or(defaults.qa.api_url),
                api_token: non_empty("HF_API_TOKEN"),
                timeout_secs,
            },
            port,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ExplorerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.qa.backend, QaBackend::Lexical);
        assert_eq!(config.qa.model, DEFAULT_QA_MODEL);
        assert_eq!(config.port, 8080);
        assert!(config.qa.api_token.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = ExplorerConfig::from_lookup(lookup(&[
            ("QA_BACKEND", "HuggingFace"),
            ("QA_API_URL", "http://localhost:9000/models/"),
            ("QA_MODEL", "deepset/roberta-base-squad2"),
            ("HF_API_TOKEN", "hf_test"),
            ("API_PORT", "3000"),
        ]))
        .unwrap();

        assert_eq!(config.qa.backend, QaBackend::HuggingFace);
        assert_eq!(
            config.qa.endpoint(),
            "http://localhost:9000/models/deepset/roberta-base-squad2"
        );
        assert_eq!(config.qa.api_token.as_deref(), Some("hf_test"));
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_invalid_values() {
        let bad_backend = ExplorerConfig::from_lookup(lookup(&[("QA_BACKEND", "gpt")]));
        assert!(matches!(bad_backend, Err(ExplorerError::Config(_))));

        let bad_port = ExplorerConfig::from_lookup(lookup(&[("PORT", "eighty")]));
        assert!(matches!(bad_port, Err(ExplorerError::Config(_))));
    }
}
