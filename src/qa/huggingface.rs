//! Hosted question-answering via the Hugging Face inference API
//!
//! Uses a long-lived reqwest::Client for connection pooling.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, info};

use crate::config::QaConfig;
use crate::error::ExplorerError;
use crate::qa::{QaAnswer, QaModel};
use crate::Result;

/// Reusable inference client (connection-pooled)
pub struct HuggingFaceQaModel {
    client: Client,
    api_token: Option<String>,
    endpoint: String,
    model: String,
}

impl HuggingFaceQaModel {
    pub fn new(config: &QaConfig) -> Result<Self> {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(8)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                ExplorerError::ModelInvocation(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            api_token: config.api_token.clone(),
            endpoint: config.endpoint(),
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl QaModel for HuggingFaceQaModel {
    async fn answer(&self, question: &str, context: &str) -> Result<QaAnswer> {
        if context.trim().is_empty() {
            return Err(ExplorerError::ModelInvocation(
                "Context is empty, nothing to answer from".to_string(),
            ));
        }

        let request = QaRequest {
            inputs: QaInputs { question, context },
        };

        let mut builder = self.client.post(&self.endpoint).json(&request);
        if let Some(token) = &self.api_token {
            builder = builder.bearer_auth(token);
        }

        info!(model = %self.model, "Calling hosted QA model");

        let response = builder.send().await.map_err(|e| {
            error!("QA inference request failed: {}", e);
            ExplorerError::ModelInvocation(format!("QA inference request failed: {}", e))
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            ExplorerError::ModelInvocation(format!("Failed to read QA response: {}", e))
        })?;

        if !status.is_success() {
            error!(%status, "QA inference error response: {}", body);
            return Err(ExplorerError::ModelInvocation(format!(
                "QA inference returned {}: {}",
                status, body
            )));
        }

        let answer = parse_response(&body)?;
        info!("QA answer received (score: {:?})", answer.score);
        Ok(answer)
    }

    fn name(&self) -> &str {
        &self.model
    }
}

#[derive(Debug, Serialize)]
struct QaRequest<'a> {
    inputs: QaInputs<'a>,
}

#[derive(Debug, Serialize)]
struct QaInputs<'a> {
    question: &'a str,
    context: &'a str,
}

/// The endpoint answers with one object, a ranked list, or an error payload
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum QaResponse {
    Single(QaAnswer),
    Ranked(Vec<QaAnswer>),
    Failure { error: String },
}

fn parse_response(body: &str) -> Result<QaAnswer> {
    let parsed: QaResponse = serde_json::from_str(body).map_err(|e| {
        error!("Failed to parse QA response: {}", e);
        ExplorerError::ModelInvocation(format!("QA response parse error: {}", e))
    })?;

    match parsed {
        QaResponse::Single(answer) => Ok(answer),
        QaResponse::Ranked(answers) => answers.into_iter().next().ok_or_else(|| {
            ExplorerError::ModelInvocation("QA model returned no answers".to_string())
        }),
        QaResponse::Failure { error } => Err(ExplorerError::ModelInvocation(error)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let request = QaRequest {
            inputs: QaInputs {
                question: "Which transaction had amount 150?",
                context: "Transaction tx3 with amount 150.",
            },
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["inputs"]["question"], "Which transaction had amount 150?");
        assert_eq!(json["inputs"]["context"], "Transaction tx3 with amount 150.");
    }

    #[test]
    fn test_parse_single_answer() {
        let answer =
            parse_response(r#"{"score":0.93,"start":12,"end":15,"answer":"tx3"}"#).unwrap();
        assert_eq!(answer.answer, "tx3");
        assert_eq!(answer.start, Some(12));
    }

    #[test]
    fn test_parse_ranked_answers() {
        let answer = parse_response(
            r#"[{"score":0.8,"start":0,"end":3,"answer":"tx1"},{"score":0.1,"start":4,"end":7,"answer":"tx2"}]"#,
        )
        .unwrap();
        assert_eq!(answer.answer, "tx1");

        assert!(parse_response("[]").unwrap_err().is_model_failure());
    }

    #[test]
    fn test_parse_failures() {
        let loading = parse_response(r#"{"error":"Model is currently loading"}"#).unwrap_err();
        assert!(loading.to_string().contains("currently loading"));

        assert!(parse_response("<html>").unwrap_err().is_model_failure());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_model_error() {
        let config = QaConfig {
            api_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 2,
            ..QaConfig::default()
        };
        let model = HuggingFaceQaModel::new(&config).unwrap();

        let err = model.answer("q", "some context").await.unwrap_err();
        assert!(err.is_model_failure());
    }
}
