//! REST API Server for the block explorer assistant
//!
//! Exposes the answer resolver via HTTP endpoints

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};
use uuid::Uuid;

use crate::demo::EXAMPLE_QUERIES;
use crate::models::{DateToken, DisplayResult, WalletId};
use crate::resolver::AnswerResolver;

/// =============================
/// Request / Response Models
/// =============================

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct QueryRequest {
    pub query: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QueryOutcome {
    pub request_id: Uuid,
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub wallet: Option<WalletId>,
    pub date: Option<DateToken>,
    pub answer: Option<String>,
    pub score: Option<f32>,
}

impl QueryOutcome {
    pub fn from_result(request_id: Uuid, result: &DisplayResult) -> Self {
        let score = match result {
            DisplayResult::Answered { score, .. } => *score,
            _ => None,
        };

        Self {
            request_id,
            kind: result.kind().to_string(),
            message: result.to_string(),
            wallet: result.wallet().cloned(),
            date: result.date().cloned(),
            answer: result.answer().map(str::to_string),
            score,
        }
    }

    pub fn to_pretty_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub data: Option<serde_json::Value>,
    pub error: Option<String>,
    pub timestamp: String,
}

impl ApiResponse {
    pub fn success<T: Serialize>(data: T) -> Self {
        Self {
            success: true,
            data: serde_json::to_value(data).ok(),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// =============================
/// API State
/// =============================

#[derive(Clone)]
pub struct ApiState {
    pub resolver: Arc<AnswerResolver>,
}

/// =============================
/// Handlers
/// =============================

async fn health(State(state): State<ApiState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "model": state.resolver.model_name(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn examples() -> Json<ApiResponse> {
    Json(ApiResponse::success(EXAMPLE_QUERIES))
}

async fn run_query(
    State(state): State<ApiState>,
    Json(req): Json<QueryRequest>,
) -> (StatusCode, Json<ApiResponse>) {
    let request_id = Uuid::new_v4();
    info!(%request_id, query = %req.query, "Received query");

    match state.resolver.handle_query(&req.query).await {
        Ok(result) => {
            let outcome = QueryOutcome::from_result(request_id, &result);
            (StatusCode::OK, Json(ApiResponse::success(outcome)))
        }
        Err(e) => {
            error!(%request_id, "Query failed: {}", e);
            let status = if e.is_model_failure() {
                StatusCode::BAD_GATEWAY
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (status, Json(ApiResponse::error(format!("Query failed: {}", e))))
        }
    }
}

/// =============================
/// Router
/// =============================

pub fn create_router(resolver: Arc<AnswerResolver>) -> Router {
    let state = ApiState { resolver };

    Router::new()
        .route("/health", get(health))
        .route("/api/examples", get(examples))
        .route("/api/query", post(run_query))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// =============================
/// Server Startup
/// =============================

pub async fn start_server(resolver: Arc<AnswerResolver>, port: u16) -> crate::Result<()> {
    let router = create_router(resolver);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!("API Server listening on http://0.0.0.0:{}", port);
    info!("Local: http://127.0.0.1:{}", port);

    axum::serve(listener, router).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExplorerError;
    use crate::qa::{LexicalQaModel, QaAnswer, QaModel};
    use crate::source::MockTransactionSource;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    struct UnavailableModel;

    #[async_trait::async_trait]
    impl QaModel for UnavailableModel {
        async fn answer(&self, _question: &str, _context: &str) -> crate::Result<QaAnswer> {
            Err(ExplorerError::ModelInvocation("model unavailable".to_string()))
        }

        fn name(&self) -> &str {
            "unavailable"
        }
    }

    fn router_with(model: Arc<dyn QaModel>) -> Router {
        let resolver = AnswerResolver::new(model, Arc::new(MockTransactionSource::new()));
        create_router(Arc::new(resolver))
    }

    async fn post_query(router: Router, query: &str) -> (StatusCode, ApiResponse) {
        let body = serde_json::to_vec(&QueryRequest {
            query: query.to_string(),
        })
        .unwrap();
        let request = Request::builder()
            .method("POST")
            .uri("/api/query")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();

        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_query_answered() {
        let router = router_with(Arc::new(LexicalQaModel::new()));
        let (status, response) = post_query(
            router,
            "How many transactions were made for wallet123 on 2024-07-21?",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(response.success);
        let data = response.data.unwrap();
        assert_eq!(data["type"], "answered");
        assert_eq!(data["wallet"], "wallet123");
        assert_eq!(data["date"], "2024-07-21");
        assert!(data["message"].as_str().unwrap().contains("wallet123"));
        assert!(data["request_id"].is_string());
    }

    #[tokio::test]
    async fn test_query_canned() {
        let router = router_with(Arc::new(LexicalQaModel::new()));
        let (status, response) = post_query(router, "Which wallet made the most transactions?").await;

        assert_eq!(status, StatusCode::OK);
        let data = response.data.unwrap();
        assert_eq!(data["type"], "canned");
        assert_eq!(
            data["message"],
            "The wallet that made the most transactions is wallet123."
        );
        assert!(data["answer"].is_null());
    }

    #[test]
    fn test_outcome_reads_entities_from_result() {
        let result = DisplayResult::NoTransactions {
            wallet: WalletId::new("wallet9"),
            date: DateToken::new("2024-01-01"),
        };
        let outcome = QueryOutcome::from_result(Uuid::new_v4(), &result);
        assert_eq!(outcome.kind, "no_transactions");
        assert_eq!(outcome.wallet, Some(WalletId::new("wallet9")));
        assert_eq!(outcome.date, Some(DateToken::new("2024-01-01")));
        assert!(outcome.answer.is_none());

        let json: serde_json::Value =
            serde_json::from_str(&outcome.to_pretty_json().unwrap()).unwrap();
        assert_eq!(json["type"], "no_transactions");
        assert_eq!(json["wallet"], "wallet9");

        let canned = QueryOutcome::from_result(
            Uuid::new_v4(),
            &DisplayResult::Canned(crate::demo::CannedResponse::TotalAmount),
        );
        assert!(canned.wallet.is_none());
        assert!(canned.date.is_none());
    }

    #[tokio::test]
    async fn test_model_failure_is_bad_gateway() {
        let router = router_with(Arc::new(UnavailableModel));
        let (status, response) = post_query(router, "wallet123 on 2024-07-21").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(!response.success);
        assert!(response.error.unwrap().contains("model unavailable"));
    }

    #[tokio::test]
    async fn test_examples_endpoint() {
        let router = router_with(Arc::new(LexicalQaModel::new()));
        let request = Request::builder()
            .uri("/api/examples")
            .body(Body::empty())
            .unwrap();

        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: ApiResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.data.unwrap().as_array().unwrap().len(), EXAMPLE_QUERIES.len());
    }
}
