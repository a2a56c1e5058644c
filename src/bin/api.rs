use block_explorer_assistant::{
    api::start_server,
    qa::create_model,
    source::MockTransactionSource,
    AnswerResolver, ExplorerConfig,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ExplorerConfig::from_env()?;

    info!("🔍 Block Explorer Assistant - API Server");
    info!("📍 Port: {}", config.port);
    info!("🧠 QA backend: {}", config.qa.backend);

    // Model is loaded once and shared read-only
    let model = create_model(&config.qa)?;
    let source = Arc::new(MockTransactionSource::new());
    let resolver = Arc::new(AnswerResolver::new(model, source));

    info!("✅ Resolver initialized");
    info!("📡 Starting API server...");

    start_server(resolver, config.port).await?;

    Ok(())
}
