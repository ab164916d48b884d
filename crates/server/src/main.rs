use std::sync::Arc;

use crew::{OpenAIProvider, WritingFlow};
use server::{AppState, ServerConfig, routes};
use tracing_subscriber::{EnvFilter, prelude::*};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from `.env` if present so local development picks up API keys
    dotenv::dotenv().ok();

    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let filter_string = format!(
        "warn,server={level},crew={level},utils={level}",
        level = log_level
    );
    let env_filter = EnvFilter::try_new(filter_string)?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_filter(env_filter))
        .init();

    let config = ServerConfig::from_env();

    if config.crew.api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY not set - completion calls will fail until it is configured");
    }
    match &config.content_root {
        Some(root) => tracing::info!("Raw content root: {}", root.display()),
        None => tracing::info!("CONTENT_RAW_DIR not set - folder listing disabled"),
    }

    let provider = OpenAIProvider::with_endpoint(config.crew.api_key.clone(), config.crew.endpoint.clone());
    let flow = WritingFlow::new(Arc::new(provider), config.crew.clone());
    let app_router = routes::router(AppState::new(flow, config.content_root.clone()));

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;
    let actual_port = listener.local_addr()?.port();

    tracing::info!("Server running on http://{}:{actual_port}", config.host);

    axum::serve(listener, app_router).await?;
    Ok(())
}
