mod bias;
mod config;
mod critique;
mod db;
mod errors;
mod extract;
mod llm_client;
mod matching;
mod models;
mod routes;
mod screening;
mod scoring;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::bias::redact::Redactor;
use crate::config::Config;
use crate::db::{create_pool, ensure_schema};
use crate::llm_client::LlmClient;
use crate::matching::embedder::HttpEmbedder;
use crate::routes::build_router;
use crate::scoring::model::SuitabilityModel;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting resume screening API v{}",
        env!("CARGO_PKG_VERSION")
    );

    // Initialize PostgreSQL and the two stores
    let db = create_pool(&config.database_url).await?;
    ensure_schema(&db).await?;

    // Initialize LLM client for the critique engine
    let llm = LlmClient::new(config.anthropic_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Initialize embedding backend for the skill matcher
    let embedder = Arc::new(HttpEmbedder::new(
        config.embeddings_api_url.clone(),
        config.embeddings_api_key.clone(),
        config.embeddings_model.clone(),
    ));
    info!(
        "Embedding client initialized (model: {})",
        config.embeddings_model
    );

    // Load persisted model state; a missing file means fallback mode
    let model = SuitabilityModel::load(&config.model_state_path);
    info!(
        "Suitability model mode: {}",
        if model.is_trained() {
            "trained"
        } else {
            "rule-based fallback"
        }
    );

    let redactor = Redactor::new(&config.sensitive_keywords)?;

    let state = AppState {
        db,
        llm,
        embedder,
        model: Arc::new(RwLock::new(model)),
        redactor: Arc::new(redactor),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
