mod auth;
mod config;
mod db;
mod errors;
mod llm_client;
mod models;
mod pipeline;
mod resume;
mod routes;
mod shortlist;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::LlmClient;
use crate::pipeline::embedder::CohereEmbedder;
use crate::pipeline::generator::ClaudeGenerator;
use crate::pipeline::QaPipeline;
use crate::routes::build_router;
use crate::shortlist::scoring::DeclinedPrefixClassifier;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Sift API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize embedding backend
    let embedder = Arc::new(CohereEmbedder::new(config.cohere_api_key.clone()));
    info!(
        "Embedding client initialized (model: {})",
        pipeline::embedder::EMBED_MODEL
    );

    // Initialize generation backend
    let llm = LlmClient::new(config.anthropic_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);
    let generator = Arc::new(ClaudeGenerator::new(llm));

    // Assemble the QA pipeline (chunking/retrieval tunables from config)
    let qa_pipeline = QaPipeline::new(embedder, generator, config.pipeline.clone());

    // Build app state
    let state = AppState {
        db,
        pipeline: qa_pipeline,
        classifier: Arc::new(DeclinedPrefixClassifier),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
