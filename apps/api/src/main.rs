mod config;
mod errors;
mod layout;
mod llm_client;
mod render;
mod resume;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{prompts::load_rules, LlmClient};
use crate::render::ResumeRenderer;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed numeric values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ATS Optimizer API v{}", env!("CARGO_PKG_VERSION"));

    // Writing rules are read once; a missing file only degrades the prompt
    let rules = load_rules(&config.rules_path);

    let llm = LlmClient::new(&rules, Duration::from_secs(config.llm_timeout_secs))
        .context("Failed to build HTTP client")?;
    info!(timeout_secs = config.llm_timeout_secs, "LLM client initialized");

    let renderer = ResumeRenderer::from_font_name(&config.resume_font);
    info!(font = ?renderer.page_config().font, "Resume renderer initialized");

    let state = AppState {
        optimizer: Arc::new(llm),
        renderer: Arc::new(renderer),
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
