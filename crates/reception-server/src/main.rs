//! Hospital Reception HTTP Server
//!
//! Axum-based server hosting the chat widget and the `/ask-reception`
//! endpoint it talks to.

mod config;
mod data;
mod error;
mod handlers;
mod intent;
mod responder;
mod state;
mod tool;
mod tools;

use std::{path::Path, sync::Arc};

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reception_core::wire::ASK_ENDPOINT;

use crate::config::ServerConfig;
use crate::data::HospitalData;
use crate::handlers::{ask_reception, health_check};
use crate::responder::{DirectoryResponder, OllamaResponder, Responder};
use crate::state::{AppState, HealthStatus};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();

    let data = Arc::new(HospitalData::load(&config.data_dir)?);
    tracing::info!(
        "✓ Loaded hospital records from {}: {} hospitals, {} departments, {} doctors, {} patients",
        config.data_dir.display(),
        data.hospital_count(),
        data.departments().len(),
        data.doctors().len(),
        data.patients().len()
    );

    let ollama = OllamaResponder::from_config(&config.ollama);
    let model = ollama.model().to_owned();
    let directory = DirectoryResponder::new(data).with_fallback(Arc::new(ollama));
    tracing::info!("✓ {} record tools registered", directory.tools().len());
    let responder: Arc<dyn Responder> = Arc::new(directory);

    let health = HealthStatus::new(false);
    if health.refresh(responder.as_ref(), config.health_timeout()).await {
        tracing::info!("✓ Connected to Ollama (model: {})", model);
    } else {
        tracing::warn!("⚠ Ollama not available - only record questions will be answered");
        tracing::warn!("  Make sure Ollama is running: ollama serve");
    }
    health.spawn_monitor(
        Arc::clone(&responder),
        config.health_interval(),
        config.health_timeout(),
    );

    let state = AppState { responder, health };
    let app = build_router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🏥 Reception assistant running on http://{}", config.bind_addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("Endpoints:");
    tracing::info!("  POST {}  - Send a query to the assistant", ASK_ENDPOINT);
    tracing::info!("  GET  /health         - Health check");
    tracing::info!("  GET  /               - Chat widget ({})", config.static_dir.display());

    axum::serve(listener, app).await?;

    Ok(())
}

fn build_router(state: AppState, static_dir: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route(ASK_ENDPOINT, post(ask_reception))
        // Static files (WASM widget)
        .fallback_service(ServeDir::new(static_dir))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
