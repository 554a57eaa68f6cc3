//! PhishGuard HTTP API
//!
//! Loads the trained URL and email models once at start-up and serves
//! predictions over HTTP.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                    PHISHGUARD API                    │
//! ├──────────────────────────────────────────────────────┤
//! │  ┌───────────┐      ┌──────────────────────────────┐ │
//! │  │  Router   │─────▶│  ModelContext (read-only)    │ │
//! │  │  (Axum)   │      └──────────────────────────────┘ │
//! │  └─────┬─────┘                                       │
//! │        ▼ background task                             │
//! │  ┌──────────────────────────────────────────────┐    │
//! │  │  Prediction log: JSONL files | PostgreSQL    │    │
//! │  └──────────────────────────────────────────────┘    │
//! └──────────────────────────────────────────────────────┘
//! ```

mod config;
mod db;
mod error;
mod handlers;
mod models;
mod sink;

#[cfg(test)]
mod tests;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use phishguard_core::logic::artifacts::ArtifactStore;
use phishguard_core::logic::prediction_log::PredictionLogWriter;
use phishguard_core::ModelContext;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use error::{AppError, AppResult};
use sink::PredictionStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "phishguard_api=debug,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    tracing::info!("PhishGuard API starting ({})...", config.environment);

    // Models are mandatory: refuse to serve without them
    let store = ArtifactStore::new(config.model_dir.clone());
    let ctx = ModelContext::load(&store)
        .with_context(|| format!("loading models from {}", config.model_dir.display()))?;
    tracing::info!("Models loaded from {}", config.model_dir.display());

    let sink = prediction_store(&config).await?;
    tracing::info!("Prediction log: {}", sink.name());

    // Build application state
    let state = AppState {
        ctx: Arc::new(ctx),
        sink,
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

/// Postgres when DATABASE_URL is set, JSONL files otherwise
async fn prediction_store(config: &config::Config) -> anyhow::Result<PredictionStore> {
    if !config.prediction_log_enabled {
        return Ok(PredictionStore::Disabled);
    }

    if let Some(url) = &config.database_url {
        tracing::info!("Database: {}", url.split('@').last().unwrap_or("***"));
        let pool = db::create_pool(url)
            .await
            .context("creating database pool")?;

        tracing::info!("Running database migrations...");
        db::run_migrations(&pool)
            .await
            .context("running migrations")?;
        return Ok(PredictionStore::Postgres(pool));
    }

    if config.is_production() {
        tracing::warn!("DATABASE_URL not set, logging predictions to local files");
    }
    let writer = PredictionLogWriter::from_path(config.prediction_log_dir.clone())
        .with_context(|| format!("opening {}", config.prediction_log_dir.display()))?;
    Ok(PredictionStore::Files(Arc::new(writer)))
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub ctx: Arc<ModelContext>,
    pub sink: PredictionStore,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health::index))
        .route("/health", get(handlers::health::check))
        .route("/api/v1/model", get(handlers::model::info))
        .route("/predict/url", post(handlers::predict::url))
        .route("/predict/email", post(handlers::predict::email))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
