//! Dashboard Bundle Server
//!
//! Serves the built browser dashboard so it can be opened from one origin.
//!
//! # Endpoints
//!
//! - `GET /health/live` - Liveness probe
//! - `GET /health` - Status and version
//! - anything else - a file from the bundle directory, or `index.html`
//!   for unknown paths so client-side routes survive a reload

use axum::{http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use std::path::Path;
use thiserror::Error;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::config::ServeConfig;

#[derive(Error, Debug)]
pub enum ServeError {
    #[error("Bundle directory not found: {0}")]
    MissingBundle(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// GET /health/live
async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Build the router serving `dist_dir`
pub fn build_router(dist_dir: &Path) -> Router {
    let bundle = ServeDir::new(dist_dir).fallback(ServeFile::new(dist_dir.join("index.html")));

    let health_routes = Router::new()
        .route("/live", get(liveness))
        .route("/", get(health));

    Router::new()
        .nest("/health", health_routes)
        .fallback_service(bundle)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Serve the bundle until a shutdown signal arrives
pub async fn serve(config: &ServeConfig) -> Result<(), ServeError> {
    if !config.dist_dir.is_dir() {
        return Err(ServeError::MissingBundle(config.dist_dir.display().to_string()));
    }

    let router = build_router(&config.dist_dir);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(addr = %addr, dist_dir = %config.dist_dir.display(), "dashboard listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("dashboard server shut down gracefully");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
