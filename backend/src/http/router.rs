//! Router configuration for the HTTP server.
//!
//! This module sets up the form pages, the JSON API and the middleware
//! (CORS, compression, tracing), producing an axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;
use crate::config::AppConfig;

/// Form submissions and JSON bodies are a handful of short fields.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        .route("/schedule", post(handlers::compute_schedule))
        .route("/reports/{format}", post(handlers::download_report));

    Router::new()
        .route("/", get(handlers::index))
        .route("/calculate", post(handlers::calculate))
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Bind the configured `host:port`.
///
/// The host is resolved rather than parsed, so names such as `localhost`
/// work as well as IP literals.
pub async fn bind_listener(config: &AppConfig) -> std::io::Result<TcpListener> {
    TcpListener::bind(config.bind_address()).await
}
