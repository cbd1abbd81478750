//! `api` crate — HTTP REST layer over the execution engine.
//!
//! Exposes:
//!   GET  /api/v1/workflows
//!   GET  /api/v1/workflows/{id}
//!   POST /api/v1/workflows/{id}/execute
//!   GET  /api/v1/workflows/{id}/executions

pub mod handlers;

pub use handlers::AppState;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/workflows", get(handlers::workflows::list))
        .route("/api/v1/workflows/{id}", get(handlers::workflows::get))
        .route(
            "/api/v1/workflows/{id}/execute",
            post(handlers::executions::execute),
        )
        .route(
            "/api/v1/workflows/{id}/executions",
            get(handlers::executions::list),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve the API until the process is stopped.
pub async fn serve(bind: &str, state: AppState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!("API server listening on {bind}");
    axum::serve(listener, router(state)).await
}
