//! HTTP route definitions.

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use super::handlers::{self, AppState};

/// Create the router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/preview", get(handlers::preview))
        .route("/feed", get(handlers::feed))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
