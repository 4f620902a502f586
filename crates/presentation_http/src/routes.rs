//! Route definitions

use axum::routing::{get, post};
use axum::Router;

use crate::{handlers, state::AppState, ws};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        // Live session endpoint
        .route("/ws/{child_id}", get(ws::ws_handler))
        // Batch analysis (v1)
        .route("/v1/analyze", post(handlers::analyze::analyze))
        // Synthesis cache maintenance (v1)
        .route("/v1/cache/stats", get(handlers::cache::stats))
        .route("/v1/cache/clear", post(handlers::cache::clear))
        .with_state(state)
}
