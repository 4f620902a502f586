//! Health check handlers

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub backends: BackendStatus,
    pub active_sessions: usize,
}

/// Which backends hold credentials; a backend without credentials degrades
/// to a typed failure or a fallback strategy, it does not block startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendStatus {
    pub recognition: bool,
    pub synthesis: bool,
    pub coaching: bool,
}

/// Liveness check
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        backends: BackendStatus {
            recognition: state.config.recognition.has_credentials(),
            synthesis: state.config.synthesis.has_credentials(),
            coaching: state.config.coaching.has_credentials(),
        },
        active_sessions: state.sessions.active_sessions(),
    })
}
