//! Synthesis cache maintenance endpoints

use application::ports::CacheStats;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;

/// Result of a full cache clear
#[derive(Debug, Serialize)]
pub struct ClearResponse {
    /// Durable entries removed
    pub cleared_entries: u64,
}

/// Current synthesis cache statistics
pub async fn stats(State(state): State<AppState>) -> Result<Json<CacheStats>, ApiError> {
    let stats = state.synthesis.cache_stats().await.map_err(ApiError::from)?;
    Ok(Json(stats))
}

/// Remove every cached synthesis entry
pub async fn clear(State(state): State<AppState>) -> Result<Json<ClearResponse>, ApiError> {
    let cleared_entries = state.synthesis.clear_cache().await.map_err(ApiError::from)?;
    info!(cleared_entries, "Synthesis cache cleared via API");
    Ok(Json(ClearResponse { cleared_entries }))
}
