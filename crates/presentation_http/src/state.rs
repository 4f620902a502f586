//! Application state shared across handlers

use std::sync::Arc;

use application::ports::{ChildProfileStore, SynthesisPort};
use application::services::{InteractionService, SessionManager};
use infrastructure::AppConfig;

use crate::ws::WsOutgoing;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Pipeline orchestrator
    pub interactions: Arc<InteractionService>,
    /// Live WebSocket sessions
    pub sessions: Arc<SessionManager<WsOutgoing>>,
    /// Child profile lookups
    pub profiles: Arc<dyn ChildProfileStore>,
    /// Synthesis port, exposed for cache maintenance endpoints
    pub synthesis: Arc<dyn SynthesisPort>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}
