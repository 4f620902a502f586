//! HTTP and WebSocket presentation layer for WordSprout
//!
//! Exposes the speech-interaction pipeline over a WebSocket session
//! endpoint for live audio, a batch analysis endpoint, cache maintenance
//! and health checks.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod ws;

pub use routes::create_router;
pub use state::AppState;
