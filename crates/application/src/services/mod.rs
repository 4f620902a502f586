//! Application services

pub mod classifier;
pub mod interaction_service;
pub mod response_generator;
pub mod session_manager;

pub use interaction_service::{InteractionService, PipelineConfig};
pub use response_generator::{GeneratedResponse, ResponseGenerator};
pub use session_manager::{AudioChunk, SessionManager};
