//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Speech recognition failed at the adapter boundary
    #[error("Transcription error: {0}")]
    Transcription(String),

    /// Speech synthesis failed at the adapter boundary
    #[error("Synthesis error: {0}")]
    Synthesis(String),

    /// Generative coaching backend failed
    #[error("Generation error: {0}")]
    Generation(String),

    /// Missing or invalid configuration; raised before any network attempt
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Session is unknown or already closed
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Whether the underlying cause is a missing credential or bad config,
    /// meaning no backend call was attempted.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}
