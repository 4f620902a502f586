//! Transcription port - interface for speech recognition

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Result of transcribing one audio payload
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptionResult {
    /// Recognized text, non-empty
    pub text: String,
    /// Recognition confidence, 0.0 - 1.0
    pub confidence: f32,
}

/// Port for speech-to-text operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TranscriptionPort: Send + Sync {
    /// Transcribe raw audio bytes to text.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` without touching the
    /// network when credentials are absent, and
    /// `ApplicationError::Transcription` for backend or empty-result
    /// failures.
    async fn transcribe(&self, audio: &[u8]) -> Result<TranscriptionResult, ApplicationError>;

    /// Whether the recognition backend holds credentials
    fn is_configured(&self) -> bool;
}
