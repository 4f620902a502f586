//! Speech processing errors

use thiserror::Error;

/// Errors that can occur during speech processing
#[derive(Debug, Error)]
pub enum SpeechError {
    /// Invalid or missing configuration (e.g. no credentials).
    ///
    /// Raised before any network attempt.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Failed to connect to the speech backend
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request reached the backend but failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Audio payload rejected before sending
    #[error("Invalid audio: {0}")]
    InvalidAudio(String),

    /// Recognition backend returned a non-success status
    #[error("Transcription failed: {0}")]
    TranscriptionFailed(String),

    /// Recognition succeeded but produced no usable text.
    ///
    /// The adapter reports this rather than guessing a transcript.
    #[error("Transcription returned an empty transcript")]
    EmptyTranscript,

    /// Synthesis backend returned a non-success status
    #[error("Synthesis failed: {0}")]
    SynthesisFailed(String),

    /// Backend response could not be parsed
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Backend did not answer within the configured timeout
    #[error("Speech processing timeout after {0}ms")]
    Timeout(u64),
}

impl SpeechError {
    /// Whether this failure happened before any network traffic
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

impl From<reqwest::Error> for SpeechError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(30000)
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}
