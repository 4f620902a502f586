//! Coaching client errors

use thiserror::Error;

/// Errors from the generative coaching backend
#[derive(Debug, Error)]
pub enum CoachError {
    /// Missing or invalid configuration; raised before any network attempt
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Failed to connect to the backend
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Backend returned a non-success status
    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    /// Backend response could not be parsed or carried no text
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Backend did not answer within the configured timeout
    #[error("Generation timeout after {0}ms")]
    Timeout(u64),
}

impl From<reqwest::Error> for CoachError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(30000)
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else {
            Self::GenerationFailed(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_error_message() {
        let err = CoachError::Configuration("missing API key".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing API key");
    }

    #[test]
    fn timeout_error_message() {
        let err = CoachError::Timeout(30000);
        assert_eq!(err.to_string(), "Generation timeout after 30000ms");
    }
}
