//! API error handling
//!
//! Every failure crossing the HTTP boundary becomes a stable string code
//! plus a human-readable message; no lower-level error text structure leaks
//! to clients.

use application::ApplicationError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Error payload returned by REST endpoints
#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    /// Stable machine-readable code
    pub code: &'static str,
    /// Human-readable description
    pub message: String,
}

/// API error with a stable code and HTTP status
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiError {
    /// Unknown child id
    #[must_use]
    pub fn user_not_found(id: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            code: "USER_NOT_FOUND",
            message: format!("No child profile for id {id}"),
        }
    }

    /// Audio payload could not be decoded or was rejected up front
    #[must_use]
    pub fn audio_processing_failed(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            code: "AUDIO_PROCESSING_FAILED",
            message: message.into(),
        }
    }

    /// Pipeline failed while processing speech
    #[must_use]
    pub fn speech_processing_failed(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            code: "SPEECH_PROCESSING_FAILED",
            message: message.into(),
        }
    }

    /// Pipeline failed while processing a text message
    #[must_use]
    pub fn text_processing_failed(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            code: "TEXT_PROCESSING_FAILED",
            message: message.into(),
        }
    }

    /// Request shape was not understood
    #[must_use]
    pub fn invalid_message(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code: "INVALID_MESSAGE_TYPE",
            message: message.into(),
        }
    }

    /// Stable error code
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.code
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Transcription(msg) | ApplicationError::Synthesis(msg) => {
                Self::speech_processing_failed(msg)
            },
            ApplicationError::Configuration(msg) => Self::speech_processing_failed(msg),
            ApplicationError::SessionNotFound(id) => Self::user_not_found(&id),
            other => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                code: "INTERNAL_ERROR",
                message: other.to_string(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            code: self.code,
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(ApiError::user_not_found("x").code(), "USER_NOT_FOUND");
        assert_eq!(
            ApiError::audio_processing_failed("bad base64").code(),
            "AUDIO_PROCESSING_FAILED"
        );
        assert_eq!(
            ApiError::invalid_message("nope").code(),
            "INVALID_MESSAGE_TYPE"
        );
    }

    #[test]
    fn application_errors_map_to_speech_failure() {
        let err: ApiError = ApplicationError::Transcription("backend down".to_string()).into();
        assert_eq!(err.code(), "SPEECH_PROCESSING_FAILED");
    }
}
