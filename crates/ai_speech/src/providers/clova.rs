//! Clova-style speech recognition provider
//!
//! Sends the raw audio payload as `application/octet-stream` with the API
//! gateway credential headers. The backend only supports Korean, so the
//! language query parameter is fixed to `Kor`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::config::RecognitionConfig;
use crate::error::SpeechError;
use crate::ports::SpeechToText;
use crate::types::Transcript;

/// Recognition adapter for the Clova-style STT API
#[derive(Debug, Clone)]
pub struct ClovaRecognizer {
    client: Client,
    config: RecognitionConfig,
}

/// Recognition response body
#[derive(Debug, Deserialize)]
struct RecognitionResponse {
    #[serde(default)]
    text: String,
    #[serde(default)]
    confidence: f32,
}

impl ClovaRecognizer {
    /// Create a new recognizer
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` if the configuration is invalid
    /// or the HTTP client cannot be built. Missing credentials are NOT an
    /// error here; they fail each `transcribe` call cheaply instead, so a
    /// credential-less deployment can still start and report typed failures.
    pub fn new(config: RecognitionConfig) -> Result<Self, SpeechError> {
        config.validate().map_err(SpeechError::Configuration)?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| {
                SpeechError::Configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl SpeechToText for ClovaRecognizer {
    #[instrument(skip(self, audio), fields(audio_size = audio.len()))]
    async fn transcribe(&self, audio: &[u8]) -> Result<Transcript, SpeechError> {
        // Fail fast with no network attempt when credentials are absent.
        let (Some(client_id), Some(client_secret)) =
            (&self.config.client_id, &self.config.client_secret)
        else {
            return Err(SpeechError::Configuration(
                "Recognition credentials are not configured".to_string(),
            ));
        };
        if client_id.is_empty() || client_secret.is_empty() {
            return Err(SpeechError::Configuration(
                "Recognition credentials are not configured".to_string(),
            ));
        }

        if audio.is_empty() {
            return Err(SpeechError::InvalidAudio("Audio data is empty".to_string()));
        }

        debug!("Sending audio to recognition backend");

        let response = self
            .client
            .post(&self.config.api_url)
            .header("X-NCP-APIGW-API-KEY-ID", client_id)
            .header("X-NCP-APIGW-API-KEY", client_secret)
            .header("Content-Type", "application/octet-stream")
            .query(&[("lang", "Kor")])
            .body(audio.to_vec())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(SpeechError::TranscriptionFailed(format!(
                "HTTP {status}: {error_body}"
            )));
        }

        let body: RecognitionResponse = response
            .json()
            .await
            .map_err(|e| SpeechError::InvalidResponse(format!("Failed to parse response: {e}")))?;

        let transcript = Transcript::new(body.text, body.confidence);
        if transcript.is_empty() {
            // A success status with no text is still a failure; the pipeline
            // must not proceed on a guessed transcript.
            return Err(SpeechError::EmptyTranscript);
        }

        debug!(
            text_len = transcript.text.len(),
            confidence = transcript.confidence,
            "Recognition complete"
        );

        Ok(transcript)
    }

    fn is_configured(&self) -> bool {
        self.config.has_credentials()
    }
}
