//! Recognition adapter - implements `TranscriptionPort` over `ai_speech`

use std::sync::Arc;

use ai_speech::{ClovaRecognizer, RecognitionConfig, SpeechError, SpeechToText};
use application::error::ApplicationError;
use application::ports::{TranscriptionPort, TranscriptionResult};
use async_trait::async_trait;
use tracing::instrument;

/// Adapter bridging the recognition provider into the application layer
pub struct RecognitionAdapter {
    recognizer: Arc<dyn SpeechToText>,
}

impl std::fmt::Debug for RecognitionAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecognitionAdapter").finish_non_exhaustive()
    }
}

impl RecognitionAdapter {
    /// Create an adapter over the Clova-style recognizer.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` when the provider cannot be
    /// built from the given configuration.
    pub fn new(config: RecognitionConfig) -> Result<Self, ApplicationError> {
        let recognizer = ClovaRecognizer::new(config)
            .map_err(|e: SpeechError| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self::with_recognizer(Arc::new(recognizer)))
    }

    /// Create an adapter over any recognition backend
    #[must_use]
    pub fn with_recognizer(recognizer: Arc<dyn SpeechToText>) -> Self {
        Self { recognizer }
    }

    fn map_error(err: SpeechError) -> ApplicationError {
        match err {
            SpeechError::Configuration(msg) => ApplicationError::Configuration(msg),
            other => ApplicationError::Transcription(other.to_string()),
        }
    }
}

#[async_trait]
impl TranscriptionPort for RecognitionAdapter {
    #[instrument(skip(self, audio), fields(audio_size = audio.len()))]
    async fn transcribe(&self, audio: &[u8]) -> Result<TranscriptionResult, ApplicationError> {
        let transcript = self
            .recognizer
            .transcribe(audio)
            .await
            .map_err(Self::map_error)?;

        Ok(TranscriptionResult {
            text: transcript.text,
            confidence: transcript.confidence,
        })
    }

    fn is_configured(&self) -> bool {
        self.recognizer.is_configured()
    }
}
