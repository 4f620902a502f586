//! Port definitions for speech processing
//!
//! Defines the traits (ports) that speech provider adapters implement.

use async_trait::async_trait;

use crate::error::SpeechError;
use crate::types::{Language, SpeedMode, Transcript};

/// Port for Speech-to-Text (STT) implementations
///
/// One adapter wraps exactly one recognition backend; there is no ensemble
/// voting. Failures are typed so the pipeline can choose a degraded path.
#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Transcribe raw audio bytes to text.
    ///
    /// The payload is binary PCM/WAV-like data, not base64.
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` without any network call when
    /// credentials are missing, `SpeechError::EmptyTranscript` when the
    /// backend succeeded but produced no text, and other `SpeechError`
    /// variants for transport or backend failures.
    async fn transcribe(&self, audio: &[u8]) -> Result<Transcript, SpeechError>;

    /// Check whether the adapter has credentials and could serve a request
    fn is_configured(&self) -> bool;
}

/// Port for Text-to-Speech (TTS) implementations
#[async_trait]
pub trait TextToSpeech: Send + Sync {
    /// Synthesize text to audio bytes.
    ///
    /// Callers are expected to pass text already normalized with
    /// [`crate::normalize_for_tts`]; the provider does not normalize again.
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` without any network call when
    /// the API key is missing, and other `SpeechError` variants for
    /// transport or backend failures.
    async fn synthesize(
        &self,
        text: &str,
        language: Language,
        speed: SpeedMode,
    ) -> Result<Vec<u8>, SpeechError>;

    /// Check whether the adapter has credentials and could serve a request
    fn is_configured(&self) -> bool;
}
