//! Google-style speech synthesis provider
//!
//! JSON request with input/voice/audioConfig, base64 `audioContent` in the
//! response. The audio config is tuned for toddlers: slightly slowed rate,
//! raised pitch, small volume boost, MP3 output.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::SynthesisConfig;
use crate::error::SpeechError;
use crate::ports::TextToSpeech;
use crate::types::{Language, SpeedMode};

/// Synthesis adapter for the Google-style TTS API
#[derive(Debug, Clone)]
pub struct GoogleSynthesizer {
    client: Client,
    config: SynthesisConfig,
}

#[derive(Debug, Serialize)]
struct SynthesisRequest<'a> {
    input: SynthesisInput<'a>,
    voice: VoiceSelection<'a>,
    #[serde(rename = "audioConfig")]
    audio_config: AudioConfig,
}

#[derive(Debug, Serialize)]
struct SynthesisInput<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct VoiceSelection<'a> {
    #[serde(rename = "languageCode")]
    language_code: &'a str,
    name: &'a str,
    #[serde(rename = "ssmlGender")]
    ssml_gender: &'a str,
}

#[derive(Debug, Serialize)]
struct AudioConfig {
    #[serde(rename = "audioEncoding")]
    audio_encoding: &'static str,
    #[serde(rename = "speakingRate")]
    speaking_rate: f32,
    pitch: f32,
    #[serde(rename = "volumeGainDb")]
    volume_gain_db: f32,
}

#[derive(Debug, Deserialize)]
struct SynthesisResponse {
    #[serde(rename = "audioContent")]
    audio_content: Option<String>,
}

impl GoogleSynthesizer {
    /// Create a new synthesizer
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` if the configuration is invalid
    /// or the HTTP client cannot be built. A missing API key is not an
    /// error here; each `synthesize` call fails cheaply instead.
    pub fn new(config: SynthesisConfig) -> Result<Self, SpeechError> {
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
impl TextToSpeech for GoogleSynthesizer {
    #[instrument(skip(self, text), fields(text_len = text.len(), language = %language.as_str(), speed = %speed.as_str()))]
    async fn synthesize(
        &self,
        text: &str,
        language: Language,
        speed: SpeedMode,
    ) -> Result<Vec<u8>, SpeechError> {
        let Some(api_key) = self.config.api_key.as_deref().filter(|k| !k.is_empty()) else {
            return Err(SpeechError::Configuration(
                "Synthesis API key is not configured".to_string(),
            ));
        };

        if text.is_empty() {
            return Err(SpeechError::SynthesisFailed(
                "Text cannot be empty".to_string(),
            ));
        }

        debug!("Sending text to synthesis backend");

        let request = SynthesisRequest {
            input: SynthesisInput { text },
            voice: VoiceSelection {
                language_code: language.bcp47(),
                name: &self.config.voice,
                ssml_gender: "FEMALE",
            },
            audio_config: AudioConfig {
                audio_encoding: "MP3",
                speaking_rate: speed.speaking_rate(),
                pitch: self.config.pitch,
                volume_gain_db: self.config.volume_gain_db,
            },
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .query(&[("key", api_key)])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(SpeechError::SynthesisFailed(format!(
                "HTTP {status}: {error_body}"
            )));
        }

        let body: SynthesisResponse = response
            .json()
            .await
            .map_err(|e| SpeechError::InvalidResponse(format!("Failed to parse response: {e}")))?;

        let audio_content = body.audio_content.ok_or_else(|| {
            SpeechError::InvalidResponse("Response carried no audioContent".to_string())
        })?;

        let audio = BASE64
            .decode(audio_content)
            .map_err(|e| SpeechError::InvalidResponse(format!("Invalid audio encoding: {e}")))?;

        debug!(audio_size = audio.len(), "Synthesis complete");

        Ok(audio)
    }

    fn is_configured(&self) -> bool {
        self.config.has_credentials()
    }
}
