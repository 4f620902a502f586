//! Configuration for the speech providers

use serde::{Deserialize, Serialize};

use crate::types::Language;

/// Configuration for the recognition (STT) backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognitionConfig {
    /// Recognition API endpoint
    #[serde(default = "default_recognition_url")]
    pub api_url: String,

    /// API gateway client id (`X-NCP-APIGW-API-KEY-ID` header)
    #[serde(default)]
    pub client_id: Option<String>,

    /// API gateway client secret (`X-NCP-APIGW-API-KEY` header)
    #[serde(default)]
    pub client_secret: Option<String>,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            api_url: default_recognition_url(),
            client_id: None,
            client_secret: None,
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl RecognitionConfig {
    /// Check whether credentials are present.
    ///
    /// The provider fails fast (no network call) when this is false.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        matches!(
            (&self.client_id, &self.client_secret),
            (Some(id), Some(secret)) if !id.is_empty() && !secret.is_empty()
        )
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns a message describing the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if self.api_url.is_empty() {
            return Err("Recognition API URL must not be empty".to_string());
        }
        if self.timeout_ms == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Configuration for the synthesis (TTS) backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisConfig {
    /// Synthesis API endpoint
    #[serde(default = "default_synthesis_url")]
    pub api_url: String,

    /// API key appended as a query parameter
    #[serde(default)]
    pub api_key: Option<String>,

    /// Voice name (e.g. "ko-KR-Standard-A")
    #[serde(default = "default_voice")]
    pub voice: String,

    /// Default output language
    #[serde(default)]
    pub language: Language,

    /// Pitch offset in semitones; children respond to a brighter tone
    #[serde(default = "default_pitch")]
    pub pitch: f32,

    /// Volume gain in dB
    #[serde(default = "default_volume_gain_db")]
    pub volume_gain_db: f32,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            api_url: default_synthesis_url(),
            api_key: None,
            voice: default_voice(),
            language: Language::default(),
            pitch: default_pitch(),
            volume_gain_db: default_volume_gain_db(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl SynthesisConfig {
    /// Check whether an API key is present
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.is_empty())
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns a message describing the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if self.api_url.is_empty() {
            return Err("Synthesis API URL must not be empty".to_string());
        }
        if self.voice.is_empty() {
            return Err("Voice must not be empty".to_string());
        }
        if self.timeout_ms == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }
        Ok(())
    }
}

fn default_recognition_url() -> String {
    "https://naveropenapi.apigw.ntruss.com/recog/v1/stt".to_string()
}

fn default_synthesis_url() -> String {
    "https://texttospeech.googleapis.com/v1/text:synthesize".to_string()
}

fn default_voice() -> String {
    "ko-KR-Standard-A".to_string()
}

const fn default_pitch() -> f32 {
    2.0
}

const fn default_volume_gain_db() -> f32 {
    2.0
}

const fn default_timeout_ms() -> u64 {
    30000 // 30 seconds
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_recognition_config_has_no_credentials() {
        let config = RecognitionConfig::default();
        assert!(!config.has_credentials());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_credential_strings_do_not_count() {
        let config = RecognitionConfig {
            client_id: Some(String::new()),
            client_secret: Some("secret".to_string()),
            ..Default::default()
        };
        assert!(!config.has_credentials());
    }

    #[test]
    fn recognition_config_rejects_zero_timeout() {
        let config = RecognitionConfig {
            timeout_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn default_synthesis_config_is_child_tuned() {
        let config = SynthesisConfig::default();
        assert_eq!(config.voice, "ko-KR-Standard-A");
        assert!((config.pitch - 2.0).abs() < f32::EPSILON);
        assert_eq!(config.language, Language::Ko);
        assert!(!config.has_credentials());
    }

    #[test]
    fn synthesis_config_rejects_empty_voice() {
        let config = SynthesisConfig {
            voice: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn config_deserializes_from_toml() {
        let toml = r#"
            api_url = "http://localhost:9000/stt"
            client_id = "id"
            client_secret = "secret"
            timeout_ms = 5000
        "#;

        let config: RecognitionConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.api_url, "http://localhost:9000/stt");
        assert!(config.has_credentials());
        assert_eq!(config.timeout_ms, 5000);
    }
}
