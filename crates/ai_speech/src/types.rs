//! Types shared by the speech providers

use serde::{Deserialize, Serialize};

/// Synthesis output language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Korean
    #[default]
    Ko,
    /// English
    En,
}

impl Language {
    /// BCP-47 language code expected by the synthesis backend
    #[must_use]
    pub const fn bcp47(&self) -> &'static str {
        match self {
            Self::Ko => "ko-KR",
            Self::En => "en-US",
        }
    }

    /// Short code used in cache keys and config files
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ko => "ko",
            Self::En => "en",
        }
    }
}

/// Speaking speed mode for synthesis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SpeedMode {
    /// Regular child-friendly pace
    #[default]
    Normal,
    /// Slowed down for imitation practice
    Slow,
}

impl SpeedMode {
    /// Speaking rate sent to the synthesis backend.
    ///
    /// Even "normal" is slightly below 1.0 so a toddler can follow along.
    #[must_use]
    pub const fn speaking_rate(&self) -> f32 {
        match self {
            Self::Normal => 0.8,
            Self::Slow => 0.6,
        }
    }

    /// Short code used in cache keys
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Slow => "slow",
        }
    }
}

/// Result of speech-to-text recognition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    /// Recognized text
    pub text: String,
    /// Confidence score (0.0 - 1.0)
    pub confidence: f32,
}

impl Transcript {
    /// Create a transcript
    #[must_use]
    pub fn new(text: impl Into<String>, confidence: f32) -> Self {
        Self {
            text: text.into(),
            confidence,
        }
    }

    /// Check if the transcript carries no usable text
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}
