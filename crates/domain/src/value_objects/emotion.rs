//! Emotion classification of a child's utterance

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Intent;

/// Emotional tone detected in an utterance.
///
/// `Joy` through `Anxiety` come from keyword matches; `Neutral`, `Positive`
/// and `Varied` only appear via the per-intent default mapping when no
/// emotion keyword matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    /// Happy, excited
    Joy,
    /// Sad, hurt
    Sadness,
    /// Frustrated, refusing
    Anger,
    /// Scared
    Fear,
    /// Inquisitive, exploring
    Curiosity,
    /// Seeking help or reassurance
    Anxiety,
    /// No clear affect
    Neutral,
    /// Warm, affirming (calling a loved person)
    Positive,
    /// Mixed or undetermined affect
    Varied,
}

impl Emotion {
    /// Default emotion for an intent when no emotion keyword matched
    #[must_use]
    pub const fn default_for_intent(intent: Intent) -> Self {
        match intent {
            Intent::ItemRequest => Self::Neutral,
            Intent::PersonCalling => Self::Positive,
            Intent::VocalPlay | Intent::Question => Self::Curiosity,
            Intent::EmotionExpression => Self::Varied,
            Intent::PlayRequest => Self::Joy,
            Intent::Negation => Self::Anger,
            Intent::HelpRequest => Self::Anxiety,
        }
    }

    /// Stable identifier used on the wire and in logs
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Joy => "joy",
            Self::Sadness => "sadness",
            Self::Anger => "anger",
            Self::Fear => "fear",
            Self::Curiosity => "curiosity",
            Self::Anxiety => "anxiety",
            Self::Neutral => "neutral",
            Self::Positive => "positive",
            Self::Varied => "varied",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_intent_has_a_default_emotion() {
        for intent in Intent::ALL {
            // Must not panic; spot-check a few mappings.
            let _ = Emotion::default_for_intent(intent);
        }
        assert_eq!(
            Emotion::default_for_intent(Intent::PlayRequest),
            Emotion::Joy
        );
        assert_eq!(
            Emotion::default_for_intent(Intent::HelpRequest),
            Emotion::Anxiety
        );
        assert_eq!(
            Emotion::default_for_intent(Intent::PersonCalling),
            Emotion::Positive
        );
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&Emotion::Curiosity).unwrap();
        assert_eq!(json, "\"curiosity\"");
    }
}
