//! Communicative intent of a child's utterance

use std::fmt;

use serde::{Deserialize, Serialize};

/// Inferred communicative purpose of an utterance.
///
/// Classification iterates categories in the order of [`Intent::ALL`]; a tie
/// in keyword score keeps the earlier category. That order is part of the
/// contract and must not be reordered without revisiting the classifier
/// tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Asking for an item: food, drink, a toy
    ItemRequest,
    /// Calling a family member or caregiver
    PersonCalling,
    /// Exploratory sound play (babbling strings)
    VocalPlay,
    /// Expressing a feeling
    EmotionExpression,
    /// Asking to play or be played with
    PlayRequest,
    /// Refusal or protest
    Negation,
    /// Asking a question
    Question,
    /// Asking for help
    HelpRequest,
}

impl Intent {
    /// All intents, in the fixed classification/tie-break order
    pub const ALL: [Self; 8] = [
        Self::ItemRequest,
        Self::PersonCalling,
        Self::VocalPlay,
        Self::EmotionExpression,
        Self::PlayRequest,
        Self::Negation,
        Self::Question,
        Self::HelpRequest,
    ];

    /// Stable identifier used on the wire and in logs
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ItemRequest => "item_request",
            Self::PersonCalling => "person_calling",
            Self::VocalPlay => "vocal_play",
            Self::EmotionExpression => "emotion_expression",
            Self::PlayRequest => "play_request",
            Self::Negation => "negation",
            Self::Question => "question",
            Self::HelpRequest => "help_request",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_contains_each_variant_once() {
        for (i, a) in Intent::ALL.iter().enumerate() {
            for b in &Intent::ALL[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(Intent::ALL.len(), 8);
    }

    #[test]
    fn item_request_is_first_in_tie_break_order() {
        assert_eq!(Intent::ALL[0], Intent::ItemRequest);
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&Intent::PersonCalling).unwrap();
        assert_eq!(json, "\"person_calling\"");
    }
}
