//! Developmental stage derived from a child's age in months

use std::fmt;

use serde::{Deserialize, Serialize};

/// Language-development stage, banded by age in months.
///
/// The bands use inclusive upper bounds: a child exactly 12 months old is
/// still in the babbling band, exactly 18 months still in word onset, and so
/// on. Stages are ordered; comparing two stages compares developmental
/// progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DevelopmentalStage {
    /// 0-12 months: repeated phonemes, sound exploration
    Babbling,
    /// 13-18 months: first words ("엄마", "아빠", "물")
    WordOnset,
    /// 19-24 months: 2-3 syllable combinations, object naming
    WordGrowth,
    /// 25-36 months: two-word combinations, first questions
    SentenceOnset,
    /// 37+ months: complex sentences, abstract concepts
    SentenceGrowth,
}

impl DevelopmentalStage {
    /// Derive the stage from an age in months
    #[must_use]
    pub const fn from_age_months(age_months: u32) -> Self {
        match age_months {
            0..=12 => Self::Babbling,
            13..=18 => Self::WordOnset,
            19..=24 => Self::WordGrowth,
            25..=36 => Self::SentenceOnset,
            _ => Self::SentenceGrowth,
        }
    }

    /// Stable identifier used on the wire and in logs
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Babbling => "babbling",
            Self::WordOnset => "word_onset",
            Self::WordGrowth => "word_growth",
            Self::SentenceOnset => "sentence_onset",
            Self::SentenceGrowth => "sentence_growth",
        }
    }
}

impl fmt::Display for DevelopmentalStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
