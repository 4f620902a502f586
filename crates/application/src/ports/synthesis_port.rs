//! Synthesis port - interface for cached text-to-speech

use std::fmt;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// Speaking-rate selector forwarded to the synthesis backend.
///
/// Part of the cache key: the same text at a different speed is a different
/// cache entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseSpeed {
    /// Regular speaking rate
    #[default]
    Normal,
    /// Slowed down for the youngest listeners
    Slow,
}

impl ResponseSpeed {
    /// Stable identifier used in cache keys and logs
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Slow => "slow",
        }
    }
}

impl fmt::Display for ResponseSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one synthesis call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisOutput {
    /// Synthesized audio bytes (MP3)
    pub audio: Vec<u8>,
    /// Whether the bytes came from the cache
    pub cache_hit: bool,
}

/// Synthesis cache statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Number of cached entries
    pub entries: u64,
    /// Total size of cached audio in bytes
    pub total_bytes: u64,
}

/// Port for text-to-speech with a content-addressed cache
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SynthesisPort: Send + Sync {
    /// Synthesize audio for a coaching response.
    ///
    /// Identical (text, speed) pairs return byte-identical audio; the second
    /// call is a cache hit.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` when the backend key is
    /// absent and `ApplicationError::Synthesis` for backend failures.
    async fn synthesize(
        &self,
        text: &str,
        speed: ResponseSpeed,
    ) -> Result<SynthesisOutput, ApplicationError>;

    /// Whether the synthesis backend holds credentials
    fn is_configured(&self) -> bool;

    /// Remove every cached entry, returning how many were removed.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Synthesis` when the durable store cannot
    /// be cleared.
    async fn clear_cache(&self) -> Result<u64, ApplicationError>;

    /// Current cache statistics.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Synthesis` when the durable store cannot
    /// be read.
    async fn cache_stats(&self) -> Result<CacheStats, ApplicationError>;
}
