//! Interaction record - one request/response cycle through the pipeline

use std::time::Duration;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::value_objects::{DevelopmentalStage, Emotion, Intent};

/// Latency goal for one full pipeline run
pub const LATENCY_GOAL: Duration = Duration::from_secs(2);

/// Informational latency label against [`LATENCY_GOAL`].
///
/// Never cancels or alters processing; it is reported to the session so the
/// client can surface slow interactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LatencyStatus {
    /// Completed within the latency goal
    Good,
    /// Exceeded the latency goal
    Slow,
}

impl LatencyStatus {
    /// Label an elapsed duration against the goal
    #[must_use]
    pub fn from_elapsed(elapsed: Duration) -> Self {
        if elapsed <= LATENCY_GOAL {
            Self::Good
        } else {
            Self::Slow
        }
    }

    /// Stable identifier used on the wire
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Slow => "slow",
        }
    }
}

/// Which strategy produced the coaching response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseSource {
    /// Generative text backend
    Generative,
    /// Deterministic template bucket
    Template,
    /// Canned per-intent fallback list
    Canned,
}

/// Classification output attached to a transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    /// Inferred communicative intent
    pub intent: Intent,
    /// Developmental stage derived from the child's age
    pub stage: DevelopmentalStage,
    /// Detected or defaulted emotion
    pub emotion: Emotion,
    /// Whether the utterance length fits the age band
    pub age_appropriate: bool,
}

/// Stage at which a pipeline run failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum InteractionFailure {
    /// Speech recognition failed; no later stage ran
    TranscriptionFailed {
        /// Adapter-level cause
        reason: String,
    },
    /// Synthesis failed after a response was generated.
    ///
    /// The generated text is preserved so the session still receives a
    /// usable (degraded) reply.
    SynthesisFailed {
        /// Adapter-level cause
        reason: String,
        /// Coaching text that was generated before synthesis failed
        response_text: String,
    },
}

/// One fully-resolved request/response cycle.
///
/// Created when a session buffer flushes, resolved within a single pipeline
/// run, and discarded afterward. Under privacy mode the transcript must not
/// be persisted anywhere beyond this value's lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    /// Unique id for correlation in logs
    pub id: Uuid,
    /// Transcript of the child's utterance
    pub transcript: String,
    /// Recognition confidence, 0.0 - 1.0
    pub confidence: f32,
    /// Classification result
    pub analysis: Analysis,
    /// Coaching response text
    pub response_text: String,
    /// Strategy that produced the response
    pub response_source: ResponseSource,
    /// Synthesized response audio (empty when synthesis was skipped)
    pub response_audio: Vec<u8>,
    /// Whether the synthesis cache served the audio
    pub synthesis_cache_hit: bool,
    /// Total pipeline latency
    pub latency: Duration,
    /// Latency label against the 2 second goal
    pub latency_status: LatencyStatus,
}

impl Interaction {
    /// Processing time in fractional seconds, as reported on the wire
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn processing_time_secs(&self) -> f64 {
        (self.latency.as_millis() as f64) / 1000.0
    }
}
