//! Interaction service - one utterance through the full pipeline
//!
//! Sequences transcription, classification, response generation and
//! synthesis for a single child utterance, measuring end-to-end latency
//! against the 2 second goal. Failures abort with a typed stage marker;
//! a synthesis failure still delivers the generated text.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use domain::{ChildProfile, Interaction, InteractionFailure, LatencyStatus};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::ports::{ResponseSpeed, SynthesisPort, TranscriptionPort};
use crate::services::classifier;
use crate::services::response_generator::ResponseGenerator;

/// Pipeline behavior knobs
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// When true (the default) no raw audio or transcript is persisted or
    /// logged by the core; only lengths and ids appear in traces.
    pub privacy_mode: bool,
    /// Speaking rate requested from the synthesis backend
    pub response_speed: ResponseSpeed,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            privacy_mode: true,
            response_speed: ResponseSpeed::Normal,
        }
    }
}

/// Orchestrates one request/response cycle
pub struct InteractionService {
    transcription: Arc<dyn TranscriptionPort>,
    synthesis: Arc<dyn SynthesisPort>,
    generator: ResponseGenerator,
    config: PipelineConfig,
}

impl fmt::Debug for InteractionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractionService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl InteractionService {
    /// Create a service with default pipeline configuration
    #[must_use]
    pub fn new(
        transcription: Arc<dyn TranscriptionPort>,
        synthesis: Arc<dyn SynthesisPort>,
        generator: ResponseGenerator,
    ) -> Self {
        Self::with_config(transcription, synthesis, generator, PipelineConfig::default())
    }

    /// Create a service with explicit pipeline configuration
    #[must_use]
    pub fn with_config(
        transcription: Arc<dyn TranscriptionPort>,
        synthesis: Arc<dyn SynthesisPort>,
        generator: ResponseGenerator,
        config: PipelineConfig,
    ) -> Self {
        Self {
            transcription,
            synthesis,
            generator,
            config,
        }
    }

    /// Process one audio utterance end-to-end.
    ///
    /// # Errors
    ///
    /// Returns [`InteractionFailure::TranscriptionFailed`] when recognition
    /// fails (no later stage runs) and
    /// [`InteractionFailure::SynthesisFailed`] when audio generation fails
    /// after the coaching text was produced; the text rides along in that
    /// variant.
    #[instrument(skip(self, audio), fields(child_id = %child.id, audio_size = audio.len()))]
    pub async fn process_audio(
        &self,
        child: &ChildProfile,
        audio: &[u8],
    ) -> Result<Interaction, InteractionFailure> {
        let start = Instant::now();

        let transcription = match self.transcription.transcribe(audio).await {
            Ok(result) => result,
            Err(err) => {
                warn!(error = %err, "Transcription failed, aborting pipeline");
                return Err(InteractionFailure::TranscriptionFailed {
                    reason: err.to_string(),
                });
            },
        };

        self.run_stages(child, transcription.text, transcription.confidence, start)
            .await
    }

    /// Process a text utterance, skipping transcription.
    ///
    /// # Errors
    ///
    /// Returns [`InteractionFailure::SynthesisFailed`] when audio generation
    /// fails; the generated text rides along in that variant.
    #[instrument(skip(self, text), fields(child_id = %child.id))]
    pub async fn process_text(
        &self,
        child: &ChildProfile,
        text: String,
    ) -> Result<Interaction, InteractionFailure> {
        let start = Instant::now();
        self.run_stages(child, text, 1.0, start).await
    }

    /// Classification, generation and synthesis shared by both entry points
    async fn run_stages(
        &self,
        child: &ChildProfile,
        transcript: String,
        confidence: f32,
        start: Instant,
    ) -> Result<Interaction, InteractionFailure> {
        if self.config.privacy_mode {
            debug!(transcript_chars = transcript.chars().count(), "Transcript received");
        } else {
            debug!(transcript = %transcript, "Transcript received");
        }

        let analysis = classifier::analyze(&transcript, child.age_months);
        let response = self
            .generator
            .generate(&transcript, &analysis, child.age_months)
            .await;

        let synthesis = match self
            .synthesis
            .synthesize(&response.text, self.config.response_speed)
            .await
        {
            Ok(output) => output,
            Err(err) => {
                warn!(error = %err, "Synthesis failed, delivering text-only response");
                return Err(InteractionFailure::SynthesisFailed {
                    reason: err.to_string(),
                    response_text: response.text,
                });
            },
        };

        let latency = start.elapsed();
        let interaction = Interaction {
            id: Uuid::new_v4(),
            transcript,
            confidence,
            analysis,
            response_text: response.text,
            response_source: response.source,
            response_audio: synthesis.audio,
            synthesis_cache_hit: synthesis.cache_hit,
            latency,
            latency_status: LatencyStatus::from_elapsed(latency),
        };

        info!(
            interaction_id = %interaction.id,
            intent = %interaction.analysis.intent,
            stage = %interaction.analysis.stage,
            source = ?interaction.response_source,
            cache_hit = interaction.synthesis_cache_hit,
            latency_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
            latency_status = interaction.latency_status.as_str(),
            "Interaction complete"
        );

        Ok(interaction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApplicationError;
    use crate::ports::{
        MockCoachingPort, MockSynthesisPort, MockTranscriptionPort, SynthesisOutput,
        TranscriptionResult,
    };
    use domain::{ChildId, DevelopmentalStage, Intent};

    fn child(age_months: u32) -> ChildProfile {
        ChildProfile::new(ChildId::new(), "아란", age_months)
    }

    fn template_generator() -> ResponseGenerator {
        let mut coaching = MockCoachingPort::new();
        coaching.expect_is_available().return_const(false);
        ResponseGenerator::new(Arc::new(coaching))
    }

    #[tokio::test]
    async fn unconfigured_transcription_skips_all_later_stages() {
        let mut transcription = MockTranscriptionPort::new();
        transcription.expect_transcribe().returning(|_| {
            Err(ApplicationError::Configuration(
                "Recognition credentials are not configured".to_string(),
            ))
        });

        let mut synthesis = MockSynthesisPort::new();
        synthesis.expect_synthesize().never();

        let mut coaching = MockCoachingPort::new();
        coaching.expect_is_available().never();
        coaching.expect_coach().never();

        let service = InteractionService::new(
            Arc::new(transcription),
            Arc::new(synthesis),
            ResponseGenerator::new(Arc::new(coaching)),
        );

        let result = service.process_audio(&child(20), b"audio").await;
        assert!(matches!(
            result,
            Err(InteractionFailure::TranscriptionFailed { .. })
        ));
    }

    #[tokio::test]
    async fn water_at_twenty_months_end_to_end() {
        let mut transcription = MockTranscriptionPort::new();
        transcription.expect_transcribe().returning(|_| {
            Ok(TranscriptionResult {
                text: "물".to_string(),
                confidence: 0.9,
            })
        });

        let mut synthesis = MockSynthesisPort::new();
        synthesis.expect_synthesize().returning(|_, _| {
            Ok(SynthesisOutput {
                audio: vec![1, 2, 3],
                cache_hit: false,
            })
        });

        let service = InteractionService::new(
            Arc::new(transcription),
            Arc::new(synthesis),
            template_generator(),
        );

        let interaction = service.process_audio(&child(20), b"audio").await.unwrap();
        assert_eq!(interaction.analysis.intent, Intent::ItemRequest);
        assert_eq!(interaction.analysis.stage, DevelopmentalStage::WordGrowth);
        assert!(interaction.response_text.contains("물"));
        assert!(!interaction.synthesis_cache_hit);
        assert_eq!(interaction.response_audio, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn synthesis_failure_keeps_generated_text() {
        let mut transcription = MockTranscriptionPort::new();
        transcription.expect_transcribe().returning(|_| {
            Ok(TranscriptionResult {
                text: "물".to_string(),
                confidence: 0.9,
            })
        });

        let mut synthesis = MockSynthesisPort::new();
        synthesis
            .expect_synthesize()
            .returning(|_, _| Err(ApplicationError::Synthesis("backend 503".to_string())));

        let service = InteractionService::new(
            Arc::new(transcription),
            Arc::new(synthesis),
            template_generator(),
        );

        let result = service.process_audio(&child(20), b"audio").await;
        match result {
            Err(InteractionFailure::SynthesisFailed { response_text, .. }) => {
                assert!(response_text.contains("물"));
            },
            other => unreachable!("expected synthesis failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn text_path_skips_transcription() {
        let mut transcription = MockTranscriptionPort::new();
        transcription.expect_transcribe().never();

        let mut synthesis = MockSynthesisPort::new();
        synthesis.expect_synthesize().returning(|_, _| {
            Ok(SynthesisOutput {
                audio: vec![9],
                cache_hit: true,
            })
        });

        let service = InteractionService::new(
            Arc::new(transcription),
            Arc::new(synthesis),
            template_generator(),
        );

        let interaction = service
            .process_text(&child(30), "같이 놀자".to_string())
            .await
            .unwrap();
        assert_eq!(interaction.analysis.intent, Intent::PlayRequest);
        assert!((interaction.confidence - 1.0).abs() < f32::EPSILON);
        assert!(interaction.synthesis_cache_hit);
    }
}
