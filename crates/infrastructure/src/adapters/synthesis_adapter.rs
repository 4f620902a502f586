//! Synthesis adapter - implements `SynthesisPort` over `ai_speech` plus the
//! content-addressed cache
//!
//! Normalizes the response text, checks the cache, and only on a miss asks
//! the synthesis backend before persisting the result under the key. The
//! cache is consulted even when the backend has no credentials, so
//! previously synthesized responses keep working offline.

use std::sync::Arc;

use ai_speech::{
    normalize_for_tts, GoogleSynthesizer, Language, SpeechError, SpeedMode, SynthesisConfig,
    TextToSpeech,
};
use application::error::ApplicationError;
use application::ports::{CacheStats, ResponseSpeed, SynthesisOutput, SynthesisPort};
use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::cache::{cache_key, SynthesisCache};

/// Adapter bridging cached synthesis into the application layer
pub struct SynthesisAdapter {
    synthesizer: Arc<dyn TextToSpeech>,
    cache: Arc<SynthesisCache>,
    language: Language,
}

impl std::fmt::Debug for SynthesisAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SynthesisAdapter")
            .field("language", &self.language)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl SynthesisAdapter {
    /// Create an adapter over the Google-style synthesizer.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` when the provider cannot be
    /// built from the given configuration.
    pub fn new(config: SynthesisConfig, cache: Arc<SynthesisCache>) -> Result<Self, ApplicationError> {
        let language = config.language;
        let synthesizer = GoogleSynthesizer::new(config)
            .map_err(|e: SpeechError| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self::with_synthesizer(
            Arc::new(synthesizer),
            cache,
            language,
        ))
    }

    /// Create an adapter over any synthesis backend
    #[must_use]
    pub fn with_synthesizer(
        synthesizer: Arc<dyn TextToSpeech>,
        cache: Arc<SynthesisCache>,
        language: Language,
    ) -> Self {
        Self {
            synthesizer,
            cache,
            language,
        }
    }

    const fn speed_mode(speed: ResponseSpeed) -> SpeedMode {
        match speed {
            ResponseSpeed::Normal => SpeedMode::Normal,
            ResponseSpeed::Slow => SpeedMode::Slow,
        }
    }

    fn map_error(err: SpeechError) -> ApplicationError {
        match err {
            SpeechError::Configuration(msg) => ApplicationError::Configuration(msg),
            other => ApplicationError::Synthesis(other.to_string()),
        }
    }
}

#[async_trait]
impl SynthesisPort for SynthesisAdapter {
    #[instrument(skip(self, text), fields(speed = %speed))]
    async fn synthesize(
        &self,
        text: &str,
        speed: ResponseSpeed,
    ) -> Result<SynthesisOutput, ApplicationError> {
        let normalized = normalize_for_tts(text);
        let key = cache_key(&normalized, self.language.as_str(), speed.as_str());

        if let Some(audio) = self.cache.get(&key).await {
            debug!(key = %key, "Synthesis cache hit");
            return Ok(SynthesisOutput {
                audio,
                cache_hit: true,
            });
        }

        let audio = self
            .synthesizer
            .synthesize(&normalized, self.language, Self::speed_mode(speed))
            .await
            .map_err(Self::map_error)?;

        self.cache
            .insert(&key, &audio)
            .await
            .map_err(|e| ApplicationError::Synthesis(format!("Cache write failed: {e}")))?;

        Ok(SynthesisOutput {
            audio,
            cache_hit: false,
        })
    }

    fn is_configured(&self) -> bool {
        self.synthesizer.is_configured()
    }

    async fn clear_cache(&self) -> Result<u64, ApplicationError> {
        self.cache
            .clear()
            .await
            .map_err(|e| ApplicationError::Synthesis(format!("Cache clear failed: {e}")))
    }

    async fn cache_stats(&self) -> Result<CacheStats, ApplicationError> {
        self.cache
            .stats()
            .await
            .map_err(|e| ApplicationError::Synthesis(format!("Cache stats failed: {e}")))
    }
}
