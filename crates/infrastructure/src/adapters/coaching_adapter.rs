//! Coaching adapter - implements `CoachingPort` over `ai_coach`

use ai_coach::{CoachClient, CoachConfig, CoachError, CoachingRequest};
use application::error::ApplicationError;
use application::ports::{CoachingContext, CoachingPort};
use async_trait::async_trait;
use tracing::instrument;

/// Adapter bridging the generative coaching client into the application layer
#[derive(Debug, Clone)]
pub struct CoachingAdapter {
    client: CoachClient,
}

impl CoachingAdapter {
    /// Create an adapter over the chat-completions client.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` when the client cannot be
    /// built from the given configuration.
    pub fn new(config: CoachConfig) -> Result<Self, ApplicationError> {
        let client =
            CoachClient::new(config).map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self { client })
    }

    fn map_error(err: CoachError) -> ApplicationError {
        match err {
            CoachError::Configuration(msg) => ApplicationError::Configuration(msg),
            other => ApplicationError::Generation(other.to_string()),
        }
    }
}

#[async_trait]
impl CoachingPort for CoachingAdapter {
    #[instrument(skip(self, context), fields(age_months = context.age_months))]
    async fn coach(&self, context: &CoachingContext) -> Result<String, ApplicationError> {
        let request = CoachingRequest {
            age_months: context.age_months,
            transcript: context.transcript.clone(),
            intent: context.intent.as_str().to_string(),
            stage: context.stage.as_str().to_string(),
        };

        self.client.coach(&request).await.map_err(Self::map_error)
    }

    fn is_available(&self) -> bool {
        self.client.is_configured()
    }
}
