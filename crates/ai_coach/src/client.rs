//! OpenAI-compatible chat-completions client

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::CoachConfig;
use crate::error::CoachError;
use crate::prompt::CoachingRequest;

/// Chat client producing coaching responses
#[derive(Debug, Clone)]
pub struct CoachClient {
    client: Client,
    config: CoachConfig,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

impl CoachClient {
    /// Create a new coaching client
    ///
    /// # Errors
    ///
    /// Returns `CoachError::Configuration` if the configuration is invalid
    /// or the HTTP client cannot be built. A missing API key is not an
    /// error here; each call fails cheaply instead so the response
    /// generator can fall through to templates.
    pub fn new(config: CoachConfig) -> Result<Self, CoachError> {
        config.validate().map_err(CoachError::Configuration)?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| CoachError::Configuration(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Whether the client holds credentials
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.config.has_credentials()
    }

    /// Request a coaching response for one interaction.
    ///
    /// # Errors
    ///
    /// Returns `CoachError::Configuration` without a network call when the
    /// API key is missing, `CoachError::InvalidResponse` when the backend
    /// answers with no usable text, and other variants for transport or
    /// backend failures.
    #[instrument(skip(self, request), fields(age_months = request.age_months, intent = %request.intent))]
    pub async fn coach(&self, request: &CoachingRequest) -> Result<String, CoachError> {
        let Some(api_key) = self.config.api_key.as_deref().filter(|k| !k.is_empty()) else {
            return Err(CoachError::Configuration(
                "Coaching API key is not configured".to_string(),
            ));
        };

        let prompt = request.build_prompt();
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &prompt,
            }],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(CoachError::GenerationFailed(format!(
                "HTTP {status}: {error_body}"
            )));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| CoachError::InvalidResponse(format!("Failed to parse response: {e}")))?;

        let text = chat
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_string())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(CoachError::InvalidResponse(
                "Backend returned no text".to_string(),
            ));
        }

        debug!(response_len = text.len(), "Coaching response generated");
        Ok(text)
    }
}
