//! Coaching port - interface for the generative response backend

use async_trait::async_trait;
use domain::{DevelopmentalStage, Intent};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Everything the generative backend needs about one interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoachingContext {
    /// Child age in months
    pub age_months: u32,
    /// What the child said
    pub transcript: String,
    /// Inferred intent
    pub intent: Intent,
    /// Developmental stage
    pub stage: DevelopmentalStage,
}

/// Port for generative coaching-response generation
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CoachingPort: Send + Sync {
    /// Generate a short coaching response for the given context.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` when the backend key is
    /// absent and `ApplicationError::Generation` for backend failures or
    /// empty replies. Either way the caller falls through to a non-generative
    /// strategy.
    async fn coach(&self, context: &CoachingContext) -> Result<String, ApplicationError>;

    /// Whether the generative backend holds credentials
    fn is_available(&self) -> bool;
}
