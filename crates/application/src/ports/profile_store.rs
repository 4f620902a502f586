//! Child profile store port

use async_trait::async_trait;
use domain::{ChildId, ChildProfile};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for child profile persistence.
///
/// The pipeline only reads profiles; writes exist for provisioning and
/// tests. Profile data never includes transcripts or audio.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ChildProfileStore: Send + Sync {
    /// Look up a profile by id.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Internal` when the store is unreachable.
    async fn find(&self, id: ChildId) -> Result<Option<ChildProfile>, ApplicationError>;

    /// Insert or replace a profile.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Internal` when the store is unreachable.
    async fn save(&self, profile: ChildProfile) -> Result<(), ApplicationError>;

    /// Remove a profile, returning whether it existed.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Internal` when the store is unreachable.
    async fn remove(&self, id: ChildId) -> Result<bool, ApplicationError>;
}
