//! In-memory child profile store
//!
//! Profiles are provisioned out of band; the pipeline only ever reads them.
//! An in-memory map keeps the core free of database plumbing and, combined
//! with privacy mode, guarantees nothing interaction-related is ever
//! persisted here.

use std::collections::HashMap;

use application::error::ApplicationError;
use application::ports::ChildProfileStore;
use async_trait::async_trait;
use domain::{ChildId, ChildProfile};
use parking_lot::RwLock;
use tracing::{info, warn};

use crate::config::ProfileSeed;

/// Thread-safe in-memory profile store
#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    profiles: RwLock<HashMap<ChildId, ChildProfile>>,
}

impl InMemoryProfileStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with profiles
    #[must_use]
    pub fn with_profiles(profiles: impl IntoIterator<Item = ChildProfile>) -> Self {
        let map = profiles
            .into_iter()
            .map(|profile| (profile.id, profile))
            .collect();
        Self {
            profiles: RwLock::new(map),
        }
    }

    /// Number of stored profiles
    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.read().len()
    }

    /// Whether the store is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.read().is_empty()
    }
}

/// Provision configured child profiles into a store.
///
/// Seeds with explicit ids when the config provides them so clients can
/// address a known child; entries without an id get a generated one, logged
/// so the operator can pick it up. A malformed id is a configuration
/// mistake and is skipped with a warning rather than silently renamed.
/// Returns the number of profiles saved.
///
/// # Errors
///
/// Propagates the store's error when a save fails.
pub async fn seed_profiles(
    store: &dyn ChildProfileStore,
    seeds: &[ProfileSeed],
) -> Result<usize, ApplicationError> {
    let mut saved = 0;
    for seed in seeds {
        let id = match seed.id.as_deref() {
            Some(raw) => match ChildId::parse(raw) {
                Ok(id) => id,
                Err(err) => {
                    warn!(name = %seed.name, id = %raw, error = %err, "Skipping profile with malformed id");
                    continue;
                },
            },
            None => ChildId::new(),
        };
        store
            .save(ChildProfile::new(id, seed.name.clone(), seed.age_months))
            .await?;
        info!(child_id = %id, name = %seed.name, age_months = seed.age_months, "Child profile provisioned");
        saved += 1;
    }
    Ok(saved)
}

#[async_trait]
impl ChildProfileStore for InMemoryProfileStore {
    async fn find(&self, id: ChildId) -> Result<Option<ChildProfile>, ApplicationError> {
        Ok(self.profiles.read().get(&id).cloned())
    }

    async fn save(&self, profile: ChildProfile) -> Result<(), ApplicationError> {
        self.profiles.write().insert(profile.id, profile);
        Ok(())
    }

    async fn remove(&self, id: ChildId) -> Result<bool, ApplicationError> {
        Ok(self.profiles.write().remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_find_remove_roundtrip() {
        let store = InMemoryProfileStore::new();
        let profile = ChildProfile::new(ChildId::new(), "아란", 20);
        let id = profile.id;

        assert_eq!(store.find(id).await.unwrap(), None);
        store.save(profile.clone()).await.unwrap();
        assert_eq!(store.find(id).await.unwrap(), Some(profile));
        assert!(store.remove(id).await.unwrap());
        assert!(!store.remove(id).await.unwrap());
    }

    #[tokio::test]
    async fn seeded_profiles_are_visible() {
        let a = ChildProfile::new(ChildId::new(), "하나", 14);
        let b = ChildProfile::new(ChildId::new(), "두리", 30);
        let store = InMemoryProfileStore::with_profiles([a.clone(), b]);

        assert_eq!(store.len(), 2);
        assert_eq!(store.find(a.id).await.unwrap(), Some(a));
    }

    #[tokio::test]
    async fn configured_profiles_are_reachable_after_seeding() {
        let fixed = ChildId::new();
        let store = InMemoryProfileStore::new();

        let saved = seed_profiles(
            &store,
            &[
                ProfileSeed {
                    id: Some(fixed.to_string()),
                    name: "아란".to_string(),
                    age_months: 20,
                },
                ProfileSeed {
                    id: None,
                    name: "두리".to_string(),
                    age_months: 30,
                },
            ],
        )
        .await
        .unwrap();

        assert_eq!(saved, 2);
        assert_eq!(store.len(), 2);
        // The configured id is addressable as-is; this is what makes the
        // pipeline reachable for clients that know their child id.
        let profile = store.find(fixed).await.unwrap().unwrap();
        assert_eq!(profile.name, "아란");
        assert_eq!(profile.age_months, 20);
    }

    #[tokio::test]
    async fn malformed_seed_id_is_skipped_not_renamed() {
        let store = InMemoryProfileStore::new();

        let saved = seed_profiles(
            &store,
            &[ProfileSeed {
                id: Some("not-a-uuid".to_string()),
                name: "하나".to_string(),
                age_months: 14,
            }],
        )
        .await
        .unwrap();

        assert_eq!(saved, 0);
        assert!(store.is_empty());
    }
}
