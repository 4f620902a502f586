//! Persistence adapters

mod profile_store;

pub use profile_store::{seed_profiles, InMemoryProfileStore};
