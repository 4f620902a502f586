//! Domain layer for WordSprout
//!
//! Contains the core vocabulary of the speech-interaction pipeline: child
//! profiles, developmental stages, communicative intents, emotions, and the
//! per-run interaction record. This layer has no I/O dependencies.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
