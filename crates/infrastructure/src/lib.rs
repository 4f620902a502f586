//! Infrastructure layer for WordSprout
//!
//! Concrete adapters behind the application ports: speech recognition and
//! cached synthesis over the `ai_speech` providers, generative coaching over
//! the `ai_coach` client, an in-memory child profile store, and layered
//! configuration loading.

pub mod adapters;
pub mod cache;
pub mod config;
pub mod persistence;

pub use config::AppConfig;
