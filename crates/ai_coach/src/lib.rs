//! AI Coach - generative coaching-response client
//!
//! Asks an OpenAI-compatible chat-completions backend for a short, warm,
//! age-calibrated parental follow-up to a child's utterance. The client is
//! one strategy inside the response generator's fallback chain; when it is
//! unavailable or errors, the caller falls back to templates or canned
//! responses.

pub mod client;
pub mod config;
pub mod error;
pub mod prompt;

pub use client::CoachClient;
pub use config::CoachConfig;
pub use error::CoachError;
pub use prompt::CoachingRequest;
