//! Application layer for WordSprout
//!
//! Orchestrates one child utterance end-to-end: transcribe, classify,
//! generate a coaching response, synthesize audio. Also owns the session
//! manager that buffers inbound audio per connection and serializes pipeline
//! runs. All I/O goes through the ports in [`ports`]; adapters live in the
//! infrastructure crate.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
