//! AI Speech - Speech-to-Text and Text-to-Speech adapters
//!
//! Wraps the external recognition and synthesis backends behind uniform
//! traits so the pipeline can swap providers and degrade gracefully:
//! - `SpeechToText` - transcribe raw audio to text + confidence (STT)
//! - `TextToSpeech` - synthesize coaching text to audio (TTS)
//!
//! # Architecture
//!
//! This crate follows the ports & adapters pattern:
//! - `ports` module defines the traits (ports)
//! - `providers` module contains concrete implementations (adapters)
//!
//! # Providers
//!
//! - Clova-style speech recognition (Korean, octet-stream upload)
//! - Google-style speech synthesis (child-tuned pitch/rate, MP3 output)
//!
//! Both providers treat missing credentials as an immediate, cheap
//! configuration failure - no network call is made.

pub mod config;
pub mod error;
pub mod normalize;
pub mod ports;
pub mod providers;
pub mod types;

pub use config::{RecognitionConfig, SynthesisConfig};
pub use error::SpeechError;
pub use normalize::normalize_for_tts;
pub use ports::{SpeechToText, TextToSpeech};
pub use providers::clova::ClovaRecognizer;
pub use providers::google::GoogleSynthesizer;
pub use types::{Language, SpeedMode, Transcript};
