//! Ports - interfaces the application layer depends on
//!
//! Implemented by infrastructure adapters; mocked in service tests.

mod coaching_port;
mod profile_store;
mod synthesis_port;
mod transcription_port;

pub use coaching_port::{CoachingContext, CoachingPort};
pub use profile_store::ChildProfileStore;
pub use synthesis_port::{CacheStats, ResponseSpeed, SynthesisOutput, SynthesisPort};
pub use transcription_port::{TranscriptionPort, TranscriptionResult};

#[cfg(test)]
pub use coaching_port::MockCoachingPort;
#[cfg(test)]
pub use profile_store::MockChildProfileStore;
#[cfg(test)]
pub use synthesis_port::MockSynthesisPort;
#[cfg(test)]
pub use transcription_port::MockTranscriptionPort;
