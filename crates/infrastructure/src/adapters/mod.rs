//! Port adapters over the speech and coaching crates

mod coaching_adapter;
mod recognition_adapter;
mod synthesis_adapter;

pub use coaching_adapter::CoachingAdapter;
pub use recognition_adapter::RecognitionAdapter;
pub use synthesis_adapter::SynthesisAdapter;
