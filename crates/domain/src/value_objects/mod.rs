//! Value objects for the speech-interaction domain

pub mod child_id;
pub mod developmental_stage;
pub mod emotion;
pub mod intent;
pub mod session_id;

pub use child_id::ChildId;
pub use developmental_stage::DevelopmentalStage;
pub use emotion::Emotion;
pub use intent::Intent;
pub use session_id::SessionId;
