//! Domain entities

pub mod child_profile;
pub mod interaction;

pub use child_profile::ChildProfile;
pub use interaction::{
    Analysis, Interaction, InteractionFailure, LatencyStatus, ResponseSource, LATENCY_GOAL,
};
