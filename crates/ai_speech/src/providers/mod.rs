//! Concrete speech provider adapters

pub mod clova;
pub mod google;
