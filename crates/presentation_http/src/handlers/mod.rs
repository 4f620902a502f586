//! REST request handlers

pub mod analyze;
pub mod cache;
pub mod health;
