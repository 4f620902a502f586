//! Child profile entity (read-only to the pipeline core)

use serde::{Deserialize, Serialize};

use crate::value_objects::{ChildId, DevelopmentalStage};

/// Child metadata read from the external persistence store.
///
/// The pipeline never mutates a profile; it only reads the age to drive
/// stage-, intent- and response-selection branches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildProfile {
    /// Identifier in the external store
    pub id: ChildId,
    /// Display name shown in coaching dashboards
    pub name: String,
    /// Age in months at the time of the interaction
    pub age_months: u32,
}

impl ChildProfile {
    /// Create a profile
    #[must_use]
    pub fn new(id: ChildId, name: impl Into<String>, age_months: u32) -> Self {
        Self {
            id,
            name: name.into(),
            age_months,
        }
    }

    /// Developmental stage for this child's age
    #[must_use]
    pub const fn stage(&self) -> DevelopmentalStage {
        DevelopmentalStage::from_age_months(self.age_months)
    }
}
