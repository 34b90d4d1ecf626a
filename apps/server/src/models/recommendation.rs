//! Recommendation read model

use super::Hospital;
use serde::{Deserialize, Serialize};

/// Resolved recommendation query handed to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationQuery {
    /// Trimmed, non-empty issue term matched against specialty names
    pub issue: String,
    /// Specialty mapped from the issue term, if an issue map matched
    pub mapped_specialty_id: Option<i64>,
    pub limit: usize,
}

/// A hospital together with its current occupancy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HospitalRecommendation {
    #[serde(flatten)]
    pub hospital: Hospital,
    /// Patients with status `IN` assigned to this hospital
    pub active_patients: i64,
}

impl HospitalRecommendation {
    pub fn available_beds(&self) -> i64 {
        i64::from(self.hospital.total_capacity) - self.active_patients
    }
}
