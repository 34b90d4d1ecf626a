//! Dashboard display payload

use super::{Hospital, Specialty};
use serde::{Deserialize, Serialize};

/// Specialty → number of hospitals offering it, as parallel arrays for charting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpecialtyChart {
    pub labels: Vec<String>,
    pub data: Vec<i64>,
}

impl SpecialtyChart {
    pub fn from_counts(counts: Vec<(Specialty, i64)>) -> Self {
        let (labels, data) = counts
            .into_iter()
            .map(|(specialty, count)| (specialty.name, count))
            .unzip();
        Self { labels, data }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub search: Option<String>,
    pub hospitals: Vec<Hospital>,
    pub specialties: Vec<Specialty>,
    pub hospital_count: usize,
    pub specialty_count: usize,
    /// Sum of `total_capacity` over the listed hospitals
    pub total_capacity: i64,
    /// Scheduled appointments dated today or later
    pub upcoming_appointments: i64,
    pub chart: SpecialtyChart,
}
