//! Domain models for the hospital directory

pub mod appointment;
pub mod dashboard;
pub mod hospital;
pub mod patient;
pub mod recommendation;
pub mod specialty;

pub use appointment::{
    Appointment, AppointmentFilter, AppointmentInput, AppointmentPatch, AppointmentStatus,
};
pub use dashboard::{DashboardSummary, SpecialtyChart};
pub use hospital::{Hospital, HospitalFilter, HospitalInput, HospitalPatch};
pub use patient::{Patient, PatientFilter, PatientInput, PatientPatch, PatientStatus};
pub use recommendation::{HospitalRecommendation, RecommendationQuery};
pub use specialty::{
    IssueSpecialtyMap, IssueSpecialtyMapInput, IssueSpecialtyMapPatch, Specialty,
    SpecialtyFilter, SpecialtyInput, SpecialtyPatch,
};

/// Case-insensitive substring match used by list filters and the recommendation query.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Trim a filter value, treating blank input as absent.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
