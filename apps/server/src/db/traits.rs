//! Core storage trait for the hospital directory

use crate::{
    models::{
        Appointment, AppointmentFilter, AppointmentInput, Hospital, HospitalFilter,
        HospitalInput, HospitalRecommendation, IssueSpecialtyMap, IssueSpecialtyMapInput, Patient,
        PatientFilter, PatientInput, RecommendationQuery, Specialty, SpecialtyFilter,
        SpecialtyInput,
    },
    Result,
};
use async_trait::async_trait;
use chrono::NaiveDate;

/// Storage operations behind the directory API
///
/// Implemented by the PostgreSQL store and the in-memory store. Handlers and
/// services only ever reach data through an explicit `Arc<dyn DirectoryStore>`.
///
/// Conventions shared by all implementations:
/// - `get_*` return `Ok(None)` for unknown ids
/// - `update_*` return `Ok(None)` when the record does not exist
/// - `delete_*` return `Ok(false)` when nothing was deleted
/// - lists are ordered by id ascending
/// - inputs are already validated; referenced ids that do not exist surface as
///   `Error::InvalidReference`, duplicate issue terms as `Error::Conflict`
#[async_trait]
pub trait DirectoryStore: Send + Sync {
    // Hospitals

    async fn list_hospitals(&self, filter: &HospitalFilter) -> Result<Vec<Hospital>>;

    async fn get_hospital(&self, id: i64) -> Result<Option<Hospital>>;

    async fn create_hospital(&self, input: HospitalInput) -> Result<Hospital>;

    async fn update_hospital(&self, id: i64, input: HospitalInput) -> Result<Option<Hospital>>;

    /// Removes specialty links and detaches patients and appointments.
    async fn delete_hospital(&self, id: i64) -> Result<bool>;

    // Specialties

    async fn list_specialties(&self, filter: &SpecialtyFilter) -> Result<Vec<Specialty>>;

    async fn get_specialty(&self, id: i64) -> Result<Option<Specialty>>;

    async fn create_specialty(&self, input: SpecialtyInput) -> Result<Specialty>;

    async fn update_specialty(&self, id: i64, input: SpecialtyInput)
        -> Result<Option<Specialty>>;

    /// Removes hospital links and deletes issue maps pointing at the specialty.
    async fn delete_specialty(&self, id: i64) -> Result<bool>;

    // Issue maps

    async fn list_issue_maps(&self) -> Result<Vec<IssueSpecialtyMap>>;

    async fn get_issue_map(&self, id: i64) -> Result<Option<IssueSpecialtyMap>>;

    /// Case-insensitive exact lookup of an issue term.
    async fn find_issue_map(&self, issue_term: &str) -> Result<Option<IssueSpecialtyMap>>;

    async fn create_issue_map(&self, input: IssueSpecialtyMapInput) -> Result<IssueSpecialtyMap>;

    async fn update_issue_map(
        &self,
        id: i64,
        input: IssueSpecialtyMapInput,
    ) -> Result<Option<IssueSpecialtyMap>>;

    async fn delete_issue_map(&self, id: i64) -> Result<bool>;

    // Patients

    async fn list_patients(&self, filter: &PatientFilter) -> Result<Vec<Patient>>;

    async fn get_patient(&self, id: i64) -> Result<Option<Patient>>;

    async fn create_patient(&self, input: PatientInput) -> Result<Patient>;

    async fn update_patient(&self, id: i64, input: PatientInput) -> Result<Option<Patient>>;

    /// Detaches the patient's appointments.
    async fn delete_patient(&self, id: i64) -> Result<bool>;

    // Appointments

    async fn list_appointments(&self, filter: &AppointmentFilter) -> Result<Vec<Appointment>>;

    async fn get_appointment(&self, id: i64) -> Result<Option<Appointment>>;

    async fn create_appointment(&self, input: AppointmentInput) -> Result<Appointment>;

    async fn update_appointment(
        &self,
        id: i64,
        input: AppointmentInput,
    ) -> Result<Option<Appointment>>;

    async fn delete_appointment(&self, id: i64) -> Result<bool>;

    // Read models

    /// Hospitals matching the query with occupancy strictly below capacity,
    /// ordered by active patients ascending then id, at most `query.limit`.
    async fn recommend_hospitals(
        &self,
        query: &RecommendationQuery,
    ) -> Result<Vec<HospitalRecommendation>>;

    /// Every specialty with the number of hospitals offering it, ordered by
    /// specialty name then id.
    async fn specialty_hospital_counts(&self) -> Result<Vec<(Specialty, i64)>>;

    /// Scheduled appointments dated on or after `today`.
    async fn count_upcoming_appointments(&self, today: NaiveDate) -> Result<i64>;
}
