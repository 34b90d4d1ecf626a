//! In-memory directory store
//!
//! Mirrors the PostgreSQL store's semantics (ordering, referential behaviour,
//! uniqueness) on top of ordered maps guarded by a tokio `RwLock`. Used by the
//! test suite and for running the service without a database.

use crate::{
    db::DirectoryStore,
    models::{
        contains_ignore_case, Appointment, AppointmentFilter, AppointmentInput, Hospital,
        HospitalFilter, HospitalInput, HospitalRecommendation, IssueSpecialtyMap,
        IssueSpecialtyMapInput, Patient, PatientFilter, PatientInput, RecommendationQuery,
        Specialty, SpecialtyFilter, SpecialtyInput,
    },
    Error, Result,
};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::{BTreeMap, BTreeSet};
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct HospitalRow {
    id: i64,
    name: String,
    address: String,
    total_capacity: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct IssueMapRow {
    id: i64,
    issue_term: String,
    primary_specialty_id: i64,
}

#[derive(Debug, Default)]
struct Tables {
    hospitals: BTreeMap<i64, HospitalRow>,
    specialties: BTreeMap<i64, Specialty>,
    /// (hospital_id, specialty_id)
    hospital_specialties: BTreeSet<(i64, i64)>,
    issue_maps: BTreeMap<i64, IssueMapRow>,
    patients: BTreeMap<i64, Patient>,
    appointments: BTreeMap<i64, Appointment>,
    sequences: Sequences,
}

#[derive(Debug, Default)]
struct Sequences {
    hospital: i64,
    specialty: i64,
    issue_map: i64,
    patient: i64,
    appointment: i64,
}

fn next(sequence: &mut i64) -> i64 {
    *sequence += 1;
    *sequence
}

impl Tables {
    fn hospital(&self, row: &HospitalRow) -> Hospital {
        let mut specialties: Vec<Specialty> = self
            .hospital_specialties
            .range((row.id, i64::MIN)..=(row.id, i64::MAX))
            .filter_map(|(_, specialty_id)| self.specialties.get(specialty_id).cloned())
            .collect();
        // Byte order, same as the `COLLATE "C"` ordering in the Postgres store
        specialties.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

        Hospital {
            id: row.id,
            name: row.name.clone(),
            address: row.address.clone(),
            total_capacity: row.total_capacity,
            specialties,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }

    fn issue_map(&self, row: &IssueMapRow) -> Result<IssueSpecialtyMap> {
        let primary_specialty = self
            .specialties
            .get(&row.primary_specialty_id)
            .cloned()
            .ok_or_else(|| {
                Error::Internal(format!(
                    "Issue map {} points at missing specialty {}",
                    row.id, row.primary_specialty_id
                ))
            })?;
        Ok(IssueSpecialtyMap {
            id: row.id,
            issue_term: row.issue_term.clone(),
            primary_specialty,
        })
    }

    fn active_patients(&self, hospital_id: i64) -> i64 {
        self.patients
            .values()
            .filter(|p| p.is_admitted_to(hospital_id))
            .count() as i64
    }

    fn ensure_specialties(&self, ids: &[i64]) -> Result<()> {
        match ids.iter().find(|id| !self.specialties.contains_key(id)) {
            Some(missing) => Err(Error::InvalidReference(format!(
                "Specialty {missing} does not exist"
            ))),
            None => Ok(()),
        }
    }

    fn ensure_hospital(&self, id: Option<i64>) -> Result<()> {
        match id {
            Some(id) if !self.hospitals.contains_key(&id) => Err(Error::InvalidReference(
                format!("Hospital {id} does not exist"),
            )),
            _ => Ok(()),
        }
    }

    fn ensure_patient(&self, id: Option<i64>) -> Result<()> {
        match id {
            Some(id) if !self.patients.contains_key(&id) => Err(Error::InvalidReference(
                format!("Patient {id} does not exist"),
            )),
            _ => Ok(()),
        }
    }

    fn ensure_issue_term_free(&self, term: &str, own_id: Option<i64>) -> Result<()> {
        let taken = self
            .issue_maps
            .values()
            .any(|m| Some(m.id) != own_id && m.issue_term.to_lowercase() == term.to_lowercase());
        if taken {
            return Err(Error::Conflict(format!(
                "Issue term '{term}' is already mapped"
            )));
        }
        Ok(())
    }

    fn link_specialties(&mut self, hospital_id: i64, specialty_ids: &[i64]) {
        self.hospital_specialties
            .retain(|(h, _)| *h != hospital_id);
        for specialty_id in specialty_ids {
            self.hospital_specialties.insert((hospital_id, *specialty_id));
        }
    }
}

#[derive(Debug, Default)]
pub struct InMemoryDirectoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryDirectoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DirectoryStore for InMemoryDirectoryStore {
    async fn list_hospitals(&self, filter: &HospitalFilter) -> Result<Vec<Hospital>> {
        let tables = self.tables.read().await;
        Ok(tables
            .hospitals
            .values()
            .map(|row| tables.hospital(row))
            .filter(|h| filter.matches(h))
            .collect())
    }

    async fn get_hospital(&self, id: i64) -> Result<Option<Hospital>> {
        let tables = self.tables.read().await;
        Ok(tables.hospitals.get(&id).map(|row| tables.hospital(row)))
    }

    async fn create_hospital(&self, input: HospitalInput) -> Result<Hospital> {
        let mut tables = self.tables.write().await;
        tables.ensure_specialties(&input.specialty_ids)?;

        let now = Utc::now();
        let id = next(&mut tables.sequences.hospital);
        let row = HospitalRow {
            id,
            name: input.name,
            address: input.address,
            total_capacity: input.total_capacity,
            created_at: now,
            updated_at: now,
        };
        tables.hospitals.insert(id, row.clone());
        tables.link_specialties(id, &input.specialty_ids);

        Ok(tables.hospital(&row))
    }

    async fn update_hospital(&self, id: i64, input: HospitalInput) -> Result<Option<Hospital>> {
        let mut tables = self.tables.write().await;
        if !tables.hospitals.contains_key(&id) {
            return Ok(None);
        }
        tables.ensure_specialties(&input.specialty_ids)?;

        let row = {
            let Some(row) = tables.hospitals.get_mut(&id) else {
                return Ok(None);
            };
            row.name = input.name;
            row.address = input.address;
            row.total_capacity = input.total_capacity;
            row.updated_at = Utc::now();
            row.clone()
        };
        tables.link_specialties(id, &input.specialty_ids);

        Ok(Some(tables.hospital(&row)))
    }

    async fn delete_hospital(&self, id: i64) -> Result<bool> {
        let mut tables = self.tables.write().await;
        if tables.hospitals.remove(&id).is_none() {
            return Ok(false);
        }
        tables.hospital_specialties.retain(|(h, _)| *h != id);
        for patient in tables.patients.values_mut() {
            if patient.assigned_hospital_id == Some(id) {
                patient.assigned_hospital_id = None;
            }
        }
        for appointment in tables.appointments.values_mut() {
            if appointment.hospital_id == Some(id) {
                appointment.hospital_id = None;
            }
        }
        Ok(true)
    }

    async fn list_specialties(&self, filter: &SpecialtyFilter) -> Result<Vec<Specialty>> {
        let tables = self.tables.read().await;
        Ok(tables
            .specialties
            .values()
            .filter(|s| filter.name().map_or(true, |n| contains_ignore_case(&s.name, n)))
            .cloned()
            .collect())
    }

    async fn get_specialty(&self, id: i64) -> Result<Option<Specialty>> {
        Ok(self.tables.read().await.specialties.get(&id).cloned())
    }

    async fn create_specialty(&self, input: SpecialtyInput) -> Result<Specialty> {
        let mut tables = self.tables.write().await;
        let id = next(&mut tables.sequences.specialty);
        let specialty = Specialty {
            id,
            name: input.name,
        };
        tables.specialties.insert(id, specialty.clone());
        Ok(specialty)
    }

    async fn update_specialty(
        &self,
        id: i64,
        input: SpecialtyInput,
    ) -> Result<Option<Specialty>> {
        let mut tables = self.tables.write().await;
        Ok(tables.specialties.get_mut(&id).map(|specialty| {
            specialty.name = input.name;
            specialty.clone()
        }))
    }

    async fn delete_specialty(&self, id: i64) -> Result<bool> {
        let mut tables = self.tables.write().await;
        if tables.specialties.remove(&id).is_none() {
            return Ok(false);
        }
        tables.hospital_specialties.retain(|(_, s)| *s != id);
        tables.issue_maps.retain(|_, m| m.primary_specialty_id != id);
        Ok(true)
    }

    async fn list_issue_maps(&self) -> Result<Vec<IssueSpecialtyMap>> {
        let tables = self.tables.read().await;
        tables
            .issue_maps
            .values()
            .map(|row| tables.issue_map(row))
            .collect()
    }

    async fn get_issue_map(&self, id: i64) -> Result<Option<IssueSpecialtyMap>> {
        let tables = self.tables.read().await;
        tables
            .issue_maps
            .get(&id)
            .map(|row| tables.issue_map(row))
            .transpose()
    }

    async fn find_issue_map(&self, issue_term: &str) -> Result<Option<IssueSpecialtyMap>> {
        let tables = self.tables.read().await;
        let needle = issue_term.to_lowercase();
        tables
            .issue_maps
            .values()
            .find(|m| m.issue_term.to_lowercase() == needle)
            .map(|row| tables.issue_map(row))
            .transpose()
    }

    async fn create_issue_map(&self, input: IssueSpecialtyMapInput) -> Result<IssueSpecialtyMap> {
        let mut tables = self.tables.write().await;
        tables.ensure_specialties(&[input.primary_specialty_id])?;
        tables.ensure_issue_term_free(&input.issue_term, None)?;

        let id = next(&mut tables.sequences.issue_map);
        let row = IssueMapRow {
            id,
            issue_term: input.issue_term,
            primary_specialty_id: input.primary_specialty_id,
        };
        tables.issue_maps.insert(id, row.clone());
        tables.issue_map(&row)
    }

    async fn update_issue_map(
        &self,
        id: i64,
        input: IssueSpecialtyMapInput,
    ) -> Result<Option<IssueSpecialtyMap>> {
        let mut tables = self.tables.write().await;
        if !tables.issue_maps.contains_key(&id) {
            return Ok(None);
        }
        tables.ensure_specialties(&[input.primary_specialty_id])?;
        tables.ensure_issue_term_free(&input.issue_term, Some(id))?;

        let row = IssueMapRow {
            id,
            issue_term: input.issue_term,
            primary_specialty_id: input.primary_specialty_id,
        };
        tables.issue_maps.insert(id, row.clone());
        tables.issue_map(&row).map(Some)
    }

    async fn delete_issue_map(&self, id: i64) -> Result<bool> {
        Ok(self.tables.write().await.issue_maps.remove(&id).is_some())
    }

    async fn list_patients(&self, filter: &PatientFilter) -> Result<Vec<Patient>> {
        let tables = self.tables.read().await;
        Ok(tables
            .patients
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect())
    }

    async fn get_patient(&self, id: i64) -> Result<Option<Patient>> {
        Ok(self.tables.read().await.patients.get(&id).cloned())
    }

    async fn create_patient(&self, input: PatientInput) -> Result<Patient> {
        let mut tables = self.tables.write().await;
        tables.ensure_hospital(input.assigned_hospital_id)?;

        let id = next(&mut tables.sequences.patient);
        let patient = Patient {
            id,
            name: input.name,
            age: input.age,
            health_issue: input.health_issue,
            status: input.status,
            assigned_hospital_id: input.assigned_hospital_id,
            check_in_date: input.check_in_date,
        };
        tables.patients.insert(id, patient.clone());
        Ok(patient)
    }

    async fn update_patient(&self, id: i64, input: PatientInput) -> Result<Option<Patient>> {
        let mut tables = self.tables.write().await;
        if !tables.patients.contains_key(&id) {
            return Ok(None);
        }
        tables.ensure_hospital(input.assigned_hospital_id)?;

        let patient = Patient {
            id,
            name: input.name,
            age: input.age,
            health_issue: input.health_issue,
            status: input.status,
            assigned_hospital_id: input.assigned_hospital_id,
            check_in_date: input.check_in_date,
        };
        tables.patients.insert(id, patient.clone());
        Ok(Some(patient))
    }

    async fn delete_patient(&self, id: i64) -> Result<bool> {
        let mut tables = self.tables.write().await;
        if tables.patients.remove(&id).is_none() {
            return Ok(false);
        }
        for appointment in tables.appointments.values_mut() {
            if appointment.patient_id == Some(id) {
                appointment.patient_id = None;
            }
        }
        Ok(true)
    }

    async fn list_appointments(&self, filter: &AppointmentFilter) -> Result<Vec<Appointment>> {
        let tables = self.tables.read().await;
        Ok(tables
            .appointments
            .values()
            .filter(|a| filter.matches(a))
            .cloned()
            .collect())
    }

    async fn get_appointment(&self, id: i64) -> Result<Option<Appointment>> {
        Ok(self.tables.read().await.appointments.get(&id).cloned())
    }

    async fn create_appointment(&self, input: AppointmentInput) -> Result<Appointment> {
        let mut tables = self.tables.write().await;
        tables.ensure_hospital(input.hospital_id)?;
        tables.ensure_patient(input.patient_id)?;

        let id = next(&mut tables.sequences.appointment);
        let appointment = Appointment {
            id,
            hospital_id: input.hospital_id,
            patient_id: input.patient_id,
            status: input.status,
            appointment_date: input.appointment_date,
        };
        tables.appointments.insert(id, appointment.clone());
        Ok(appointment)
    }

    async fn update_appointment(
        &self,
        id: i64,
        input: AppointmentInput,
    ) -> Result<Option<Appointment>> {
        let mut tables = self.tables.write().await;
        if !tables.appointments.contains_key(&id) {
            return Ok(None);
        }
        tables.ensure_hospital(input.hospital_id)?;
        tables.ensure_patient(input.patient_id)?;

        let appointment = Appointment {
            id,
            hospital_id: input.hospital_id,
            patient_id: input.patient_id,
            status: input.status,
            appointment_date: input.appointment_date,
        };
        tables.appointments.insert(id, appointment.clone());
        Ok(Some(appointment))
    }

    async fn delete_appointment(&self, id: i64) -> Result<bool> {
        Ok(self.tables.write().await.appointments.remove(&id).is_some())
    }

    async fn recommend_hospitals(
        &self,
        query: &RecommendationQuery,
    ) -> Result<Vec<HospitalRecommendation>> {
        let tables = self.tables.read().await;

        let mut matches: Vec<HospitalRecommendation> = tables
            .hospitals
            .values()
            .map(|row| tables.hospital(row))
            .filter(|hospital| {
                hospital.specialties.iter().any(|s| {
                    contains_ignore_case(&s.name, &query.issue)
                        || Some(s.id) == query.mapped_specialty_id
                })
            })
            .filter_map(|hospital| {
                let active_patients = tables.active_patients(hospital.id);
                (active_patients < i64::from(hospital.total_capacity)).then_some(
                    HospitalRecommendation {
                        hospital,
                        active_patients,
                    },
                )
            })
            .collect();

        matches.sort_by(|a, b| {
            a.active_patients
                .cmp(&b.active_patients)
                .then(a.hospital.id.cmp(&b.hospital.id))
        });
        matches.truncate(query.limit);

        Ok(matches)
    }

    async fn specialty_hospital_counts(&self) -> Result<Vec<(Specialty, i64)>> {
        let tables = self.tables.read().await;
        let mut counts: Vec<(Specialty, i64)> = tables
            .specialties
            .values()
            .map(|specialty| {
                let count = tables
                    .hospital_specialties
                    .iter()
                    .filter(|(_, s)| *s == specialty.id)
                    .count() as i64;
                (specialty.clone(), count)
            })
            .collect();
        counts.sort_by(|(a, _), (b, _)| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(counts)
    }

    async fn count_upcoming_appointments(&self, today: NaiveDate) -> Result<i64> {
        let tables = self.tables.read().await;
        Ok(tables
            .appointments
            .values()
            .filter(|a| a.is_upcoming(today))
            .count() as i64)
    }
}
