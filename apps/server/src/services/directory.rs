//! CRUD operations over the directory records

use crate::{
    db::DirectoryStore,
    metrics,
    models::{
        Appointment, AppointmentFilter, AppointmentInput, AppointmentPatch, Hospital,
        HospitalFilter, HospitalInput, HospitalPatch, IssueSpecialtyMap, IssueSpecialtyMapInput,
        IssueSpecialtyMapPatch, Patient, PatientFilter, PatientInput, PatientPatch, Specialty,
        SpecialtyFilter, SpecialtyInput, SpecialtyPatch,
    },
    Error, Result,
};
use std::sync::Arc;
use validator::Validate;

const HOSPITAL: &str = "Hospital";
const SPECIALTY: &str = "Specialty";
const ISSUE_MAP: &str = "IssueSpecialtyMap";
const PATIENT: &str = "Patient";
const APPOINTMENT: &str = "Appointment";

/// Record the outcome of a write and pass the result through
fn tracked<T>(entity: &str, operation: &str, result: Result<T>) -> Result<T> {
    metrics::record_operation(entity, operation, result.is_ok());
    result
}

fn found<T>(entity: &'static str, id: i64, value: Option<T>) -> Result<T> {
    value.ok_or_else(|| Error::not_found(entity, id))
}

fn deleted(entity: &'static str, id: i64, removed: bool) -> Result<()> {
    if removed {
        Ok(())
    } else {
        Err(Error::not_found(entity, id))
    }
}

pub struct DirectoryService {
    store: Arc<dyn DirectoryStore>,
}

impl DirectoryService {
    pub fn new(store: Arc<dyn DirectoryStore>) -> Self {
        Self { store }
    }

    // Hospitals

    pub async fn list_hospitals(&self, filter: &HospitalFilter) -> Result<Vec<Hospital>> {
        self.store.list_hospitals(filter).await
    }

    pub async fn get_hospital(&self, id: i64) -> Result<Hospital> {
        found(HOSPITAL, id, self.store.get_hospital(id).await?)
    }

    pub async fn create_hospital(&self, input: HospitalInput) -> Result<Hospital> {
        let result = async {
            let input = input.normalized();
            input.validate()?;
            self.store.create_hospital(input).await
        }
        .await;
        if let Ok(hospital) = &result {
            tracing::info!(hospital_id = hospital.id, name = %hospital.name, "Hospital created");
        }
        tracked("hospital", "create", result)
    }

    pub async fn update_hospital(&self, id: i64, input: HospitalInput) -> Result<Hospital> {
        let result = async {
            let input = input.normalized();
            input.validate()?;
            found(HOSPITAL, id, self.store.update_hospital(id, input).await?)
        }
        .await;
        tracked("hospital", "update", result)
    }

    pub async fn patch_hospital(&self, id: i64, patch: HospitalPatch) -> Result<Hospital> {
        let current = self.get_hospital(id).await?;
        self.update_hospital(id, patch.apply(&current)).await
    }

    pub async fn delete_hospital(&self, id: i64) -> Result<()> {
        let result = async { deleted(HOSPITAL, id, self.store.delete_hospital(id).await?) }.await;
        if result.is_ok() {
            tracing::info!(hospital_id = id, "Hospital deleted");
        }
        tracked("hospital", "delete", result)
    }

    // Specialties

    pub async fn list_specialties(&self, filter: &SpecialtyFilter) -> Result<Vec<Specialty>> {
        self.store.list_specialties(filter).await
    }

    pub async fn get_specialty(&self, id: i64) -> Result<Specialty> {
        found(SPECIALTY, id, self.store.get_specialty(id).await?)
    }

    pub async fn create_specialty(&self, input: SpecialtyInput) -> Result<Specialty> {
        let result = async {
            let input = input.normalized();
            input.validate()?;
            self.store.create_specialty(input).await
        }
        .await;
        tracked("specialty", "create", result)
    }

    pub async fn update_specialty(&self, id: i64, input: SpecialtyInput) -> Result<Specialty> {
        let result = async {
            let input = input.normalized();
            input.validate()?;
            found(SPECIALTY, id, self.store.update_specialty(id, input).await?)
        }
        .await;
        tracked("specialty", "update", result)
    }

    pub async fn patch_specialty(&self, id: i64, patch: SpecialtyPatch) -> Result<Specialty> {
        let current = self.get_specialty(id).await?;
        self.update_specialty(id, patch.apply(&current)).await
    }

    pub async fn delete_specialty(&self, id: i64) -> Result<()> {
        let result =
            async { deleted(SPECIALTY, id, self.store.delete_specialty(id).await?) }.await;
        tracked("specialty", "delete", result)
    }

    // Issue maps

    pub async fn list_issue_maps(&self) -> Result<Vec<IssueSpecialtyMap>> {
        self.store.list_issue_maps().await
    }

    pub async fn get_issue_map(&self, id: i64) -> Result<IssueSpecialtyMap> {
        found(ISSUE_MAP, id, self.store.get_issue_map(id).await?)
    }

    pub async fn create_issue_map(
        &self,
        input: IssueSpecialtyMapInput,
    ) -> Result<IssueSpecialtyMap> {
        let result = async {
            let input = input.normalized();
            input.validate()?;
            self.store.create_issue_map(input).await
        }
        .await;
        tracked("issue_map", "create", result)
    }

    pub async fn update_issue_map(
        &self,
        id: i64,
        input: IssueSpecialtyMapInput,
    ) -> Result<IssueSpecialtyMap> {
        let result = async {
            let input = input.normalized();
            input.validate()?;
            found(ISSUE_MAP, id, self.store.update_issue_map(id, input).await?)
        }
        .await;
        tracked("issue_map", "update", result)
    }

    pub async fn patch_issue_map(
        &self,
        id: i64,
        patch: IssueSpecialtyMapPatch,
    ) -> Result<IssueSpecialtyMap> {
        let current = self.get_issue_map(id).await?;
        self.update_issue_map(id, patch.apply(&current)).await
    }

    pub async fn delete_issue_map(&self, id: i64) -> Result<()> {
        let result =
            async { deleted(ISSUE_MAP, id, self.store.delete_issue_map(id).await?) }.await;
        tracked("issue_map", "delete", result)
    }

    // Patients

    pub async fn list_patients(&self, filter: &PatientFilter) -> Result<Vec<Patient>> {
        self.store.list_patients(filter).await
    }

    pub async fn get_patient(&self, id: i64) -> Result<Patient> {
        found(PATIENT, id, self.store.get_patient(id).await?)
    }

    pub async fn create_patient(&self, input: PatientInput) -> Result<Patient> {
        let result = async {
            let input = input.normalized();
            input.validate()?;
            self.store.create_patient(input).await
        }
        .await;
        tracked("patient", "create", result)
    }

    pub async fn update_patient(&self, id: i64, input: PatientInput) -> Result<Patient> {
        let result = async {
            let input = input.normalized();
            input.validate()?;
            found(PATIENT, id, self.store.update_patient(id, input).await?)
        }
        .await;
        tracked("patient", "update", result)
    }

    pub async fn patch_patient(&self, id: i64, patch: PatientPatch) -> Result<Patient> {
        let current = self.get_patient(id).await?;
        self.update_patient(id, patch.apply(&current)).await
    }

    pub async fn delete_patient(&self, id: i64) -> Result<()> {
        let result = async { deleted(PATIENT, id, self.store.delete_patient(id).await?) }.await;
        tracked("patient", "delete", result)
    }

    // Appointments

    pub async fn list_appointments(&self, filter: &AppointmentFilter) -> Result<Vec<Appointment>> {
        self.store.list_appointments(filter).await
    }

    pub async fn get_appointment(&self, id: i64) -> Result<Appointment> {
        found(APPOINTMENT, id, self.store.get_appointment(id).await?)
    }

    pub async fn create_appointment(&self, input: AppointmentInput) -> Result<Appointment> {
        let result = self.store.create_appointment(input).await;
        tracked("appointment", "create", result)
    }

    pub async fn update_appointment(
        &self,
        id: i64,
        input: AppointmentInput,
    ) -> Result<Appointment> {
        let result = async {
            found(
                APPOINTMENT,
                id,
                self.store.update_appointment(id, input).await?,
            )
        }
        .await;
        tracked("appointment", "update", result)
    }

    pub async fn patch_appointment(
        &self,
        id: i64,
        patch: AppointmentPatch,
    ) -> Result<Appointment> {
        let current = self.get_appointment(id).await?;
        self.update_appointment(id, patch.apply(&current)).await
    }

    pub async fn delete_appointment(&self, id: i64) -> Result<()> {
        let result =
            async { deleted(APPOINTMENT, id, self.store.delete_appointment(id).await?) }.await;
        tracked("appointment", "delete", result)
    }
}
