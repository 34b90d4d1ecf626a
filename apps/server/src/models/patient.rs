//! Patient records
//!
//! `assigned_hospital_id` is the only occupancy source: a hospital's active
//! patient count is the number of patients assigned to it with status `IN`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PatientStatus {
    /// Pending assignment
    #[default]
    #[serde(rename = "PENDING")]
    Pending,
    /// Admitted (in-patient)
    #[serde(rename = "IN")]
    In,
    /// Discharged (out-patient)
    #[serde(rename = "OUT")]
    Out,
}

impl PatientStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatientStatus::Pending => "PENDING",
            PatientStatus::In => "IN",
            PatientStatus::Out => "OUT",
        }
    }
}

impl fmt::Display for PatientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PatientStatus {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(PatientStatus::Pending),
            "IN" => Ok(PatientStatus::In),
            "OUT" => Ok(PatientStatus::Out),
            other => Err(crate::Error::Internal(format!(
                "Unknown patient status stored: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: i64,
    pub name: String,
    pub age: Option<i32>,
    pub health_issue: String,
    pub status: PatientStatus,
    pub assigned_hospital_id: Option<i64>,
    pub check_in_date: Option<DateTime<Utc>>,
}

impl Patient {
    pub fn is_admitted_to(&self, hospital_id: i64) -> bool {
        self.status == PatientStatus::In && self.assigned_hospital_id == Some(hospital_id)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
pub struct PatientInput {
    #[validate(length(min = 1, max = 255, message = "name must be 1-255 characters"))]
    pub name: String,
    #[validate(range(min = 0, max = 150, message = "age must be between 0 and 150"))]
    #[serde(default)]
    pub age: Option<i32>,
    #[validate(length(min = 1, max = 255, message = "health_issue must be 1-255 characters"))]
    pub health_issue: String,
    #[serde(default)]
    pub status: PatientStatus,
    #[serde(default)]
    pub assigned_hospital_id: Option<i64>,
    #[serde(default)]
    pub check_in_date: Option<DateTime<Utc>>,
}

impl PatientInput {
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.health_issue = self.health_issue.trim().to_string();
        self
    }
}

/// Partial update. Nullable fields use a nested `Option` so that an explicit
/// `null` clears the value while an absent key leaves it untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PatientPatch {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub age: Option<Option<i32>>,
    pub health_issue: Option<String>,
    pub status: Option<PatientStatus>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub assigned_hospital_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub check_in_date: Option<Option<DateTime<Utc>>>,
}

impl PatientPatch {
    pub fn apply(self, current: &Patient) -> PatientInput {
        PatientInput {
            name: self.name.unwrap_or_else(|| current.name.clone()),
            age: self.age.unwrap_or(current.age),
            health_issue: self
                .health_issue
                .unwrap_or_else(|| current.health_issue.clone()),
            status: self.status.unwrap_or(current.status),
            assigned_hospital_id: self
                .assigned_hospital_id
                .unwrap_or(current.assigned_hospital_id),
            check_in_date: self.check_in_date.unwrap_or(current.check_in_date),
        }
    }
}

pub(crate) fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PatientFilter {
    pub hospital_id: Option<i64>,
    pub status: Option<PatientStatus>,
}

impl PatientFilter {
    pub fn matches(&self, patient: &Patient) -> bool {
        if let Some(hospital_id) = self.hospital_id {
            if patient.assigned_hospital_id != Some(hospital_id) {
                return false;
            }
        }
        if let Some(status) = self.status {
            if patient.status != status {
                return false;
            }
        }
        true
    }
}
