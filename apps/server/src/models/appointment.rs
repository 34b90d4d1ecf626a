//! Appointment records

use super::patient::deserialize_some;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(AppointmentStatus::Scheduled),
            "completed" => Ok(AppointmentStatus::Completed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            other => Err(crate::Error::Internal(format!(
                "Unknown appointment status stored: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub hospital_id: Option<i64>,
    pub patient_id: Option<i64>,
    pub status: AppointmentStatus,
    pub appointment_date: NaiveDate,
}

impl Appointment {
    /// Scheduled for `today` or later.
    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        self.status == AppointmentStatus::Scheduled && self.appointment_date >= today
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppointmentInput {
    #[serde(default)]
    pub hospital_id: Option<i64>,
    #[serde(default)]
    pub patient_id: Option<i64>,
    #[serde(default)]
    pub status: AppointmentStatus,
    pub appointment_date: NaiveDate,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppointmentPatch {
    #[serde(default, deserialize_with = "deserialize_some")]
    pub hospital_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub patient_id: Option<Option<i64>>,
    pub status: Option<AppointmentStatus>,
    pub appointment_date: Option<NaiveDate>,
}

impl AppointmentPatch {
    pub fn apply(self, current: &Appointment) -> AppointmentInput {
        AppointmentInput {
            hospital_id: self.hospital_id.unwrap_or(current.hospital_id),
            patient_id: self.patient_id.unwrap_or(current.patient_id),
            status: self.status.unwrap_or(current.status),
            appointment_date: self.appointment_date.unwrap_or(current.appointment_date),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppointmentFilter {
    pub hospital_id: Option<i64>,
    pub patient_id: Option<i64>,
    pub status: Option<AppointmentStatus>,
}

impl AppointmentFilter {
    pub fn matches(&self, appointment: &Appointment) -> bool {
        if let Some(hospital_id) = self.hospital_id {
            if appointment.hospital_id != Some(hospital_id) {
                return false;
            }
        }
        if let Some(patient_id) = self.patient_id {
            if appointment.patient_id != Some(patient_id) {
                return false;
            }
        }
        if let Some(status) = self.status {
            if appointment.status != status {
                return false;
            }
        }
        true
    }
}
