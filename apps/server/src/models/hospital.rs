//! Hospital records

use super::{contains_ignore_case, non_blank, Specialty};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hospital {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub total_capacity: i32,
    /// Offered specialties, ordered by name
    pub specialties: Vec<Specialty>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Hospital {
    pub fn specialty_ids(&self) -> Vec<i64> {
        self.specialties.iter().map(|s| s.id).collect()
    }
}

/// Payload for create (POST) and full update (PUT)
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
pub struct HospitalInput {
    #[validate(length(min = 1, max = 255, message = "name must be 1-255 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 500, message = "address must be 1-500 characters"))]
    pub address: String,
    #[validate(range(min = 0, message = "total_capacity must not be negative"))]
    pub total_capacity: i32,
    #[serde(default)]
    pub specialty_ids: Vec<i64>,
}

impl HospitalInput {
    /// Trim text fields and collapse duplicate specialty ids.
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.address = self.address.trim().to_string();
        self.specialty_ids.sort_unstable();
        self.specialty_ids.dedup();
        self
    }
}

/// Payload for partial update (PATCH)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HospitalPatch {
    pub name: Option<String>,
    pub address: Option<String>,
    pub total_capacity: Option<i32>,
    pub specialty_ids: Option<Vec<i64>>,
}

impl HospitalPatch {
    pub fn apply(self, current: &Hospital) -> HospitalInput {
        HospitalInput {
            name: self.name.unwrap_or_else(|| current.name.clone()),
            address: self.address.unwrap_or_else(|| current.address.clone()),
            total_capacity: self.total_capacity.unwrap_or(current.total_capacity),
            specialty_ids: self
                .specialty_ids
                .unwrap_or_else(|| current.specialty_ids()),
        }
    }
}

/// List filters; every present value is a case-insensitive substring match.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HospitalFilter {
    pub name: Option<String>,
    pub address: Option<String>,
    /// Matches either name or address
    pub search: Option<String>,
}

impl HospitalFilter {
    pub fn search(term: Option<&str>) -> Self {
        Self {
            search: term.map(str::to_string),
            ..Self::default()
        }
    }

    pub fn name(&self) -> Option<&str> {
        non_blank(self.name.as_deref())
    }

    pub fn address(&self) -> Option<&str> {
        non_blank(self.address.as_deref())
    }

    pub fn search_term(&self) -> Option<&str> {
        non_blank(self.search.as_deref())
    }

    pub fn matches(&self, hospital: &Hospital) -> bool {
        if let Some(name) = self.name() {
            if !contains_ignore_case(&hospital.name, name) {
                return false;
            }
        }
        if let Some(address) = self.address() {
            if !contains_ignore_case(&hospital.address, address) {
                return false;
            }
        }
        if let Some(term) = self.search_term() {
            if !contains_ignore_case(&hospital.name, term)
                && !contains_ignore_case(&hospital.address, term)
            {
                return false;
            }
        }
        true
    }
}
