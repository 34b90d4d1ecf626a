//! Specialties and issue-to-specialty maps

use super::non_blank;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specialty {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
pub struct SpecialtyInput {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
}

impl SpecialtyInput {
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpecialtyPatch {
    pub name: Option<String>,
}

impl SpecialtyPatch {
    pub fn apply(self, current: &Specialty) -> SpecialtyInput {
        SpecialtyInput {
            name: self.name.unwrap_or_else(|| current.name.clone()),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpecialtyFilter {
    pub name: Option<String>,
}

impl SpecialtyFilter {
    pub fn name(&self) -> Option<&str> {
        non_blank(self.name.as_deref())
    }
}

/// Maps a free-text issue term (e.g. "Broken leg") to the specialty that treats it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueSpecialtyMap {
    pub id: i64,
    pub issue_term: String,
    pub primary_specialty: Specialty,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
pub struct IssueSpecialtyMapInput {
    #[validate(length(min = 1, max = 100, message = "issue_term must be 1-100 characters"))]
    pub issue_term: String,
    pub primary_specialty_id: i64,
}

impl IssueSpecialtyMapInput {
    pub fn normalized(mut self) -> Self {
        self.issue_term = self.issue_term.trim().to_string();
        self
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IssueSpecialtyMapPatch {
    pub issue_term: Option<String>,
    pub primary_specialty_id: Option<i64>,
}

impl IssueSpecialtyMapPatch {
    pub fn apply(self, current: &IssueSpecialtyMap) -> IssueSpecialtyMapInput {
        IssueSpecialtyMapInput {
            issue_term: self
                .issue_term
                .unwrap_or_else(|| current.issue_term.clone()),
            primary_specialty_id: self
                .primary_specialty_id
                .unwrap_or(current.primary_specialty.id),
        }
    }
}
