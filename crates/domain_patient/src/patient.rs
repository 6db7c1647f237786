//! Patient records

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{PatientId, Record};

use crate::error::PatientError;

/// Oldest age the registration form accepts
pub const MAX_AGE: u32 = 150;

/// Gender as recorded at registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = PatientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            _ => Err(PatientError::InvalidGender(s.to_string())),
        }
    }
}

/// Registration details for a new patient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct NewPatient {
    #[validate(length(min = 1, max = 200, message = "full name is required"))]
    pub full_name: String,
    #[validate(range(max = 150, message = "age must be at most 150"))]
    pub age: u32,
    pub gender: Gender,
    /// Free text, or one of the catalog's complaint options
    #[validate(length(min = 1, max = 1000, message = "chief complaint is required"))]
    pub chief_complaint: String,
}

impl NewPatient {
    pub fn new(full_name: &str, age: u32, gender: Gender, chief_complaint: &str) -> Self {
        Self {
            full_name: full_name.to_string(),
            age,
            gender,
            chief_complaint: chief_complaint.to_string(),
        }
    }

    /// Trims free-text fields so blank input fails validation
    pub(crate) fn normalized(self) -> Self {
        Self {
            full_name: self.full_name.trim().to_string(),
            chief_complaint: self.chief_complaint.trim().to_string(),
            ..self
        }
    }
}

/// A registered patient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    /// Unique identifier, assigned at registration
    pub id: PatientId,
    pub full_name: String,
    pub age: u32,
    pub gender: Gender,
    pub chief_complaint: String,
    /// Registration timestamp
    pub created_at: DateTime<Utc>,
}

impl Patient {
    pub(crate) fn register(details: NewPatient) -> Self {
        Self {
            id: PatientId::new(),
            full_name: details.full_name,
            age: details.age,
            gender: details.gender,
            chief_complaint: details.chief_complaint,
            created_at: Utc::now(),
        }
    }
}

impl Record for Patient {
    type Id = PatientId;
    const ENTITY: &'static str = "Patient";

    fn record_id(&self) -> PatientId {
        self.id
    }
}
