//! Patient DTOs

use serde::Deserialize;

use domain_patient::{Gender, NewPatient, PatientError};

/// Patient registration request
#[derive(Debug, Deserialize)]
pub struct CreatePatientRequest {
    pub full_name: String,
    pub age: u32,
    /// `male`, `female` or `other`, in any case
    pub gender: String,
    pub chief_complaint: String,
}

impl CreatePatientRequest {
    pub fn into_new_patient(self) -> Result<NewPatient, PatientError> {
        let gender: Gender = self.gender.parse()?;
        Ok(NewPatient::new(&self.full_name, self.age, gender, &self.chief_complaint))
    }
}
