//! Patient registry service

use std::sync::Arc;

use tracing::{debug, info};
use validator::Validate;

use core_kernel::{Listing, PatientId, RecordStore};

use crate::error::PatientError;
use crate::patient::{NewPatient, Patient};

/// Owns the patient collection
pub struct PatientRegistry {
    store: Arc<dyn RecordStore<Patient>>,
}

impl PatientRegistry {
    pub fn new(store: Arc<dyn RecordStore<Patient>>) -> Self {
        Self { store }
    }

    /// Registers a patient and assigns its identifier
    ///
    /// # Errors
    ///
    /// Returns `PatientError::InvalidData` for a blank name or complaint, or
    /// an age above the accepted maximum.
    pub async fn register(&self, details: NewPatient) -> Result<Patient, PatientError> {
        let details = details.normalized();
        details
            .validate()
            .map_err(|errors| PatientError::invalid(errors.to_string()))?;

        let patient = Patient::register(details);
        self.store.put(patient.clone()).await?;

        info!(patient_id = %patient.id, age = patient.age, gender = %patient.gender, "Patient registered");
        Ok(patient)
    }

    /// Fetches a patient
    pub async fn get(&self, id: PatientId) -> Result<Patient, PatientError> {
        debug!(patient_id = %id, "Fetching patient");
        self.store.get(id).await.map_err(|e| {
            if e.is_not_found() {
                PatientError::PatientNotFound(id)
            } else {
                PatientError::Store(e)
            }
        })
    }

    /// Fails with `PatientNotFound` unless the patient is registered
    pub async fn ensure_exists(&self, id: PatientId) -> Result<(), PatientError> {
        self.get(id).await.map(|_| ())
    }

    /// All patients, in registration order
    pub async fn list(&self) -> Result<Listing<Patient>, PatientError> {
        let mut patients = self.store.list_all().await?;
        patients.sort_by_key(|p| (p.created_at, p.id));
        Ok(Listing::new(patients))
    }
}
