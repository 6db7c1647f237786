//! Test Data Builders
//!
//! Builder patterns for registration and encounter details. Tests specify
//! only the fields they care about and take defaults for the rest.

use chrono::NaiveDate;

use core_kernel::PatientId;
use domain_encounter::{MedicationOrder, NewEncounter};
use domain_patient::{Gender, NewPatient};

/// Builder for patient registration details
pub struct NewPatientBuilder {
    full_name: String,
    age: u32,
    gender: Gender,
    chief_complaint: String,
}

impl Default for NewPatientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NewPatientBuilder {
    pub fn new() -> Self {
        Self {
            full_name: "Dewi Lestari".to_string(),
            age: 28,
            gender: Gender::Female,
            chief_complaint: "Demam".to_string(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.full_name = name.into();
        self
    }

    pub fn with_age(mut self, age: u32) -> Self {
        self.age = age;
        self
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    pub fn with_complaint(mut self, complaint: impl Into<String>) -> Self {
        self.chief_complaint = complaint.into();
        self
    }

    pub fn build(self) -> NewPatient {
        NewPatient::new(&self.full_name, self.age, self.gender, &self.chief_complaint)
    }
}

/// Builder for encounter details
pub struct NewEncounterBuilder {
    patient_id: PatientId,
    diagnosis: String,
    medications: Vec<MedicationOrder>,
    notes: Option<String>,
    visit_date: Option<NaiveDate>,
    clinician: Option<String>,
}

impl NewEncounterBuilder {
    /// Starts an encounter for `patient_id` with no medications
    pub fn for_patient(patient_id: PatientId) -> Self {
        Self {
            patient_id,
            diagnosis: "ISPA".to_string(),
            medications: Vec::new(),
            notes: None,
            visit_date: None,
            clinician: None,
        }
    }

    pub fn with_diagnosis(mut self, diagnosis: impl Into<String>) -> Self {
        self.diagnosis = diagnosis.into();
        self
    }

    /// Adds one medication order
    pub fn medication(mut self, name: &str, quantity: i64) -> Self {
        self.medications.push(MedicationOrder::new(name, quantity));
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.visit_date = Some(date);
        self
    }

    pub fn by(mut self, clinician: impl Into<String>) -> Self {
        self.clinician = Some(clinician.into());
        self
    }

    pub fn build(self) -> NewEncounter {
        NewEncounter {
            patient_id: self.patient_id,
            diagnosis: self.diagnosis,
            medications: self.medications,
            notes: self.notes,
            visit_date: self.visit_date,
            attending_clinician: self.clinician,
        }
    }
}
