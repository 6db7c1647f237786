//! Reporting errors

use thiserror::Error;

use core_kernel::{ErrorKind, TemporalError};
use domain_claims::ClaimError;
use domain_encounter::EncounterError;
use domain_patient::PatientError;

#[derive(Debug, Error)]
pub enum ReportingError {
    #[error("Invalid period: {0}")]
    InvalidPeriod(#[from] TemporalError),

    #[error("Period total exceeds the representable range")]
    CostOverflow,

    #[error(transparent)]
    Patient(#[from] PatientError),

    #[error(transparent)]
    Encounter(#[from] EncounterError),

    #[error(transparent)]
    Claim(#[from] ClaimError),
}

impl ReportingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReportingError::InvalidPeriod(_) => ErrorKind::Validation,
            ReportingError::CostOverflow => ErrorKind::Internal,
            ReportingError::Patient(e) => e.kind(),
            ReportingError::Encounter(e) => e.kind(),
            ReportingError::Claim(e) => e.kind(),
        }
    }
}
