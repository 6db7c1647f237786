//! Service-level errors

use thiserror::Error;

use core_kernel::{ErrorKind, PortError};
use domain_claims::ClaimError;
use domain_encounter::EncounterError;
use domain_patient::PatientError;
use domain_reporting::ReportingError;

/// Any failure surfaced by the clinic service
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Patient(#[from] PatientError),

    #[error(transparent)]
    Encounter(#[from] EncounterError),

    #[error(transparent)]
    Claim(#[from] ClaimError),

    #[error(transparent)]
    Reporting(#[from] ReportingError),

    #[error("Reset failed, all records restored: {0}")]
    ResetFailed(PortError),

    #[error("Reset failed and could not restore every record: {0}")]
    RestoreFailed(PortError),
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::Patient(e) => e.kind(),
            ServiceError::Encounter(e) => e.kind(),
            ServiceError::Claim(e) => e.kind(),
            ServiceError::Reporting(e) => e.kind(),
            ServiceError::ResetFailed(_) | ServiceError::RestoreFailed(_) => ErrorKind::Internal,
        }
    }
}
