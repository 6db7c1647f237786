//! Patient domain errors

use thiserror::Error;

use core_kernel::{ErrorKind, PatientId, PortError};

/// Errors that can occur in the patient domain
#[derive(Debug, Error)]
pub enum PatientError {
    /// Patient with the given ID was not found
    #[error("Patient not found: {0}")]
    PatientNotFound(PatientId),

    /// Invalid patient data provided
    #[error("Invalid patient data: {0}")]
    InvalidData(String),

    /// Unrecognised gender value
    #[error("Invalid gender: {0}")]
    InvalidGender(String),

    #[error(transparent)]
    Store(#[from] PortError),
}

impl PatientError {
    /// Creates an InvalidData error with a message
    pub fn invalid(message: impl Into<String>) -> Self {
        PatientError::InvalidData(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            PatientError::PatientNotFound(_) => ErrorKind::NotFound,
            PatientError::InvalidData(_) | PatientError::InvalidGender(_) => ErrorKind::Validation,
            PatientError::Store(e) => e.kind(),
        }
    }
}
