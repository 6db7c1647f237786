//! Encounter domain errors

use thiserror::Error;

use core_kernel::{ClaimId, EncounterId, ErrorKind, PatientId, PortError};

/// Errors that can occur in the encounter domain
#[derive(Debug, Error)]
pub enum EncounterError {
    #[error("Patient not found: {0}")]
    PatientNotFound(PatientId),

    #[error("Encounter not found: {0}")]
    EncounterNotFound(EncounterId),

    #[error("Unknown medication: {0}")]
    UnknownMedication(String),

    #[error("Invalid quantity {quantity} for {medication}: must be a positive integer")]
    InvalidQuantity { medication: String, quantity: i64 },

    #[error("Invalid encounter data: {0}")]
    InvalidData(String),

    #[error("Encounter {encounter_id} is locked by claim {claim_id}")]
    EncounterLocked {
        encounter_id: EncounterId,
        claim_id: ClaimId,
    },

    #[error("Encounter {encounter_id} already has claim {claim_id}")]
    AlreadyClaimed {
        encounter_id: EncounterId,
        claim_id: ClaimId,
    },

    #[error("Encounter cost exceeds the representable range")]
    CostOverflow,

    #[error(transparent)]
    Store(#[from] PortError),
}

impl EncounterError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EncounterError::PatientNotFound(_)
            | EncounterError::EncounterNotFound(_)
            | EncounterError::UnknownMedication(_) => ErrorKind::NotFound,
            EncounterError::InvalidQuantity { .. }
            | EncounterError::InvalidData(_)
            | EncounterError::CostOverflow => ErrorKind::Validation,
            EncounterError::EncounterLocked { .. } => ErrorKind::Locked,
            EncounterError::AlreadyClaimed { .. } => ErrorKind::Conflict,
            EncounterError::Store(e) => e.kind(),
        }
    }
}
