//! Claims domain errors

use thiserror::Error;

use core_kernel::{ClaimId, EncounterId, ErrorKind, PortError};
use domain_encounter::EncounterError;

use crate::claim::ClaimStatus;

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Claim not found: {0}")]
    ClaimNotFound(ClaimId),

    #[error("Encounter not found: {0}")]
    EncounterNotFound(EncounterId),

    #[error("Encounter {encounter_id} already has claim {claim_id}")]
    ClaimAlreadyExists {
        encounter_id: EncounterId,
        claim_id: ClaimId,
    },

    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition { from: ClaimStatus, to: ClaimStatus },

    #[error("A non-empty reason is required to reject a claim")]
    MissingReason,

    #[error("Unknown decision: {0} (expected approve or reject)")]
    InvalidDecision(String),

    #[error("Unknown claim status: {0}")]
    InvalidStatus(String),

    #[error(transparent)]
    Encounter(EncounterError),

    #[error(transparent)]
    Store(#[from] PortError),
}

impl ClaimError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClaimError::ClaimNotFound(_) | ClaimError::EncounterNotFound(_) => ErrorKind::NotFound,
            ClaimError::ClaimAlreadyExists { .. } => ErrorKind::Conflict,
            ClaimError::InvalidTransition { .. } => ErrorKind::InvalidTransition,
            ClaimError::MissingReason
            | ClaimError::InvalidDecision(_)
            | ClaimError::InvalidStatus(_) => ErrorKind::Validation,
            ClaimError::Encounter(e) => e.kind(),
            ClaimError::Store(e) => e.kind(),
        }
    }
}

impl From<EncounterError> for ClaimError {
    fn from(error: EncounterError) -> Self {
        match error {
            EncounterError::EncounterNotFound(id) => ClaimError::EncounterNotFound(id),
            EncounterError::AlreadyClaimed {
                encounter_id,
                claim_id,
            } => ClaimError::ClaimAlreadyExists {
                encounter_id,
                claim_id,
            },
            EncounterError::Store(e) => ClaimError::Store(e),
            other => ClaimError::Encounter(other),
        }
    }
}
