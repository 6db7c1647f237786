//! Claims DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ClaimId, Currency, EncounterId, PatientId};
use domain_claims::{Claim, ClaimStatus, FhirClaim};

/// Claim list query
#[derive(Debug, Default, Deserialize)]
pub struct ClaimQuery {
    pub status: Option<String>,
}

/// Review outcome for a submitted claim
#[derive(Debug, Deserialize)]
pub struct DecisionRequest {
    /// `approve` or `reject`
    pub decision: String,
    pub reason: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ClaimResponse {
    pub id: ClaimId,
    pub encounter_id: EncounterId,
    pub patient_id: PatientId,
    pub status: ClaimStatus,
    pub amount: i64,
    pub currency: Currency,
    pub decision_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub decided_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
    pub payload: FhirClaim,
}

impl From<Claim> for ClaimResponse {
    fn from(claim: Claim) -> Self {
        Self {
            id: claim.id,
            encounter_id: claim.encounter_id,
            patient_id: claim.patient_id,
            status: claim.status,
            amount: claim.amount.minor_units(),
            currency: claim.amount.currency(),
            decision_reason: claim.decision_reason,
            created_at: claim.created_at,
            submitted_at: claim.submitted_at,
            decided_at: claim.decided_at,
            updated_at: claim.updated_at,
            payload: claim.payload,
        }
    }
}
