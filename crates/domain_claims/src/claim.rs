//! Claim aggregate

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ClaimId, EncounterId, Money, PatientId, Record};
use domain_encounter::Encounter;

use crate::error::ClaimError;
use crate::fhir::FhirClaim;

/// Claim status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimStatus {
    /// Derived from an encounter, not yet sent
    Draft,
    /// Sent for a decision
    Submitted,
    /// Accepted (terminal)
    Approved,
    /// Refused with a reason (terminal)
    Rejected,
}

/// Something a caller asks a claim to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimAction {
    Submit,
    Approve,
    Reject,
}

impl ClaimAction {
    /// The status this action leads to when it is allowed
    pub fn target(&self) -> ClaimStatus {
        match self {
            ClaimAction::Submit => ClaimStatus::Submitted,
            ClaimAction::Approve => ClaimStatus::Approved,
            ClaimAction::Reject => ClaimStatus::Rejected,
        }
    }
}

impl ClaimStatus {
    /// Every status, in lifecycle order
    pub const ALL: [ClaimStatus; 4] = [
        ClaimStatus::Draft,
        ClaimStatus::Submitted,
        ClaimStatus::Approved,
        ClaimStatus::Rejected,
    ];

    /// The single transition function of the claim state machine
    pub fn apply(self, action: ClaimAction) -> Result<ClaimStatus, ClaimError> {
        use ClaimAction::*;
        use ClaimStatus::*;

        if matches!(
            (self, action),
            (Draft, Submit) | (Submitted, Approve) | (Submitted, Reject)
        ) {
            Ok(action.target())
        } else {
            Err(ClaimError::InvalidTransition {
                from: self,
                to: action.target(),
            })
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ClaimStatus::Approved | ClaimStatus::Rejected)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Draft => "draft",
            ClaimStatus::Submitted => "submitted",
            ClaimStatus::Approved => "approved",
            ClaimStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClaimStatus {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClaimStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ClaimError::InvalidStatus(s.to_string()))
    }
}

/// Outcome of reviewing a submitted claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimDecision {
    Approve,
    Reject,
}

impl ClaimDecision {
    pub fn action(&self) -> ClaimAction {
        match self {
            ClaimDecision::Approve => ClaimAction::Approve,
            ClaimDecision::Reject => ClaimAction::Reject,
        }
    }

    /// The reason to record for this decision
    ///
    /// Rejections need a non-blank reason, kept verbatim; approvals never
    /// store one.
    pub fn recorded_reason(&self, reason: Option<String>) -> Result<Option<String>, ClaimError> {
        match self {
            ClaimDecision::Approve => Ok(None),
            ClaimDecision::Reject => reason
                .filter(|r| !r.trim().is_empty())
                .map(Some)
                .ok_or(ClaimError::MissingReason),
        }
    }
}

impl FromStr for ClaimDecision {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "approve" => Ok(ClaimDecision::Approve),
            "reject" => Ok(ClaimDecision::Reject),
            _ => Err(ClaimError::InvalidDecision(s.to_string())),
        }
    }
}

/// An insurance claim derived from exactly one encounter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    /// Unique identifier
    pub id: ClaimId,
    /// Source encounter (lookup only)
    pub encounter_id: EncounterId,
    pub patient_id: PatientId,
    /// FHIR-shaped document built at derivation
    pub payload: FhirClaim,
    pub status: ClaimStatus,
    /// Encounter total at derivation time
    pub amount: Money,
    /// Present only when rejected
    pub decision_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub decided_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl Claim {
    /// Creates a draft claim from a locked encounter snapshot
    pub fn derive(id: ClaimId, encounter: &Encounter) -> Self {
        let now = Utc::now();

        Self {
            id,
            encounter_id: encounter.id,
            patient_id: encounter.patient_id,
            payload: FhirClaim::from_encounter(encounter, Some(id), now),
            status: ClaimStatus::Draft,
            amount: encounter.total(),
            decision_reason: None,
            created_at: now,
            submitted_at: None,
            decided_at: None,
            updated_at: now,
        }
    }

    /// Draft -> Submitted
    pub fn submit(&mut self) -> Result<(), ClaimError> {
        self.status = self.status.apply(ClaimAction::Submit)?;
        let now = Utc::now();
        self.submitted_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// Submitted -> Approved / Rejected
    ///
    /// The reason is checked before the state, so a rejection without a
    /// reason fails with `MissingReason` whatever the current status.
    pub fn decide(&mut self, decision: ClaimDecision, reason: Option<String>) -> Result<(), ClaimError> {
        let reason = decision.recorded_reason(reason)?;
        self.status = self.status.apply(decision.action())?;

        let now = Utc::now();
        self.decision_reason = reason;
        self.decided_at = Some(now);
        self.updated_at = now;
        Ok(())
    }
}

impl Record for Claim {
    type Id = ClaimId;
    const ENTITY: &'static str = "Claim";

    fn record_id(&self) -> ClaimId {
        self.id
    }
}
