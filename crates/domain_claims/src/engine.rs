//! Claims engine service

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use core_kernel::{ClaimId, EncounterId, Listing, RecordStore};
use domain_encounter::EncounterLedger;

use crate::claim::{Claim, ClaimDecision, ClaimStatus};
use crate::error::ClaimError;
use crate::fhir::FhirClaim;

/// Owns the claim collection and drives the claim state machine
///
/// Status changes read a claim and write it back; `transitions` makes that
/// read-modify-write atomic, so of two racing decisions exactly one wins
/// and the other sees the terminal state.
pub struct ClaimsEngine {
    store: Arc<dyn RecordStore<Claim>>,
    encounters: Arc<EncounterLedger>,
    transitions: Mutex<()>,
}

impl ClaimsEngine {
    pub fn new(store: Arc<dyn RecordStore<Claim>>, encounters: Arc<EncounterLedger>) -> Self {
        Self {
            store,
            encounters,
            transitions: Mutex::new(()),
        }
    }

    /// Derives a draft claim from an encounter and locks the encounter
    ///
    /// # Errors
    ///
    /// * `EncounterNotFound` if the encounter does not exist
    /// * `ClaimAlreadyExists` if a claim was already derived from it
    pub async fn derive_claim(&self, encounter_id: EncounterId) -> Result<Claim, ClaimError> {
        let claim_id = ClaimId::new();
        let encounter = self.encounters.lock_for_claim(encounter_id, claim_id).await?;

        let claim = Claim::derive(claim_id, &encounter);
        if let Err(e) = self.store.put(claim.clone()).await {
            error!(claim_id = %claim_id, encounter_id = %encounter_id, error = %e, "Failed to store claim");
            self.encounters.release_claim_lock(encounter_id, claim_id).await?;
            return Err(e.into());
        }

        info!(
            claim_id = %claim.id,
            encounter_id = %encounter_id,
            amount = claim.amount.minor_units(),
            "Claim derived"
        );
        Ok(claim)
    }

    /// The payload a derivation would produce, without creating a claim
    pub async fn preview_claim(&self, encounter_id: EncounterId) -> Result<FhirClaim, ClaimError> {
        let encounter = self.encounters.get(encounter_id).await?;
        Ok(FhirClaim::from_encounter(&encounter, encounter.claim_id(), Utc::now()))
    }

    /// Draft -> Submitted
    pub async fn submit_claim(&self, id: ClaimId) -> Result<Claim, ClaimError> {
        let _guard = self.transitions.lock().await;

        let mut claim = self.get_claim(id).await?;
        claim.submit()?;
        self.store.put(claim.clone()).await?;

        info!(claim_id = %id, status = %claim.status, "Claim submitted");
        Ok(claim)
    }

    /// Submitted -> Approved / Rejected
    ///
    /// # Errors
    ///
    /// * `MissingReason` when rejecting without a non-blank reason
    /// * `ClaimNotFound` if the claim does not exist
    /// * `InvalidTransition` unless the claim is submitted
    pub async fn decide_claim(
        &self,
        id: ClaimId,
        decision: ClaimDecision,
        reason: Option<String>,
    ) -> Result<Claim, ClaimError> {
        let reason = decision.recorded_reason(reason)?;
        let _guard = self.transitions.lock().await;

        let mut claim = self.get_claim(id).await?;
        claim.decide(decision, reason)?;
        self.store.put(claim.clone()).await?;

        info!(
            claim_id = %id,
            status = %claim.status,
            reason = claim.decision_reason.as_deref().unwrap_or(""),
            "Claim decided"
        );
        Ok(claim)
    }

    /// Fetches a claim
    pub async fn get_claim(&self, id: ClaimId) -> Result<Claim, ClaimError> {
        debug!(claim_id = %id, "Fetching claim");
        self.store.get(id).await.map_err(|e| {
            if e.is_not_found() {
                ClaimError::ClaimNotFound(id)
            } else {
                ClaimError::Store(e)
            }
        })
    }

    /// Claims in creation order, optionally restricted to one status
    pub async fn list_claims(&self, status: Option<ClaimStatus>) -> Result<Listing<Claim>, ClaimError> {
        let mut claims = self.store.list_all().await?;
        claims.sort_by_key(|c| (c.created_at, c.id));
        debug!(total = claims.len(), ?status, "Listing claims");

        Ok(match status {
            Some(status) => Listing::filtered(claims, move |c| c.status == status),
            None => Listing::new(claims),
        })
    }

    /// The claim derived from an encounter, if any
    pub async fn find_by_encounter(&self, encounter_id: EncounterId) -> Result<Option<Claim>, ClaimError> {
        let claims = self.store.list_all().await?;
        Ok(claims.into_iter().find(|c| c.encounter_id == encounter_id))
    }
}
