//! Encounter ledger service

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use core_kernel::{temporal::validate_range, ClaimId, EncounterId, Listing, PatientId, RecordStore};
use domain_catalog::Catalog;
use domain_patient::{PatientError, PatientRegistry};

use crate::encounter::{Encounter, MedicationOrder, NewEncounter};
use crate::error::EncounterError;
use crate::pricing::price_orders;

/// Criteria for listing encounters; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncounterFilter {
    pub patient_id: Option<PatientId>,
    /// Case-insensitive substring of the diagnosis
    pub diagnosis: Option<String>,
    /// Inclusive lower bound on the creation time
    pub from: Option<DateTime<Utc>>,
    /// Exclusive upper bound on the creation time
    pub to: Option<DateTime<Utc>>,
}

impl EncounterFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_patient(mut self, patient_id: PatientId) -> Self {
        self.patient_id = Some(patient_id);
        self
    }

    pub fn with_diagnosis(mut self, fragment: &str) -> Self {
        self.diagnosis = Some(fragment.to_string());
        self
    }

    pub fn between(mut self, from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    pub fn matches(&self, encounter: &Encounter) -> bool {
        if let Some(patient_id) = self.patient_id {
            if encounter.patient_id != patient_id {
                return false;
            }
        }
        if let Some(fragment) = &self.diagnosis {
            let fragment = fragment.trim().to_lowercase();
            if !encounter.diagnosis.to_lowercase().contains(&fragment) {
                return false;
            }
        }
        if self.from.is_some_and(|from| encounter.created_at < from) {
            return false;
        }
        if self.to.is_some_and(|to| encounter.created_at >= to) {
            return false;
        }
        true
    }
}

/// Owns the encounter collection
///
/// Writes that read an encounter before storing it back are serialised by
/// `writes`, so a lock taken by claim derivation cannot interleave with a
/// concurrent line addition.
pub struct EncounterLedger {
    store: Arc<dyn RecordStore<Encounter>>,
    patients: Arc<PatientRegistry>,
    catalog: Arc<Catalog>,
    writes: Mutex<()>,
}

impl EncounterLedger {
    pub fn new(
        store: Arc<dyn RecordStore<Encounter>>,
        patients: Arc<PatientRegistry>,
        catalog: Arc<Catalog>,
    ) -> Self {
        Self {
            store,
            patients,
            catalog,
            writes: Mutex::new(()),
        }
    }

    /// The catalog lines are priced against
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Records a visit for an existing patient
    ///
    /// # Errors
    ///
    /// * `PatientNotFound` if the patient is not registered
    /// * `UnknownMedication` / `InvalidQuantity` for a bad order
    /// * `InvalidData` for a blank diagnosis
    pub async fn create(&self, details: NewEncounter) -> Result<Encounter, EncounterError> {
        self.patients
            .ensure_exists(details.patient_id)
            .await
            .map_err(|e| match e {
                PatientError::PatientNotFound(id) => EncounterError::PatientNotFound(id),
                PatientError::Store(port) => EncounterError::Store(port),
                other => EncounterError::InvalidData(other.to_string()),
            })?;

        let lines = price_orders(&self.catalog, &details.medications)?;
        let encounter = Encounter::open(details, lines, self.catalog.currency())?;
        self.store.put(encounter.clone()).await?;

        info!(
            encounter_id = %encounter.id,
            patient_id = %encounter.patient_id,
            lines = encounter.lines().len(),
            total = encounter.total().minor_units(),
            "Encounter recorded"
        );
        Ok(encounter)
    }

    /// Fetches an encounter
    pub async fn get(&self, id: EncounterId) -> Result<Encounter, EncounterError> {
        debug!(encounter_id = %id, "Fetching encounter");
        self.store.get(id).await.map_err(|e| {
            if e.is_not_found() {
                EncounterError::EncounterNotFound(id)
            } else {
                EncounterError::Store(e)
            }
        })
    }

    /// Encounters matching `filter`, in creation order
    pub async fn list(&self, filter: EncounterFilter) -> Result<Listing<Encounter>, EncounterError> {
        validate_range(filter.from, filter.to)
            .map_err(|e| EncounterError::InvalidData(e.to_string()))?;

        let mut encounters = self.store.list_all().await?;
        encounters.sort_by_key(|e| (e.created_at, e.id));
        debug!(total = encounters.len(), ?filter, "Listing encounters");

        Ok(Listing::filtered(encounters, move |e| filter.matches(e)))
    }

    /// Appends medication lines to an unlocked encounter
    ///
    /// Orders are validated exactly as at creation. On any failure the
    /// stored encounter is left untouched.
    pub async fn add_medication_lines(
        &self,
        id: EncounterId,
        orders: Vec<MedicationOrder>,
    ) -> Result<Encounter, EncounterError> {
        let _guard = self.writes.lock().await;

        let mut encounter = self.get(id).await?;
        if let Some(claim_id) = encounter.claim_id() {
            warn!(encounter_id = %id, claim_id = %claim_id, "Rejected change to claimed encounter");
            return Err(EncounterError::EncounterLocked {
                encounter_id: id,
                claim_id,
            });
        }

        let lines = price_orders(&self.catalog, &orders)?;
        encounter.add_lines(lines)?;
        self.store.put(encounter.clone()).await?;

        info!(
            encounter_id = %id,
            added = orders.len(),
            total = encounter.total().minor_units(),
            "Medication lines added"
        );
        Ok(encounter)
    }

    /// Locks the encounter for `claim_id` and returns the locked snapshot
    ///
    /// The check and the write happen under one guard, so at most one
    /// caller can ever lock a given encounter.
    ///
    /// # Errors
    ///
    /// * `EncounterNotFound` if the encounter does not exist
    /// * `AlreadyClaimed` if another claim already holds the lock
    pub async fn lock_for_claim(
        &self,
        id: EncounterId,
        claim_id: ClaimId,
    ) -> Result<Encounter, EncounterError> {
        let _guard = self.writes.lock().await;

        let mut encounter = self.get(id).await?;
        encounter.lock_for(claim_id)?;
        self.store.put(encounter.clone()).await?;

        debug!(encounter_id = %id, claim_id = %claim_id, "Encounter locked");
        Ok(encounter)
    }

    /// Releases a lock whose claim could not be stored
    pub async fn release_claim_lock(
        &self,
        id: EncounterId,
        claim_id: ClaimId,
    ) -> Result<(), EncounterError> {
        let _guard = self.writes.lock().await;

        let mut encounter = self.get(id).await?;
        if encounter.release(claim_id) {
            self.store.put(encounter).await?;
            warn!(encounter_id = %id, claim_id = %claim_id, "Encounter lock released");
        }
        Ok(())
    }
}
