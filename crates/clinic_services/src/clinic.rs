//! Clinic application service

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use core_kernel::{
    ClaimId, EncounterId, HealthCheckResult, Listing, PatientId, PortError, YearMonth,
};
use domain_catalog::Catalog;
use domain_claims::{Claim, ClaimDecision, ClaimStatus, ClaimsEngine, FhirClaim};
use domain_encounter::{Encounter, EncounterFilter, EncounterLedger, MedicationOrder, NewEncounter};
use domain_patient::{NewPatient, Patient, PatientRegistry};
use domain_reporting::{MonthlySummary, ReportingAggregator};

use crate::error::ServiceError;
use crate::stores::ClinicStores;

/// Records removed by a reset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResetSummary {
    pub patients: usize,
    pub encounters: usize,
    pub claims: usize,
}

/// The clinic: every component wired over one set of stores
///
/// Every operation holds `gate` shared; `reset` holds it exclusively, so no
/// caller ever observes a half-cleared clinic.
pub struct Clinic {
    catalog: Arc<Catalog>,
    stores: ClinicStores,
    patients: Arc<PatientRegistry>,
    encounters: Arc<EncounterLedger>,
    claims: Arc<ClaimsEngine>,
    reports: ReportingAggregator,
    gate: RwLock<()>,
}

impl Clinic {
    /// A clinic over fresh in-memory stores
    pub fn in_memory(catalog: Catalog) -> Self {
        Self::with_stores(catalog, ClinicStores::in_memory())
    }

    /// A clinic over the given stores
    pub fn with_stores(catalog: Catalog, stores: ClinicStores) -> Self {
        let catalog = Arc::new(catalog);
        let patients = Arc::new(PatientRegistry::new(stores.patients.clone()));
        let encounters = Arc::new(EncounterLedger::new(
            stores.encounters.clone(),
            patients.clone(),
            catalog.clone(),
        ));
        let claims = Arc::new(ClaimsEngine::new(stores.claims.clone(), encounters.clone()));
        let reports = ReportingAggregator::new(patients.clone(), encounters.clone(), claims.clone());

        Self {
            catalog,
            stores,
            patients,
            encounters,
            claims,
            reports,
            gate: RwLock::new(()),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    // ------------------------------------------------------------------
    // Patients
    // ------------------------------------------------------------------

    pub async fn register_patient(&self, details: NewPatient) -> Result<Patient, ServiceError> {
        let _gate = self.gate.read().await;
        Ok(self.patients.register(details).await?)
    }

    pub async fn get_patient(&self, id: PatientId) -> Result<Patient, ServiceError> {
        let _gate = self.gate.read().await;
        Ok(self.patients.get(id).await?)
    }

    pub async fn list_patients(&self) -> Result<Listing<Patient>, ServiceError> {
        let _gate = self.gate.read().await;
        Ok(self.patients.list().await?)
    }

    /// A patient's visit history; fails if the patient is unknown
    pub async fn patient_encounters(&self, id: PatientId) -> Result<Listing<Encounter>, ServiceError> {
        let _gate = self.gate.read().await;
        self.patients.ensure_exists(id).await?;
        Ok(self.encounters.list(EncounterFilter::new().for_patient(id)).await?)
    }

    // ------------------------------------------------------------------
    // Encounters
    // ------------------------------------------------------------------

    pub async fn create_encounter(&self, details: NewEncounter) -> Result<Encounter, ServiceError> {
        let _gate = self.gate.read().await;
        Ok(self.encounters.create(details).await?)
    }

    pub async fn get_encounter(&self, id: EncounterId) -> Result<Encounter, ServiceError> {
        let _gate = self.gate.read().await;
        Ok(self.encounters.get(id).await?)
    }

    pub async fn list_encounters(&self, filter: EncounterFilter) -> Result<Listing<Encounter>, ServiceError> {
        let _gate = self.gate.read().await;
        Ok(self.encounters.list(filter).await?)
    }

    pub async fn add_medication_lines(
        &self,
        id: EncounterId,
        orders: Vec<MedicationOrder>,
    ) -> Result<Encounter, ServiceError> {
        let _gate = self.gate.read().await;
        Ok(self.encounters.add_medication_lines(id, orders).await?)
    }

    // ------------------------------------------------------------------
    // Claims
    // ------------------------------------------------------------------

    pub async fn preview_claim(&self, encounter_id: EncounterId) -> Result<FhirClaim, ServiceError> {
        let _gate = self.gate.read().await;
        Ok(self.claims.preview_claim(encounter_id).await?)
    }

    pub async fn derive_claim(&self, encounter_id: EncounterId) -> Result<Claim, ServiceError> {
        let _gate = self.gate.read().await;
        Ok(self.claims.derive_claim(encounter_id).await?)
    }

    pub async fn submit_claim(&self, id: ClaimId) -> Result<Claim, ServiceError> {
        let _gate = self.gate.read().await;
        Ok(self.claims.submit_claim(id).await?)
    }

    pub async fn decide_claim(
        &self,
        id: ClaimId,
        decision: ClaimDecision,
        reason: Option<String>,
    ) -> Result<Claim, ServiceError> {
        let _gate = self.gate.read().await;
        Ok(self.claims.decide_claim(id, decision, reason).await?)
    }

    pub async fn get_claim(&self, id: ClaimId) -> Result<Claim, ServiceError> {
        let _gate = self.gate.read().await;
        Ok(self.claims.get_claim(id).await?)
    }

    pub async fn list_claims(&self, status: Option<ClaimStatus>) -> Result<Listing<Claim>, ServiceError> {
        let _gate = self.gate.read().await;
        Ok(self.claims.list_claims(status).await?)
    }

    pub async fn claim_for_encounter(&self, encounter_id: EncounterId) -> Result<Option<Claim>, ServiceError> {
        let _gate = self.gate.read().await;
        Ok(self.claims.find_by_encounter(encounter_id).await?)
    }

    // ------------------------------------------------------------------
    // Reporting
    // ------------------------------------------------------------------

    pub async fn monthly_summary(&self, period: YearMonth) -> Result<MonthlySummary, ServiceError> {
        let _gate = self.gate.read().await;
        Ok(self.reports.monthly_summary(period).await?)
    }

    // ------------------------------------------------------------------
    // Administration
    // ------------------------------------------------------------------

    /// Health of every backing store
    pub async fn health(&self) -> Vec<HealthCheckResult> {
        self.stores.health().await
    }

    /// Removes every patient, encounter and claim
    ///
    /// All-or-nothing: the collections are snapshotted first, and if any
    /// clear fails every snapshot is written back before the error is
    /// returned.
    pub async fn reset(&self) -> Result<ResetSummary, ServiceError> {
        let _gate = self.gate.write().await;

        let patients = self.stores.patients.list_all().await.map_err(ServiceError::ResetFailed)?;
        let encounters = self.stores.encounters.list_all().await.map_err(ServiceError::ResetFailed)?;
        let claims = self.stores.claims.list_all().await.map_err(ServiceError::ResetFailed)?;

        let summary = ResetSummary {
            patients: patients.len(),
            encounters: encounters.len(),
            claims: claims.len(),
        };

        if let Err(e) = self.clear_all().await {
            error!(error = %e, "Reset failed, restoring snapshot");
            self.restore(patients, encounters, claims)
                .await
                .map_err(ServiceError::RestoreFailed)?;
            return Err(ServiceError::ResetFailed(e));
        }

        warn!(
            patients = summary.patients,
            encounters = summary.encounters,
            claims = summary.claims,
            "All clinic data reset"
        );
        Ok(summary)
    }

    async fn clear_all(&self) -> Result<(), PortError> {
        self.stores.claims.clear().await?;
        self.stores.encounters.clear().await?;
        self.stores.patients.clear().await
    }

    async fn restore(
        &self,
        patients: Vec<Patient>,
        encounters: Vec<Encounter>,
        claims: Vec<Claim>,
    ) -> Result<(), PortError> {
        for patient in patients {
            self.stores.patients.put(patient).await?;
        }
        for encounter in encounters {
            self.stores.encounters.put(encounter).await?;
        }
        for claim in claims {
            self.stores.claims.put(claim).await?;
        }
        info!("Clinic data restored after failed reset");
        Ok(())
    }
}
