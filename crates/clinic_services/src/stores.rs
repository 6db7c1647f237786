//! Record stores backing a clinic

use std::sync::Arc;

use core_kernel::{HealthCheckResult, RecordStore};
use domain_claims::Claim;
use domain_encounter::Encounter;
use domain_patient::Patient;
use infra_store::InMemoryStore;

/// One store per record collection
#[derive(Clone)]
pub struct ClinicStores {
    pub patients: Arc<dyn RecordStore<Patient>>,
    pub encounters: Arc<dyn RecordStore<Encounter>>,
    pub claims: Arc<dyn RecordStore<Claim>>,
}

impl ClinicStores {
    /// Fresh, isolated in-memory stores
    pub fn in_memory() -> Self {
        Self {
            patients: Arc::new(InMemoryStore::<Patient>::new("patients")),
            encounters: Arc::new(InMemoryStore::<Encounter>::new("encounters")),
            claims: Arc::new(InMemoryStore::<Claim>::new("claims")),
        }
    }

    /// Health of every store
    pub async fn health(&self) -> Vec<HealthCheckResult> {
        let (patients, encounters, claims) = tokio::join!(
            self.patients.health_check(),
            self.encounters.health_check(),
            self.claims.health_check(),
        );
        vec![patients, encounters, claims]
    }
}
