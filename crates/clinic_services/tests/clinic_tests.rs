//! Tests for the clinic service

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use clinic_services::{Clinic, ClinicStores, ResetSummary, ServiceError};
use core_kernel::{
    ClaimId, ErrorKind, HealthCheckResult, HealthCheckable, DomainPort, PortError, RecordStore,
};
use domain_catalog::Catalog;
use domain_claims::{Claim, ClaimDecision, ClaimStatus};
use domain_encounter::{EncounterFilter, MedicationOrder, NewEncounter};
use infra_store::InMemoryStore;
use test_utils::{
    assert_claim_matches_encounter, assert_kind, assert_total_consistent, empty_clinic,
    seed_clinic, siti_hypertension, PatientFixtures, PeriodFixtures,
};

mod end_to_end {
    use super::*;

    #[tokio::test]
    async fn test_siti_hypertension_claim() {
        let clinic = empty_clinic();
        let (siti, encounter) = siti_hypertension(&clinic).await;
        assert_eq!(siti.age, 34);
        assert_eq!(encounter.total().minor_units(), 5000);

        let claim = clinic.derive_claim(encounter.id).await.unwrap();
        assert_eq!(claim.status, ClaimStatus::Draft);
        assert_claim_matches_encounter(&claim, &encounter);

        let claim = clinic.submit_claim(claim.id).await.unwrap();
        assert_eq!(claim.status, ClaimStatus::Submitted);

        let claim = clinic
            .decide_claim(claim.id, ClaimDecision::Approve, None)
            .await
            .unwrap();
        assert_eq!(claim.status, ClaimStatus::Approved);
        assert!(claim.decided_at.is_some());

        let err = clinic.derive_claim(encounter.id).await.unwrap_err();
        assert_kind(err.kind(), ErrorKind::Conflict);

        let err = clinic
            .add_medication_lines(encounter.id, vec![MedicationOrder::new("zinc", 1)])
            .await
            .unwrap_err();
        assert_kind(err.kind(), ErrorKind::Locked);

        let locked = clinic.get_encounter(encounter.id).await.unwrap();
        assert_total_consistent(&locked);
        assert_eq!(locked.total(), claim.amount);
    }

    #[tokio::test]
    async fn test_patient_history() {
        let clinic = empty_clinic();
        let (siti, _) = siti_hypertension(&clinic).await;
        let budi = clinic.register_patient(PatientFixtures::budi()).await.unwrap();
        clinic
            .create_encounter(NewEncounter::new(budi.id, "batuk", vec![]))
            .await
            .unwrap();

        let history = clinic.patient_encounters(siti.id).await.unwrap();
        assert_eq!(history.count(), 1);
        assert!(history.iter().all(|e| e.patient_id == siti.id));

        let all = clinic.list_encounters(EncounterFilter::new()).await.unwrap();
        assert_eq!(all.count(), 2);
    }

    #[tokio::test]
    async fn test_claim_for_encounter() {
        let clinic = empty_clinic();
        let (_, encounter) = siti_hypertension(&clinic).await;
        assert!(clinic.claim_for_encounter(encounter.id).await.unwrap().is_none());

        let claim = clinic.derive_claim(encounter.id).await.unwrap();
        let found = clinic.claim_for_encounter(encounter.id).await.unwrap();
        assert_eq!(found.map(|c| c.id), Some(claim.id));
    }

    #[tokio::test]
    async fn test_monthly_summary_through_clinic() {
        let clinic = empty_clinic();
        let counts = seed_clinic(&clinic, 3, 2).await;

        let summary = clinic
            .monthly_summary(PeriodFixtures::current_month())
            .await
            .unwrap();
        assert_eq!(summary.patients_registered, counts.patients);
        assert_eq!(summary.encounters, counts.encounters);
        assert_eq!(summary.claims, counts.claims);
    }

    #[tokio::test]
    async fn test_health_reports_every_store() {
        let clinic = empty_clinic();
        let health = clinic.health().await;
        assert_eq!(health.len(), 3);
    }
}

mod reset {
    use super::*;

    #[tokio::test]
    async fn test_reset_clears_everything() {
        let clinic = empty_clinic();
        let counts = seed_clinic(&clinic, 4, 3).await;
        assert!(counts.claims > 0);

        let removed = clinic.reset().await.unwrap();
        assert_eq!(
            removed,
            ResetSummary {
                patients: counts.patients,
                encounters: counts.encounters,
                claims: counts.claims,
            }
        );

        assert!(clinic.list_patients().await.unwrap().is_empty());
        assert!(clinic.list_encounters(EncounterFilter::new()).await.unwrap().is_empty());
        assert!(clinic.list_claims(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reset_of_empty_clinic() {
        let clinic = empty_clinic();
        let removed = clinic.reset().await.unwrap();
        assert_eq!(
            removed,
            ResetSummary {
                patients: 0,
                encounters: 0,
                claims: 0
            }
        );
    }

    #[tokio::test]
    async fn test_clinic_is_usable_after_reset() {
        let clinic = empty_clinic();
        siti_hypertension(&clinic).await;
        clinic.reset().await.unwrap();

        let (_, encounter) = siti_hypertension(&clinic).await;
        let claim = clinic.derive_claim(encounter.id).await.unwrap();
        assert_eq!(claim.amount.minor_units(), 5000);
    }

    #[tokio::test]
    async fn test_failed_reset_restores_all_records() {
        let claims = Arc::new(FlakyClaims::new());
        let stores = ClinicStores {
            claims: claims.clone(),
            ..ClinicStores::in_memory()
        };
        let clinic = Clinic::with_stores(Catalog::standard(), stores);
        let counts = seed_clinic(&clinic, 2, 2).await;

        claims.fail_clear.store(true, Ordering::SeqCst);
        let err = clinic.reset().await.unwrap_err();
        assert!(matches!(err, ServiceError::ResetFailed(_)));
        assert_eq!(err.kind(), ErrorKind::Internal);

        assert_eq!(clinic.list_patients().await.unwrap().count(), counts.patients);
        assert_eq!(
            clinic.list_encounters(EncounterFilter::new()).await.unwrap().count(),
            counts.encounters
        );
        assert_eq!(clinic.list_claims(None).await.unwrap().count(), counts.claims);

        claims.fail_clear.store(false, Ordering::SeqCst);
        clinic.reset().await.unwrap();
        assert!(clinic.list_patients().await.unwrap().is_empty());
    }
}

/// Claim store that deletes one record and then fails while clearing
struct FlakyClaims {
    inner: InMemoryStore<Claim>,
    fail_clear: AtomicBool,
}

impl FlakyClaims {
    fn new() -> Self {
        Self {
            inner: InMemoryStore::new("flaky-claims"),
            fail_clear: AtomicBool::new(false),
        }
    }
}

impl DomainPort for FlakyClaims {}

#[async_trait]
impl HealthCheckable for FlakyClaims {
    async fn health_check(&self) -> HealthCheckResult {
        self.inner.health_check().await
    }
}

#[async_trait]
impl RecordStore<Claim> for FlakyClaims {
    async fn put(&self, record: Claim) -> Result<(), PortError> {
        self.inner.put(record).await
    }

    async fn get(&self, id: ClaimId) -> Result<Claim, PortError> {
        self.inner.get(id).await
    }

    async fn delete(&self, id: ClaimId) -> Result<(), PortError> {
        self.inner.delete(id).await
    }

    async fn list_all(&self) -> Result<Vec<Claim>, PortError> {
        self.inner.list_all().await
    }

    async fn clear(&self) -> Result<(), PortError> {
        if !self.fail_clear.load(Ordering::SeqCst) {
            return self.inner.clear().await;
        }
        if let Some(first) = self.inner.list_all().await?.into_iter().next() {
            self.inner.delete(first.id).await?;
        }
        Err(PortError::ServiceUnavailable {
            service: "flaky-claims".to_string(),
        })
    }
}
