//! Tests for the encounter ledger

use std::sync::Arc;

use chrono::{Duration, Utc};
use proptest::prelude::*;

use core_kernel::{ClaimId, EncounterId, ErrorKind, PatientId};
use domain_catalog::Catalog;
use domain_encounter::{
    Encounter, EncounterError, EncounterFilter, EncounterLedger, MedicationOrder, NewEncounter,
};
use domain_patient::{Gender, NewPatient, Patient, PatientRegistry};
use infra_store::InMemoryStore;

struct Harness {
    patients: Arc<PatientRegistry>,
    ledger: EncounterLedger,
}

fn harness() -> Harness {
    let patients = Arc::new(PatientRegistry::new(Arc::new(
        InMemoryStore::<Patient>::new("patients"),
    )));
    let ledger = EncounterLedger::new(
        Arc::new(InMemoryStore::<Encounter>::new("encounters")),
        patients.clone(),
        Arc::new(Catalog::standard()),
    );
    Harness { patients, ledger }
}

async fn register(h: &Harness, name: &str) -> PatientId {
    h.patients
        .register(NewPatient::new(name, 34, Gender::Female, "Tekanan darah tinggi"))
        .await
        .unwrap()
        .id
}

fn orders(items: &[(&str, i64)]) -> Vec<MedicationOrder> {
    items.iter().map(|(n, q)| MedicationOrder::new(n, *q)).collect()
}

// ============================================================================
// Creation
// ============================================================================

mod creation {
    use super::*;

    #[tokio::test]
    async fn test_create_computes_total() {
        let h = harness();
        let siti = register(&h, "Siti").await;

        let encounter = h
            .ledger
            .create(NewEncounter::new(siti, "hipertensi", orders(&[("amlodipine", 10)])))
            .await
            .unwrap();

        assert!(encounter.id.to_string().starts_with("ENC-"));
        assert_eq!(encounter.total().minor_units(), 5000);
        assert_eq!(encounter.lines()[0].unit_price().minor_units(), 500);
        assert_eq!(h.ledger.get(encounter.id).await.unwrap(), encounter);
    }

    #[tokio::test]
    async fn test_encounter_without_medications_costs_nothing() {
        let h = harness();
        let patient = register(&h, "Ani").await;

        let encounter = h
            .ledger
            .create(NewEncounter::new(patient, "observasi", vec![]))
            .await
            .unwrap();

        assert!(encounter.lines().is_empty());
        assert!(encounter.total().is_zero());
    }

    #[tokio::test]
    async fn test_unknown_patient() {
        let h = harness();
        let missing = PatientId::new();

        let err = h
            .ledger
            .create(NewEncounter::new(missing, "flu", vec![]))
            .await
            .unwrap_err();

        assert!(matches!(err, EncounterError::PatientNotFound(id) if id == missing));
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_unknown_medication_stores_nothing() {
        let h = harness();
        let patient = register(&h, "Budi").await;

        let err = h
            .ledger
            .create(NewEncounter::new(
                patient,
                "flu",
                orders(&[("paracetamol", 2), ("kryptonite", 1)]),
            ))
            .await
            .unwrap_err();

        assert!(matches!(err, EncounterError::UnknownMedication(_)));
        assert!(h.ledger.list(EncounterFilter::new()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_non_positive_quantity() {
        let h = harness();
        let patient = register(&h, "Budi").await;

        for quantity in [0, -1] {
            let err = h
                .ledger
                .create(NewEncounter::new(patient, "flu", orders(&[("paracetamol", quantity)])))
                .await
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation);
        }
    }

    #[tokio::test]
    async fn test_blank_diagnosis() {
        let h = harness();
        let patient = register(&h, "Budi").await;

        let err = h
            .ledger
            .create(NewEncounter::new(patient, " ", vec![]))
            .await
            .unwrap_err();
        assert!(matches!(err, EncounterError::InvalidData(_)));
    }

    #[tokio::test]
    async fn test_missing_encounter() {
        let h = harness();
        let id = EncounterId::new();
        let err = h.ledger.get(id).await.unwrap_err();
        assert!(matches!(err, EncounterError::EncounterNotFound(missing) if missing == id));
    }
}

// ============================================================================
// Listing
// ============================================================================

mod listing {
    use super::*;

    #[tokio::test]
    async fn test_filters() {
        let h = harness();
        let siti = register(&h, "Siti").await;
        let budi = register(&h, "Budi").await;

        h.ledger.create(NewEncounter::new(siti, "Hipertensi", vec![])).await.unwrap();
        h.ledger.create(NewEncounter::new(siti, "ISPA", vec![])).await.unwrap();
        h.ledger.create(NewEncounter::new(budi, "hipertensi esensial", vec![])).await.unwrap();

        let all = h.ledger.list(EncounterFilter::new()).await.unwrap();
        assert_eq!(all.count(), 3);

        let for_siti = h.ledger.list(EncounterFilter::new().for_patient(siti)).await.unwrap();
        assert_eq!(for_siti.count(), 2);

        let hypertension = h
            .ledger
            .list(EncounterFilter::new().with_diagnosis("HIPERTENSI"))
            .await
            .unwrap();
        assert_eq!(hypertension.count(), 2);

        let combined = h
            .ledger
            .list(EncounterFilter::new().for_patient(budi).with_diagnosis("hiper"))
            .await
            .unwrap();
        assert_eq!(combined.count(), 1);
    }

    #[tokio::test]
    async fn test_listing_is_restartable_and_ordered() {
        let h = harness();
        let patient = register(&h, "Siti").await;
        let first = h.ledger.create(NewEncounter::new(patient, "a", vec![])).await.unwrap();
        let second = h.ledger.create(NewEncounter::new(patient, "b", vec![])).await.unwrap();

        let listing = h.ledger.list(EncounterFilter::new()).await.unwrap();
        let pass_one: Vec<_> = listing.iter().map(|e| e.id).collect();
        let pass_two: Vec<_> = listing.iter().map(|e| e.id).collect();

        assert_eq!(pass_one, vec![first.id, second.id]);
        assert_eq!(pass_one, pass_two);
    }

    #[tokio::test]
    async fn test_date_range() {
        let h = harness();
        let patient = register(&h, "Siti").await;
        h.ledger.create(NewEncounter::new(patient, "flu", vec![])).await.unwrap();

        let now = Utc::now();
        let past = EncounterFilter::new().between(None, Some(now - Duration::days(1)));
        assert!(h.ledger.list(past).await.unwrap().is_empty());

        let around = EncounterFilter::new()
            .between(Some(now - Duration::days(1)), Some(now + Duration::days(1)));
        assert_eq!(h.ledger.list(around).await.unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_inverted_range_rejected() {
        let h = harness();
        let now = Utc::now();
        let inverted = EncounterFilter::new().between(Some(now), Some(now - Duration::hours(1)));

        let err = h.ledger.list(inverted).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}

// ============================================================================
// Mutation and locking
// ============================================================================

mod locking {
    use super::*;

    #[tokio::test]
    async fn test_add_lines_recomputes_total() {
        let h = harness();
        let patient = register(&h, "Siti").await;
        let encounter = h
            .ledger
            .create(NewEncounter::new(patient, "hipertensi", orders(&[("amlodipine", 10)])))
            .await
            .unwrap();

        let updated = h
            .ledger
            .add_medication_lines(encounter.id, orders(&[("paracetamol", 5)]))
            .await
            .unwrap();

        assert_eq!(updated.lines().len(), 2);
        assert_eq!(updated.total().minor_units(), 5000 + 1500);
        assert_eq!(h.ledger.get(encounter.id).await.unwrap().total(), updated.total());
    }

    #[tokio::test]
    async fn test_invalid_addition_changes_nothing() {
        let h = harness();
        let patient = register(&h, "Siti").await;
        let encounter = h
            .ledger
            .create(NewEncounter::new(patient, "hipertensi", orders(&[("amlodipine", 10)])))
            .await
            .unwrap();

        let err = h
            .ledger
            .add_medication_lines(encounter.id, orders(&[("paracetamol", 1), ("zinc", 0)]))
            .await
            .unwrap_err();
        assert!(matches!(err, EncounterError::InvalidQuantity { .. }));
        assert_eq!(h.ledger.get(encounter.id).await.unwrap(), encounter);
    }

    #[tokio::test]
    async fn test_locked_encounter_is_immutable() {
        let h = harness();
        let patient = register(&h, "Siti").await;
        let encounter = h
            .ledger
            .create(NewEncounter::new(patient, "hipertensi", orders(&[("amlodipine", 10)])))
            .await
            .unwrap();

        let claim_id = ClaimId::new();
        let locked = h.ledger.lock_for_claim(encounter.id, claim_id).await.unwrap();
        assert_eq!(locked.claim_id(), Some(claim_id));

        let err = h
            .ledger
            .add_medication_lines(encounter.id, orders(&[("paracetamol", 1)]))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Locked);
        assert_eq!(h.ledger.get(encounter.id).await.unwrap().total().minor_units(), 5000);
    }

    #[tokio::test]
    async fn test_concurrent_locks_have_one_winner() {
        let h = Arc::new(harness());
        let patient = register(&h, "Siti").await;
        let encounter = h
            .ledger
            .create(NewEncounter::new(patient, "hipertensi", vec![]))
            .await
            .unwrap();
        let id = encounter.id;

        let attempts: Vec<_> = (0..8)
            .map(|_| {
                let h = h.clone();
                tokio::spawn(async move { h.ledger.lock_for_claim(id, ClaimId::new()).await })
            })
            .collect();

        let mut won = 0;
        for attempt in attempts {
            match attempt.await.unwrap() {
                Ok(_) => won += 1,
                Err(e) => assert!(matches!(e, EncounterError::AlreadyClaimed { .. })),
            }
        }
        assert_eq!(won, 1);
    }

    #[tokio::test]
    async fn test_release_unlocks() {
        let h = harness();
        let patient = register(&h, "Siti").await;
        let encounter = h.ledger.create(NewEncounter::new(patient, "flu", vec![])).await.unwrap();

        let claim_id = ClaimId::new();
        h.ledger.lock_for_claim(encounter.id, claim_id).await.unwrap();
        h.ledger.release_claim_lock(encounter.id, claim_id).await.unwrap();

        assert!(!h.ledger.get(encounter.id).await.unwrap().is_locked());
        h.ledger
            .add_medication_lines(encounter.id, orders(&[("oralit", 2)]))
            .await
            .unwrap();
    }
}

// ============================================================================
// Cost invariant
// ============================================================================

fn arb_orders() -> impl Strategy<Value = Vec<(usize, i64)>> {
    prop::collection::vec((0usize..14, 1i64..500), 0..8)
}

proptest! {
    #[test]
    fn prop_total_equals_sum_of_lines(initial in arb_orders(), added in arb_orders()) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async {
            let h = harness();
            let names: Vec<String> = h
                .ledger
                .catalog()
                .list_medications()
                .map(|m| m.name.clone())
                .collect();
            let to_orders = |picks: &[(usize, i64)]| -> Vec<MedicationOrder> {
                picks
                    .iter()
                    .map(|(i, q)| MedicationOrder::new(&names[i % names.len()], *q))
                    .collect()
            };
            let expected = |encounter: &Encounter| -> i64 {
                encounter
                    .lines()
                    .iter()
                    .map(|l| {
                        let price = h.ledger.catalog().unit_price(l.medication()).unwrap();
                        i64::from(l.quantity()) * price.minor_units()
                    })
                    .sum()
            };

            let patient = register(&h, "Siti").await;
            let encounter = h
                .ledger
                .create(NewEncounter::new(patient, "hipertensi", to_orders(&initial)))
                .await
                .unwrap();
            assert_eq!(encounter.total().minor_units(), expected(&encounter));

            let updated = h
                .ledger
                .add_medication_lines(encounter.id, to_orders(&added))
                .await
                .unwrap();
            assert_eq!(updated.lines().len(), initial.len() + added.len());
            assert_eq!(updated.total().minor_units(), expected(&updated));
            assert_eq!(updated.recomputed_total().unwrap(), updated.total());
        });
    }
}
