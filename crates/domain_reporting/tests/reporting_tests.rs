//! Tests for monthly reporting

use std::sync::Arc;

use chrono::{DateTime, Utc};

use core_kernel::{ErrorKind, YearMonth};
use domain_catalog::Catalog;
use domain_claims::{Claim, ClaimDecision, ClaimStatus, ClaimsEngine};
use domain_encounter::{Encounter, EncounterLedger, MedicationOrder, NewEncounter};
use domain_patient::{Gender, NewPatient, Patient, PatientRegistry};
use domain_reporting::{ReportingAggregator, ReportingError};
use infra_store::InMemoryStore;

struct Harness {
    patients: Arc<PatientRegistry>,
    encounters: Arc<EncounterLedger>,
    claims: Arc<ClaimsEngine>,
    reports: ReportingAggregator,
}

fn harness() -> Harness {
    let patients = Arc::new(PatientRegistry::new(Arc::new(
        InMemoryStore::<Patient>::new("patients"),
    )));
    let encounters = Arc::new(EncounterLedger::new(
        Arc::new(InMemoryStore::<Encounter>::new("encounters")),
        patients.clone(),
        Arc::new(Catalog::standard()),
    ));
    let claims = Arc::new(ClaimsEngine::new(
        Arc::new(InMemoryStore::<Claim>::new("claims")),
        encounters.clone(),
    ));
    let reports = ReportingAggregator::new(patients.clone(), encounters.clone(), claims.clone());
    Harness {
        patients,
        encounters,
        claims,
        reports,
    }
}

async fn visit(h: &Harness, name: &str, diagnosis: &str, orders: &[(&str, i64)]) -> Encounter {
    let patient = h
        .patients
        .register(NewPatient::new(name, 40, Gender::Male, "Demam"))
        .await
        .unwrap();
    let orders = orders.iter().map(|(n, q)| MedicationOrder::new(n, *q)).collect();
    h.encounters
        .create(NewEncounter::new(patient.id, diagnosis, orders))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_summary_of_current_month() {
    let h = harness();

    let siti = visit(&h, "Siti", "hipertensi", &[("amlodipine", 10)]).await;
    let period = YearMonth::containing(siti.created_at);
    let budi = visit(&h, "Budi", "Hipertensi", &[("amlodipine", 2), ("paracetamol", 4)]).await;
    let ani = visit(&h, "Ani", "diare", &[("oralit", 3)]).await;
    h.encounters
        .create(NewEncounter::new(siti.patient_id, "kontrol", vec![]))
        .await
        .unwrap();

    let approved = h.claims.derive_claim(siti.id).await.unwrap();
    h.claims.submit_claim(approved.id).await.unwrap();
    h.claims
        .decide_claim(approved.id, ClaimDecision::Approve, None)
        .await
        .unwrap();

    let rejected = h.claims.derive_claim(budi.id).await.unwrap();
    h.claims.submit_claim(rejected.id).await.unwrap();
    h.claims
        .decide_claim(rejected.id, ClaimDecision::Reject, Some("tidak ditanggung".into()))
        .await
        .unwrap();

    h.claims.derive_claim(ani.id).await.unwrap();

    let summary = h.reports.monthly_summary(period).await.unwrap();

    assert_eq!(summary.patients_registered, 3);
    assert_eq!(summary.patients_seen, 3);
    assert_eq!(summary.encounters, 4);
    assert_eq!(summary.claims, 3);
    assert_eq!(summary.total_encounter_cost.minor_units(), 5000 + 2200 + 3000);

    let approved_total = summary.status(ClaimStatus::Approved).unwrap();
    assert_eq!((approved_total.count, approved_total.amount.minor_units()), (1, 5000));
    let rejected_total = summary.status(ClaimStatus::Rejected).unwrap();
    assert_eq!((rejected_total.count, rejected_total.amount.minor_units()), (1, 2200));
    let draft_total = summary.status(ClaimStatus::Draft).unwrap();
    assert_eq!((draft_total.count, draft_total.amount.minor_units()), (1, 3000));
    assert_eq!(summary.status(ClaimStatus::Submitted).unwrap().count, 0);

    let diagnoses: Vec<_> = summary.diagnoses.iter().map(|d| d.diagnosis.as_str()).collect();
    assert_eq!(diagnoses, vec!["diare", "hipertensi", "kontrol"]);

    let hypertension = &summary.diagnoses[1];
    assert_eq!(hypertension.encounters, 2);
    assert_eq!(hypertension.medication_cost.minor_units(), 7200);
    assert_eq!(hypertension.medications.len(), 2);
    assert_eq!(hypertension.medications[0].name, "amlodipine");
    assert_eq!(hypertension.medications[0].quantity, 12);
    assert_eq!(hypertension.medications[0].cost.minor_units(), 6000);
    assert_eq!(hypertension.medications[1].name, "paracetamol");
    assert_eq!(hypertension.medications[1].cost.minor_units(), 1200);

    let checkup = &summary.diagnoses[2];
    assert_eq!(checkup.encounters, 1);
    assert!(checkup.medication_cost.is_zero());
    assert!(checkup.medications.is_empty());
}

#[tokio::test]
async fn test_quiet_month_is_zeroed() {
    let h = harness();
    visit(&h, "Siti", "hipertensi", &[("amlodipine", 10)]).await;

    let current = YearMonth::containing(Utc::now());
    let last_year = YearMonth::new(current.year() - 1, current.month()).unwrap();

    let summary = h.reports.monthly_summary(last_year).await.unwrap();
    assert!(summary.is_empty());
    assert_eq!(summary.period, last_year);
    assert_eq!(summary.claims_by_status.len(), 4);
    assert!(summary.total_encounter_cost.is_zero());
}

#[tokio::test]
async fn test_invalid_period_text() {
    let h = harness();
    let err = h.reports.monthly_summary_for("2024-13").await.unwrap_err();
    assert!(matches!(err, ReportingError::InvalidPeriod(_)));
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[tokio::test]
async fn test_latest_representable_month_is_zeroed() {
    let h = harness();
    visit(&h, "Siti", "hipertensi", &[("amlodipine", 10)]).await;

    let last = YearMonth::containing(DateTime::<Utc>::MAX_UTC);
    let err = h
        .reports
        .monthly_summary_for(&last.to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, ReportingError::InvalidPeriod(_)));

    let summary = h.reports.monthly_summary(last).await.unwrap();
    assert!(summary.is_empty());

    let before = (1..=12)
        .rev()
        .find_map(|m| YearMonth::new(last.year(), m).ok())
        .unwrap();
    let summary = h.reports.monthly_summary(before).await.unwrap();
    assert!(summary.is_empty());
    assert_eq!(summary.period, before);
}
