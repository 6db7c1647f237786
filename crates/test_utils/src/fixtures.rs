//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for the clinic. These fixtures are
//! consistent and predictable; use `generators` for randomised data.

use chrono::Utc;
use fake::faker::name::en::Name;
use fake::Fake;

use clinic_services::Clinic;
use core_kernel::{Currency, Money, YearMonth};
use domain_catalog::Catalog;
use domain_claims::{Claim, ClaimDecision};
use domain_encounter::{Encounter, MedicationOrder, NewEncounter};
use domain_patient::{Gender, NewPatient, Patient};

/// Fixture for patient registration details
pub struct PatientFixtures;

impl PatientFixtures {
    /// Siti, 34, female, headache
    pub fn siti() -> NewPatient {
        NewPatient::new("Siti", 34, Gender::Female, "Sakit kepala")
    }

    /// Budi, 52, male, cough
    pub fn budi() -> NewPatient {
        NewPatient::new("Budi Santoso", 52, Gender::Male, "Batuk")
    }

    /// A patient with a generated name
    pub fn random() -> NewPatient {
        let name: String = Name().fake();
        let age = (0u32..90).fake::<u32>();
        NewPatient::new(&name, age, Gender::Other, "Demam")
    }
}

/// Fixture for medication orders priced by the standard catalog
pub struct OrderFixtures;

impl OrderFixtures {
    /// 10 × amlodipine at 500 = 5000
    pub fn amlodipine_10() -> Vec<MedicationOrder> {
        vec![MedicationOrder::new("amlodipine", 10)]
    }

    /// 12 × paracetamol (3600) + 2 × oralit (2000) = 5600
    pub fn common_cold() -> Vec<MedicationOrder> {
        vec![
            MedicationOrder::new("paracetamol", 12),
            MedicationOrder::new("oralit", 2),
        ]
    }
}

/// Fixture for money values
pub struct MoneyFixtures;

impl MoneyFixtures {
    pub fn idr(minor_units: i64) -> Money {
        Money::from_minor(minor_units, Currency::IDR)
    }

    pub fn idr_zero() -> Money {
        Money::zero(Currency::IDR)
    }
}

/// Fixture for reporting periods
pub struct PeriodFixtures;

impl PeriodFixtures {
    /// The month records created now fall into
    pub fn current_month() -> YearMonth {
        YearMonth::containing(Utc::now())
    }

    /// A month guaranteed to have no records
    pub fn quiet_month() -> YearMonth {
        let current = Self::current_month();
        YearMonth::new(current.year() - 10, current.month()).unwrap()
    }
}

/// A clinic over fresh in-memory stores and the standard catalog
pub fn empty_clinic() -> Clinic {
    Clinic::in_memory(Catalog::standard())
}

/// Registers Siti and records her hypertension visit (total 5000)
pub async fn siti_hypertension(clinic: &Clinic) -> (Patient, Encounter) {
    let siti = clinic.register_patient(PatientFixtures::siti()).await.unwrap();
    let encounter = clinic
        .create_encounter(NewEncounter::new(siti.id, "hipertensi", OrderFixtures::amlodipine_10()))
        .await
        .unwrap();
    (siti, encounter)
}

/// Counts of records created by [`seed_clinic`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedCounts {
    pub patients: usize,
    pub encounters: usize,
    pub claims: usize,
}

/// Registers `patients` patients with `visits` encounters each, and derives
/// a claim for every other encounter; every third claim is approved
pub async fn seed_clinic(clinic: &Clinic, patients: usize, visits: usize) -> SeedCounts {
    let mut counts = SeedCounts {
        patients: 0,
        encounters: 0,
        claims: 0,
    };
    let mut claims: Vec<Claim> = Vec::new();

    for _ in 0..patients {
        let patient = clinic.register_patient(PatientFixtures::random()).await.unwrap();
        counts.patients += 1;

        for visit in 0..visits {
            let encounter = clinic
                .create_encounter(NewEncounter::new(patient.id, "ISPA", OrderFixtures::common_cold()))
                .await
                .unwrap();
            counts.encounters += 1;

            if visit % 2 == 0 {
                claims.push(clinic.derive_claim(encounter.id).await.unwrap());
                counts.claims += 1;
            }
        }
    }

    for claim in claims.iter().step_by(3) {
        clinic.submit_claim(claim.id).await.unwrap();
        clinic
            .decide_claim(claim.id, ClaimDecision::Approve, None)
            .await
            .unwrap();
    }

    counts
}
