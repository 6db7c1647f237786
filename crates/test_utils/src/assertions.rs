//! Custom Test Assertions
//!
//! Assertion helpers for the clinic's invariants, with more useful failure
//! messages than a bare `assert_eq!`.

use core_kernel::{ErrorKind, Money};
use domain_catalog::Catalog;
use domain_claims::Claim;
use domain_encounter::Encounter;

/// Asserts a money value in minor units
pub fn assert_money_minor(money: &Money, expected: i64) {
    assert_eq!(
        money.minor_units(),
        expected,
        "Expected {} minor units, got {}",
        expected,
        money
    );
}

/// Asserts that the stored total equals Σ quantity × unit price
pub fn assert_total_consistent(encounter: &Encounter) {
    let expected: i64 = encounter
        .lines()
        .iter()
        .map(|l| i64::from(l.quantity()) * l.unit_price().minor_units())
        .sum();
    assert_eq!(
        encounter.total().minor_units(),
        expected,
        "Encounter {} total drifted from its lines",
        encounter.id
    );
}

/// Asserts that every line is priced at the catalog's current unit price
pub fn assert_priced_by(encounter: &Encounter, catalog: &Catalog) {
    for line in encounter.lines() {
        let price = catalog
            .unit_price(line.medication())
            .unwrap_or_else(|e| panic!("line {} not in catalog: {}", line.medication(), e));
        assert_eq!(line.unit_price(), price, "{} priced incorrectly", line.medication());
    }
}

/// Asserts that a claim snapshots its source encounter
pub fn assert_claim_matches_encounter(claim: &Claim, encounter: &Encounter) {
    assert_eq!(claim.encounter_id, encounter.id, "Claim points at another encounter");
    assert_eq!(claim.patient_id, encounter.patient_id, "Claim patient differs");
    assert_eq!(claim.amount, encounter.total(), "Claim amount drifted from encounter total");
    assert_eq!(
        claim.payload.total_value(),
        encounter.total().minor_units(),
        "Payload total differs from encounter total"
    );
    assert_eq!(
        claim.payload.item.len(),
        encounter.lines().len(),
        "Payload items differ from encounter lines"
    );
}

/// Asserts the caller-facing category of an error
pub fn assert_kind(actual: ErrorKind, expected: ErrorKind) {
    assert_eq!(actual, expected, "Expected a {} error, got {}", expected, actual);
}
