//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data that
//! respects the clinic's invariants.

use once_cell::sync::Lazy;
use proptest::prelude::*;

use core_kernel::{Currency, Money};
use domain_catalog::Catalog;
use domain_encounter::MedicationOrder;
use domain_patient::{Gender, NewPatient, MAX_AGE};

static MEDICATION_NAMES: Lazy<Vec<String>> = Lazy::new(|| {
    Catalog::standard()
        .list_medications()
        .map(|m| m.name.clone())
        .collect()
});

/// Strategy for names present in the standard catalog
pub fn medication_name_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(MEDICATION_NAMES.clone())
}

/// Strategy for valid orders against the standard catalog
pub fn order_strategy() -> impl Strategy<Value = MedicationOrder> {
    (medication_name_strategy(), 1i64..1_000)
        .prop_map(|(name, quantity)| MedicationOrder::new(&name, quantity))
}

/// Strategy for up to `max` valid orders
pub fn orders_strategy(max: usize) -> impl Strategy<Value = Vec<MedicationOrder>> {
    prop::collection::vec(order_strategy(), 0..=max)
}

/// Strategy for quantities that must be rejected
pub fn invalid_quantity_strategy() -> impl Strategy<Value = i64> {
    prop_oneof![i64::MIN..=0, (i64::from(u32::MAX) + 1)..i64::MAX]
}

pub fn gender_strategy() -> impl Strategy<Value = Gender> {
    prop_oneof![Just(Gender::Male), Just(Gender::Female), Just(Gender::Other)]
}

/// Strategy for registration details that pass validation
pub fn new_patient_strategy() -> impl Strategy<Value = NewPatient> {
    ("[A-Z][a-z]{2,12}", 0..=MAX_AGE, gender_strategy(), "[A-Za-z ]{1,40}[a-z]")
        .prop_map(|(name, age, gender, complaint)| NewPatient::new(&name, age, gender, &complaint))
}

/// Strategy for non-negative rupiah amounts
pub fn idr_money_strategy() -> impl Strategy<Value = Money> {
    (0i64..1_000_000_000).prop_map(|minor| Money::from_minor(minor, Currency::IDR))
}
