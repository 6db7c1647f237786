//! Encounter cost computation
//!
//! Pure functions: the same catalog and the same orders always produce the
//! same lines and the same total. Arithmetic is checked integer arithmetic
//! on minor units.

use core_kernel::{Currency, Money, MoneyError};
use domain_catalog::{Catalog, CatalogError};

use crate::encounter::{MedicationLine, MedicationOrder};
use crate::error::EncounterError;

/// Prices one order against the catalog, freezing the current unit price
pub fn price_order(catalog: &Catalog, order: &MedicationOrder) -> Result<MedicationLine, EncounterError> {
    let medication = catalog.medication(&order.name).map_err(|e| match e {
        CatalogError::UnknownMedication(name) => EncounterError::UnknownMedication(name),
        other => EncounterError::InvalidData(other.to_string()),
    })?;

    let quantity = u32::try_from(order.quantity)
        .ok()
        .filter(|q| *q > 0)
        .ok_or_else(|| EncounterError::InvalidQuantity {
            medication: medication.name.clone(),
            quantity: order.quantity,
        })?;

    MedicationLine::new(&medication.code, &medication.name, quantity, medication.unit_price)
}

/// Prices every order; fails on the first invalid one
pub fn price_orders(
    catalog: &Catalog,
    orders: &[MedicationOrder],
) -> Result<Vec<MedicationLine>, EncounterError> {
    orders.iter().map(|order| price_order(catalog, order)).collect()
}

/// Σ quantity × unit price over `lines`
pub fn total_cost(lines: &[MedicationLine], currency: Currency) -> Result<Money, EncounterError> {
    lines
        .iter()
        .try_fold(Money::zero(currency), |acc, line| {
            let line_total = line.unit_price.checked_mul(line.quantity)?;
            acc.checked_add(&line_total)
        })
        .map_err(money_error)
}

pub(crate) fn money_error(error: MoneyError) -> EncounterError {
    match error {
        MoneyError::Overflow => EncounterError::CostOverflow,
        other => EncounterError::InvalidData(other.to_string()),
    }
}
