//! Catalog DTOs

use serde::Serialize;

use core_kernel::Currency;
use domain_catalog::Medication;

#[derive(Debug, Serialize)]
pub struct MedicationResponse {
    pub code: String,
    pub name: String,
    /// Whole minor units of `currency`
    pub unit_price: i64,
    pub currency: Currency,
}

impl From<&Medication> for MedicationResponse {
    fn from(medication: &Medication) -> Self {
        Self {
            code: medication.code.clone(),
            name: medication.name.clone(),
            unit_price: medication.unit_price.minor_units(),
            currency: medication.unit_price.currency(),
        }
    }
}
