//! Priced medications

use serde::{Deserialize, Serialize};

use core_kernel::{Currency, Money};

/// A medication on the price list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medication {
    /// Stable code, used as the claim item coding
    pub code: String,
    /// Canonical lowercase name
    pub name: String,
    /// Price per dispensed unit
    pub unit_price: Money,
}

/// Price list entry as written in a catalog document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicationSpec {
    pub code: String,
    pub name: String,
    /// Unit price in minor units of the catalog currency
    pub unit_price: i64,
}

impl MedicationSpec {
    pub fn new(code: &str, name: &str, unit_price: i64) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            unit_price,
        }
    }

    pub(crate) fn into_medication(self, currency: Currency) -> Medication {
        Medication {
            code: self.code.trim().to_string(),
            name: normalize_name(&self.name),
            unit_price: Money::from_minor(self.unit_price, currency),
        }
    }
}

/// Lookup key for a medication name: trimmed and lowercased
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}
