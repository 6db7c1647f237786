//! Encounter Ledger Domain
//!
//! Records clinical visits against registered patients. Each encounter
//! carries a diagnosis, medication lines priced from the catalog, and a
//! total cost that is always the sum of its line totals.
//!
//! # Encounter Lifecycle
//!
//! ```text
//! created -> (medication lines added) -> locked by claim derivation
//! ```
//!
//! Once a claim has been derived the encounter is frozen: the claim amount
//! is a snapshot of the encounter total and must never drift from it.

pub mod encounter;
pub mod pricing;
pub mod ledger;
pub mod error;

pub use encounter::{Encounter, MedicationLine, MedicationOrder, NewEncounter};
pub use ledger::{EncounterFilter, EncounterLedger};
pub use error::EncounterError;
