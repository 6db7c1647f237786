//! Catalog Domain
//!
//! Static reference data for the clinic: the chief complaints offered at
//! registration and the medication price list used to cost encounters.
//! The catalog is read-only once built and is shared without locking.
//!
//! # Example
//!
//! ```rust
//! use domain_catalog::Catalog;
//!
//! let catalog = Catalog::standard();
//! let price = catalog.unit_price("Amlodipine").unwrap();
//! assert_eq!(price.minor_units(), 500);
//! ```

pub mod catalog;
pub mod medication;
pub mod error;

pub use catalog::{Catalog, CatalogSpec, standard_spec};
pub use medication::{Medication, MedicationSpec};
pub use error::CatalogError;
