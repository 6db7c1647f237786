//! Clinic Application Service
//!
//! Wires the catalog, patient registry, encounter ledger, claims engine and
//! reporting aggregator over injected record stores, and provides the
//! all-or-nothing administrative reset.
//!
//! # Example
//!
//! ```rust,ignore
//! use clinic_services::Clinic;
//! use domain_catalog::Catalog;
//!
//! let clinic = Clinic::in_memory(Catalog::standard());
//! let siti = clinic.register_patient(details).await?;
//! ```

pub mod clinic;
pub mod stores;
pub mod error;

pub use clinic::{Clinic, ResetSummary};
pub use stores::ClinicStores;
pub use error::ServiceError;
