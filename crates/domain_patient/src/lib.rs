//! Patient Registry Domain
//!
//! Patients are the foundation every encounter references. A patient is
//! registered once and is immutable afterwards; records only disappear
//! through the administrative reset.
//!
//! # Examples
//!
//! ```rust,ignore
//! use domain_patient::{Gender, NewPatient, PatientRegistry};
//!
//! let registry = PatientRegistry::new(store);
//! let siti = registry
//!     .register(NewPatient::new("Siti", 34, Gender::Female, "Sakit kepala"))
//!     .await?;
//! ```

pub mod patient;
pub mod registry;
pub mod error;

pub use patient::{Patient, Gender, NewPatient, MAX_AGE};
pub use registry::PatientRegistry;
pub use error::PatientError;
