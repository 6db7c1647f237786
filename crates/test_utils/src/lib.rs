//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! clinic claims test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built test data and seeded clinics
//! - `builders`: Builder patterns for registration and encounter details
//! - `assertions`: Custom assertion helpers for domain invariants
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
