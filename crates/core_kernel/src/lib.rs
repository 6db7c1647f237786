//! Core Kernel - Foundational types shared by every clinic component
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Money in integer minor units, free of rounding drift
//! - Strongly-typed identifiers for patients, encounters and claims
//! - The persistence port every record collection sits behind
//! - Lazy, restartable listings and calendar reporting periods

pub mod money;
pub mod temporal;
pub mod identifiers;
pub mod error;
pub mod ports;
pub mod listing;

pub use money::{Money, Currency, MoneyError};
pub use temporal::{YearMonth, TemporalError};
pub use identifiers::{PatientId, EncounterId, ClaimId};
pub use error::{CoreError, ErrorKind};
pub use ports::{
    PortError, DomainPort, Record, RecordStore,
    AdapterHealth, HealthCheckable, HealthCheckResult,
};
pub use listing::Listing;
