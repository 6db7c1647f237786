//! Claims Engine Domain
//!
//! Derives insurance claims from encounters and drives them through their
//! approval lifecycle.
//!
//! # Claim Lifecycle
//!
//! ```text
//! Draft -> Submitted -> Approved
//!                    -> Rejected (with reason)
//! ```
//!
//! Derivation happens once per encounter. It snapshots the encounter total
//! into the claim amount and locks the encounter, so the two can never
//! drift apart.

pub mod claim;
pub mod fhir;
pub mod engine;
pub mod error;

pub use claim::{Claim, ClaimAction, ClaimDecision, ClaimStatus};
pub use fhir::FhirClaim;
pub use engine::ClaimsEngine;
pub use error::ClaimError;
