//! Reporting Domain
//!
//! Read-only monthly roll-ups across the patient registry, the encounter
//! ledger and the claims engine. Empty periods produce zeroed summaries.

pub mod summary;
pub mod aggregator;
pub mod error;

pub use summary::{summarize, DiagnosisBreakdown, MedicationUsage, MonthlySummary, StatusTotal};
pub use aggregator::ReportingAggregator;
pub use error::ReportingError;
