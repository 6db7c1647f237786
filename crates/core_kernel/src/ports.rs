//! Persistence port
//!
//! Every record collection in the clinic (patients, encounters, claims) sits
//! behind the same minimal key-value contract. The components own their
//! collections but never know what backs them:
//!
//! ```text
//! ┌──────────────────┐  ┌──────────────────┐  ┌──────────────────┐
//! │ PatientRegistry  │  │ EncounterLedger  │  │  ClaimsEngine    │
//! └────────┬─────────┘  └────────┬─────────┘  └────────┬─────────┘
//!          │     RecordStore<Patient / Encounter / Claim>
//!          ▼                     ▼                     ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │     InMemoryStore (infra_store) or any durable adapter       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use core_kernel::ports::RecordStore;
//!
//! pub struct PatientRegistry {
//!     store: Arc<dyn RecordStore<Patient>>,
//! }
//! ```

use std::fmt;
use std::hash::Hash;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ErrorKind;

/// Error type for port operations
///
/// Provides a unified error type that all store implementations must use,
/// so the domain layer can tell a missing record from a broken store.
#[derive(Debug, Error)]
pub enum PortError {
    /// The requested entity was not found
    #[error("Not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: String,
        id: String,
    },

    /// A validation error occurred
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// The operation conflicts with existing data
    #[error("Conflict: {message}")]
    Conflict {
        message: String,
    },

    /// The backing store is unavailable
    #[error("Service unavailable: {service}")]
    ServiceUnavailable {
        service: String,
    },

    /// An internal error occurred
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PortError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: impl Into<String>, id: impl fmt::Display) -> Self {
        PortError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        PortError::Validation {
            message: message.into(),
            field: None,
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true if this error indicates the entity was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            PortError::NotFound { .. } => ErrorKind::NotFound,
            PortError::Validation { .. } => ErrorKind::Validation,
            PortError::Conflict { .. } => ErrorKind::Conflict,
            PortError::ServiceUnavailable { .. } | PortError::Internal { .. } => {
                ErrorKind::Internal
            }
        }
    }
}

/// Marker trait for all domain ports
///
/// All port traits extend this marker so they can be shared across
/// request handlers.
pub trait DomainPort: Send + Sync + 'static {}

/// A record that can be kept in a [`RecordStore`]
pub trait Record: Clone + Send + Sync + 'static {
    /// Key the record is stored under
    type Id: Copy + Eq + Hash + fmt::Display + Send + Sync + 'static;

    /// Entity name used in error messages
    const ENTITY: &'static str;

    fn record_id(&self) -> Self::Id;
}

/// The persistence collaborator contract
///
/// `put` inserts or replaces, `get` and `delete` fail with
/// [`PortError::NotFound`] for unknown ids. `list_all` returns a snapshot in
/// no particular order.
#[async_trait]
pub trait RecordStore<R: Record>: DomainPort + HealthCheckable {
    async fn put(&self, record: R) -> Result<(), PortError>;

    async fn get(&self, id: R::Id) -> Result<R, PortError>;

    async fn delete(&self, id: R::Id) -> Result<(), PortError>;

    async fn list_all(&self) -> Result<Vec<R>, PortError>;

    /// Removes every record
    async fn clear(&self) -> Result<(), PortError> {
        for record in self.list_all().await? {
            self.delete(record.record_id()).await?;
        }
        Ok(())
    }
}

/// Health status for an adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterHealth {
    /// Adapter is healthy and operational
    Healthy,
    /// Adapter is degraded but operational
    Degraded,
    /// Adapter is unhealthy and not operational
    Unhealthy,
}

/// Health check result for an adapter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResult {
    /// Adapter identifier
    pub adapter_id: String,
    /// Current health status
    pub status: AdapterHealth,
    /// Latency of the health check in milliseconds
    pub latency_ms: u64,
    /// Optional message with additional details
    pub message: Option<String>,
    /// Timestamp of the health check
    pub checked_at: chrono::DateTime<chrono::Utc>,
}

/// Trait for adapters that support health checks
#[async_trait]
pub trait HealthCheckable: Send + Sync {
    async fn health_check(&self) -> HealthCheckResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_error_not_found() {
        let error = PortError::not_found("Patient", "123");
        assert!(error.is_not_found());
        assert_eq!(error.kind(), ErrorKind::NotFound);
        assert!(error.to_string().contains("Patient"));
        assert!(error.to_string().contains("123"));
    }

    #[test]
    fn test_port_error_kinds() {
        assert_eq!(PortError::validation("bad").kind(), ErrorKind::Validation);
        assert_eq!(PortError::internal("boom").kind(), ErrorKind::Internal);
        assert_eq!(
            PortError::Conflict { message: "dup".to_string() }.kind(),
            ErrorKind::Conflict
        );
    }
}
