//! Core error types used across the system

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::money::MoneyError;
use crate::temporal::TemporalError;

/// Caller-facing classification shared by every domain error.
///
/// Each domain crate keeps its own error enum; `kind()` on those enums
/// folds them into these categories so the boundary layer can map them
/// uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Patient, encounter, claim or medication missing
    NotFound,
    /// Bad quantity, empty reason, malformed input
    Validation,
    /// Claim state machine violation
    InvalidTransition,
    /// Claim already exists, or a concurrent decision lost the race
    Conflict,
    /// Encounter is frozen by a derived claim
    Locked,
    /// Store or other collaborator failure
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::Validation => "validation_error",
            ErrorKind::InvalidTransition => "invalid_transition",
            ErrorKind::Conflict => "conflict",
            ErrorKind::Locked => "encounter_locked",
            ErrorKind::Internal => "internal_error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Core error type for the kernel
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    #[error("Temporal error: {0}")]
    Temporal(#[from] TemporalError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl CoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        CoreError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        CoreError::NotFound(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::NotFound(_) => ErrorKind::NotFound,
            CoreError::Configuration(_) => ErrorKind::Internal,
            CoreError::Money(_) | CoreError::Temporal(_) | CoreError::Validation(_) => {
                ErrorKind::Validation
            }
        }
    }
}
