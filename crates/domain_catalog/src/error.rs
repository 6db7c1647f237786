//! Catalog domain errors

use thiserror::Error;

use core_kernel::ErrorKind;

/// Errors that can occur in the catalog domain
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Unknown medication: {0}")]
    UnknownMedication(String),

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("Catalog document could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),
}

impl CatalogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::UnknownMedication(_) => ErrorKind::NotFound,
            CatalogError::InvalidCatalog(_) | CatalogError::Parse(_) => ErrorKind::Validation,
        }
    }
}
