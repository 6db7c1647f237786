//! Request handlers, one module per resource

pub mod catalog;
pub mod patients;
pub mod encounters;
pub mod claims;
pub mod reports;
pub mod admin;
pub mod health;

use std::fmt::Display;
use std::str::FromStr;

use crate::error::ApiError;

/// Parses a path or query identifier, accepting the prefixed display form
pub(crate) fn parse_id<T>(raw: &str) -> Result<T, ApiError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim()
        .parse()
        .map_err(|e| ApiError::BadRequest(format!("Invalid identifier {:?}: {}", raw, e)))
}
