//! API error handling

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use clinic_services::ServiceError;
use core_kernel::ErrorKind;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Locked: {0}")]
    Locked(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Maps a domain error category onto the matching response
    pub fn from_kind(kind: ErrorKind, message: String) -> Self {
        match kind {
            ErrorKind::NotFound => ApiError::NotFound(message),
            ErrorKind::Validation => ApiError::Validation(message),
            ErrorKind::InvalidTransition => ApiError::InvalidTransition(message),
            ErrorKind::Conflict => ApiError::Conflict(message),
            ErrorKind::Locked => ApiError::Locked(message),
            ErrorKind::Internal => ApiError::Internal(message),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidTransition(_) | ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Locked(_) => StatusCode::LOCKED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => ErrorKind::NotFound.as_str(),
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Validation(_) => ErrorKind::Validation.as_str(),
            ApiError::InvalidTransition(_) => ErrorKind::InvalidTransition.as_str(),
            ApiError::Conflict(_) => ErrorKind::Conflict.as_str(),
            ApiError::Locked(_) => ErrorKind::Locked.as_str(),
            ApiError::Internal(_) => ErrorKind::Internal.as_str(),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::NotFound(msg)
            | ApiError::BadRequest(msg)
            | ApiError::Validation(msg)
            | ApiError::InvalidTransition(msg)
            | ApiError::Conflict(msg)
            | ApiError::Locked(msg) => msg.clone(),
            ApiError::Internal(msg) => {
                error!(error = %msg, "Request failed");
                msg.clone()
            }
        };

        let body = ErrorResponse {
            error: self.error_type().to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        ApiError::from_kind(err.kind(), err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_status_mapping() {
        let cases = [
            (ErrorKind::NotFound, StatusCode::NOT_FOUND),
            (ErrorKind::Validation, StatusCode::UNPROCESSABLE_ENTITY),
            (ErrorKind::InvalidTransition, StatusCode::CONFLICT),
            (ErrorKind::Conflict, StatusCode::CONFLICT),
            (ErrorKind::Locked, StatusCode::LOCKED),
            (ErrorKind::Internal, StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (kind, status) in cases {
            assert_eq!(ApiError::from_kind(kind, String::new()).status(), status);
        }
    }
}
