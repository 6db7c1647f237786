//! Administration handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::warn;

use clinic_services::ResetSummary;

use crate::dto::admin::ResetRequest;
use crate::error::ApiError;
use crate::AppState;

/// Removes every patient, encounter and claim
///
/// Requires `{"confirm": true}`; any other body is rejected before the
/// clinic is touched.
pub async fn reset(
    State(state): State<AppState>,
    payload: Result<Json<ResetRequest>, JsonRejection>,
) -> Result<Json<ResetSummary>, ApiError> {
    let Json(req) = payload?;
    if !req.confirm {
        warn!("Reset requested without confirmation");
        return Err(ApiError::BadRequest(
            "Reset requires {\"confirm\": true}".to_string(),
        ));
    }

    let removed = state.clinic.reset().await?;
    Ok(Json(removed))
}
