//! Reporting handlers

use axum::{
    extract::{Path, State},
    Json,
};

use clinic_services::ServiceError;
use core_kernel::YearMonth;
use domain_reporting::{MonthlySummary, ReportingError};

use crate::error::ApiError;
use crate::AppState;

/// Activity summary for a `YYYY-MM` period
pub async fn monthly_summary(
    State(state): State<AppState>,
    Path(period): Path<String>,
) -> Result<Json<MonthlySummary>, ApiError> {
    let period: YearMonth = period
        .parse()
        .map_err(|e| ServiceError::from(ReportingError::from(e)))?;
    let summary = state.clinic.monthly_summary(period).await?;
    Ok(Json(summary))
}
