//! Catalog handlers

use axum::{extract::State, Json};

use crate::dto::catalog::MedicationResponse;
use crate::AppState;

/// Complaint options, in presentation order
pub async fn list_complaints(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.clinic.catalog().list_complaints().to_vec())
}

/// Price list, ordered by name
pub async fn list_medications(State(state): State<AppState>) -> Json<Vec<MedicationResponse>> {
    Json(
        state
            .clinic
            .catalog()
            .list_medications()
            .map(MedicationResponse::from)
            .collect(),
    )
}
