//! Patient handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use clinic_services::ServiceError;
use domain_patient::Patient;

use crate::dto::encounters::EncounterResponse;
use crate::dto::patients::CreatePatientRequest;
use crate::error::ApiError;
use crate::handlers::parse_id;
use crate::AppState;

/// Registers a patient
pub async fn register_patient(
    State(state): State<AppState>,
    payload: Result<Json<CreatePatientRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Patient>), ApiError> {
    let Json(req) = payload?;
    let details = req.into_new_patient().map_err(ServiceError::from)?;
    let patient = state.clinic.register_patient(details).await?;

    info!(patient_id = %patient.id, "Patient registered via API");
    Ok((StatusCode::CREATED, Json(patient)))
}

pub async fn list_patients(State(state): State<AppState>) -> Result<Json<Vec<Patient>>, ApiError> {
    let patients = state.clinic.list_patients().await?;
    Ok(Json(patients.to_vec()))
}

pub async fn get_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Patient>, ApiError> {
    let patient = state.clinic.get_patient(parse_id(&id)?).await?;
    Ok(Json(patient))
}

/// Visit history of one patient
pub async fn patient_encounters(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<EncounterResponse>>, ApiError> {
    let encounters = state.clinic.patient_encounters(parse_id(&id)?).await?;
    Ok(Json(encounters.iter().cloned().map(Into::into).collect()))
}
