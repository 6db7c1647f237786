//! Encounter handlers

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use tracing::info;

use core_kernel::EncounterId;
use domain_claims::FhirClaim;
use domain_encounter::EncounterFilter;

use crate::dto::claims::ClaimResponse;
use crate::dto::encounters::{
    AddMedicationsRequest, CreateEncounterRequest, EncounterQuery, EncounterResponse,
};
use crate::error::ApiError;
use crate::handlers::parse_id;
use crate::AppState;

/// Records a visit
pub async fn create_encounter(
    State(state): State<AppState>,
    payload: Result<Json<CreateEncounterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<EncounterResponse>), ApiError> {
    let Json(req) = payload?;
    let encounter = state.clinic.create_encounter(req.into()).await?;

    info!(encounter_id = %encounter.id, "Encounter created via API");
    Ok((StatusCode::CREATED, Json(encounter.into())))
}

/// Lists encounters, optionally filtered by patient, diagnosis and date range
pub async fn list_encounters(
    State(state): State<AppState>,
    query: Result<Query<EncounterQuery>, QueryRejection>,
) -> Result<Json<Vec<EncounterResponse>>, ApiError> {
    let Query(query) = query?;

    let mut filter = EncounterFilter::new().between(query.from, query.to);
    if let Some(patient_id) = query.patient_id.as_deref() {
        filter = filter.for_patient(parse_id(patient_id)?);
    }
    if let Some(diagnosis) = query.diagnosis.as_deref() {
        filter = filter.with_diagnosis(diagnosis);
    }

    let encounters = state.clinic.list_encounters(filter).await?;
    Ok(Json(encounters.iter().cloned().map(Into::into).collect()))
}

pub async fn get_encounter(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EncounterResponse>, ApiError> {
    let encounter = state.clinic.get_encounter(parse_id(&id)?).await?;
    Ok(Json(encounter.into()))
}

/// Adds medication lines to an encounter that has no claim yet
pub async fn add_medications(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<AddMedicationsRequest>, JsonRejection>,
) -> Result<Json<EncounterResponse>, ApiError> {
    let id: EncounterId = parse_id(&id)?;
    let Json(req) = payload?;
    let encounter = state.clinic.add_medication_lines(id, req.into_orders()).await?;
    Ok(Json(encounter.into()))
}

/// FHIR payload the encounter would be claimed with
pub async fn preview_claim(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FhirClaim>, ApiError> {
    let payload = state.clinic.preview_claim(parse_id(&id)?).await?;
    Ok(Json(payload))
}

/// Derives the encounter's claim, locking the encounter
pub async fn derive_claim(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<ClaimResponse>), ApiError> {
    let claim = state.clinic.derive_claim(parse_id(&id)?).await?;

    info!(claim_id = %claim.id, encounter_id = %claim.encounter_id, "Claim derived via API");
    Ok((StatusCode::CREATED, Json(claim.into())))
}
