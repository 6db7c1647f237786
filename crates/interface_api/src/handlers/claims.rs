//! Claims handlers

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use tracing::info;

use clinic_services::ServiceError;
use domain_claims::{ClaimDecision, ClaimStatus};

use crate::dto::claims::{ClaimQuery, ClaimResponse, DecisionRequest};
use crate::error::ApiError;
use crate::handlers::parse_id;
use crate::AppState;

/// Lists claims, optionally in one status
pub async fn list_claims(
    State(state): State<AppState>,
    query: Result<Query<ClaimQuery>, QueryRejection>,
) -> Result<Json<Vec<ClaimResponse>>, ApiError> {
    let Query(query) = query?;
    let status = query
        .status
        .as_deref()
        .map(str::parse::<ClaimStatus>)
        .transpose()
        .map_err(ServiceError::from)?;

    let claims = state.clinic.list_claims(status).await?;
    Ok(Json(claims.iter().cloned().map(Into::into).collect()))
}

pub async fn get_claim(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let claim = state.clinic.get_claim(parse_id(&id)?).await?;
    Ok(Json(claim.into()))
}

pub async fn submit_claim(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let claim = state.clinic.submit_claim(parse_id(&id)?).await?;

    info!(claim_id = %claim.id, "Claim submitted via API");
    Ok(Json(claim.into()))
}

/// Approves or rejects a submitted claim
pub async fn decide_claim(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<DecisionRequest>, JsonRejection>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let id = parse_id(&id)?;
    let Json(req) = payload?;
    let decision: ClaimDecision = req.decision.parse().map_err(ServiceError::from)?;

    let claim = state.clinic.decide_claim(id, decision, req.reason).await?;

    info!(claim_id = %claim.id, status = %claim.status, "Claim decided via API");
    Ok(Json(claim.into()))
}
