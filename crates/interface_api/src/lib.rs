//! HTTP API Layer
//!
//! REST API for the clinic: patient registration, visit recording,
//! claim derivation and review, monthly reports.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for each resource
//! - **Middleware**: Request ids, tracing, audit logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Domain error kinds mapped onto status codes
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(Arc::new(Clinic::in_memory(catalog)));
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
    middleware as axum_middleware,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use clinic_services::Clinic;

use crate::handlers::{admin, catalog, claims, encounters, health, patients, reports};
use crate::middleware::audit_middleware;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub clinic: Arc<Clinic>,
}

/// Creates the main API router
pub fn create_router(clinic: Arc<Clinic>) -> Router {
    let state = AppState { clinic };

    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let catalog_routes = Router::new()
        .route("/complaints", get(catalog::list_complaints))
        .route("/medications", get(catalog::list_medications));

    let patient_routes = Router::new()
        .route("/", post(patients::register_patient).get(patients::list_patients))
        .route("/:id", get(patients::get_patient))
        .route("/:id/encounters", get(patients::patient_encounters));

    let encounter_routes = Router::new()
        .route("/", post(encounters::create_encounter).get(encounters::list_encounters))
        .route("/:id", get(encounters::get_encounter))
        .route("/:id/medications", post(encounters::add_medications))
        .route("/:id/claim", get(encounters::preview_claim).post(encounters::derive_claim));

    let claims_routes = Router::new()
        .route("/", get(claims::list_claims))
        .route("/:id", get(claims::get_claim))
        .route("/:id/submit", post(claims::submit_claim))
        .route("/:id/decision", post(claims::decide_claim));

    let report_routes = Router::new().route("/monthly/:period", get(reports::monthly_summary));

    let admin_routes = Router::new().route("/reset", post(admin::reset));

    let api_routes = Router::new()
        .nest("/catalog", catalog_routes)
        .nest("/patients", patient_routes)
        .nest("/encounters", encounter_routes)
        .nest("/claims", claims_routes)
        .nest("/reports", report_routes)
        .nest("/admin", admin_routes)
        .layer(axum_middleware::from_fn(audit_middleware));

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}
