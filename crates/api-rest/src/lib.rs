//! # API REST
//!
//! REST API implementation for Patientor.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON bodies, status codes, CORS)
//!
//! Payloads are taken as untyped JSON and handed to `patientor-core`, which owns all validation.
//! Uses `api-shared` for the response shapes.

#![warn(rust_2018_idioms)]

mod convert;

use api_shared::wire;
use api_shared::HealthService;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use patientor_core::{PatientStore, StoreError};
use serde_json::Value;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Prefix of every client-error message.
pub const ERROR_PREFIX: &str = "Something went wrong. Error: ";

type ApiError = (StatusCode, String);

/// Application state shared across REST API handlers.
#[derive(Clone)]
pub struct AppState {
    store: PatientStore,
}

impl AppState {
    pub fn new(store: PatientStore) -> Self {
        Self { store }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        ping,
        list_diagnoses,
        list_patients,
        get_patient,
        create_patient,
        create_entry,
    ),
    components(schemas(
        wire::HealthRes,
        wire::DiagnosisRes,
        wire::DischargeRes,
        wire::SickLeaveRes,
        wire::EntryRes,
        wire::PatientSummaryRes,
        wire::PatientRes,
        wire::NewPatientReq,
        wire::NewEntryReq,
    ))
)]
pub struct ApiDoc;

/// Build the REST router over `store`, including Swagger UI and permissive CORS.
pub fn router(store: PatientStore) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ping", get(ping))
        .route("/api/diagnoses", get(list_diagnoses))
        .route("/api/patients", get(list_patients).post(create_patient))
        .route("/api/patients/:id", get(get_patient))
        .route("/api/patients/:id/entries", post(create_entry))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(AppState::new(store))
}

fn client_error(message: impl std::fmt::Display) -> ApiError {
    (StatusCode::BAD_REQUEST, format!("{ERROR_PREFIX}{message}"))
}

fn store_error(err: StoreError) -> ApiError {
    match err {
        StoreError::Parse(e) => {
            tracing::warn!("Rejected submission: {}", e);
            client_error(e)
        }
        StoreError::PatientNotFound(id) => {
            tracing::warn!("Entry submitted for unknown patient {}", id);
            (
                StatusCode::NOT_FOUND,
                format!("{ERROR_PREFIX}patient not found: {id}"),
            )
        }
        StoreError::Poisoned => {
            tracing::error!("Patient store lock poisoned");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".into())
        }
    }
}

/// Unwrap a JSON body, turning malformed JSON into the usual client error.
fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, ApiError> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            tracing::warn!("Rejected request body: {}", rejection.body_text());
            Err(client_error(rejection.body_text()))
        }
    }
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = wire::HealthRes)
    )
)]
/// Health check endpoint for monitoring and load balancers.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<wire::HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/ping",
    responses((status = 200, description = "Liveness probe", body = String))
)]
async fn ping() -> &'static str {
    tracing::debug!("ping");
    "pong"
}

#[utoipa::path(
    get,
    path = "/api/diagnoses",
    responses(
        (status = 200, description = "Reference diagnoses", body = [wire::DiagnosisRes])
    )
)]
/// List the diagnosis reference dataset.
#[axum::debug_handler]
async fn list_diagnoses(State(state): State<AppState>) -> Json<Vec<wire::DiagnosisRes>> {
    Json(
        state
            .store
            .diagnoses()
            .iter()
            .map(convert::diagnosis_res)
            .collect(),
    )
}

#[utoipa::path(
    get,
    path = "/api/patients",
    responses(
        (status = 200, description = "List of patients without ssn", body = [wire::PatientSummaryRes]),
        (status = 500, description = "Internal server error")
    )
)]
/// List all patients.
///
/// The sensitive `ssn` is stripped from every record.
#[axum::debug_handler]
async fn list_patients(
    State(state): State<AppState>,
) -> Result<Json<Vec<wire::PatientSummaryRes>>, ApiError> {
    let patients = state.store.list_patients().map_err(store_error)?;
    Ok(Json(patients.iter().map(convert::summary_res).collect()))
}

#[utoipa::path(
    get,
    path = "/api/patients/{id}",
    params(("id" = String, Path, description = "Patient id")),
    responses(
        (status = 200, description = "Full patient record", body = wire::PatientRes),
        (status = 404, description = "No patient with this id"),
        (status = 500, description = "Internal server error")
    )
)]
/// Fetch one patient, including `ssn`.
///
/// A miss is answered with `404` and an empty body; it is not logged as an error.
#[axum::debug_handler]
async fn get_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<wire::PatientRes>, ApiError> {
    match state.store.find_patient(&id).map_err(store_error)? {
        Some(patient) => Ok(Json(convert::patient_res(&patient))),
        None => Err((StatusCode::NOT_FOUND, String::new())),
    }
}

#[utoipa::path(
    post,
    path = "/api/patients",
    request_body = wire::NewPatientReq,
    responses(
        (status = 200, description = "Patient created (ssn omitted)", body = wire::PatientSummaryRes),
        (status = 400, description = "Invalid submission"),
        (status = 500, description = "Internal server error")
    )
)]
/// Create a new patient.
///
/// The body is validated by the core patient parser. On success the stored record is returned
/// without `ssn`.
///
/// # Errors
/// Returns `400 Bad Request` with `Something went wrong. Error: <reason>` if the body is not JSON
/// or fails validation.
#[axum::debug_handler]
async fn create_patient(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<wire::PatientSummaryRes>, ApiError> {
    let input = json_body(body)?;
    let patient = state.store.create_patient(&input).map_err(store_error)?;
    Ok(Json(convert::summary_res(&patient.summary())))
}

#[utoipa::path(
    post,
    path = "/api/patients/{id}/entries",
    params(("id" = String, Path, description = "Patient id")),
    request_body = wire::NewEntryReq,
    responses(
        (status = 200, description = "Entry created", body = wire::EntryRes),
        (status = 400, description = "Invalid submission"),
        (status = 404, description = "No patient with this id"),
        (status = 500, description = "Internal server error")
    )
)]
/// Add a medical entry to a patient.
///
/// # Errors
/// - `400 Bad Request` if the body is not JSON or fails entry validation.
/// - `404 Not Found` if the body is valid but no patient has this id.
#[axum::debug_handler]
async fn create_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<wire::EntryRes>, ApiError> {
    let input = json_body(body)?;
    let entry = state.store.create_entry(&id, &input).map_err(store_error)?;
    Ok(Json(convert::entry_res(&entry)))
}
