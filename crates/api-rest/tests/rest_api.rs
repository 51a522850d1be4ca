use api_rest::router;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use patientor_core::{DiagnosisSet, PatientStore};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt; // for `oneshot`

fn app() -> Router {
    let diagnoses = DiagnosisSet::bundled().expect("bundled diagnoses");
    router(PatientStore::new(Arc::new(diagnoses)))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: Response) -> Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

fn ann() -> Value {
    json!({
        "name": "Ann",
        "dateOfBirth": "1980-01-01",
        "ssn": "111-11-111",
        "gender": "female",
        "occupation": "engineer"
    })
}

async fn create_ann(app: &Router) -> String {
    let response = send(app, "POST", "/api/patients", Some(ann())).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["id"]
        .as_str()
        .expect("id is a string")
        .to_string()
}

#[tokio::test]
async fn test_create_patient_hides_ssn() {
    let app = app();

    let response = send(&app, "POST", "/api/patients", Some(ann())).await;
    assert_eq!(response.status(), StatusCode::OK);
    let mut created = body_json(response).await;

    let id = created["id"].as_str().expect("id").to_string();
    assert!(!id.is_empty());
    created.as_object_mut().unwrap().remove("id");
    assert_eq!(
        created,
        json!({
            "name": "Ann",
            "dateOfBirth": "1980-01-01",
            "gender": "female",
            "occupation": "engineer",
            "entries": []
        })
    );
}

#[tokio::test]
async fn test_list_and_fetch_patient() {
    let app = app();
    let id = create_ann(&app).await;

    let response = send(&app, "GET", "/api/patients", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let listed = body_json(response).await;
    let listed = listed.as_array().expect("array of patients");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], json!(id));
    assert!(listed[0].get("ssn").is_none());

    let response = send(&app, "GET", &format!("/api/patients/{id}"), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = body_json(response).await;
    assert_eq!(fetched["ssn"], json!("111-11-111"));
    assert_eq!(fetched["name"], json!("Ann"));
    assert_eq!(fetched["entries"], json!([]));
}

#[tokio::test]
async fn test_fetch_unknown_patient_is_not_found() {
    let response = send(&app(), "GET", "/api/patients/does-not-exist", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.is_empty());
}

#[tokio::test]
async fn test_create_patient_rejects_missing_fields() {
    let app = app();
    let response = send(&app, "POST", "/api/patients", Some(json!({ "name": "Ann" }))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_text(response).await,
        "Something went wrong. Error: Incorrect data: some fields are missing"
    );

    let response = send(&app, "GET", "/api/patients", None).await;
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_create_patient_rejects_malformed_json() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/patients")
        .header("Content-Type", "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response)
        .await
        .starts_with("Something went wrong. Error: "));
}

#[tokio::test]
async fn test_add_entry_and_read_it_back() {
    let app = app();
    let id = create_ann(&app).await;

    let entry = json!({
        "description": "Prescriptions renewed.",
        "date": "2019-09-10",
        "specialist": "MD House",
        "type": "OccupationalHealthcare",
        "employerName": "FBI",
        "sickLeave": { "startDate": "2019-09-10", "endDate": "2019-09-20" },
        "diagnosisCodes": ["Z57.1", "Z74.3"]
    });
    let response = send(&app, "POST", &format!("/api/patients/{id}/entries"), Some(entry)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let created = body_json(response).await;
    assert!(created["id"].as_str().is_some());
    assert_eq!(created["type"], json!("OccupationalHealthcare"));
    assert_eq!(created["employerName"], json!("FBI"));
    assert_eq!(
        created["sickLeave"],
        json!({ "startDate": "2019-09-10", "endDate": "2019-09-20" })
    );
    assert_eq!(created["diagnosisCodes"], json!(["Z57.1", "Z74.3"]));

    let response = send(&app, "GET", &format!("/api/patients/{id}"), None).await;
    let fetched = body_json(response).await;
    assert_eq!(fetched["entries"], json!([created]));
}

#[tokio::test]
async fn test_entry_with_bad_rating_is_rejected() {
    let app = app();
    let id = create_ann(&app).await;

    let entry = json!({
        "description": "d",
        "date": "2020-01-01",
        "specialist": "s",
        "type": "HealthCheck",
        "healthCheckRating": 9
    });
    let response = send(&app, "POST", &format!("/api/patients/{id}/entries"), Some(entry)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await.contains("incorrect health rating"));
}

#[tokio::test]
async fn test_entry_with_unknown_diagnosis_code_is_rejected() {
    let app = app();
    let id = create_ann(&app).await;

    let entry = json!({
        "description": "d",
        "date": "2020-01-01",
        "specialist": "s",
        "type": "HealthCheck",
        "healthCheckRating": 1,
        "diagnosisCodes": ["ZZZ.9"]
    });
    let response = send(&app, "POST", &format!("/api/patients/{id}/entries"), Some(entry)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_text(response).await,
        "Something went wrong. Error: Invalid diagnosis code: ZZZ.9"
    );

    let response = send(&app, "GET", &format!("/api/patients/{id}"), None).await;
    assert_eq!(body_json(response).await["entries"], json!([]));
}

#[tokio::test]
async fn test_entry_with_unsupported_type_is_rejected() {
    let app = app();
    let id = create_ann(&app).await;

    let entry = json!({
        "description": "d",
        "date": "2020-01-01",
        "specialist": "s",
        "type": "Dental"
    });
    let response = send(&app, "POST", &format!("/api/patients/{id}/entries"), Some(entry)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response)
        .await
        .contains("Unsupported type for entries: Dental"));
}

#[tokio::test]
async fn test_malformed_sick_leave_is_dropped() {
    let app = app();
    let id = create_ann(&app).await;

    let entry = json!({
        "description": "d",
        "date": "2020-01-01",
        "specialist": "s",
        "type": "OccupationalHealthcare",
        "employerName": "HyPD",
        "sickLeave": { "startDate": "2020-01-01" }
    });
    let response = send(&app, "POST", &format!("/api/patients/{id}/entries"), Some(entry)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let created = body_json(response).await;
    assert_eq!(created["employerName"], json!("HyPD"));
    assert!(created.get("sickLeave").is_none());
}

#[tokio::test]
async fn test_entry_for_unknown_patient_is_not_found() {
    let entry = json!({
        "description": "d",
        "date": "2020-01-01",
        "specialist": "s",
        "type": "Hospital"
    });
    let response = send(&app(), "POST", "/api/patients/nobody/entries", Some(entry)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("patient not found: nobody"));
}

#[tokio::test]
async fn test_diagnoses_and_probes() {
    let app = app();

    let response = send(&app, "GET", "/api/diagnoses", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let diagnoses = body_json(response).await;
    let diagnoses = diagnoses.as_array().expect("array of diagnoses");
    assert_eq!(diagnoses.len(), 15);
    assert_eq!(diagnoses[0]["code"], json!("M24.2"));

    let response = send(&app, "GET", "/ping", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "pong");

    let response = send(&app, "GET", "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["ok"], json!(true));
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let response = send(&app(), "GET", "/api-docs/openapi.json", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let doc = body_json(response).await;
    assert!(doc["paths"].get("/api/patients/{id}/entries").is_some());
}
