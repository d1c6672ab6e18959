use std::sync::Arc;

use api_rest::{patients, PatientsState};
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use premium_core::{CoreConfig, PatientService};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::util::ServiceExt;

fn app(temp_dir: &TempDir) -> Router {
    let cfg = CoreConfig::new(
        temp_dir.path().join("patients.json"),
        temp_dir.path().join("model.json"),
    )
    .expect("CoreConfig::new should succeed");
    patients::router(PatientsState::new(PatientService::new(Arc::new(cfg))))
}

fn patient(id: &str, height: f64, weight: f64) -> Value {
    json!({
        "id": id,
        "name": "Ananya Verma",
        "city": "Guwahati",
        "age": 28,
        "gender": "female",
        "height": height,
        "weight": weight
    })
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn with_json(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn without_body(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn informational_endpoints() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let app = app(&temp_dir);

    let (status, body) = send(&app, without_body("GET", "/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Patient Management System API");

    let (_, body) = send(&app, without_body("GET", "/about")).await;
    assert_eq!(
        body["message"],
        "A fully functional API to manage your patients records"
    );
}

#[tokio::test]
async fn view_on_missing_store_is_empty() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let app = app(&temp_dir);

    let (status, body) = send(&app, without_body("GET", "/view")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"patients": {}}));
}

#[tokio::test]
async fn create_then_view_computes_bmi_and_verdict() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let app = app(&temp_dir);

    let (status, body) = send(&app, with_json("POST", "/create", &patient("P001", 1.65, 90.0))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Patient created successfully");

    let (status, body) = send(&app, without_body("GET", "/patients/P001")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["patient"]["id"], "P001");
    assert_eq!(body["patient"]["bmi"], 33.06);
    assert_eq!(body["patient"]["verdict"], "Obese");

    let (_, body) = send(&app, without_body("GET", "/view")).await;
    assert_eq!(body["patients"]["P001"]["name"], "Ananya Verma");
}

#[tokio::test]
async fn create_duplicate_is_rejected() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let app = app(&temp_dir);

    send(&app, with_json("POST", "/create", &patient("P001", 1.65, 90.0))).await;
    let (status, body) = send(&app, with_json("POST", "/create", &patient("P001", 1.8, 70.0))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Patient Already exists");

    let (_, body) = send(&app, without_body("GET", "/patients/P001")).await;
    assert_eq!(body["patient"]["height"], 1.65);
}

#[tokio::test]
async fn create_invalid_patient_is_unprocessable() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let app = app(&temp_dir);

    let (status, body) = send(&app, with_json("POST", "/create", &patient("P001", 0.0, 70.0))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["field"], "height");

    assert!(!temp_dir.path().join("patients.json").exists());
}

#[tokio::test]
async fn view_unknown_patient_is_not_found() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let app = app(&temp_dir);

    let (status, body) = send(&app, without_body("GET", "/patients/P404")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Patient ID not found");
}

#[tokio::test]
async fn edit_recomputes_bmi() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let app = app(&temp_dir);

    send(&app, with_json("POST", "/create", &patient("P001", 1.65, 90.0))).await;
    let (status, body) = send(&app, with_json("PUT", "/edit/P001", &json!({"weight": 55.0}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Patient Info. Updated Successfully");

    let (_, body) = send(&app, without_body("GET", "/patients/P001")).await;
    assert_eq!(body["patient"]["weight"], 55.0);
    assert_eq!(body["patient"]["bmi"], 20.2);
    assert_eq!(body["patient"]["verdict"], "Normal");
    assert_eq!(body["patient"]["name"], "Ananya Verma");
}

#[tokio::test]
async fn edit_and_delete_unknown_patient() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let app = app(&temp_dir);

    let (status, body) = send(&app, with_json("PUT", "/edit/P404", &json!({"age": 30}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Patient ID does not exist");

    let (status, body) = send(&app, without_body("DELETE", "/delete/P404")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Patient ID does not exist");
}

#[tokio::test]
async fn delete_removes_patient() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let app = app(&temp_dir);

    send(&app, with_json("POST", "/create", &patient("P001", 1.65, 90.0))).await;
    let (status, body) = send(&app, without_body("DELETE", "/delete/P001")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Patient Info. Deleted Successfully");

    let (status, _) = send(&app, without_body("GET", "/patients/P001")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn sort_orders_by_field() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let app = app(&temp_dir);

    send(&app, with_json("POST", "/create", &patient("P001", 1.65, 90.0))).await;
    send(&app, with_json("POST", "/create", &patient("P002", 1.80, 60.0))).await;
    send(&app, with_json("POST", "/create", &patient("P003", 1.70, 75.0))).await;

    let (status, body) = send(&app, without_body("GET", "/sort?sort_by=weight")).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["P002", "P003", "P001"]);

    let (_, body) = send(&app, without_body("GET", "/sort?sort_by=height&order=desc")).await;
    assert_eq!(body[0]["id"], "P002");
    assert_eq!(body[2]["id"], "P001");
}

#[tokio::test]
async fn sort_rejects_unknown_field_and_order() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let app = app(&temp_dir);

    let (status, body) = send(&app, without_body("GET", "/sort?sort_by=age")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["detail"],
        "Invalid sort field choose from ['height', 'weight', 'bmi']"
    );

    let (status, body) = send(&app, without_body("GET", "/sort?sort_by=bmi&order=up")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Invalid sort order choose from ['asc', 'desc']");
}

#[tokio::test]
async fn padded_id_round_trips_verbatim() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let app = app(&temp_dir);

    let (status, _) = send(&app, with_json("POST", "/create", &patient("P001 ", 1.65, 90.0))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, without_body("GET", "/patients/P001%20")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["patient"]["id"], "P001 ");

    let (status, _) = send(&app, without_body("GET", "/patients/P001")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, without_body("DELETE", "/delete/P001%20")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn edit_validates_body_before_looking_up_id() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let app = app(&temp_dir);

    let (status, body) = send(&app, with_json("PUT", "/edit/P404", &json!({"age": 150}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["field"], "age");
}
