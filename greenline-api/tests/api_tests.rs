//! Integration tests for greenline-api endpoints
//!
//! Tests cover:
//! - Health endpoint
//! - Emission calculation (defaults, wire field names, persistence)
//! - Tier classification and recommendations
//! - Spreadsheet upload (CSV parsing, unsupported types)

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use greenline_api::{build_router, AppState};
use serde_json::Value;
use sqlx::SqlitePool;
use tower::util::ServiceExt; // for `oneshot` method

/// Test helper: in-memory database with schema applied
async fn setup_test_db() -> SqlitePool {
    let pool = SqlitePool::connect(":memory:")
        .await
        .expect("Should connect to in-memory database");
    greenline_common::db::create_emissions_table(&pool)
        .await
        .expect("Should create schema");
    pool
}

/// Test helper: create app over a fresh database
async fn setup_app() -> (axum::Router, SqlitePool) {
    let pool = setup_test_db().await;
    let state = AppState::new(pool.clone());
    (build_router(state), pool)
}

/// Test helper: JSON POST request
fn json_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Test helper: multipart upload request with one `file` field
fn upload_request(filename: &str, content: &[u8]) -> Request<Body> {
    const BOUNDARY: &str = "greenline-test-boundary";

    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n",
            filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: text/csv\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri("/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Test helper: Extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}

// =============================================================================
// Health Endpoint Tests
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _pool) = setup_app().await;

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "greenline-api");
    assert!(body["version"].is_string());
}

// =============================================================================
// Calculation Tests
// =============================================================================

#[tokio::test]
async fn test_calculate_basic() {
    let (app, _pool) = setup_app().await;

    let request = json_request(
        "/calculate",
        r#"{"diesel_used": 10, "gasoline_used": 5, "natural_gas_used": 2, "kwh_used": 100, "State": "Washington"}"#,
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_close(
        body["scope1"].as_f64().unwrap(),
        10.0 * 10.19 + 5.0 * 8.887 + 2.0 * 1.9,
    );
    assert_close(body["scope2"].as_f64().unwrap(), 100.0 * 0.385 / 0.907185);
}

#[tokio::test]
async fn test_calculate_empty_body_defaults_to_zero() {
    let (app, _pool) = setup_app().await;

    let response = app.oneshot(json_request("/calculate", "{}")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["scope1"].as_f64().unwrap(), 0.0);
    assert_eq!(body["scope2"].as_f64().unwrap(), 0.0);
}

#[tokio::test]
async fn test_calculate_unknown_region_uses_default_factor() {
    let (app, _pool) = setup_app().await;

    let request = json_request("/calculate", r#"{"kwh_used": 1000, "State": "Atlantis"}"#);
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_close(body["scope2"].as_f64().unwrap(), 1000.0 * 0.3 / 0.907185);
}

#[tokio::test]
async fn test_calculate_records_result() {
    let (app, pool) = setup_app().await;

    let request = json_request("/calculate", r#"{"diesel_used": 1, "user_id": 42}"#);
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let records = greenline_common::db::recent_emission_records(&pool, 10)
        .await
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].user_id, Some(42));
    assert_close(records[0].scope1, 10.19);
}

#[tokio::test]
async fn test_calculate_malformed_body() {
    let (app, _pool) = setup_app().await;

    let response = app
        .oneshot(json_request("/calculate", "this is not json"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Tier Classification Tests
// =============================================================================

#[tokio::test]
async fn test_tier_classification() {
    let (app, _pool) = setup_app().await;

    let request = json_request("/tier", r#"{"total_emissions": 60}"#);
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["tier"], "B");
    assert_eq!(body["apr"].as_f64().unwrap(), 6.0);

    let recommendations = body["recommendations"].as_array().unwrap();
    assert_eq!(recommendations.len(), 2);
    assert!(recommendations[0].as_str().unwrap().contains("Tier A+"));
    assert!(recommendations[1].as_str().unwrap().contains("Tier A"));
}

#[tokio::test]
async fn test_tier_top_tier_sentinel() {
    let (app, _pool) = setup_app().await;

    let request = json_request("/tier", r#"{"total_emissions": 0}"#);
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["tier"], "A+");
    assert_eq!(body["apr"].as_f64().unwrap(), 3.5);
    assert_eq!(
        body["recommendations"],
        serde_json::json!(["You're at the highest tier!"])
    );
}

#[tokio::test]
async fn test_tier_ineligible() {
    let (app, _pool) = setup_app().await;

    let request = json_request("/tier", r#"{"total_emissions": 200}"#);
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["tier"], "D");
    assert!(body["apr"].is_null());
    assert_eq!(body["recommendations"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_tier_missing_total_is_client_error() {
    let (app, _pool) = setup_app().await;

    let response = app.oneshot(json_request("/tier", r#"{}"#)).await.unwrap();
    assert!(response.status().is_client_error());
}

// =============================================================================
// Upload Tests
// =============================================================================

#[tokio::test]
async fn test_upload_csv_counts_rows() {
    let (app, _pool) = setup_app().await;

    let csv = b"diesel_used,kwh_used\n10,200\n5,100\n7,50\n";
    let response = app.oneshot(upload_request("activity.csv", csv)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["filename"], "activity.csv");
    assert_eq!(body["rows"], 3);
}

#[tokio::test]
async fn test_upload_unsupported_file_type() {
    let (app, _pool) = setup_app().await;

    let response = app
        .oneshot(upload_request("activity.xlsx", b"not a spreadsheet"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"]["code"], "UNSUPPORTED_FILE_TYPE");
}

#[tokio::test]
async fn test_upload_missing_file_field() {
    let (app, _pool) = setup_app().await;

    const BOUNDARY: &str = "greenline-test-boundary";
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"comment\"\r\n\r\nhello\r\n--{b}--\r\n",
        b = BOUNDARY
    );
    let request = Request::builder()
        .method("POST")
        .uri("/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}
