//! REST API tests driven through the router with `tower::ServiceExt::oneshot`.

#![cfg(feature = "http-server")]

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use chrono::NaiveDate;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use airq::db::{LocalRepository, SensorDataRepository};
use airq::http::{create_router, AppState};
use airq::models::{Concentrations, Reading, SensorLocation};

fn d(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, day).unwrap()
}

fn repository() -> LocalRepository {
    LocalRepository::with_data(
        vec![
            SensorLocation::new("a", 43.25, 76.92),
            SensorLocation::new("b", 43.21, 76.85),
        ],
        vec![
            Reading::new(d(15), "a", Concentrations::new(45.0, 0.0, 0.0, 0.0)),
            Reading::new(d(15), "b", Concentrations::new(0.0, 0.0, 40.0, 10.0)),
            Reading::new(d(16), "b", Concentrations::new(0.0, 0.0, 48.0, 10.0)),
        ],
    )
}

fn app(repo: &LocalRepository) -> Router {
    let repo: Arc<dyn SensorDataRepository> = Arc::new(repo.clone());
    create_router(AppState::new(repo))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn create_session(app: &Router, date: &str) -> String {
    let (status, body) = send(app, Method::POST, "/v1/sessions", Some(json!({ "date": date }))).await;
    assert_eq!(status, StatusCode::CREATED);
    body["session"]["session_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health() {
    let app = app(&repository());
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["repository"], "connected");
    assert_eq!(body["sessions"], 0);
}

#[tokio::test]
async fn test_standards() {
    let app = app(&repository());
    let (status, body) = send(&app, Method::GET, "/v1/standards", None).await;
    assert_eq!(status, StatusCode::OK);
    let entries = body["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 4);
    assert_eq!(entries[0]["pollutant"], "so2");
    assert_eq!(entries[0]["threshold"], 20.0);
    assert_eq!(entries[2]["name"], "NO₂");
}

#[tokio::test]
async fn test_stateless_observations() {
    let app = app(&repository());
    let (status, body) = send(&app, Method::GET, "/v1/observations?date=2025-01-15", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["date"], "2025-01-15");
    assert_eq!(body["total"], 2);
    assert_eq!(body["observations"][0]["sensor_id"], "a");
    assert_eq!(body["observations"][0]["marker_color"], "red");
    assert_eq!(body["observations"][1]["severity"], "moderate");
    assert_eq!(body["observations"][1]["composite_score"], 7.0);
}

#[tokio::test]
async fn test_observations_bad_date() {
    let app = app(&repository());
    let (status, body) = send(&app, Method::GET, "/v1/observations?date=15/01/2025", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_session_lifecycle() {
    let app = app(&repository());
    let id = create_session(&app, "2025-01-15").await;

    let (status, body) = send(&app, Method::GET, &format!("/v1/sessions/{}/observations", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/v1/sessions/{}/query", id),
        Some(json!({ "lat": 43.211, "lon": 76.851 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["observation"]["sensor_id"], "b");
    assert_eq!(body["summary"], "Slightly above normal");
    assert_eq!(body["assessment"]["total"]["label"], "Slightly above normal");
    let statuses: Vec<&str> = body["assessment"]["pollutants"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["status"].as_str().unwrap())
        .collect();
    assert_eq!(
        statuses,
        vec![
            "Below normal",
            "Below normal",
            "Slightly above normal",
            "Slightly above normal"
        ]
    );

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/v1/sessions/{}/date", id),
        Some(json!({ "date": "2025-01-16" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"]["status"], "applied");
    assert_eq!(body["outcome"]["selection"], "refreshed");
    assert_eq!(body["session"]["selected"], "b");

    let (_, body) = send(&app, Method::GET, &format!("/v1/sessions/{}/selection", id), None).await;
    assert_eq!(body["observation"]["concentrations"]["no2"], 48.0);
    assert_eq!(body["observation"]["marker_color"], "red");

    let (status, _) = send(&app, Method::DELETE, &format!("/v1/sessions/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, Method::GET, &format!("/v1/sessions/{}/selection", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_selection_cleared_on_date_without_sensor() {
    let app = app(&repository());
    let id = create_session(&app, "2025-01-15").await;

    send(
        &app,
        Method::POST,
        &format!("/v1/sessions/{}/query", id),
        Some(json!({ "lat": 43.25, "lon": 76.92 })),
    )
    .await;

    let (_, body) = send(
        &app,
        Method::PUT,
        &format!("/v1/sessions/{}/date", id),
        Some(json!({ "date": "2025-01-16" })),
    )
    .await;
    assert_eq!(body["outcome"]["selection"], "cleared");
    assert_eq!(body["session"]["observations"], 1);

    let (status, body) = send(&app, Method::GET, &format!("/v1/sessions/{}/selection", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_null());
}

#[tokio::test]
async fn test_no_data_date_and_empty_query() {
    let app = app(&repository());
    let (status, body) = send(&app, Method::POST, "/v1/sessions", Some(json!({ "date": "2025-02-01" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["outcome"]["status"], "no_data_for_date");
    let id = body["session"]["session_id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/v1/sessions/{}/query", id),
        Some(json!({ "lat": 43.2, "lon": 76.9 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_null());
}

#[tokio::test]
async fn test_fetch_failure_keeps_observations() {
    let repo = repository();
    let app = app(&repo);
    let id = create_session(&app, "2025-01-15").await;

    repo.set_unavailable(true);
    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/v1/sessions/{}/date", id),
        Some(json!({ "date": "2025-01-16" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "FETCH_FAILED");
    assert_eq!(body["details"], "retryable=true");

    let (_, body) = send(&app, Method::GET, &format!("/v1/sessions/{}/observations", id), None).await;
    assert_eq!(body["date"], "2025-01-15");
    assert_eq!(body["total"], 2);

    let (_, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(body["repository"], "disconnected");
}

#[tokio::test]
async fn test_failed_create_does_not_leak_session() {
    let repo = repository();
    repo.set_unavailable(true);
    let app = app(&repo);

    let (status, _) = send(&app, Method::POST, "/v1/sessions", Some(json!({ "date": "2025-01-15" }))).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);

    let (_, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(body["sessions"], 0);
}

#[tokio::test]
async fn test_invalid_requests() {
    let app = app(&repository());
    let id = create_session(&app, "2025-01-15").await;

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/v1/sessions/{}/query", id),
        Some(json!({ "lat": 123.0, "lon": 76.9 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/v1/sessions/{}/date", id),
        Some(json!({ "date": "not a date" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let unknown = uuid::Uuid::new_v4();
    let (status, _) = send(&app, Method::DELETE, &format!("/v1/sessions/{}", unknown), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_session_without_body_uses_today() {
    let app = app(&repository());
    let (status, body) = send(&app, Method::POST, "/v1/sessions", None).await;
    assert_eq!(status, StatusCode::CREATED);

    let today = chrono::Local::now().date_naive().format("%Y-%m-%d").to_string();
    assert_eq!(body["session"]["target_date"], today);
}
