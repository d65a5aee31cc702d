//! Integration tests for the HTTP API.
//!
//! The router is driven in-process with `tower::ServiceExt::oneshot`.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use lifeguard_signals::api::{cors_layer, router, AppState, SignalSource};
use lifeguard_signals::assistant::OfflineReplyProvider;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const DASHBOARD_ORIGIN: &str = "http://localhost:5173";

fn test_app(seed: Option<u64>) -> Router {
    let state = AppState::new(
        SignalSource::from_seed(seed),
        Arc::new(OfflineReplyProvider::new("Keep an eye on your sleep.")),
    );
    let cors = cors_layer(&[DASHBOARD_ORIGIN.to_string()]).expect("valid origin");
    router(state, cors)
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

fn sorted_keys(value: &Value) -> Vec<String> {
    let mut keys: Vec<String> = value.as_object().unwrap().keys().cloned().collect();
    keys.sort();
    keys
}

#[tokio::test]
async fn liveness_returns_ok() {
    let (status, body) = get_json(test_app(None), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "lifeguard-signals");
}

#[tokio::test]
async fn health_signals_returns_realtime_snapshot() {
    let (status, body) = get_json(test_app(None), "/api/health-signals").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        sorted_keys(&body),
        vec!["activity", "bloodPressure", "heartRate", "riskScore", "sleep"]
    );
    assert_eq!(body["heartRate"].as_array().unwrap().len(), 24);
    assert_eq!(body["activity"].as_array().unwrap().len(), 24);
    assert_eq!(body["bloodPressure"].as_array().unwrap().len(), 12);
    assert_eq!(body["heartRate"][0]["time"], "00:00");
    assert_eq!(body["bloodPressure"][11]["time"], "22:00");
    assert_eq!(body["sleep"]["total"], 9.0);

    let risk = body["riskScore"].as_u64().unwrap();
    assert!(risk <= 100);
}

#[tokio::test]
async fn historical_dashboard_returns_historical_snapshot() {
    let (status, body) = get_json(test_app(None), "/api/historical-dashboard").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        sorted_keys(&body),
        vec![
            "bloodPressure",
            "heartRate",
            "sleep",
            "spo2",
            "steps",
            "stress",
            "timestamp"
        ]
    );
    assert_eq!(body["steps"][0]["day"], "Mon");
    assert_eq!(body["steps"][6]["day"], "Sun");
    assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));

    for point in body["spo2"].as_array().unwrap() {
        let value = point["value"].as_f64().unwrap();
        assert!((93.0..=100.0).contains(&value));
    }
}

#[tokio::test]
async fn seeded_service_is_reproducible() {
    let (_, first) = get_json(test_app(Some(7)), "/api/health-signals").await;
    let (_, second) = get_json(test_app(Some(7)), "/api/health-signals").await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn user_message_returns_ai_reply() {
    let message = json!({
        "id": "1705307400000",
        "type": "user",
        "text": "Why is my risk score elevated?",
        "timestamp": "2024-01-15T08:30:00.000Z"
    });

    let (status, bytes) = post_json(test_app(None), "/lg/user-message", message).await;
    assert_eq!(status, StatusCode::OK);

    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["type"], "ai");
    assert_eq!(body["text"], "Keep an eye on your sleep.");
    assert!(body["id"].as_str().unwrap().parse::<i64>().is_ok());
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn user_message_rejects_empty_text() {
    let message = json!({
        "id": "1",
        "type": "user",
        "text": "   ",
        "timestamp": "2024-01-15T08:30:00Z"
    });

    let (status, bytes) = post_json(test_app(None), "/lg/user-message", message).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "Message text must not be empty");
}

#[tokio::test]
async fn user_message_rejects_malformed_body() {
    let (status, _) = post_json(test_app(None), "/lg/user-message", json!({"text": "hi"})).await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn cors_preflight_allows_dashboard_origin() {
    let response = test_app(None)
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/api/health-signals")
                .header(header::ORIGIN, DASHBOARD_ORIGIN)
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        DASHBOARD_ORIGIN
    );
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_CREDENTIALS],
        "true"
    );
}

#[tokio::test]
async fn pdf_route_is_not_served() {
    let response = test_app(None)
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/lg/generate-pdf")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
