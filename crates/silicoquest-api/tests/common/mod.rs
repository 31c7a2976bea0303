//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use silicoquest_catalog::application::loader::builtin_catalog;
use silicoquest_core::store::ProgressStore;
use silicoquest_narrative::{ControllerConfig, ProgressionController};
use silicoquest_test_support::{
    FixedClock, RecordingGameHost, RecordingProgressStore, RecordingRenderer,
};
use tower::ServiceExt;

use silicoquest_api::state::AppState;

/// Fixed timestamp used across all integration tests.
fn fixed_clock() -> FixedClock {
    FixedClock(chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap())
}

/// Build the full app router over the built-in catalog with a fresh
/// recording store. Uses the same route structure as `main.rs`.
pub fn build_test_app() -> Router {
    build_test_app_with_store(RecordingProgressStore::new()).0
}

/// Build the full app router over `store` and also return the shared state,
/// so tests can issue several requests against the same controller.
pub fn build_test_app_with_store(store: impl ProgressStore + 'static) -> (Router, AppState) {
    let catalog = Arc::new(builtin_catalog().unwrap());
    let controller = ProgressionController::new(
        Arc::clone(&catalog),
        Arc::new(store),
        Box::new(RecordingGameHost::new()),
        Box::new(RecordingRenderer::new()),
        Arc::new(fixed_clock()),
        ControllerConfig::default(),
    );
    let state = AppState::new(controller, catalog);
    (silicoquest_api::app(state.clone()), state)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    send(app, request).await
}

/// Send a POST request without a body and return the response.
pub async fn post_empty(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}
