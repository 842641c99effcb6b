//! Router-level tests against an unreachable database.
//!
//! The pool is constructed lazily and points at a closed port, so every
//! query fails at execution time. That exercises the failure paths each
//! endpoint promises: JSON failure envelopes for the API, a rendered
//! fallback fragment for the HTML path, and an unhealthy probe.

use std::path::{Path, PathBuf};

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use loppis::app;
use loppis::state::AppState;
use loppis::theme::ThemeEngine;

fn test_state() -> AppState {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .connect_lazy("postgres://loppis@127.0.0.1:9/loppis")
        .unwrap();
    let theme = ThemeEngine::new(Path::new("templates")).unwrap();

    AppState::from_parts(pool, theme, PathBuf::from("static"))
}

async fn get(uri: &str) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let response = app(test_state())
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, headers, body.to_vec())
}

#[tokio::test]
async fn fragment_failure_degrades_to_error_fragment() {
    let (status, headers, body) = get("/html/listings").await;
    let html = String::from_utf8(body).unwrap();

    assert_eq!(status, StatusCode::OK, "fragment path never errors");
    assert!(
        headers[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html")
    );
    assert!(html.contains("Ett fel uppstod"), "localized fallback: {html}");
}

#[tokio::test]
async fn listings_failure_returns_envelope() {
    let (status, _, body) = get("/api/listings").await;
    let value: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(value["success"], false);
    assert_eq!(value["error"], "Failed to fetch listings");
    assert!(value["message"].as_str().is_some_and(|m| !m.is_empty()));
}

#[tokio::test]
async fn categories_failure_returns_envelope() {
    let (status, _, body) = get("/api/categories").await;
    let value: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(value["error"], "Failed to fetch categories");
}

#[tokio::test]
async fn health_reports_unhealthy_when_db_unreachable() {
    let (status, _, body) = get("/api/health").await;
    let value: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(value["status"], "unhealthy");
    assert!(value["timestamp"].as_str().is_some());
}

#[tokio::test]
async fn shell_pages_are_served() {
    let (status, headers, body) = get("/").await;
    let html = String::from_utf8(body).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert!(
        headers[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html")
    );
    assert!(html.contains("<html"));

    let (status, _, _) = get("/listing/42").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn static_path_traversal_is_rejected() {
    let (status, _, _) = get("/static/../Cargo.toml").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
