// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for auth module

use super::auth::*;
use crate::{config::ServerConfig, types::AppState};
use axum::{
    body::Body,
    http::{Request, StatusCode},
    middleware,
    routing::get,
    Router,
};
use tower::ServiceExt;

async fn test_handler() -> &'static str {
    "success"
}

fn app_with_token(api_token: Option<&str>) -> Router {
    let state = AppState::from_config(ServerConfig {
        api_token: api_token.map(str::to_string),
        ..Default::default()
    });

    Router::new()
        .route("/test", get(test_handler))
        .layer(middleware::from_fn_with_state(state, authenticate))
}

fn request_with_auth(value: Option<&str>) -> Request<Body> {
    let builder = Request::builder().uri("/test");
    let builder = match value {
        Some(value) => builder.header("authorization", value),
        None => builder,
    };
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_authenticate_with_any_token_when_unconfigured() {
    let response = app_with_token(None)
        .oneshot(request_with_auth(Some("Bearer valid-token")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_authenticate_missing_header() {
    let response = app_with_token(None)
        .oneshot(request_with_auth(None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_authenticate_invalid_format() {
    let response = app_with_token(None)
        .oneshot(request_with_auth(Some("Basic dXNlcjpwYXNz")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_authenticate_empty_token() {
    let response = app_with_token(None)
        .oneshot(request_with_auth(Some("Bearer ")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_authenticate_configured_token_matches() {
    let response = app_with_token(Some("s3cret"))
        .oneshot(request_with_auth(Some("Bearer s3cret")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_authenticate_configured_token_mismatch() {
    let response = app_with_token(Some("s3cret"))
        .oneshot(request_with_auth(Some("Bearer guess")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], "Invalid token");
}

#[tokio::test]
async fn test_authenticate_configured_token_same_length_mismatch() {
    let response = app_with_token(Some("s3cret"))
        .oneshot(request_with_auth(Some("Bearer s3creT")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_authenticate_configured_token_prefix_rejected() {
    let response = app_with_token(Some("s3cret"))
        .oneshot(request_with_auth(Some("Bearer s3cret-and-more")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
