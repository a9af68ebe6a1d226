// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for types module

use super::types::*;
use crate::config::ServerConfig;
use axum::http::StatusCode;
use axum::response::IntoResponse;

#[test]
fn test_app_state_clone() {
    let state = AppState::from_config(ServerConfig {
        auto_ttl_value: 600,
        default_ttl: 7200,
        ..Default::default()
    });

    let cloned = state.clone();
    assert_eq!(cloned.parser.auto_ttl_value(), Some(600));
    assert_eq!(cloned.generator.default_ttl(), 7200);
    assert_eq!(cloned.config.default_ttl, 7200);
}

#[test]
fn test_app_state_without_auto_ttl() {
    let state = AppState::from_config(ServerConfig {
        auto_ttl_enabled: false,
        ..Default::default()
    });
    assert_eq!(state.parser.auto_ttl_value(), None);
}

#[test]
fn test_error_response_serialization() {
    let response = ErrorResponse {
        error: "Test error".to_string(),
        details: Some("Details here".to_string()),
    };

    let json = serde_json::to_string(&response).unwrap();
    assert!(json.contains("Test error"));
    assert!(json.contains("Details here"));
}

#[test]
fn test_error_response_without_details() {
    let response = ErrorResponse {
        error: "Test error".to_string(),
        details: None,
    };

    let json = serde_json::to_string(&response).unwrap();
    assert!(json.contains("Test error"));
    assert!(json.contains("null")); // None is serialized as null
}

#[test]
fn test_api_error_invalid_request() {
    let error = ApiError::InvalidRequest("Zone content is empty".to_string());
    assert_eq!(error.to_string(), "Invalid request: Zone content is empty");

    let response = error.into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[test]
fn test_api_error_payload_too_large() {
    let error = ApiError::PayloadTooLarge("2048 bytes exceeds limit of 1024".to_string());
    assert_eq!(
        error.to_string(),
        "Zone file too large: 2048 bytes exceeds limit of 1024"
    );

    let response = error.into_response();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[test]
fn test_api_error_no_records() {
    let error = ApiError::NoRecords {
        warnings: vec!["Line 1: Could not parse record, skipped".to_string()],
    };
    assert_eq!(error.to_string(), "No valid records found");

    let response = error.into_response();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[test]
fn test_api_error_internal_error() {
    let error = ApiError::InternalError("metrics registry unavailable".to_string());
    assert_eq!(
        error.to_string(),
        "Internal server error: metrics registry unavailable"
    );

    let response = error.into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn test_api_error_display() {
    let errors = vec![
        ApiError::InvalidRequest("invalid".to_string()),
        ApiError::PayloadTooLarge("too large".to_string()),
        ApiError::NoRecords { warnings: vec![] },
        ApiError::InternalError("internal".to_string()),
    ];

    for error in errors {
        // Ensure all errors can be displayed
        let _ = format!("{}", error);
        let _ = format!("{:?}", error);
    }
}
