// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Bearer token authentication middleware
//!
//! Incoming API requests must carry `Authorization: Bearer <token>`. When the
//! server is configured with `API_TOKEN`, the token must match it; otherwise
//! any non-empty token is accepted and verification is left to the service
//! mesh in front of the sidecar.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
    Json,
};
use serde::Serialize;
use subtle::ConstantTimeEq;
use tracing::{debug, warn};

use crate::types::AppState;

/// Error response for authentication failures
#[derive(Serialize)]
pub struct AuthError {
    pub error: String,
}

fn unauthorized(message: &str) -> (StatusCode, Json<AuthError>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(AuthError {
            error: message.to_string(),
        }),
    )
}

/// Authentication middleware
///
/// # Headers
/// - `Authorization: Bearer <token>` - Required
///
/// # Errors
/// Returns 401 Unauthorized if:
/// - No Authorization header is present
/// - Authorization header is malformed
/// - Token is empty, or does not match the configured `API_TOKEN`
pub async fn authenticate(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, (StatusCode, Json<AuthError>)> {
    // Extract Authorization header
    let auth_header = headers
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            warn!("Missing Authorization header");
            unauthorized("Missing Authorization header")
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        warn!("Invalid Authorization header format");
        unauthorized("Invalid Authorization header format. Expected: Bearer <token>")
    })?;

    if token.trim().is_empty() {
        warn!("Empty token in Authorization header");
        return Err(unauthorized("Empty token"));
    }

    if let Some(expected) = state.config.api_token.as_deref() {
        if !bool::from(token.as_bytes().ct_eq(expected.as_bytes())) {
            warn!("Invalid token in Authorization header");
            return Err(unauthorized("Invalid token"));
        }
        debug!("Request authenticated (token matched)");
    } else {
        debug!("Request authenticated (token present)");
    }

    Ok(next.run(request).await)
}
