// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Common types and errors used throughout the zonecar library

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::{config::ServerConfig, zone_generator::ZoneFileGenerator, zone_parser::ZoneFileParser};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Zone file parser
    pub parser: Arc<ZoneFileParser>,
    /// Zone file generator
    pub generator: Arc<ZoneFileGenerator>,
    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Build the state described by `config`
    pub fn from_config(config: ServerConfig) -> Self {
        Self {
            parser: Arc::new(config.parser()),
            generator: Arc::new(config.generator()),
            config: Arc::new(config),
        }
    }
}

/// Error response
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub details: Option<String>,
}

/// API error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Zone file too large: {0}")]
    PayloadTooLarge(String),

    #[error("No valid records found")]
    NoRecords {
        /// Warnings produced while parsing
        warnings: Vec<String>,
    },

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, details) = match &self {
            ApiError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, None),
            ApiError::PayloadTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, None),
            ApiError::NoRecords { warnings } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                (!warnings.is_empty()).then(|| warnings.join("; ")),
            ),
            ApiError::InternalError(_) => (StatusCode::INTERNAL_SERVER_ERROR, None),
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
            details,
        });

        (status, body).into_response()
    }
}
