// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! BIND Zone File Import/Export API Server
//!
//! A lightweight HTTP REST API server that converts between BIND zone files
//! and the flat record rows of a PowerDNS-style record store:
//! - Parsing uploaded zone files into records
//! - Planning imports against the records a zone already holds
//! - Exporting records as downloadable zone files
//!
//! The server holds no records itself; the caller owns persistence.

use anyhow::Context;
use axum::{
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    middleware as axum_middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Import from the library
use zonecar::{
    auth::authenticate,
    config::ServerConfig,
    import, metrics, middleware,
    types::{ApiError, AppState, ErrorResponse},
    zone_types, zones,
};

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        zones::parse_zone_file,
        zones::import_zone,
        zones::export_zone,
    ),
    components(
        schemas(
            zones::ParseZoneResponse,
            zones::ImportZoneRequest,
            zones::ImportZoneResponse,
            zones::ExportZoneRequest,
            import::ConflictStrategy,
            import::ImportPlan,
            import::RrsetKey,
            zone_types::RecordType,
            zone_types::ParsedRecord,
            zone_types::ZoneRecord,
            ErrorResponse,
        )
    ),
    tags(
        (name = "zonefile", description = "Zone file parsing endpoints"),
        (name = "zones", description = "Zone import and export endpoints")
    ),
    info(
        title = "Zonecar API",
        version = "0.1.0",
        description = "HTTP REST API for importing and exporting BIND zone files",
        license(name = "MIT")
    )
)]
struct ApiDoc;

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

/// Readiness check response
#[derive(Serialize)]
struct ReadyResponse {
    ready: bool,
    checks: Vec<String>,
}

/// Health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Metrics endpoint for Prometheus scraping
async fn metrics_handler() -> Result<Response, ApiError> {
    let metrics_text = metrics::gather_metrics().map_err(|e| {
        error!("failed to gather metrics: {}", e);
        ApiError::InternalError(format!("Failed to gather metrics: {}", e))
    })?;

    Ok((
        StatusCode::OK,
        [("Content-Type", "text/plain; version=0.0.4")],
        metrics_text,
    )
        .into_response())
}

/// Readiness check endpoint
///
/// Runs a tiny zone file through the configured parser and generator.
async fn ready_check(State(state): State<AppState>) -> Json<ReadyResponse> {
    let mut checks = Vec::new();
    let mut ready = true;

    let sample = state.parser.parse("ready.check. 60 IN A 192.0.2.1");
    if sample.record_count() == 1 {
        checks.push("parser_ready: true".to_string());
    } else {
        ready = false;
        checks.push(format!("parser_error: {:?}", sample.warnings));
    }

    let rows: Vec<zone_types::ZoneRecord> = sample.records.iter().map(Into::into).collect();
    if state.generator.generate("ready.check", &rows).contains("$ORIGIN ready.check.") {
        checks.push("generator_ready: true".to_string());
    } else {
        ready = false;
        checks.push("generator_error: unexpected output".to_string());
    }

    Json(ReadyResponse { ready, checks })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .json()
        .init();

    info!(
        "starting zonecar zone file api server v{}",
        env!("CARGO_PKG_VERSION")
    );

    // initialize metrics
    metrics::init_metrics();

    // get configuration from environment
    let config = ServerConfig::from_env();
    if let Err(e) = config.validate() {
        error!("invalid configuration: {}", e);
        return Err(anyhow::anyhow!("invalid configuration: {}", e));
    }

    info!("api port: {}", config.api_port);
    info!("max zone file size: {} bytes", config.max_zone_file_size);
    info!("default export ttl: {}", config.default_ttl);
    if config.auto_ttl_enabled {
        info!("auto ttl enabled: ttl 1 maps to {}", config.auto_ttl_value);
    } else {
        info!("auto ttl disabled");
    }

    let disable_auth = config.disable_auth;
    if disable_auth {
        warn!("⚠️  authentication is disabled - api endpoints are unprotected!");
        warn!("⚠️  this should only be used in trusted environments (e.g., linkerd service mesh)");
    } else if config.api_token.is_some() {
        info!("authentication is enabled (static api token)");
    } else {
        info!("authentication is enabled (bearer token presence)");
    }

    // JSON requests carry the zone text plus existing records
    let body_limit = config.max_zone_file_size.saturating_mul(4);
    let api_port = config.api_port;

    // create application state
    let state = AppState::from_config(config);

    // build api routes
    let api_routes = Router::new()
        .route("/zonefile/parse", post(zones::parse_zone_file))
        .route("/zones/{name}/import", post(zones::import_zone))
        .route("/zones/{name}/export", post(zones::export_zone))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state.clone());

    // conditionally apply authentication middleware
    let api_routes = if disable_auth {
        api_routes
    } else {
        api_routes.layer(axum_middleware::from_fn_with_state(
            state.clone(),
            authenticate,
        ))
    };

    // build main router
    let app = Router::new()
        .merge(SwaggerUi::new("/api/v1/docs").url("/api/v1/openapi.json", ApiDoc::openapi()))
        .route("/api/v1/health", get(health_check))
        .route("/api/v1/ready", get(ready_check))
        .route("/metrics", get(metrics_handler))
        .nest("/api/v1", api_routes)
        .with_state(state)
        .layer(axum_middleware::from_fn(middleware::track_metrics))
        .layer(TraceLayer::new_for_http());

    // start server
    let addr = format!("0.0.0.0:{}", api_port);

    info!("zonecar api server listening on {}", addr);
    info!("swagger ui available at http://{}/api/v1/docs", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    axum::serve(listener, app.into_make_service())
        .await
        .context("server error")?;

    Ok(())
}
