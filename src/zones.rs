// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Zone file API handlers
//!
//! This module implements HTTP handlers for zone file operations:
//! - Parsing a zone file into records
//! - Planning an import of a zone file into an existing record set
//! - Exporting stored records as a downloadable zone file

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::{
    import::{plan_import, ConflictStrategy, ImportPlan},
    metrics,
    types::{ApiError, AppState, ErrorResponse},
    zone_generator::ZoneFileGenerator,
    zone_types::{ParsedRecord, ParsedZone, RecordType, ZoneRecord},
};

/// Response from parsing a zone file
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParseZoneResponse {
    /// Zone origin without trailing dot, if declared or inferable
    pub origin: Option<String>,

    /// Default TTL in effect at the end of the file
    pub default_ttl: u32,

    /// Number of parsed records
    pub record_count: usize,

    /// Parsed records in source order
    pub records: Vec<ParsedRecord>,

    /// Non-fatal problems found while parsing
    pub warnings: Vec<String>,
}

impl From<ParsedZone> for ParseZoneResponse {
    fn from(zone: ParsedZone) -> Self {
        Self {
            origin: zone.origin,
            default_ttl: zone.default_ttl,
            record_count: zone.records.len(),
            records: zone.records,
            warnings: zone.warnings,
        }
    }
}

/// Request to plan an import of a zone file
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportZoneRequest {
    /// Zone file content in BIND format
    pub content: String,

    /// Records the zone currently holds (empty for a new zone)
    #[serde(default)]
    pub existing_records: Vec<ZoneRecord>,

    /// Conflict handling for records that already exist (default: skip)
    #[serde(default)]
    pub conflict_strategy: ConflictStrategy,

    /// Return the file's SOA record alongside the plan
    #[serde(default)]
    pub keep_soa: bool,
}

/// Response from planning an import
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportZoneResponse {
    /// Target zone name
    pub zone: String,

    /// Origin declared in or inferred from the file
    pub origin: Option<String>,

    /// Default TTL of the file
    pub default_ttl: u32,

    /// Number of records parsed from the file, SOA included
    pub record_count: usize,

    /// Strategy the plan was built with
    pub conflict_strategy: ConflictStrategy,

    /// What to add, skip and replace
    pub plan: ImportPlan,

    /// The file's SOA record, when requested with `keepSoa`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soa: Option<ParsedRecord>,

    /// Parser warnings plus import warnings
    pub warnings: Vec<String>,
}

/// Request to export records as a zone file
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExportZoneRequest {
    /// Records to export
    #[serde(default)]
    pub records: Vec<ZoneRecord>,

    /// `$TTL` for the exported file (uses server default if not specified)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_ttl: Option<u32>,
}

/// Validate a zone name from the request path
///
/// Returns the name in its ASCII (punycode) form, lowercased and without
/// trailing dot.
pub fn validate_zone_name(name: &str) -> Result<String, ApiError> {
    let zone = name.trim_end_matches('.');

    if zone.is_empty() {
        return Err(ApiError::InvalidRequest(
            "Zone name cannot be empty".to_string(),
        ));
    }

    if zone.chars().any(|c| {
        c == '/' || c == '\\' || c == '"' || c.is_whitespace() || c.is_control()
    }) {
        return Err(ApiError::InvalidRequest(format!(
            "Invalid zone name: {}",
            name
        )));
    }

    idna::domain_to_ascii(zone)
        .map_err(|_| ApiError::InvalidRequest(format!("Invalid zone name: {}", name)))
}

/// ASCII form of a zone file origin, for comparison with a validated zone name
fn origin_to_ascii(origin: &str) -> String {
    idna::domain_to_ascii(origin).unwrap_or_else(|_| origin.to_ascii_lowercase())
}

/// Reject records whose name or content would spill onto another zone file line
pub fn validate_export_records(records: &[ZoneRecord]) -> Result<(), ApiError> {
    match records
        .iter()
        .position(|r| r.name.chars().chain(r.content.chars()).any(char::is_control))
    {
        Some(index) => Err(ApiError::InvalidRequest(format!(
            "Record {} contains control characters",
            index
        ))),
        None => Ok(()),
    }
}

/// Validate uploaded zone file content against the configured size limit
pub fn validate_zone_content(content: &str, max_size: usize) -> Result<(), ApiError> {
    if content.len() > max_size {
        return Err(ApiError::PayloadTooLarge(format!(
            "{} bytes exceeds the maximum of {} bytes",
            content.len(),
            max_size
        )));
    }

    if content.trim().is_empty() {
        return Err(ApiError::InvalidRequest(
            "Zone file content is empty".to_string(),
        ));
    }

    Ok(())
}

/// Parse a zone file
///
/// Accepts raw BIND zone file text and returns the records found in it.
/// Lines that cannot be parsed are reported as warnings.
#[utoipa::path(
    post,
    path = "/api/v1/zonefile/parse",
    request_body(content = String, description = "BIND zone file", content_type = "text/plain"),
    responses(
        (status = 200, description = "Zone file parsed", body = ParseZoneResponse),
        (status = 400, description = "Empty zone file", body = ErrorResponse),
        (status = 413, description = "Zone file too large", body = ErrorResponse),
        (status = 422, description = "No valid records found", body = ErrorResponse)
    ),
    tag = "zonefile"
)]
pub async fn parse_zone_file(
    State(state): State<AppState>,
    content: String,
) -> Result<Json<ParseZoneResponse>, ApiError> {
    info!("Parsing zone file: {} bytes", content.len());

    if let Err(e) = validate_zone_content(&content, state.config.max_zone_file_size) {
        warn!("Rejected zone file: {}", e);
        metrics::record_zone_operation("parse", false);
        return Err(e);
    }

    let zone = state.parser.parse(&content);
    metrics::record_parse(&zone, content.len());

    if zone.record_count() == 0 {
        warn!(
            "Zone file contained no valid records ({} warnings)",
            zone.warnings.len()
        );
        metrics::record_zone_operation("parse", false);
        return Err(ApiError::NoRecords {
            warnings: zone.warnings,
        });
    }

    info!(
        "Parsed zone file: {} records, {} warnings",
        zone.record_count(),
        zone.warnings.len()
    );
    metrics::record_zone_operation("parse", true);

    Ok(Json(ParseZoneResponse::from(zone)))
}

/// Plan an import of a zone file into a zone
///
/// Parses the zone file and compares it with the records the zone already
/// holds. The plan lists the records to add, the records skipped as
/// duplicates and the RRsets to delete first. SOA records are never
/// imported.
#[utoipa::path(
    post,
    path = "/api/v1/zones/{name}/import",
    params(
        ("name" = String, Path, description = "Zone name to import into")
    ),
    request_body = ImportZoneRequest,
    responses(
        (status = 200, description = "Import planned", body = ImportZoneResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 413, description = "Zone file too large", body = ErrorResponse),
        (status = 422, description = "No valid records found", body = ErrorResponse)
    ),
    tag = "zones"
)]
pub async fn import_zone(
    State(state): State<AppState>,
    Path(zone_name): Path<String>,
    Json(request): Json<ImportZoneRequest>,
) -> Result<Json<ImportZoneResponse>, ApiError> {
    info!(
        "Planning import into zone {} (strategy: {})",
        zone_name,
        request.conflict_strategy.as_str()
    );

    let zone = validate_zone_name(&zone_name).map_err(|e| {
        metrics::record_zone_operation("import", false);
        e
    })?;

    if let Err(e) = validate_zone_content(&request.content, state.config.max_zone_file_size) {
        warn!("Rejected zone file for {}: {}", zone, e);
        metrics::record_zone_operation("import", false);
        return Err(e);
    }

    let parsed = state.parser.parse(&request.content);
    metrics::record_parse(&parsed, request.content.len());

    if parsed.record_count() == 0 {
        warn!("Zone file for {} contained no valid records", zone);
        metrics::record_zone_operation("import", false);
        return Err(ApiError::NoRecords {
            warnings: parsed.warnings,
        });
    }

    let mut warnings = parsed.warnings.clone();
    if let Some(origin) = parsed.origin.as_deref() {
        if origin_to_ascii(origin) != zone {
            warn!("Zone file origin {} does not match zone {}", origin, zone);
            warnings.push(format!(
                "Zone file origin \"{}\" does not match zone \"{}\"",
                origin, zone
            ));
        }
    }

    let plan = plan_import(
        &parsed.records,
        &request.existing_records,
        request.conflict_strategy,
    );

    let soa = if request.keep_soa {
        parsed
            .records
            .iter()
            .find(|r| r.record_type == RecordType::Soa)
            .cloned()
    } else {
        None
    };

    info!(
        "Import plan for {}: {} to add, {} skipped, {} rrsets replaced",
        zone,
        plan.added_count(),
        plan.skipped_count(),
        plan.replaced_rrsets.len()
    );
    metrics::record_zone_operation("import", true);

    Ok(Json(ImportZoneResponse {
        zone,
        origin: parsed.origin,
        default_ttl: parsed.default_ttl,
        record_count: parsed.records.len(),
        conflict_strategy: request.conflict_strategy,
        plan,
        soa,
        warnings,
    }))
}

/// Export records as a zone file
///
/// Returns a BIND zone file as a `text/plain` attachment named `<zone>.zone`.
#[utoipa::path(
    post,
    path = "/api/v1/zones/{name}/export",
    params(
        ("name" = String, Path, description = "Zone name to export")
    ),
    request_body = ExportZoneRequest,
    responses(
        (status = 200, description = "Zone file", body = String, content_type = "text/plain"),
        (status = 400, description = "Invalid request", body = ErrorResponse)
    ),
    tag = "zones"
)]
pub async fn export_zone(
    State(state): State<AppState>,
    Path(zone_name): Path<String>,
    Json(request): Json<ExportZoneRequest>,
) -> Result<Response, ApiError> {
    info!(
        "Exporting zone {}: {} records",
        zone_name,
        request.records.len()
    );

    let zone = validate_zone_name(&zone_name)
        .and_then(|zone| validate_export_records(&request.records).map(|_| zone))
        .map_err(|e| {
            warn!("Rejected export of zone {}: {}", zone_name, e);
            metrics::record_zone_operation("export", false);
            e
        })?;

    let generator = match request.default_ttl {
        Some(ttl) => ZoneFileGenerator::new(ttl),
        None => *state.generator,
    };
    let zone_file = generator.generate(&zone, &request.records);

    info!("Exported zone {}: {} bytes", zone, zone_file.len());
    metrics::record_zone_operation("export", true);

    let disposition = format!("attachment; filename=\"{}.zone\"", zone);
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        zone_file,
    )
        .into_response())
}
