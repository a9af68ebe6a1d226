// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Prometheus metrics for zonecar
//!
//! This module provides metrics for monitoring the zone file import/export server:
//! - HTTP request metrics (count, duration, status codes)
//! - Zone operation metrics (parse, import, export)
//! - Parser metrics (records by type, warnings, input size)

use lazy_static::lazy_static;
use prometheus::{
    histogram_opts, opts, register_counter, register_counter_vec, register_histogram,
    register_histogram_vec, Counter, CounterVec, Encoder, Histogram, HistogramVec, TextEncoder,
};

use crate::zone_types::ParsedZone;

lazy_static! {
    /// HTTP request counter by method, path, and status code
    pub static ref HTTP_REQUESTS_TOTAL: CounterVec = register_counter_vec!(
        opts!(
            "zonecar_http_requests_total",
            "Total number of HTTP requests processed"
        ),
        &["method", "path", "status"]
    )
    .expect("Failed to create HTTP_REQUESTS_TOTAL metric");

    /// HTTP request duration histogram
    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "zonecar_http_request_duration_seconds",
        "HTTP request duration in seconds",
        &["method", "path"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .expect("Failed to create HTTP_REQUEST_DURATION_SECONDS metric");

    /// Zone operations counter by operation type and result
    pub static ref ZONE_OPERATIONS_TOTAL: CounterVec = register_counter_vec!(
        opts!(
            "zonecar_zone_operations_total",
            "Total number of zone operations"
        ),
        &["operation", "result"]
    )
    .expect("Failed to create ZONE_OPERATIONS_TOTAL metric");

    /// Parsed records counter by record type
    pub static ref RECORDS_PARSED_TOTAL: CounterVec = register_counter_vec!(
        opts!(
            "zonecar_records_parsed_total",
            "Total number of records parsed from zone files"
        ),
        &["type"]
    )
    .expect("Failed to create RECORDS_PARSED_TOTAL metric");

    /// Parse warnings counter
    pub static ref PARSE_WARNINGS_TOTAL: Counter = register_counter!(
        opts!(
            "zonecar_parse_warnings_total",
            "Total number of warnings produced while parsing zone files"
        )
    )
    .expect("Failed to create PARSE_WARNINGS_TOTAL metric");

    /// Size of parsed zone files
    pub static ref ZONE_FILE_SIZE_BYTES: Histogram = register_histogram!(
        histogram_opts!(
            "zonecar_zone_file_size_bytes",
            "Size of parsed zone files in bytes",
            vec![256.0, 1024.0, 4096.0, 16384.0, 65536.0, 262144.0, 1048576.0, 4194304.0]
        )
    )
    .expect("Failed to create ZONE_FILE_SIZE_BYTES metric");

    /// Application info metric
    pub static ref APP_INFO: CounterVec = register_counter_vec!(
        opts!(
            "zonecar_app_info",
            "Application information"
        ),
        &["version"]
    )
    .expect("Failed to create APP_INFO metric");
}

/// Initialize metrics with application info
pub fn init_metrics() {
    APP_INFO
        .with_label_values(&[env!("CARGO_PKG_VERSION")])
        .inc();
}

/// Generate metrics output in Prometheus format
pub fn gather_metrics() -> Result<String, Box<dyn std::error::Error>> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

/// Record an HTTP request
pub fn record_http_request(method: &str, path: &str, status: u16, duration: f64) {
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, path, &status.to_string()])
        .inc();
    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method, path])
        .observe(duration);
}

/// Record a zone operation
pub fn record_zone_operation(operation: &str, success: bool) {
    let result = if success { "success" } else { "error" };
    ZONE_OPERATIONS_TOTAL
        .with_label_values(&[operation, result])
        .inc();
}

/// Record the outcome of parsing a zone file of `size_bytes`
pub fn record_parse(zone: &ParsedZone, size_bytes: usize) {
    ZONE_FILE_SIZE_BYTES.observe(size_bytes as f64);
    PARSE_WARNINGS_TOTAL.inc_by(zone.warnings.len() as f64);
    for record in &zone.records {
        RECORDS_PARSED_TOTAL
            .with_label_values(&[record.record_type.as_str()])
            .inc();
    }
}
