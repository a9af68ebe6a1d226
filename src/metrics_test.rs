// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for metrics module

use super::metrics::*;
use crate::zone_parser::ZoneFileParser;

#[test]
fn test_init_metrics() {
    init_metrics();
    // Verify app info metric was set
    let metrics = gather_metrics().unwrap();
    assert!(metrics.contains("zonecar_app_info"));
    assert!(metrics.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_gather_metrics() {
    // Record at least one metric so gather_metrics returns something
    init_metrics();
    let result = gather_metrics();
    assert!(result.is_ok());

    let metrics = result.unwrap();
    // Metrics should be a non-empty string
    assert!(!metrics.is_empty());
}

#[test]
fn test_record_http_request() {
    record_http_request("POST", "/api/v1/zonefile/parse", 200, 0.123);
    record_http_request("POST", "/api/v1/zones/{name}/export", 200, 0.456);
    record_http_request("POST", "/api/v1/zones/{name}/import", 422, 1.234);

    let metrics = gather_metrics().unwrap();
    assert!(metrics.contains("zonecar_http_requests_total"));
    assert!(metrics.contains("zonecar_http_request_duration_seconds"));
}

#[test]
fn test_record_zone_operation_success() {
    record_zone_operation("parse", true);
    record_zone_operation("import", true);
    record_zone_operation("export", true);

    let metrics = gather_metrics().unwrap();
    assert!(metrics.contains("zonecar_zone_operations_total"));
    assert!(metrics.contains("success"));
}

#[test]
fn test_record_zone_operation_failure() {
    record_zone_operation("parse", false);
    record_zone_operation("import", false);

    let metrics = gather_metrics().unwrap();
    assert!(metrics.contains("zonecar_zone_operations_total"));
    assert!(metrics.contains("error"));
}

#[test]
fn test_record_parse() {
    let content = "$ORIGIN example.com.\nwww IN A 192.0.2.1\n@ IN MX 10 mail\n$INCLUDE other.zone\n";
    let zone = ZoneFileParser::default().parse(content);
    record_parse(&zone, content.len());

    let metrics = gather_metrics().unwrap();
    assert!(metrics.contains("zonecar_records_parsed_total"));
    assert!(metrics.contains("type=\"MX\""));
    assert!(metrics.contains("zonecar_parse_warnings_total"));
    assert!(metrics.contains("zonecar_zone_file_size_bytes"));
}

#[test]
fn test_all_metrics_registered() {
    // Trigger all metrics at least once
    init_metrics();
    record_http_request("GET", "/test", 200, 0.1);
    record_zone_operation("test", true);
    record_parse(&ZoneFileParser::default().parse("a.example.com. IN A 192.0.2.1"), 29);

    let metrics = gather_metrics().unwrap();

    // Verify all metric families are present
    assert!(metrics.contains("zonecar_http_requests_total"));
    assert!(metrics.contains("zonecar_http_request_duration_seconds"));
    assert!(metrics.contains("zonecar_zone_operations_total"));
    assert!(metrics.contains("zonecar_records_parsed_total"));
    assert!(metrics.contains("zonecar_parse_warnings_total"));
    assert!(metrics.contains("zonecar_zone_file_size_bytes"));
    assert!(metrics.contains("zonecar_app_info"));
}
