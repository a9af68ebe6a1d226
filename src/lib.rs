// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! zonecar - BIND zone file import/export for PowerDNS-style record stores
//!
//! A lightweight library that converts between BIND-format zone files and the
//! flat record rows (`name`, `type`, `content`, `ttl`, `prio`) a PowerDNS-style
//! record store holds, plus an HTTP sidecar exposing it.
//!
//! # Features
//!
//! - Lenient zone file parsing with per-line warnings
//! - `$ORIGIN`/`$TTL` handling, multi-line records and compound TTLs (`1w2d`)
//! - Origin inference for files without `$ORIGIN`
//! - Canonical zone file generation grouped by record type
//! - Import planning with skip, replace and add-all conflict strategies
//! - Authentication support (Bearer tokens)
//! - Prometheus metrics integration
//!
//! # Usage
//!
//! This crate can be used as both a library and a standalone binary:
//!
//! ## As a Library
//!
//! ### Parsing a Zone File
//!
//! ```rust
//! use zonecar::{RecordType, ZoneFileParser};
//!
//! let zone = r#"
//! $ORIGIN example.com.
//! $TTL 3600
//! @     IN  NS  ns1.example.com.
//! mail  IN  MX  10 mail.example.com.
//! $GENERATE 1-10 host$ A 192.0.2.$
//! "#;
//!
//! let parsed = ZoneFileParser::new(300).parse(zone);
//!
//! assert_eq!(parsed.origin.as_deref(), Some("example.com"));
//! assert_eq!(parsed.records[1].record_type, RecordType::Mx);
//! assert_eq!(parsed.records[1].priority, 10);
//! assert_eq!(parsed.records[1].content, "mail.example.com");
//! assert_eq!(parsed.warnings.len(), 1);
//! ```
//!
//! ### Generating a Zone File
//!
//! ```rust
//! use zonecar::{RecordType, ZoneFileGenerator, ZoneRecord};
//!
//! let records = vec![
//!     ZoneRecord {
//!         name: "example.com".to_string(),
//!         record_type: RecordType::Mx,
//!         content: "mail.example.com".to_string(),
//!         ttl: None,
//!         prio: Some(10),
//!     },
//! ];
//!
//! let zone_file = ZoneFileGenerator::new(3600).generate("example.com", &records);
//! assert!(zone_file.contains("example.com.\t3600\tIN\tMX\t10 mail.example.com."));
//! ```
//!
//! ### Planning an Import
//!
//! ```rust
//! use zonecar::{plan_import, ConflictStrategy, ZoneFileParser};
//!
//! let parsed = ZoneFileParser::default().parse("www.example.com. 300 IN A 192.0.2.1");
//! let plan = plan_import(&parsed.records, &[], ConflictStrategy::Skip);
//! assert_eq!(plan.added_count(), 1);
//! ```
//!
//! ## As a Binary
//!
//! ```bash
//! cargo install zonecar
//! zonecar
//! ```

// Re-export public modules
pub mod auth;
pub mod config;
pub mod import;
pub mod metrics;
pub mod middleware;
pub mod types;
pub mod zone_generator;
pub mod zone_parser;
pub mod zone_types;
pub mod zones;

// Re-export commonly used types

// Parser and generator
pub use zone_generator::ZoneFileGenerator;
pub use zone_parser::{infer_origin, parse_ttl, ZoneFileParser};

// Zone data types
pub use zone_types::{ParsedRecord, ParsedZone, RecordType, ZoneRecord};

// Import planning
pub use import::{plan_import, ConflictStrategy, ImportPlan, RrsetKey};

// Error types
pub use types::{ApiError, AppState, ErrorResponse};

// Request/Response types for API operations
pub use zones::{ExportZoneRequest, ImportZoneRequest, ImportZoneResponse, ParseZoneResponse};

// Test modules
#[cfg(test)]
mod auth_test;
#[cfg(test)]
mod metrics_test;
#[cfg(test)]
mod types_test;
