// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! BIND zone file generator
//!
//! Renders stored record rows as a BIND-format zone file, suitable for
//! download or for loading into a BIND9 server. Output is grouped by record
//! type in a fixed order, with fully qualified owner names and targets.
//!
//! # Examples
//!
//! ```rust
//! use zonecar::zone_generator::ZoneFileGenerator;
//! use zonecar::zone_types::{RecordType, ZoneRecord};
//!
//! let records = vec![ZoneRecord {
//!     name: "www.example.com".to_string(),
//!     record_type: RecordType::A,
//!     content: "192.0.2.1".to_string(),
//!     ttl: Some(300),
//!     prio: None,
//! }];
//!
//! let zone_file = ZoneFileGenerator::new(3600).generate("example.com", &records);
//! assert!(zone_file.contains("$ORIGIN example.com."));
//! assert!(zone_file.contains("www.example.com.\t300\tIN\tA\t192.0.2.1"));
//! ```

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::net::IpAddr;

use crate::zone_parser::DEFAULT_ZONE_TTL;
use crate::zone_types::{RecordType, ZoneRecord};

/// Record types emitted first, in this order; all others follow alphabetically
const TYPE_ORDER: &[RecordType] = &[
    RecordType::Soa,
    RecordType::Ns,
    RecordType::A,
    RecordType::Aaaa,
    RecordType::Cname,
    RecordType::Dname,
    RecordType::Mx,
    RecordType::Txt,
    RecordType::Spf,
    RecordType::Srv,
    RecordType::Caa,
    RecordType::Ptr,
];

/// Sort key placing a record type in the output
fn type_rank(record_type: RecordType) -> (usize, &'static str) {
    let position = TYPE_ORDER
        .iter()
        .position(|t| *t == record_type)
        .unwrap_or(TYPE_ORDER.len());
    (position, record_type.as_str())
}

/// Make a domain reference absolute
///
/// IP literals and quoted strings are left alone, and an empty target is the root.
fn absolute(target: &str) -> String {
    if target.is_empty() {
        return ".".to_string();
    }
    if target.ends_with('.') || target.starts_with('"') || target.parse::<IpAddr>().is_ok() {
        return target.to_string();
    }
    format!("{}.", target)
}

/// Wrap text content in quotes unless it already is quoted
fn quote_text(content: &str) -> String {
    let trimmed = content.trim();
    if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        trimmed.to_string()
    } else {
        format!(
            "\"{}\"",
            trimmed.replace('\\', "\\\\").replace('"', "\\\"")
        )
    }
}

/// Render `<priority> <target.>`, honouring content that already carries its priority
fn priority_target(content: &str, prio: Option<u16>) -> String {
    let fields: Vec<&str> = content.split_whitespace().collect();
    match fields.as_slice() {
        [priority, target] if priority.parse::<u16>().is_ok() => {
            format!("{} {}", priority, absolute(target))
        }
        [target] => format!("{} {}", prio.unwrap_or(0), absolute(target)),
        [] => format!("{} .", prio.unwrap_or(0)),
        _ => format!("{} {}", prio.unwrap_or(0), content.trim()),
    }
}

fn srv_rdata(content: &str, prio: Option<u16>) -> String {
    let fields: Vec<&str> = content.split_whitespace().collect();
    match fields.as_slice() {
        [priority, weight, port, target] => {
            format!("{} {} {} {}", priority, weight, port, absolute(target))
        }
        [weight, port, target] => format!(
            "{} {} {} {}",
            prio.unwrap_or(0),
            weight,
            port,
            absolute(target)
        ),
        _ => format!("{} {}", prio.unwrap_or(0), content.trim()),
    }
}

fn soa_rdata(content: &str) -> String {
    let mut fields = content.split_whitespace();
    match (fields.next(), fields.next()) {
        (Some(mname), Some(rname)) => {
            let mut parts = vec![absolute(mname), absolute(rname)];
            parts.extend(fields.map(str::to_string));
            parts.join(" ")
        }
        _ => content.trim().to_string(),
    }
}

/// The replacement is the last field; earlier fields may hold quoted spaces
fn naptr_rdata(content: &str) -> String {
    let content = content.trim();
    match content.rsplit_once(char::is_whitespace) {
        Some((head, replacement)) => format!("{} {}", head.trim_end(), absolute(replacement)),
        None => content.to_string(),
    }
}

/// Render the rdata column of a record
fn format_rdata(record: &ZoneRecord) -> String {
    let content = record.content.as_str();
    match record.record_type {
        RecordType::Mx | RecordType::Kx | RecordType::Afsdb => {
            priority_target(content, record.prio)
        }
        RecordType::Srv => srv_rdata(content, record.prio),
        RecordType::Ns | RecordType::Cname | RecordType::Ptr | RecordType::Dname => {
            absolute(content.trim())
        }
        RecordType::Soa => soa_rdata(content),
        RecordType::Naptr => naptr_rdata(content),
        text if text.is_text() => quote_text(content),
        _ => content.trim().to_string(),
    }
}

/// BIND zone file generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneFileGenerator {
    default_ttl: u32,
}

impl Default for ZoneFileGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_ZONE_TTL)
    }
}

impl ZoneFileGenerator {
    /// Create a generator emitting `$TTL default_ttl`
    pub fn new(default_ttl: u32) -> Self {
        Self { default_ttl }
    }

    pub fn default_ttl(&self) -> u32 {
        self.default_ttl
    }

    /// Generate a zone file stamped with the current time
    pub fn generate(&self, zone_name: &str, records: &[ZoneRecord]) -> String {
        self.generate_at(zone_name, records, Utc::now())
    }

    /// Generate a zone file stamped with `timestamp`
    ///
    /// Output depends only on the arguments, so the same input always
    /// produces the same text.
    pub fn generate_at(
        &self,
        zone_name: &str,
        records: &[ZoneRecord],
        timestamp: DateTime<Utc>,
    ) -> String {
        let zone = zone_name.trim().trim_end_matches('.');
        let mut zone_file = String::new();

        // Header
        zone_file.push_str(&format!("; Zone file for {}\n", zone));
        zone_file.push_str(&format!(
            "; Exported: {}\n",
            timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        zone_file.push_str(&format!(
            "; Generated by zonecar v{}\n",
            env!("CARGO_PKG_VERSION")
        ));
        zone_file.push_str(&format!("$ORIGIN {}.\n", zone));
        zone_file.push_str(&format!("$TTL {}\n", self.default_ttl));

        let mut groups: BTreeMap<(usize, &'static str), Vec<&ZoneRecord>> = BTreeMap::new();
        for record in records {
            groups
                .entry(type_rank(record.record_type))
                .or_default()
                .push(record);
        }

        for ((_, type_name), group) in &groups {
            zone_file.push_str(&format!("\n; {} Records\n", type_name));
            for record in group {
                zone_file.push_str(&self.format_line(zone, record));
                zone_file.push('\n');
            }
        }

        zone_file
    }

    fn format_line(&self, zone: &str, record: &ZoneRecord) -> String {
        let name = match record.name.trim().trim_end_matches('.') {
            "" | "@" => zone,
            name => name,
        };

        format!(
            "{}.\t{}\tIN\t{}\t{}",
            name,
            record.ttl.unwrap_or(self.default_ttl),
            record.record_type,
            format_rdata(record)
        )
    }
}

#[cfg(test)]
#[path = "zone_generator_tests.rs"]
mod tests;
