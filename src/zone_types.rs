// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Zone file data types
//!
//! This module defines the structures shared by the zone file parser,
//! the zone file generator and the import planner. Names follow the
//! PowerDNS record-store convention: fully qualified, without the
//! trailing dot.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// DNS resource record type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    A,
    Aaaa,
    Afsdb,
    Alias,
    Apl,
    Caa,
    Cdnskey,
    Cds,
    Cert,
    Cname,
    Csync,
    Dhcid,
    Dlv,
    Dname,
    Dnskey,
    Ds,
    Eui48,
    Eui64,
    Hinfo,
    Https,
    Ipseckey,
    Key,
    Kx,
    Loc,
    Mx,
    Naptr,
    Nid,
    Ns,
    Nsec,
    Nsec3,
    Nsec3param,
    Openpgpkey,
    Ptr,
    Rp,
    Rrsig,
    Smimea,
    Soa,
    Spf,
    Srv,
    Sshfp,
    Svcb,
    Tkey,
    Tlsa,
    Tsig,
    Txt,
    Uri,
    Zonemd,
}

impl RecordType {
    /// Every known record type, in keyword order
    pub const ALL: &'static [RecordType] = &[
        RecordType::A,
        RecordType::Aaaa,
        RecordType::Afsdb,
        RecordType::Alias,
        RecordType::Apl,
        RecordType::Caa,
        RecordType::Cdnskey,
        RecordType::Cds,
        RecordType::Cert,
        RecordType::Cname,
        RecordType::Csync,
        RecordType::Dhcid,
        RecordType::Dlv,
        RecordType::Dname,
        RecordType::Dnskey,
        RecordType::Ds,
        RecordType::Eui48,
        RecordType::Eui64,
        RecordType::Hinfo,
        RecordType::Https,
        RecordType::Ipseckey,
        RecordType::Key,
        RecordType::Kx,
        RecordType::Loc,
        RecordType::Mx,
        RecordType::Naptr,
        RecordType::Nid,
        RecordType::Ns,
        RecordType::Nsec,
        RecordType::Nsec3,
        RecordType::Nsec3param,
        RecordType::Openpgpkey,
        RecordType::Ptr,
        RecordType::Rp,
        RecordType::Rrsig,
        RecordType::Smimea,
        RecordType::Soa,
        RecordType::Spf,
        RecordType::Srv,
        RecordType::Sshfp,
        RecordType::Svcb,
        RecordType::Tkey,
        RecordType::Tlsa,
        RecordType::Tsig,
        RecordType::Txt,
        RecordType::Uri,
        RecordType::Zonemd,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::Aaaa => "AAAA",
            RecordType::Afsdb => "AFSDB",
            RecordType::Alias => "ALIAS",
            RecordType::Apl => "APL",
            RecordType::Caa => "CAA",
            RecordType::Cdnskey => "CDNSKEY",
            RecordType::Cds => "CDS",
            RecordType::Cert => "CERT",
            RecordType::Cname => "CNAME",
            RecordType::Csync => "CSYNC",
            RecordType::Dhcid => "DHCID",
            RecordType::Dlv => "DLV",
            RecordType::Dname => "DNAME",
            RecordType::Dnskey => "DNSKEY",
            RecordType::Ds => "DS",
            RecordType::Eui48 => "EUI48",
            RecordType::Eui64 => "EUI64",
            RecordType::Hinfo => "HINFO",
            RecordType::Https => "HTTPS",
            RecordType::Ipseckey => "IPSECKEY",
            RecordType::Key => "KEY",
            RecordType::Kx => "KX",
            RecordType::Loc => "LOC",
            RecordType::Mx => "MX",
            RecordType::Naptr => "NAPTR",
            RecordType::Nid => "NID",
            RecordType::Ns => "NS",
            RecordType::Nsec => "NSEC",
            RecordType::Nsec3 => "NSEC3",
            RecordType::Nsec3param => "NSEC3PARAM",
            RecordType::Openpgpkey => "OPENPGPKEY",
            RecordType::Ptr => "PTR",
            RecordType::Rp => "RP",
            RecordType::Rrsig => "RRSIG",
            RecordType::Smimea => "SMIMEA",
            RecordType::Soa => "SOA",
            RecordType::Spf => "SPF",
            RecordType::Srv => "SRV",
            RecordType::Sshfp => "SSHFP",
            RecordType::Svcb => "SVCB",
            RecordType::Tkey => "TKEY",
            RecordType::Tlsa => "TLSA",
            RecordType::Tsig => "TSIG",
            RecordType::Txt => "TXT",
            RecordType::Uri => "URI",
            RecordType::Zonemd => "ZONEMD",
        }
    }

    /// Parse a type keyword, case-insensitively
    pub fn parse(s: &str) -> Option<Self> {
        RecordType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
    }

    /// Whether the content carries a numeric priority field in zone files
    pub fn has_priority(&self) -> bool {
        matches!(
            self,
            RecordType::Mx | RecordType::Kx | RecordType::Srv | RecordType::Afsdb
        )
    }

    /// Whether the content is one or more quoted character-strings
    pub fn is_text(&self) -> bool {
        matches!(self, RecordType::Txt | RecordType::Spf)
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resource record read from a zone file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParsedRecord {
    /// Fully qualified owner name without trailing dot (e.g., "www.example.com")
    pub name: String,

    /// Record type
    #[serde(rename = "type")]
    pub record_type: RecordType,

    /// Type-specific payload (e.g., "192.0.2.1", "60 5060 sip.example.com")
    pub content: String,

    /// Resolved TTL in seconds
    pub ttl: u32,

    /// Priority for MX, KX, SRV and AFSDB records, 0 otherwise
    pub priority: u16,
}

impl ParsedRecord {
    pub fn new(
        name: impl Into<String>,
        ttl: u32,
        record_type: RecordType,
        content: impl Into<String>,
        priority: u16,
    ) -> Self {
        Self {
            name: name.into(),
            record_type,
            content: content.into(),
            ttl,
            priority,
        }
    }
}

/// Result of parsing a zone file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParsedZone {
    /// Zone origin without trailing dot, from `$ORIGIN` or inferred from record names
    pub origin: Option<String>,

    /// Default TTL in effect at the end of the file
    pub default_ttl: u32,

    /// Records in source order
    pub records: Vec<ParsedRecord>,

    /// Non-fatal problems found while parsing
    pub warnings: Vec<String>,
}

impl ParsedZone {
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// A stored record row, as held by the record store
///
/// This is the input of the zone file generator and the "existing records"
/// side of an import plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ZoneRecord {
    /// Owner name (e.g., "www.example.com"); empty means the zone apex
    pub name: String,

    /// Record type
    #[serde(rename = "type")]
    pub record_type: RecordType,

    /// Record content as stored (e.g., "mail.example.com" for MX)
    pub content: String,

    /// TTL in seconds (uses zone default if not specified)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,

    /// Priority for MX, KX, SRV and AFSDB records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prio: Option<u16>,
}

impl From<&ParsedRecord> for ZoneRecord {
    fn from(record: &ParsedRecord) -> Self {
        Self {
            name: record.name.clone(),
            record_type: record.record_type,
            content: record.content.clone(),
            ttl: Some(record.ttl),
            prio: record
                .record_type
                .has_priority()
                .then_some(record.priority),
        }
    }
}
