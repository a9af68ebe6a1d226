// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Zone import planning
//!
//! Decides which parsed records should be written to a record store that
//! may already hold records for the zone. Planning is pure: the caller
//! applies the plan (deleting replaced RRsets, then inserting records).

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;
use utoipa::ToSchema;

use crate::zone_types::{ParsedRecord, RecordType, ZoneRecord};

/// How to treat incoming records that collide with existing ones
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum ConflictStrategy {
    /// Skip records whose name, type and content already exist
    #[default]
    Skip,
    /// Replace every existing RRset that the import touches
    Replace,
    /// Add everything, duplicates included
    AddAll,
}

impl ConflictStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictStrategy::Skip => "skip",
            ConflictStrategy::Replace => "replace",
            ConflictStrategy::AddAll => "addAll",
        }
    }

    /// Parse a strategy name, accepting `add_all` and `add-all` spellings
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().replace(&['_', '-'][..], "").as_str() {
            "skip" => Some(ConflictStrategy::Skip),
            "replace" => Some(ConflictStrategy::Replace),
            "addall" => Some(ConflictStrategy::AddAll),
            _ => None,
        }
    }
}

/// An RRset identified by owner name and type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RrsetKey {
    /// Owner name, lowercased
    pub name: String,

    /// Record type
    #[serde(rename = "type")]
    pub record_type: RecordType,
}

impl RrsetKey {
    pub fn new(name: &str, record_type: RecordType) -> Self {
        Self {
            name: name.trim_end_matches('.').to_ascii_lowercase(),
            record_type,
        }
    }
}

/// Outcome of planning an import
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportPlan {
    /// Records to insert, in source order
    pub to_add: Vec<ParsedRecord>,

    /// Records left out because an identical one exists
    pub skipped: Vec<ParsedRecord>,

    /// RRsets the caller must delete before inserting
    pub replaced_rrsets: Vec<RrsetKey>,

    /// Number of SOA records dropped from the import
    pub soa_filtered: usize,
}

impl ImportPlan {
    pub fn added_count(&self) -> usize {
        self.to_add.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Plan an import of `records` into a zone that already holds `existing`
///
/// SOA records are always dropped, since the target store manages its own.
pub fn plan_import(
    records: &[ParsedRecord],
    existing: &[ZoneRecord],
    strategy: ConflictStrategy,
) -> ImportPlan {
    let mut plan = ImportPlan::default();

    let existing_rows: HashSet<(RrsetKey, &str)> = existing
        .iter()
        .map(|r| (RrsetKey::new(&r.name, r.record_type), r.content.as_str()))
        .collect();
    let existing_rrsets: HashSet<RrsetKey> =
        existing_rows.iter().map(|(key, _)| key.clone()).collect();

    for record in records {
        if record.record_type == RecordType::Soa {
            plan.soa_filtered += 1;
            continue;
        }

        let key = RrsetKey::new(&record.name, record.record_type);
        match strategy {
            ConflictStrategy::Skip => {
                if existing_rows.contains(&(key, record.content.as_str())) {
                    plan.skipped.push(record.clone());
                } else {
                    plan.to_add.push(record.clone());
                }
            }
            ConflictStrategy::Replace => {
                if existing_rrsets.contains(&key) && !plan.replaced_rrsets.contains(&key) {
                    plan.replaced_rrsets.push(key);
                }
                plan.to_add.push(record.clone());
            }
            ConflictStrategy::AddAll => plan.to_add.push(record.clone()),
        }
    }

    debug!(
        "import plan ({}): {} to add, {} skipped, {} rrsets replaced, {} soa filtered",
        strategy.as_str(),
        plan.added_count(),
        plan.skipped_count(),
        plan.replaced_rrsets.len(),
        plan.soa_filtered
    );

    plan
}

#[cfg(test)]
#[path = "import_tests.rs"]
mod tests;
