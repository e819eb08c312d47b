// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Explicitly owned cache of precomputed rider summaries.
//!
//! Lookups return display strings rather than `Option`s because callers
//! render them straight into cells.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::models::{Rider, RiderSummary};
use crate::services::derived::UNKNOWN;
use crate::services::RiderRepository;

pub const INVALID_ID: &str = "Invalid zwiftID";
pub const CACHE_EMPTY: &str = "Cache empty";
pub const NAME_MISSING: &str = "{name} missing";
pub const STATS01_MISSING: &str = "{riderStats01} missing";

/// Summaries keyed by Zwift ID.
#[derive(Debug, Clone, Default)]
pub struct RiderSummaryCache {
    entries: BTreeMap<String, RiderSummary>,
}

impl RiderSummaryCache {
    pub fn from_repository(repository: &RiderRepository) -> Self {
        Self::from_riders(repository.get_all_sorted_by_name())
    }

    /// Build from any riders; riders without an id are skipped.
    pub fn from_riders<'a>(riders: impl IntoIterator<Item = &'a Rider>) -> Self {
        let entries: BTreeMap<String, RiderSummary> = riders
            .into_iter()
            .filter(|rider| !rider.zwift_id.is_empty())
            .map(|rider| (rider.zwift_id.clone(), RiderSummary::from(rider)))
            .collect();
        tracing::debug!(count = entries.len(), "Built rider summary cache");
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, zwift_id: &str) -> Option<&RiderSummary> {
        self.entries.get(zwift_id.trim())
    }

    /// Rider name for a cell.
    ///
    /// Unknown riders render as their id so the cell still identifies them.
    pub fn name_of(&self, zwift_id: &str) -> String {
        self.lookup(zwift_id, |summary| &summary.name, NAME_MISSING)
    }

    /// Stats01 string for a cell, with the same fallbacks as [`Self::name_of`].
    pub fn stats01_of(&self, zwift_id: &str) -> String {
        self.lookup(zwift_id, |summary| &summary.stats01, STATS01_MISSING)
    }

    /// Any summary property by its serialized name, or `"?"`.
    pub fn property_of(&self, zwift_id: &str, property: &str) -> String {
        let (key, property) = (zwift_id.trim(), property.trim());
        if key.is_empty() || property.is_empty() {
            return UNKNOWN.to_string();
        }
        self.entries
            .get(key)
            .and_then(|summary| summary.property(property))
            .unwrap_or(UNKNOWN)
            .to_string()
    }

    /// The cache as a JSON object keyed by id.
    pub fn to_json(&self) -> Value {
        serde_json::to_value(&self.entries).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Summary cache serialization failed");
            Value::Object(Default::default())
        })
    }

    fn lookup(
        &self,
        zwift_id: &str,
        select: impl Fn(&RiderSummary) -> &String,
        missing: &str,
    ) -> String {
        let key = zwift_id.trim();
        if key.is_empty() {
            return INVALID_ID.to_string();
        }
        if self.entries.is_empty() {
            return CACHE_EMPTY.to_string();
        }
        match self.entries.get(key) {
            None => key.to_string(),
            Some(summary) => {
                let value = select(summary);
                if value.trim().is_empty() {
                    missing.to_string()
                } else {
                    value.clone()
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cache() -> RiderSummaryCache {
        let riders = [
            Rider::from_raw(&json!({
                "zwift_id": "101",
                "name": "Alice Smith",
                "weight_kg": 50,
                "zwiftracingapp_zpFTP_w": 200
            })),
            Rider::from_raw(&json!({ "zwift_id": "102" })),
            Rider::from_raw(&json!({ "name": "No Id" })),
        ];
        RiderSummaryCache::from_riders(&riders)
    }

    #[test]
    fn test_riders_without_id_are_skipped() {
        assert_eq!(cache().len(), 2);
    }

    #[test]
    fn test_name_of() {
        let cache = cache();
        assert_eq!(cache.name_of(" 101 "), "Alice Smith");
        assert_eq!(cache.name_of("102"), NAME_MISSING);
        assert_eq!(cache.name_of("999"), "999");
        assert_eq!(cache.name_of("  "), INVALID_ID);
        assert_eq!(RiderSummaryCache::default().name_of("101"), CACHE_EMPTY);
    }

    #[test]
    fn test_stats01_of() {
        let cache = cache();
        assert_eq!(cache.stats01_of("101"), " (4.00 - 0)");
        assert_eq!(cache.stats01_of("999"), "999");
    }

    #[test]
    fn test_property_of() {
        let cache = cache();
        assert_eq!(cache.property_of("101", "zFtpWkg"), "4.00");
        assert_eq!(cache.property_of("101", "initials"), "as");
        assert_eq!(cache.property_of("101", "nope"), UNKNOWN);
        assert_eq!(cache.property_of("999", "name"), UNKNOWN);
        assert_eq!(cache.property_of("", "name"), UNKNOWN);
    }

    #[test]
    fn test_to_json_keyed_by_id() {
        let value = cache().to_json();
        assert_eq!(value["101"]["name"], json!("Alice Smith"));
        assert_eq!(value["102"]["zFtpWkg"], json!("?"));
    }
}
