// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory repository of riders keyed by Zwift ID.
//!
//! The backing map is only ever replaced wholesale (load, compact, clear),
//! so every stored key equals its rider's `zwift_id`.

use std::collections::{HashMap, HashSet};
use std::fmt::Display;
use std::fs;
use std::path::Path;

use serde_json::{json, Value};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::error::{Result, RiderError};
use crate::models::Rider;

/// Error codes returned by [`RiderRepository::load`].
pub mod codes {
    pub const EMPTY_INPUT: &str = "empty_input";
    pub const INVALID_JSON: &str = "invalid_json";
    pub const NOT_AN_OBJECT: &str = "not_an_object";
    pub const INVALID_KEY: &str = "invalid_key";
    pub const INVALID_VALUE: &str = "invalid_value";
    pub const MISSING_REQUIRED: &str = "missing_required";
    pub const KEY_MISMATCH: &str = "key_mismatch";
    pub const IO_ERROR: &str = "io_error";
}

/// Keyed store of validated riders.
#[derive(Debug, Clone, Default)]
pub struct RiderRepository {
    riders: HashMap<String, Rider>,
}

impl RiderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents with riders parsed from a JSON dictionary of
    /// `zwift_id -> raw rider`.
    ///
    /// All-or-nothing: on any invalid entry the existing contents are left
    /// untouched and a validation error naming the entry is returned.
    pub fn load(&mut self, json: &str) -> Result<usize> {
        let riders = match Self::validate(json) {
            Ok(riders) => riders,
            Err(e) => {
                tracing::warn!(code = e.code(), error = %e, "Rejected rider load");
                return Err(e);
            }
        };

        let count = riders.len();
        self.riders = riders;
        tracing::info!(count, "Loaded riders");
        Ok(count)
    }

    /// Read a JSON dictionary from disk and [`load`](Self::load) it.
    pub fn load_from_path<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| {
            RiderError::server(
                codes::IO_ERROR,
                format!("Failed to read rider file {}: {}", path.display(), e),
            )
            .with_context(json!({ "path": path.display().to_string() }))
        })?;
        tracing::debug!(path = %path.display(), bytes = json.len(), "Read rider file");
        self.load(&json)
    }

    /// Parse and validate a rider dictionary without touching any repository.
    pub fn validate(json: &str) -> Result<HashMap<String, Rider>> {
        if json.trim().is_empty() {
            return Err(RiderError::validation(
                codes::EMPTY_INPUT,
                "Rider input string is empty or whitespace",
            ));
        }

        let parsed: Value = serde_json::from_str(json).map_err(|e| {
            RiderError::validation(
                codes::INVALID_JSON,
                format!("Failed to parse rider JSON: {}", e),
            )
        })?;

        let Value::Object(entries) = parsed else {
            return Err(RiderError::validation(
                codes::NOT_AN_OBJECT,
                "Rider JSON must be a non-array object mapping zwiftId to rider records",
            ));
        };

        let mut riders = HashMap::with_capacity(entries.len());
        for (key, value) in &entries {
            let rider = validate_entry(key, value)?;
            riders.insert(key.clone(), rider);
        }
        Ok(riders)
    }

    /// Keep only riders whose id is in `ids`; unknown ids are ignored.
    ///
    /// Returns the number of riders removed (previous size minus kept size).
    pub fn compact_to_subset<I, T>(&mut self, ids: I) -> usize
    where
        I: IntoIterator<Item = T>,
        T: Display,
    {
        let keep: HashSet<String> = ids.into_iter().map(|id| id.to_string()).collect();
        let previous = self.riders.len();

        let kept: HashMap<String, Rider> = std::mem::take(&mut self.riders)
            .into_iter()
            .filter(|(key, _)| keep.contains(key))
            .collect();

        let removed = previous - kept.len();
        self.riders = kept;
        tracing::info!(removed, kept = self.riders.len(), "Compacted riders");
        removed
    }

    pub fn clear(&mut self) {
        self.riders = HashMap::new();
        tracing::debug!("Cleared riders");
    }

    /// All riders ordered by name, ignoring case and diacritics.
    pub fn get_all_sorted_by_name(&self) -> Vec<&Rider> {
        let mut riders: Vec<&Rider> = self.riders.values().collect();
        riders.sort_by_cached_key(|rider| {
            (name_sort_key(&rider.name), id_sort_key(&rider.zwift_id))
        });
        riders
    }

    /// Look up a rider by id given as a number or a string.
    pub fn get_by_id(&self, zwift_id: impl Display) -> Option<&Rider> {
        self.riders.get(&zwift_id.to_string())
    }

    pub fn count(&self) -> usize {
        self.riders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.riders.is_empty()
    }

    /// Stored ids in ascending numeric order.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.riders.keys().map(String::as_str).collect();
        ids.sort_by_cached_key(|id| id_sort_key(id));
        ids
    }
}

fn validate_entry(key: &str, value: &Value) -> Result<Rider> {
    let context = || json!({ "key": key });

    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RiderError::validation(
            codes::INVALID_KEY,
            format!(
                "Invalid key '{}': expected zwiftId as digits-only string",
                key
            ),
        )
        .with_context(context()));
    }

    if !value.is_object() {
        return Err(RiderError::validation(
            codes::INVALID_VALUE,
            format!("Value for key '{}' must be a non-array object", key),
        )
        .with_context(context()));
    }

    let rider = Rider::from_raw(value);

    if !rider.has_required_fields() {
        return Err(RiderError::validation(
            codes::MISSING_REQUIRED,
            format!(
                "Rider for key '{}' is missing required properties 'zwift_id' and/or 'name'",
                key
            ),
        )
        .with_context(context()));
    }

    if rider.zwift_id != key {
        return Err(RiderError::validation(
            codes::KEY_MISMATCH,
            format!(
                "Rider for key '{}' has zwift_id '{}'",
                key, rider.zwift_id
            ),
        )
        .with_context(json!({ "key": key, "zwift_id": rider.zwift_id })));
    }

    Ok(rider)
}

/// Base-letter sort key: case and diacritics are ignored.
///
/// Canonical decomposition strips combining marks; letters with no
/// decomposition sort as their base letters.
fn name_sort_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len());
    for c in name.nfd().filter(|c| !is_combining_mark(*c)) {
        for lower in c.to_lowercase() {
            match lower {
                'æ' => key.push_str("ae"),
                'œ' => key.push_str("oe"),
                'ß' => key.push_str("ss"),
                'đ' | 'ð' => key.push('d'),
                'ħ' => key.push('h'),
                'ı' => key.push('i'),
                'ł' => key.push('l'),
                'ø' => key.push('o'),
                'ŧ' => key.push('t'),
                other => key.push(other),
            }
        }
    }
    key
}

/// Numeric ordering for digit strings of any length.
fn id_sort_key(id: &str) -> (usize, String) {
    let significant = id.trim_start_matches('0');
    (significant.len(), significant.to_string())
}
