// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Rider (de)serialization at untyped boundaries.
//!
//! Lenient by design of the data source: a malformed element becomes
//! `None` (or is dropped from a batch) rather than an error.

use serde_json::{Map, Value};

use crate::coercion::resolve_value;
use crate::models::rider::{keys, Rider};

/// Input accepted by [`deserialize_one`].
#[derive(Debug, Clone)]
pub enum RiderInput<'a> {
    /// JSON text of a single rider object
    Json(&'a str),
    /// An already-parsed raw rider object
    Raw(&'a Value),
    /// An already-typed rider, returned unchanged
    Typed(Rider),
}

impl<'a> From<&'a str> for RiderInput<'a> {
    fn from(text: &'a str) -> Self {
        RiderInput::Json(text)
    }
}

impl<'a> From<&'a Value> for RiderInput<'a> {
    fn from(value: &'a Value) -> Self {
        RiderInput::Raw(value)
    }
}

impl From<Rider> for RiderInput<'_> {
    fn from(rider: Rider) -> Self {
        RiderInput::Typed(rider)
    }
}

/// Input accepted by [`deserialize_many`].
#[derive(Debug, Clone, Copy)]
pub enum RiderBatch<'a> {
    /// JSON text of an array of rider objects
    Json(&'a str),
    /// Already-parsed array elements
    Items(&'a [Value]),
}

impl<'a> From<&'a str> for RiderBatch<'a> {
    fn from(text: &'a str) -> Self {
        RiderBatch::Json(text)
    }
}

impl<'a> From<&'a [Value]> for RiderBatch<'a> {
    fn from(items: &'a [Value]) -> Self {
        RiderBatch::Items(items)
    }
}

impl<'a> From<&'a Vec<Value>> for RiderBatch<'a> {
    fn from(items: &'a Vec<Value>) -> Self {
        RiderBatch::Items(items.as_slice())
    }
}

/// Structural check for untyped input claiming to be a rider: an object
/// with a string or number id and a string name under accepted keys.
pub fn is_rider_shaped(value: &Value) -> bool {
    let id_ok = matches!(
        resolve_value(value, keys::ZWIFT_ID),
        Some(Value::String(_) | Value::Number(_))
    );
    let name_ok = matches!(resolve_value(value, keys::NAME), Some(Value::String(_)));
    id_ok && name_ok
}

/// Serialize a rider to its raw snake_case object.
pub fn serialize(rider: &Rider) -> Map<String, Value> {
    rider.to_raw()
}

/// Serialize untyped input, returning `{}` unless it is rider shaped.
pub fn serialize_value(value: &Value) -> Map<String, Value> {
    if is_rider_shaped(value) {
        Rider::from_raw(value).to_raw()
    } else {
        Map::new()
    }
}

/// Serialize a rider to JSON text, or `"{}"` if encoding fails.
pub fn serialize_to_json(rider: &Rider) -> String {
    serde_json::to_string(&serialize(rider)).unwrap_or_else(|e| {
        tracing::warn!(error = %e, zwift_id = %rider.zwift_id, "Rider serialization failed");
        "{}".to_string()
    })
}

/// Deserialize a single rider.
///
/// Returns `None` for blank or unparseable text and for anything that is
/// not a JSON object (including arrays and null).
pub fn deserialize_one<'a>(input: impl Into<RiderInput<'a>>) -> Option<Rider> {
    match input.into() {
        RiderInput::Typed(rider) => Some(rider),
        RiderInput::Raw(value) => rider_from_object(value),
        RiderInput::Json(text) => {
            let value = parse_trimmed(text)?;
            rider_from_object(&value)
        }
    }
}

/// Deserialize an array of riders, silently dropping invalid elements.
///
/// Returns `None` when the top-level input is blank, unparseable or not an
/// array.
pub fn deserialize_many<'a>(input: impl Into<RiderBatch<'a>>) -> Option<Vec<Rider>> {
    match input.into() {
        RiderBatch::Items(items) => Some(riders_from_items(items)),
        RiderBatch::Json(text) => match parse_trimmed(text)? {
            Value::Array(items) => Some(riders_from_items(&items)),
            _ => None,
        },
    }
}

fn riders_from_items(items: &[Value]) -> Vec<Rider> {
    let riders: Vec<Rider> = items.iter().filter_map(rider_from_object).collect();
    let dropped = items.len() - riders.len();
    if dropped > 0 {
        tracing::debug!(dropped, kept = riders.len(), "Dropped invalid rider elements");
    }
    riders
}

fn rider_from_object(value: &Value) -> Option<Rider> {
    value.is_object().then(|| Rider::from_raw(value))
}

fn parse_trimmed(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    serde_json::from_str(trimmed).ok()
}
