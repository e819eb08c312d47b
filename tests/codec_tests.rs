// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Serialization round trips through the untyped boundary.

use serde_json::{json, Value};
use zsun_riders::models::Rider;
use zsun_riders::services::codec::{
    deserialize_many, deserialize_one, serialize, serialize_to_json, serialize_value,
};

mod common;

#[test]
fn test_serialize_of_non_rider_is_empty() {
    assert!(serialize_value(&json!(42)).is_empty());
    assert!(serialize_value(&Value::Null).is_empty());
    assert!(serialize_value(&json!({})).is_empty());
}

#[test]
fn test_deserialize_many_skips_invalid_middle_element() {
    let riders = deserialize_many(
        r#"[{"zwift_id":"1","name":"A"},"not-an-object",{"zwift_id":"2","name":"B"}]"#,
    )
    .expect("top-level array");

    assert_eq!(riders.len(), 2);
    assert_eq!(riders[0].zwift_id, "1");
    assert_eq!(riders[1].zwift_id, "2");
}

#[test]
fn test_fixture_riders_round_trip_through_json_array() {
    let repo = common::fixture_repository();
    let riders: Vec<Rider> = repo.get_all_sorted_by_name().into_iter().cloned().collect();

    let array = Value::Array(
        riders
            .iter()
            .map(|rider| Value::Object(serialize(rider)))
            .collect(),
    );
    let restored = deserialize_many(array.to_string().as_str()).expect("array");

    assert_eq!(restored, riders);
}

#[test]
fn test_each_fixture_rider_round_trips_through_json_text() {
    let repo = common::fixture_repository();
    for rider in repo.get_all_sorted_by_name() {
        let text = serialize_to_json(rider);
        assert_eq!(deserialize_one(text.as_str()).as_ref(), Some(rider));
    }
}

#[test]
fn test_serialized_dates_are_iso_or_null() {
    let repo = common::fixture_repository();

    let alice = serialize(repo.get_by_id(101).unwrap());
    assert_eq!(alice["zsun_when_curves_fitted"], json!("2024-01-15T10:30:00.000Z"));

    let dave = serialize(repo.get_by_id(104).unwrap());
    assert_eq!(dave["zsun_when_curves_fitted"], Value::Null);
}

#[test]
fn test_serialized_ids_are_strings_even_from_numbers() {
    let repo = common::fixture_repository();
    let carol = serialize(repo.get_by_id(103).unwrap());

    assert_eq!(carol["zwift_id"], json!("103"));
    assert!(carol.get("zwiftId").is_none());
}
