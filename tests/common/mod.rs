// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use zsun_riders::RiderRepository;

/// Fixture with four riders (101..=104) exercising assorted raw shapes.
#[allow(dead_code)]
pub const FIXTURE_PATH: &str = "tests/fixtures/riders.json";

/// Create a repository loaded from the shared fixture.
#[allow(dead_code)]
pub fn fixture_repository() -> RiderRepository {
    let mut repo = RiderRepository::new();
    repo.load_from_path(FIXTURE_PATH)
        .expect("Failed to load rider fixture - is tests/fixtures committed?");
    repo
}

/// Build a rider dictionary JSON string from `(id, name)` pairs.
#[allow(dead_code)]
pub fn riders_json(riders: &[(u64, &str)]) -> String {
    let entries: serde_json::Map<String, serde_json::Value> = riders
        .iter()
        .map(|(id, name)| {
            (
                id.to_string(),
                serde_json::json!({ "zwift_id": id.to_string(), "name": name }),
            )
        })
        .collect();
    serde_json::Value::Object(entries).to_string()
}
