// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Zsun riders host
//!
//! Loads a rider dictionary from disk, optionally compacts it to a retained
//! set of riders, and logs the display summary for each rider by name.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use zsun_riders::{
    config::{Config, LogFormat},
    RiderRepository, RiderSummaryCache,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    init_logging(config.log_format);

    tracing::info!(path = %config.riders_json_path.display(), "Loading riders");
    let mut repository = RiderRepository::new();
    if let Err(e) = repository.load_from_path(&config.riders_json_path) {
        tracing::error!(error = ?e.to_body(), "Rider load failed");
        return Err(e.into());
    }

    if let Some(ids) = &config.retain_rider_ids {
        let removed = repository.compact_to_subset(ids);
        tracing::info!(removed, retained = repository.count(), "Repository compacted");
    }

    let summaries = RiderSummaryCache::from_repository(&repository);
    for rider in repository.get_all_sorted_by_name() {
        let Some(summary) = summaries.get(&rider.zwift_id) else {
            continue;
        };
        tracing::info!(
            zwift_id = %summary.zwift_id,
            name = %summary.name,
            initials = %summary.initials,
            stats01 = %summary.stats01,
            stats02 = %summary.stats02,
            "Rider"
        );
    }

    Ok(())
}

/// Initialize logging in the configured format.
fn init_logging(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("zsun_riders=debug".parse().unwrap())
        .add_directive("info".parse().unwrap());

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .with_current_span(true)
                    .flatten_event(true),
            )
            .init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .init(),
    }
}
