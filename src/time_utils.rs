// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time conversion and formatting.

use chrono::{DateTime, SecondsFormat, Utc};

/// .NET ticks (100ns since 0001-01-01) at the Unix epoch.
const DOTNET_TICKS_AT_UNIX_EPOCH: f64 = 621_355_968_000_000_000.0;

/// Format a UTC timestamp as RFC3339 with millisecond precision and a `Z` suffix.
///
/// e.g. `2024-01-15T10:30:00.000Z`
pub fn format_utc_millis(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Interpret a numeric timestamp using magnitude to pick the unit:
/// - `|n| > 1e14`: .NET ticks
/// - `|n| < 1e11`: Unix seconds
/// - otherwise: Unix milliseconds
pub fn datetime_from_numeric(n: f64) -> Option<DateTime<Utc>> {
    if !n.is_finite() {
        return None;
    }
    let abs = n.abs();
    let millis = if abs > 1e14 {
        ((n - DOTNET_TICKS_AT_UNIX_EPOCH) / 10_000.0).floor()
    } else if abs < 1e11 {
        (n * 1000.0).floor()
    } else {
        n.floor()
    };
    DateTime::<Utc>::from_timestamp_millis(millis as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_utc_millis() {
        let date = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(format_utc_millis(date), "2024-01-15T10:30:00.000Z");
    }

    #[test]
    fn test_numeric_units() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        let seconds = expected.timestamp() as f64;
        let millis = expected.timestamp_millis() as f64;
        let ticks = millis * 10_000.0 + DOTNET_TICKS_AT_UNIX_EPOCH;

        assert_eq!(datetime_from_numeric(seconds), Some(expected));
        assert_eq!(datetime_from_numeric(millis), Some(expected));
        assert_eq!(datetime_from_numeric(ticks), Some(expected));
    }

    #[test]
    fn test_non_finite_rejected() {
        assert_eq!(datetime_from_numeric(f64::NAN), None);
        assert_eq!(datetime_from_numeric(f64::INFINITY), None);
    }
}
