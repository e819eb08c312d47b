// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Display-ready strings derived from a rider.
//!
//! All functions are total; unusable inputs degrade to `"?"` or `""`.

use crate::models::Rider;

/// Sentinel for a value that cannot be computed.
pub const UNKNOWN: &str = "?";

/// Lower-cased first letter of each whitespace-separated name token.
pub fn initials(rider: &Rider) -> String {
    rider
        .name
        .split_whitespace()
        .filter_map(|part| part.chars().next())
        .flat_map(char::to_lowercase)
        .collect()
}

/// zFTP watts per kilogram to two decimals, or `"?"` without a usable weight.
pub fn power_to_weight(rider: &Rider) -> String {
    let weight = rider.weight_kg;
    if weight == 0.0 || !weight.is_finite() {
        return UNKNOWN.to_string();
    }
    let ratio = rider.zwift_racing_app_zp_ftp_watts / weight;
    if ratio.is_finite() {
        fixed_2(ratio)
    } else {
        UNKNOWN.to_string()
    }
}

/// Two-decimal rendering that rounds exact halves away from zero.
///
/// `{:.2}` breaks ties to even, so 3.125 would print as "3.12". The only
/// exact third-decimal ties in binary are odd multiples of 1/8, and for
/// those `value * 100.0` is exact.
fn fixed_2(value: f64) -> String {
    let eighths = value * 8.0;
    let value = if eighths.fract() == 0.0 && eighths % 2.0 != 0.0 {
        (value * 100.0).round() / 100.0
    } else {
        value
    };
    format!("{value:.2}")
}

/// Zwift category, including the women's category for female riders.
fn pretty_zwift_category(rider: &Rider) -> String {
    if rider.gender.eq_ignore_ascii_case("f") {
        format!("{}/{}", rider.zwift_cat_open, rider.zwift_cat_female)
    } else {
        rider.zwift_cat_open.clone()
    }
}

/// `"<cat> (<w/kg> - <zrs>)"`, e.g. `"B/A (4.07 - 512)"`.
pub fn summary_stats_01(rider: &Rider) -> String {
    format!(
        "{} ({} - {})",
        pretty_zwift_category(rider),
        power_to_weight(rider),
        rider.zwift_zrs_score
    )
}

/// `"<cat num> (<30 day rating> - <cat name>)"`, e.g. `"4 (1450 - Amethyst)"`.
pub fn summary_stats_02(rider: &Rider) -> String {
    format!(
        "{} ({} - {})",
        rider.zwift_racing_app_cat_num,
        rider.zwift_racing_app_velo_rating,
        rider.zwift_racing_app_cat_name
    )
}
