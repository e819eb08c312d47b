// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Precomputed per-rider display summary.

use serde::{Deserialize, Serialize};

use crate::models::Rider;
use crate::services::derived;

/// Display strings for one rider, computed once and served from a cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiderSummary {
    pub zwift_id: String,
    pub name: String,
    /// zFTP w/kg, `"?"` when unknown
    pub z_ftp_wkg: String,
    pub initials: String,
    pub stats01: String,
    pub stats02: String,
}

impl RiderSummary {
    /// Property names accepted by [`RiderSummary::property`].
    pub const PROPERTIES: &'static [&'static str] = &[
        "zwiftId",
        "name",
        "zFtpWkg",
        "initials",
        "stats01",
        "stats02",
    ];

    /// Look up a property by its serialized name.
    pub fn property(&self, name: &str) -> Option<&str> {
        let value = match name {
            "zwiftId" => &self.zwift_id,
            "name" => &self.name,
            "zFtpWkg" => &self.z_ftp_wkg,
            "initials" => &self.initials,
            "stats01" => &self.stats01,
            "stats02" => &self.stats02,
            _ => return None,
        };
        Some(value.as_str())
    }
}

impl From<&Rider> for RiderSummary {
    fn from(rider: &Rider) -> Self {
        Self {
            zwift_id: rider.zwift_id.clone(),
            name: rider.name.clone(),
            z_ftp_wkg: derived::power_to_weight(rider),
            initials: derived::initials(rider),
            stats01: derived::summary_stats_01(rider),
            stats02: derived::summary_stats_02(rider),
        }
    }
}
