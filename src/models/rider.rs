// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Typed rider record built from loosely-typed external JSON.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::coercion::{
    parse_date, parse_float, parse_int, parse_string, raw_default, serialize_type, DeclaredType,
    FieldValue,
};

/// Accepted raw keys per field. The canonical snake_case key comes first,
/// followed by the camelCase form produced by upstream normalizers.
pub mod keys {
    pub const ZWIFT_ID: &[&str] = &["zwift_id", "zwiftId"];
    pub const NAME: &[&str] = &["name"];
    pub const COUNTRY_ALPHA2: &[&str] =
        &["zwiftracingapp_country_alpha2", "zwiftracingappCountryAlpha2"];
    pub const WEIGHT_KG: &[&str] = &["weight_kg", "weightKg"];
    pub const HEIGHT_CM: &[&str] = &["height_cm", "heightCm"];
    pub const GENDER: &[&str] = &["gender"];
    pub const AGE_YEARS: &[&str] = &["age_years", "ageYears"];
    pub const AGE_GROUP: &[&str] = &["age_group", "ageGroup"];
    pub const ZWIFT_FTP: &[&str] = &["zwift_ftp", "zwiftFtp"];
    pub const ZWIFTPOWER_ZFTP: &[&str] = &["zwiftpower_zFTP", "zwiftpowerZFTP"];
    pub const ZWIFTRACINGAPP_ZPFTP_W: &[&str] = &["zwiftracingapp_zpFTP_w", "zwiftracingappZpFTPW"];
    pub const ZSUN_ONE_HOUR_WATTS: &[&str] = &["zsun_one_hour_watts", "zsunOneHourWatts"];
    pub const ZSUN_CP: &[&str] = &["zsun_CP", "zsunCP"];
    pub const ZSUN_AWC: &[&str] = &["zsun_AWC", "zsunAWC"];
    pub const ZWIFT_ZRS: &[&str] = &["zwift_zrs", "zwiftZrs"];
    pub const ZWIFT_CAT_OPEN: &[&str] = &["zwift_cat_open", "zwiftCatOpen"];
    pub const ZWIFT_CAT_FEMALE: &[&str] = &["zwift_cat_female", "zwiftCatFemale"];
    pub const VELO_RATING_30_DAYS: &[&str] = &[
        "zwiftracingapp_velo_rating_30_days",
        "zwiftracingappVeloRating30Days",
    ];
    pub const CAT_NUM_30_DAYS: &[&str] =
        &["zwiftracingapp_cat_num_30_days", "zwiftracingappCatNum30Days"];
    pub const CAT_NAME_30_DAYS: &[&str] =
        &["zwiftracingapp_cat_name_30_days", "zwiftracingappCatName30Days"];
    pub const ZWIFTRACINGAPP_CP: &[&str] = &["zwiftracingapp_CP", "zwiftracingappCP"];
    pub const ZWIFTRACINGAPP_AWC: &[&str] = &["zwiftracingapp_AWC", "zwiftracingappAWC"];
    pub const ONE_HOUR_CURVE_COEFFICIENT: &[&str] = &[
        "zsun_one_hour_curve_coefficient",
        "zsunOneHourCurveCoefficient",
    ];
    pub const ONE_HOUR_CURVE_EXPONENT: &[&str] =
        &["zsun_one_hour_curve_exponent", "zsunOneHourCurveExponent"];
    pub const TTT_PULL_CURVE_COEFFICIENT: &[&str] = &[
        "zsun_TTT_pull_curve_coefficient",
        "zsunTTTPullCurveCoefficient",
    ];
    pub const TTT_PULL_CURVE_EXPONENT: &[&str] =
        &["zsun_TTT_pull_curve_exponent", "zsunTTTPullCurveExponent"];
    pub const TTT_PULL_CURVE_FIT_R_SQUARED: &[&str] = &[
        "zsun_TTT_pull_curve_fit_r_squared",
        "zsunTTTPullCurveFitRSquared",
    ];
    pub const WHEN_CURVES_FITTED: &[&str] = &["zsun_when_curves_fitted", "zsunWhenCurvesFitted"];
}

/// One entry of the rider schema.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Accepted raw keys, canonical first
    pub aliases: &'static [&'static str],
    pub ty: DeclaredType,
}

impl FieldSpec {
    /// Canonical snake_case key used when serializing.
    pub fn key(&self) -> &'static str {
        self.aliases[0]
    }
}

const fn spec(aliases: &'static [&'static str], ty: DeclaredType) -> FieldSpec {
    FieldSpec { aliases, ty }
}

/// A rider with every field coerced to its declared type.
///
/// Only constructed through [`Rider::from_raw`] (or `Default`), so every
/// field always holds a value of its declared type.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Rider {
    /// Zwift ID as a digit string (also the repository key)
    pub zwift_id: String,
    pub name: String,
    /// ISO 3166 alpha-2 country code
    pub country_alpha2: String,
    pub weight_kg: f64,
    pub height_cm: f64,
    /// "m" / "f" as supplied upstream
    pub gender: String,
    pub age_years: i64,
    pub age_group: String,

    // ─── FTP ─────────────────────────────────────────────────────
    pub zwift_ftp_watts: f64,
    pub zwiftpower_zftp_watts: f64,
    pub zwift_racing_app_zp_ftp_watts: f64,
    pub zsun_one_hour_watts: f64,

    // ─── Critical power / anaerobic capacity ─────────────────────
    pub zsun_cp: f64,
    pub zsun_awc: f64,

    // ─── Categories and ratings ──────────────────────────────────
    pub zwift_zrs_score: i64,
    pub zwift_cat_open: String,
    pub zwift_cat_female: String,
    pub zwift_racing_app_velo_rating: i64,
    pub zwift_racing_app_cat_num: i64,
    pub zwift_racing_app_cat_name: String,
    pub zwift_racing_app_cp: f64,
    pub zwift_racing_app_awc: f64,

    // ─── Curve fits ──────────────────────────────────────────────
    pub zsun_one_hour_curve_coefficient: f64,
    pub zsun_one_hour_curve_exponent: f64,
    pub zsun_ttt_pull_curve_coefficient: f64,
    pub zsun_ttt_pull_curve_exponent: f64,
    pub zsun_ttt_pull_curve_fit_r_squared: f64,
    /// `None` when unknown
    pub zsun_when_curves_fitted: Option<DateTime<Utc>>,
}

impl Rider {
    /// The rider schema in serialization order.
    pub const FIELDS: &'static [FieldSpec] = &[
        spec(keys::ZWIFT_ID, DeclaredType::String),
        spec(keys::NAME, DeclaredType::String),
        spec(keys::COUNTRY_ALPHA2, DeclaredType::String),
        spec(keys::WEIGHT_KG, DeclaredType::Float),
        spec(keys::HEIGHT_CM, DeclaredType::Float),
        spec(keys::GENDER, DeclaredType::String),
        spec(keys::AGE_YEARS, DeclaredType::Int),
        spec(keys::AGE_GROUP, DeclaredType::String),
        spec(keys::ZWIFT_FTP, DeclaredType::Float),
        spec(keys::ZWIFTPOWER_ZFTP, DeclaredType::Float),
        spec(keys::ZWIFTRACINGAPP_ZPFTP_W, DeclaredType::Float),
        spec(keys::ZSUN_ONE_HOUR_WATTS, DeclaredType::Float),
        spec(keys::ZSUN_CP, DeclaredType::Float),
        spec(keys::ZSUN_AWC, DeclaredType::Float),
        spec(keys::ZWIFT_ZRS, DeclaredType::Int),
        spec(keys::ZWIFT_CAT_OPEN, DeclaredType::String),
        spec(keys::ZWIFT_CAT_FEMALE, DeclaredType::String),
        spec(keys::VELO_RATING_30_DAYS, DeclaredType::Int),
        spec(keys::CAT_NUM_30_DAYS, DeclaredType::Int),
        spec(keys::CAT_NAME_30_DAYS, DeclaredType::String),
        spec(keys::ZWIFTRACINGAPP_CP, DeclaredType::Float),
        spec(keys::ZWIFTRACINGAPP_AWC, DeclaredType::Float),
        spec(keys::ONE_HOUR_CURVE_COEFFICIENT, DeclaredType::Float),
        spec(keys::ONE_HOUR_CURVE_EXPONENT, DeclaredType::Float),
        spec(keys::TTT_PULL_CURVE_COEFFICIENT, DeclaredType::Float),
        spec(keys::TTT_PULL_CURVE_EXPONENT, DeclaredType::Float),
        spec(keys::TTT_PULL_CURVE_FIT_R_SQUARED, DeclaredType::Float),
        spec(keys::WHEN_CURVES_FITTED, DeclaredType::Date),
    ];

    /// Build a rider from a raw JSON object.
    ///
    /// Never fails: anything that is not an object, and any field that is
    /// absent or malformed, yields that field's default.
    pub fn from_raw(raw: &Value) -> Self {
        Self {
            zwift_id: parse_string(raw, keys::ZWIFT_ID, ""),
            name: parse_string(raw, keys::NAME, ""),
            country_alpha2: parse_string(raw, keys::COUNTRY_ALPHA2, ""),
            weight_kg: parse_float(raw, keys::WEIGHT_KG, 0.0),
            height_cm: parse_float(raw, keys::HEIGHT_CM, 0.0),
            gender: parse_string(raw, keys::GENDER, ""),
            age_years: parse_int(raw, keys::AGE_YEARS, 0),
            age_group: parse_string(raw, keys::AGE_GROUP, ""),
            zwift_ftp_watts: parse_float(raw, keys::ZWIFT_FTP, 0.0),
            zwiftpower_zftp_watts: parse_float(raw, keys::ZWIFTPOWER_ZFTP, 0.0),
            zwift_racing_app_zp_ftp_watts: parse_float(raw, keys::ZWIFTRACINGAPP_ZPFTP_W, 0.0),
            zsun_one_hour_watts: parse_float(raw, keys::ZSUN_ONE_HOUR_WATTS, 0.0),
            zsun_cp: parse_float(raw, keys::ZSUN_CP, 0.0),
            zsun_awc: parse_float(raw, keys::ZSUN_AWC, 0.0),
            zwift_zrs_score: parse_int(raw, keys::ZWIFT_ZRS, 0),
            zwift_cat_open: parse_string(raw, keys::ZWIFT_CAT_OPEN, ""),
            zwift_cat_female: parse_string(raw, keys::ZWIFT_CAT_FEMALE, ""),
            zwift_racing_app_velo_rating: parse_int(raw, keys::VELO_RATING_30_DAYS, 0),
            zwift_racing_app_cat_num: parse_int(raw, keys::CAT_NUM_30_DAYS, 0),
            zwift_racing_app_cat_name: parse_string(raw, keys::CAT_NAME_30_DAYS, ""),
            zwift_racing_app_cp: parse_float(raw, keys::ZWIFTRACINGAPP_CP, 0.0),
            zwift_racing_app_awc: parse_float(raw, keys::ZWIFTRACINGAPP_AWC, 0.0),
            zsun_one_hour_curve_coefficient: parse_float(
                raw,
                keys::ONE_HOUR_CURVE_COEFFICIENT,
                0.0,
            ),
            zsun_one_hour_curve_exponent: parse_float(raw, keys::ONE_HOUR_CURVE_EXPONENT, 0.0),
            zsun_ttt_pull_curve_coefficient: parse_float(
                raw,
                keys::TTT_PULL_CURVE_COEFFICIENT,
                0.0,
            ),
            zsun_ttt_pull_curve_exponent: parse_float(raw, keys::TTT_PULL_CURVE_EXPONENT, 0.0),
            zsun_ttt_pull_curve_fit_r_squared: parse_float(
                raw,
                keys::TTT_PULL_CURVE_FIT_R_SQUARED,
                0.0,
            ),
            zsun_when_curves_fitted: parse_date(raw, keys::WHEN_CURVES_FITTED, None),
        }
    }

    /// Current value of a field, looked up by any of its accepted keys.
    pub fn field(&self, key: &str) -> Option<FieldValue> {
        let spec = Self::FIELDS.iter().find(|f| f.aliases.contains(&key))?;
        let value = match spec.key() {
            "zwift_id" => FieldValue::Str(self.zwift_id.clone()),
            "name" => FieldValue::Str(self.name.clone()),
            "zwiftracingapp_country_alpha2" => FieldValue::Str(self.country_alpha2.clone()),
            "weight_kg" => FieldValue::Float(self.weight_kg),
            "height_cm" => FieldValue::Float(self.height_cm),
            "gender" => FieldValue::Str(self.gender.clone()),
            "age_years" => FieldValue::Int(self.age_years),
            "age_group" => FieldValue::Str(self.age_group.clone()),
            "zwift_ftp" => FieldValue::Float(self.zwift_ftp_watts),
            "zwiftpower_zFTP" => FieldValue::Float(self.zwiftpower_zftp_watts),
            "zwiftracingapp_zpFTP_w" => FieldValue::Float(self.zwift_racing_app_zp_ftp_watts),
            "zsun_one_hour_watts" => FieldValue::Float(self.zsun_one_hour_watts),
            "zsun_CP" => FieldValue::Float(self.zsun_cp),
            "zsun_AWC" => FieldValue::Float(self.zsun_awc),
            "zwift_zrs" => FieldValue::Int(self.zwift_zrs_score),
            "zwift_cat_open" => FieldValue::Str(self.zwift_cat_open.clone()),
            "zwift_cat_female" => FieldValue::Str(self.zwift_cat_female.clone()),
            "zwiftracingapp_velo_rating_30_days" => {
                FieldValue::Int(self.zwift_racing_app_velo_rating)
            }
            "zwiftracingapp_cat_num_30_days" => FieldValue::Int(self.zwift_racing_app_cat_num),
            "zwiftracingapp_cat_name_30_days" => {
                FieldValue::Str(self.zwift_racing_app_cat_name.clone())
            }
            "zwiftracingapp_CP" => FieldValue::Float(self.zwift_racing_app_cp),
            "zwiftracingapp_AWC" => FieldValue::Float(self.zwift_racing_app_awc),
            "zsun_one_hour_curve_coefficient" => {
                FieldValue::Float(self.zsun_one_hour_curve_coefficient)
            }
            "zsun_one_hour_curve_exponent" => FieldValue::Float(self.zsun_one_hour_curve_exponent),
            "zsun_TTT_pull_curve_coefficient" => {
                FieldValue::Float(self.zsun_ttt_pull_curve_coefficient)
            }
            "zsun_TTT_pull_curve_exponent" => FieldValue::Float(self.zsun_ttt_pull_curve_exponent),
            "zsun_TTT_pull_curve_fit_r_squared" => {
                FieldValue::Float(self.zsun_ttt_pull_curve_fit_r_squared)
            }
            "zsun_when_curves_fitted" => FieldValue::Date(self.zsun_when_curves_fitted),
            _ => return None,
        };
        Some(value)
    }

    /// Map every field back to its canonical snake_case key, in schema order.
    pub fn to_raw(&self) -> Map<String, Value> {
        Self::FIELDS
            .iter()
            .filter_map(|spec| {
                let value = self.field(spec.key())?;
                let raw = serialize_type(&value, spec.ty, &raw_default(spec.ty));
                Some((spec.key().to_string(), raw))
            })
            .collect()
    }

    /// Whether the fields the repository requires are present.
    pub fn has_required_fields(&self) -> bool {
        !self.zwift_id.is_empty() && !self.name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_raw() -> Value {
        json!({
            "zwift_id": "101",
            "name": "Alice Smith",
            "zwiftracingapp_country_alpha2": "nz",
            "weight_kg": "61.5",
            "height_cm": 168,
            "gender": "F",
            "age_years": "34",
            "zwiftracingapp_zpFTP_w": 250,
            "zwift_zrs": 512.7,
            "zwift_cat_open": "B",
            "zwift_cat_female": "A",
            "zwiftracingapp_velo_rating_30_days": 1450,
            "zwiftracingapp_cat_num_30_days": 4,
            "zwiftracingapp_cat_name_30_days": "Amethyst",
            "zsun_TTT_pull_curve_fit_r_squared": 0.98,
            "zsun_when_curves_fitted": "2024-01-15T10:30:00Z"
        })
    }

    #[test]
    fn test_from_raw_coerces_fields() {
        let rider = Rider::from_raw(&sample_raw());

        assert_eq!(rider.zwift_id, "101");
        assert_eq!(rider.name, "Alice Smith");
        assert_eq!(rider.weight_kg, 61.5);
        assert_eq!(rider.height_cm, 168.0);
        assert_eq!(rider.age_years, 34);
        assert_eq!(rider.zwift_zrs_score, 512);
        assert_eq!(rider.zwift_racing_app_cat_name, "Amethyst");
        assert_eq!(rider.zsun_ttt_pull_curve_fit_r_squared, 0.98);
        assert!(rider.zsun_when_curves_fitted.is_some());
        assert!(rider.has_required_fields());
    }

    #[test]
    fn test_from_raw_accepts_camel_case_aliases() {
        let rider = Rider::from_raw(&json!({ "zwiftId": 202, "name": "Bob", "weightKg": 80 }));

        assert_eq!(rider.zwift_id, "202");
        assert_eq!(rider.weight_kg, 80.0);
    }

    #[test]
    fn test_from_raw_non_object_is_all_default() {
        for raw in [json!(null), json!(42), json!("text"), json!([1, 2])] {
            assert_eq!(Rider::from_raw(&raw), Rider::default());
        }
    }

    #[test]
    fn test_to_raw_uses_schema_order_and_snake_keys() {
        let raw = Rider::from_raw(&sample_raw()).to_raw();
        let keys: Vec<&str> = raw.keys().map(String::as_str).collect();
        let expected: Vec<&str> = Rider::FIELDS.iter().map(FieldSpec::key).collect();

        assert_eq!(keys, expected);
        assert_eq!(raw.len(), 28);
        assert_eq!(raw["zsun_when_curves_fitted"], json!("2024-01-15T10:30:00.000Z"));
        assert_eq!(raw["zwift_zrs"], json!(512));
    }

    #[test]
    fn test_to_raw_unknown_date_is_null() {
        let raw = Rider::default().to_raw();
        assert_eq!(raw["zsun_when_curves_fitted"], Value::Null);
        assert_eq!(raw["weight_kg"], json!(0.0));
        assert_eq!(raw["name"], json!(""));
    }

    #[test]
    fn test_raw_round_trip_preserves_rider() {
        let rider = Rider::from_raw(&sample_raw());
        let again = Rider::from_raw(&Value::Object(rider.to_raw()));
        assert_eq!(again, rider);
    }

    #[test]
    fn test_field_lookup_by_alias() {
        let rider = Rider::from_raw(&sample_raw());

        assert_eq!(rider.field("weightKg"), Some(FieldValue::Float(61.5)));
        assert_eq!(rider.field("zwift_zrs"), Some(FieldValue::Int(512)));
        assert_eq!(rider.field("no_such_field"), None);
    }

    #[test]
    fn test_every_schema_field_is_readable() {
        let rider = Rider::default();
        for spec in Rider::FIELDS {
            let value = rider.field(spec.key()).expect("schema field missing accessor");
            assert_eq!(value.declared_type(), spec.ty, "field {}", spec.key());
        }
    }
}
