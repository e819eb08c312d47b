// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Field coercion between loosely-typed JSON values and declared types.
//!
//! Every function here is total: a missing, null or malformed raw value
//! degrades to the caller's default instead of failing, so one bad field
//! never poisons the rest of a record.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Number, Value};

use crate::time_utils::{datetime_from_numeric, format_utc_millis};

/// Microsoft JSON date wrapper, e.g. `/Date(1705314600000+0100)/`.
static MS_DATE_WRAPPER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/Date\((-?\d+)(?:[+-]\d{4})?\)/$").expect("valid regex"));

static DIGITS_ONLY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?\d+$").expect("valid regex"));

/// ISO-8601 date with optional time, fraction and offset.
static ISO_8601: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(\d{4})-(\d{2})-(\d{2})(?:[T ](\d{2}):(\d{2})(?::(\d{2})(?:\.(\d+))?)?)?(Z|[+-]\d{2}:\d{2}|[+-]\d{4})?$",
    )
    .expect("valid regex")
});

/// The closed set of types a raw field can be coerced to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclaredType {
    String,
    Int,
    Float,
    Date,
}

/// A coerced field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Str(String),
    Int(i64),
    Float(f64),
    /// `None` means "unknown".
    Date(Option<DateTime<Utc>>),
}

impl FieldValue {
    pub fn declared_type(&self) -> DeclaredType {
        match self {
            FieldValue::Str(_) => DeclaredType::String,
            FieldValue::Int(_) => DeclaredType::Int,
            FieldValue::Float(_) => DeclaredType::Float,
            FieldValue::Date(_) => DeclaredType::Date,
        }
    }

    /// Zero value of a declared type: `""`, `0`, `0.0` or unknown date.
    pub fn zero(ty: DeclaredType) -> Self {
        match ty {
            DeclaredType::String => FieldValue::Str(String::new()),
            DeclaredType::Int => FieldValue::Int(0),
            DeclaredType::Float => FieldValue::Float(0.0),
            DeclaredType::Date => FieldValue::Date(None),
        }
    }

    /// Keep `self` if it matches `ty`, otherwise fall back to the zero value.
    fn conform(self, ty: DeclaredType) -> Self {
        if self.declared_type() == ty {
            self
        } else {
            FieldValue::zero(ty)
        }
    }
}

/// Find the first alias present in `raw` with a non-null value.
///
/// Returns `None` when `raw` is not an object or no alias matches.
pub fn resolve_value<'a>(raw: &'a Value, aliases: &[&str]) -> Option<&'a Value> {
    let object = raw.as_object()?;
    aliases
        .iter()
        .filter_map(|alias| object.get(*alias))
        .find(|value| !value.is_null())
}

/// Coerce the first matching alias to `ty`, or return `default`.
///
/// A `default` of the wrong variant is replaced by the zero value of `ty`.
pub fn parse_field(
    raw: &Value,
    aliases: &[&str],
    ty: DeclaredType,
    default: FieldValue,
) -> FieldValue {
    let default = default.conform(ty);
    let Some(value) = resolve_value(raw, aliases) else {
        return default;
    };

    let parsed = match ty {
        DeclaredType::String => coerce_string(value).map(FieldValue::Str),
        DeclaredType::Int => coerce_int(value).map(FieldValue::Int),
        DeclaredType::Float => coerce_float(value).map(FieldValue::Float),
        DeclaredType::Date => coerce_date(value).map(|d| FieldValue::Date(Some(d))),
    };
    parsed.unwrap_or(default)
}

pub fn parse_string(raw: &Value, aliases: &[&str], default: &str) -> String {
    resolve_value(raw, aliases)
        .and_then(coerce_string)
        .unwrap_or_else(|| default.to_string())
}

pub fn parse_int(raw: &Value, aliases: &[&str], default: i64) -> i64 {
    resolve_value(raw, aliases)
        .and_then(coerce_int)
        .unwrap_or(default)
}

pub fn parse_float(raw: &Value, aliases: &[&str], default: f64) -> f64 {
    resolve_value(raw, aliases)
        .and_then(coerce_float)
        .unwrap_or(default)
}

pub fn parse_date(
    raw: &Value,
    aliases: &[&str],
    default: Option<DateTime<Utc>>,
) -> Option<DateTime<Utc>> {
    resolve_value(raw, aliases).and_then(coerce_date).or(default)
}

/// Convert a coerced value back to its raw JSON form.
///
/// Dates become millisecond ISO-8601 strings, numbers stay numeric and
/// strings pass through. Unknown dates, non-finite floats and values whose
/// variant disagrees with `ty` become `default`.
pub fn serialize_type(value: &FieldValue, ty: DeclaredType, default: &Value) -> Value {
    match (ty, value) {
        (DeclaredType::String, FieldValue::Str(s)) => Value::String(s.clone()),
        (DeclaredType::Int, FieldValue::Int(i)) => Value::from(*i),
        (DeclaredType::Float, FieldValue::Float(f)) => Number::from_f64(*f)
            .map(Value::Number)
            .unwrap_or_else(|| default.clone()),
        (DeclaredType::Date, FieldValue::Date(Some(d))) => Value::String(format_utc_millis(*d)),
        _ => default.clone(),
    }
}

/// Default raw value used when serializing a field of type `ty`.
pub fn raw_default(ty: DeclaredType) -> Value {
    match ty {
        DeclaredType::String => Value::String(String::new()),
        DeclaredType::Int => Value::from(0),
        DeclaredType::Float => Value::from(0.0),
        DeclaredType::Date => Value::Null,
    }
}

fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(number_to_string(n)),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Shortest decimal form, with integral floats printed without a fraction
/// (`101.0` becomes `"101"`) and exponent notation outside `[1e-6, 1e21)`.
fn number_to_string(n: &Number) -> String {
    let f = match n.as_f64() {
        Some(f) if !(n.is_i64() || n.is_u64()) => f,
        _ => return n.to_string(),
    };
    if f == 0.0 {
        return "0".to_string();
    }
    let magnitude = f.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return f.to_string();
    }
    let scientific = format!("{f:e}");
    if scientific.contains("e-") {
        scientific
    } else {
        scientific.replacen('e', "e+", 1)
    }
}

fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(truncate_to_i64)),
        Value::String(s) => int_prefix(s),
        _ => None,
    }
}

fn coerce_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => float_prefix(s),
        _ => None,
    }
}

fn coerce_date(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => n.as_f64().and_then(datetime_from_numeric),
        Value::String(s) => parse_date_str(s.trim()),
        _ => None,
    }
}

fn truncate_to_i64(f: f64) -> Option<i64> {
    // i64::MAX is not exactly representable; stay strictly inside the range.
    if f.is_finite() && f.abs() < 9.2e18 {
        Some(f.trunc() as i64)
    } else {
        None
    }
}

/// Leading-integer parse: `" 42abc"` -> 42, `"3.9"` -> 3, `"abc"` -> None.
fn int_prefix(s: &str) -> Option<i64> {
    let s = s.trim();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let magnitude: i64 = rest[..digits].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Leading-float parse: `"71.5kg"` -> 71.5, `"1e3x"` -> 1000.0, `"kg"` -> None.
fn float_prefix(s: &str) -> Option<f64> {
    let s = s.trim();
    let bytes = s.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_digits = digits_from(end);
    end += int_digits;
    let mut mantissa_digits = int_digits;

    if bytes.get(end) == Some(&b'.') {
        let frac_digits = digits_from(end + 1);
        if frac_digits > 0 {
            end += 1 + frac_digits;
            mantissa_digits += frac_digits;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = digits_from(exp_end);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse::<f64>().ok().filter(|f| f.is_finite())
}

fn parse_date_str(s: &str) -> Option<DateTime<Utc>> {
    if s.is_empty() {
        return None;
    }

    if let Some(caps) = MS_DATE_WRAPPER.captures(s) {
        return caps[1].parse::<f64>().ok().and_then(datetime_from_numeric);
    }

    if DIGITS_ONLY.is_match(s) {
        return s.parse::<f64>().ok().and_then(datetime_from_numeric);
    }

    if let Some(caps) = ISO_8601.captures(s) {
        return parse_iso_captures(&caps);
    }

    DateTime::parse_from_rfc2822(s)
        .or_else(|_| DateTime::parse_from_rfc3339(s))
        .ok()
        .map(|d| d.with_timezone(&Utc))
}

fn parse_iso_captures(caps: &regex::Captures<'_>) -> Option<DateTime<Utc>> {
    let number = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());

    let date = NaiveDate::from_ymd_opt(caps[1].parse().ok()?, number(2)?, number(3)?)?;
    let nanos = match caps.get(7) {
        Some(fraction) => {
            // Pad or cut the fraction to nanosecond precision.
            let digits: String = fraction
                .as_str()
                .chars()
                .chain(std::iter::repeat('0'))
                .take(9)
                .collect();
            digits.parse().ok()?
        }
        None => 0,
    };
    let time = NaiveTime::from_hms_nano_opt(
        number(4).unwrap_or(0),
        number(5).unwrap_or(0),
        number(6).unwrap_or(0),
        nanos,
    )?;

    let offset = match caps.get(8).map(|m| m.as_str()) {
        None | Some("Z") => FixedOffset::east_opt(0)?,
        Some(text) => {
            let sign = if text.starts_with('-') { -1 } else { 1 };
            let digits: String = text[1..].chars().filter(char::is_ascii_digit).collect();
            let hours: i32 = digits[..2].parse().ok()?;
            let minutes: i32 = digits[2..].parse().ok()?;
            FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))?
        }
    };

    offset
        .from_local_datetime(&date.and_time(time))
        .single()
        .map(|d| d.with_timezone(&Utc))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn roundtrip(value: FieldValue) -> FieldValue {
        let ty = value.declared_type();
        let raw = json!({ "k": serialize_type(&value, ty, &raw_default(ty)) });
        parse_field(&raw, &["k"], ty, FieldValue::zero(ty))
    }

    proptest! {
        #[test]
        fn string_roundtrip(s in "[A-Za-z0-9 ]*[A-Za-z0-9][A-Za-z0-9 ]*") {
            prop_assert_eq!(roundtrip(FieldValue::Str(s.clone())), FieldValue::Str(s));
        }

        #[test]
        fn int_roundtrip(i in any::<i64>()) {
            prop_assert_eq!(roundtrip(FieldValue::Int(i)), FieldValue::Int(i));
        }

        #[test]
        fn float_roundtrip(f in -1.0e12f64..1.0e12) {
            prop_assert_eq!(roundtrip(FieldValue::Float(f)), FieldValue::Float(f));
        }

        #[test]
        fn date_roundtrip(millis in -2_000_000_000_000i64..4_000_000_000_000) {
            let date = DateTime::<Utc>::from_timestamp_millis(millis);
            prop_assert!(date.is_some());
            prop_assert_eq!(roundtrip(FieldValue::Date(date)), FieldValue::Date(date));
        }

        #[test]
        fn coercion_never_panics(s in ".*") {
            let raw = json!({ "k": s });
            let _ = parse_string(&raw, &["k"], "");
            let _ = parse_int(&raw, &["k"], 0);
            let _ = parse_float(&raw, &["k"], 0.0);
            let _ = parse_date(&raw, &["k"], None);
        }
    }
}
