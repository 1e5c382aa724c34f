//! Lenient accessors over raw platform JSON.
//!
//! Platform payloads disagree on types (YouTube sends counters as strings,
//! Reddit sends timestamps as floats), so every accessor accepts the forms
//! seen in practice and returns `None` for anything else.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

/// Follow a path of object keys.
pub fn path<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .try_fold(value, |current, key| current.get(key))
        .filter(|found| !found.is_null())
}

/// A non-negative counter from a number or a numeric string.
pub fn count(value: &Value, keys: &[&str]) -> Option<u64> {
    match path(value, keys)? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(float_to_u64)),
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed.parse::<u64>().ok().or_else(|| {
                trimmed
                    .parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite() && *f >= 0.0)
                    .map(float_to_u64)
            })
        }
        _ => None,
    }
}

/// Like [`count`], treating a missing value as zero.
pub fn count_or_zero(value: &Value, keys: &[&str]) -> u64 {
    count(value, keys).unwrap_or(0)
}

/// A finite float from a number or a numeric string.
pub fn float(value: &Value, keys: &[&str]) -> Option<f64> {
    let parsed = match path(value, keys)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|f| f.is_finite())
}

/// A non-empty string.
pub fn string(value: &Value, keys: &[&str]) -> Option<String> {
    match path(value, keys)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    }
}

pub fn boolean(value: &Value, keys: &[&str]) -> bool {
    matches!(path(value, keys), Some(Value::Bool(true)))
}

/// String items of an array, or the comma-separated parts of a string.
pub fn string_list(value: &Value, keys: &[&str]) -> Vec<String> {
    match path(value, keys) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
                Value::Object(obj) => obj
                    .get("title")
                    .or_else(|| obj.get("name"))
                    .and_then(Value::as_str)
                    .map(str::to_string),
                _ => None,
            })
            .collect(),
        Some(Value::String(joined)) => joined
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

/// Character count of a string field; zero when absent.
pub fn char_len(value: &Value, keys: &[&str]) -> u64 {
    string(value, keys).map_or(0, |s| s.chars().count() as u64)
}

/// Parse a timestamp: Unix seconds (number or numeric string), RFC 3339,
/// naive `YYYY-MM-DDTHH:MM:SS`, `YYYY-MM-DD` or `YYYYMMDD`.
pub fn timestamp(value: &Value, keys: &[&str]) -> Option<DateTime<Utc>> {
    match path(value, keys)? {
        Value::Number(n) => n.as_f64().and_then(unix_seconds),
        Value::String(s) => parse_date_str(s),
        _ => None,
    }
}

pub fn parse_date_str(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    for fmt in ["%Y-%m-%d", "%Y%m%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return date.and_hms_opt(0, 0, 0).map(|naive| Utc.from_utc_datetime(&naive));
        }
    }
    if s.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return s.parse::<f64>().ok().and_then(unix_seconds);
    }
    None
}

fn unix_seconds(secs: f64) -> Option<DateTime<Utc>> {
    if !secs.is_finite() {
        return None;
    }
    #[allow(clippy::cast_possible_truncation)]
    let whole = secs.trunc() as i64;
    DateTime::from_timestamp(whole, 0)
}

/// Hours elapsed from `then` to `now`; negative when `then` is in the future.
pub fn hours_between(then: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let secs = (now - then).num_seconds() as f64;
    secs / 3600.0
}

/// Whole days elapsed from `then` to `now`, never negative.
pub fn whole_days_between(then: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    u64::try_from((now - then).num_days()).unwrap_or(0)
}

/// Parse an ISO-8601 duration such as `PT1M30S` or `P1DT2H` into seconds.
pub fn parse_iso8601_duration(raw: &str) -> Option<u64> {
    let rest = raw.trim().strip_prefix('P')?;
    let mut total: u64 = 0;
    let mut in_time = false;
    let mut digits = String::new();
    let mut saw_component = false;

    for c in rest.chars() {
        match c {
            'T' => in_time = true,
            '0'..='9' => digits.push(c),
            unit => {
                let amount: u64 = digits.parse().ok()?;
                digits.clear();
                let scale = match (unit, in_time) {
                    ('W', false) => 7 * 86_400,
                    ('D', false) => 86_400,
                    ('H', true) => 3_600,
                    ('M', true) => 60,
                    ('S', true) => 1,
                    _ => return None,
                };
                total = total.checked_add(amount.checked_mul(scale)?)?;
                saw_component = true;
            }
        }
    }

    if !digits.is_empty() || !saw_component {
        return None;
    }
    Some(total)
}

/// Stable 16-hex-character id for a web article, derived from its URL.
#[must_use]
pub fn generate_article_id(url: &str) -> String {
    let digest = format!("{:x}", Sha256::digest(url.as_bytes()));
    digest[..16].to_string()
}

/// Insert `value` under `key` unless it is null.
pub fn put(map: &mut Map<String, Value>, key: &str, value: Option<Value>) {
    if let Some(v) = value.filter(|v| !v.is_null()) {
        map.insert(key.to_string(), v);
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn float_to_u64(f: f64) -> u64 {
    f.trunc() as u64
}
