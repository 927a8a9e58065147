//! Date normalization
//!
//! Recognizes ISO-8601 strings and Unix timestamps and turns them into
//! `Value::Date`. Three entry points:
//!
//! - [`parse_iso`]: strict ISO-8601 parsing
//! - [`to_date`]: permissive coercion of numbers, strings and dates
//! - [`traverse`]: in-place replacement of every ISO string in a tree

use crate::value::Value;
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use regex::Regex;
use std::sync::OnceLock;

/// Numbers below this are Unix seconds, at or above it milliseconds
const SECONDS_THRESHOLD: f64 = 31_557_600_000.0;

fn iso_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^(\d{4})(?:-?(\d{2})(?:-?(\d{2}))?)?(?:([ T])(\d{2}):?(\d{2})(?::?(\d{2})(?:[,\.](\d+))?)?(?:(Z)|([+\-])(\d{2})(?::?(\d{2}))?)?)?$",
        )
        .unwrap()
    })
}

/// Whether `s` looks like an ISO-8601 date
///
/// In strict mode a bare four-digit year does not count.
pub fn is_iso(s: &str, strict: bool) -> bool {
    if strict && s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    iso_regex().is_match(s)
}

/// Parse an ISO-8601 string; strings without an offset are read as UTC
pub fn parse_iso(s: &str) -> Option<DateTime<Utc>> {
    let caps = iso_regex().captures(s)?;
    let part = |i: usize, default: u32| -> Option<u32> {
        match caps.get(i) {
            Some(m) => m.as_str().parse().ok(),
            None => Some(default),
        }
    };

    let year: i32 = caps.get(1)?.as_str().parse().ok()?;
    let millis = match caps.get(8) {
        Some(m) => {
            let digits = &m.as_str()[..m.as_str().len().min(3)];
            format!("{digits:0<3}").parse().ok()?
        }
        None => 0,
    };

    let naive = NaiveDate::from_ymd_opt(year, part(2, 1)?, part(3, 1)?)?.and_hms_milli_opt(
        part(5, 0)?,
        part(6, 0)?,
        part(7, 0)?,
        millis,
    )?;

    let offset_minutes = match caps.get(10) {
        Some(sign) => {
            let minutes = i64::from(part(11, 0)? * 60 + part(12, 0)?);
            if sign.as_str() == "-" {
                -minutes
            } else {
                minutes
            }
        }
        None => 0,
    };

    Some(Utc.from_utc_datetime(&(naive - Duration::minutes(offset_minutes))))
}

fn from_millis(ms: f64) -> Option<DateTime<Utc>> {
    if !ms.is_finite() {
        return None;
    }
    Utc.timestamp_millis_opt(ms as i64).single()
}

fn parse_string(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if is_iso(s, true) {
        return parse_iso(s);
    }

    if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
        match s.len() {
            13 => return from_millis(s.parse().ok()?),
            10 => return from_millis(s.parse::<f64>().ok()? * 1000.0),
            4 => return Utc.with_ymd_and_hms(s.parse().ok()?, 1, 1, 0, 0, 0).single(),
            _ => return None,
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%m/%d/%Y")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Permissively coerce a value into a date
///
/// Dates pass through. Numbers are Unix seconds when small enough to be,
/// milliseconds otherwise. Strings are tried as ISO-8601, digit-only
/// timestamps, a bare year, RFC 3339, RFC 2822 and `MM/DD/YYYY`.
pub fn to_date(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Date(d) => Some(*d),
        Value::Number(n) => {
            let n = n.as_f64()?;
            from_millis(if n < SECONDS_THRESHOLD { n * 1000.0 } else { n })
        }
        Value::String(s) => parse_string(s),
        _ => None,
    }
}

/// The coerced date, or the value unchanged when it is not date-like
pub fn coerce(value: Value) -> Value {
    match to_date(&value) {
        Some(date) => Value::Date(date),
        None => value,
    }
}

/// Replace every nested strict ISO-8601 string with its parsed date
pub fn traverse(value: &mut Value) {
    match value {
        Value::Array(items) => items.iter_mut().for_each(traverse),
        Value::Object(map) => map.values_mut().for_each(traverse),
        Value::String(s) => {
            let parsed = if is_iso(s, true) { parse_iso(s) } else { None };
            if let Some(date) = parsed {
                *value = Value::Date(date);
            }
        }
        _ => {}
    }
}
