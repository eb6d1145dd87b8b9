//! Field lookup and per-type cell formatting.

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde_json::{Map, Value};

/// Format used for datetime cells.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Look up a value by dotted path.
///
/// `"odds.home"` walks into nested objects; numeric segments index arrays.
/// Any missing segment yields `None`.
pub fn lookup<'a>(fields: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut current = fields.get(segments.next()?)?;
    for segment in segments {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Plain-text rendering of a JSON value.
///
/// Strings are unquoted, null is empty.
pub fn to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Numeric reading of a value; numeric strings are accepted.
pub fn to_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', "").parse().ok(),
        _ => None,
    }
}

/// Format an amount with thousand separators.
///
/// Integral amounts print without decimals, others with two.
pub fn format_currency(amount: f64) -> String {
    let negative = amount < 0.0;
    let amount = amount.abs();
    let rounded = (amount * 100.0).round() / 100.0;
    let whole = rounded.trunc() as u64;
    let cents = ((rounded - rounded.trunc()) * 100.0).round() as u64;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative && (whole > 0 || cents > 0) {
        "-"
    } else {
        ""
    };
    if cents == 0 {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{cents:02}")
    }
}

/// Format a datetime value.
///
/// Accepts RFC 3339 strings and naive `YYYY-MM-DD HH:MM:SS` / `T`-separated
/// strings. Unparseable input is shown verbatim.
pub fn format_datetime(value: &Value) -> String {
    let raw = to_text(value);
    if let Ok(dt) = DateTime::<FixedOffset>::parse_from_rfc3339(&raw) {
        return dt.format(DATETIME_FORMAT).to_string();
    }
    for pattern in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&raw, pattern) {
            return dt.format(DATETIME_FORMAT).to_string();
        }
    }
    raw
}

/// Whether a looked-up value is missing or null.
pub fn is_blank(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

/// Ordering used for sorting cell values.
///
/// Nulls and missing values sort last; numbers compare numerically, strings
/// lexicographically, and mismatched kinds by a fixed kind rank.
pub fn compare(a: Option<&Value>, b: Option<&Value>) -> std::cmp::Ordering {
    use std::cmp::Ordering;

    fn rank(value: Option<&Value>) -> u8 {
        match value {
            Some(Value::Bool(_)) => 0,
            Some(Value::Number(_)) => 1,
            Some(Value::String(_)) => 2,
            Some(Value::Array(_)) | Some(Value::Object(_)) => 3,
            Some(Value::Null) | None => 4,
        }
    }

    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}
