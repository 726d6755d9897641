//! Date revival for decoded response bodies.
//!
//! Traffic Ops encodes timestamps two ways: as date strings (RFC 3339, or the
//! older `2022-07-18 00:00:00+00` form) and as Unix epoch numbers. Which
//! fields hold which encoding differs per endpoint, so every request carries
//! a [`DateKeySpec`] naming them.
//!
//! Revival rewrites each named field, at any depth, to a canonical RFC 3339
//! UTC string with millisecond precision. Typed callers deserialize these
//! into [`ApiDate`] or `chrono::DateTime<Utc>`.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use traffic_ops::DateKeySpec;
//!
//! let spec = DateKeySpec::new()
//!     .date_string("lastUpdated")
//!     .unix_with_multiplier("expirationDate", 1.0);
//!
//! let revived = spec.revive(json!({
//!     "response": [{"lastUpdated": "2022-07-18 00:00:00+00", "expirationDate": 1700000000}]
//! }));
//!
//! assert_eq!(revived["response"][0]["lastUpdated"], "2022-07-18T00:00:00.000Z");
//! assert_eq!(revived["response"][0]["expirationDate"], "1970-01-20T16:13:20.000Z");
//! ```

mod api_date;

pub use api_date::ApiDate;

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

/// Field whose values are treated as date strings when no spec is given.
pub const DEFAULT_DATE_KEY: &str = "lastUpdated";

/// Multiplier that turns Unix seconds into milliseconds.
pub const SECONDS_MULTIPLIER: f64 = 1000.0;

/// Names the response fields that hold dates, and how they are encoded.
///
/// A key in the date-string set takes precedence over the same key in the
/// Unix set whenever its value is a string.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DateKeySpec {
    date_string: HashSet<String>,
    unix: HashMap<String, f64>,
}

impl DateKeySpec {
    /// Creates an empty spec. Revival with it is a no-op.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Alias of [`DateKeySpec::new`] for call sites that opt out of revival.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Adds a field whose values are date strings.
    #[must_use]
    pub fn date_string(mut self, key: impl Into<String>) -> Self {
        self.date_string.insert(key.into());
        self
    }

    /// Adds a field whose values are Unix seconds.
    #[must_use]
    pub fn unix(self, key: impl Into<String>) -> Self {
        self.unix_with_multiplier(key, SECONDS_MULTIPLIER)
    }

    /// Adds a field whose values become milliseconds when multiplied by
    /// `multiplier`. Use `1.0` for values already in milliseconds.
    #[must_use]
    pub fn unix_with_multiplier(mut self, key: impl Into<String>, multiplier: f64) -> Self {
        self.unix.insert(key.into(), multiplier);
        self
    }

    /// Returns `true` if no fields are named.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.date_string.is_empty() && self.unix.is_empty()
    }

    /// Revives every named field in `value`, at any nesting depth.
    #[must_use]
    pub fn revive(&self, value: Value) -> Value {
        if self.is_empty() {
            return value;
        }
        self.revive_value(value)
    }

    fn revive_value(&self, value: Value) -> Value {
        match value {
            Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(key, value)| {
                        let value = self.revive_value(value);
                        let value = self.revive_field(&key, value);
                        (key, value)
                    })
                    .collect(),
            ),
            Value::Array(items) => {
                Value::Array(items.into_iter().map(|v| self.revive_value(v)).collect())
            }
            other => other,
        }
    }

    fn revive_field(&self, key: &str, value: Value) -> Value {
        if self.date_string.contains(key) {
            if let Value::String(raw) = &value {
                return parse_date_string(raw).map_or(value, date_value);
            }
        }

        if let Some(&multiplier) = self.unix.get(key) {
            return parse_unix(&value, multiplier).map_or(value, date_value);
        }

        value
    }
}

/// Renders a date the way revived fields hold it.
#[must_use]
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn date_value(date: DateTime<Utc>) -> Value {
    Value::String(format_date(&date))
}

/// Parses an RFC 3339 timestamp or the `<date> <time>±HH` form.
///
/// Returns `None` for anything that is not a real instant, including
/// well-formed strings that name an impossible calendar date.
#[must_use]
pub fn parse_date_string(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }

    let normalized = normalize_space_separated(raw)?;
    DateTime::parse_from_rfc3339(&normalized)
        .ok()
        .map(|date| date.with_timezone(&Utc))
}

/// Rewrites `2022-07-18 00:00:00+00` as `2022-07-18T00:00:00Z`.
///
/// `±HH` and `±HHMM` offsets are widened to `±HH:MM`.
fn normalize_space_separated(raw: &str) -> Option<String> {
    let (date, time) = raw.split_once(' ')?;
    let time = time.trim_start();
    if time.ends_with(['Z', 'z']) {
        return Some(format!("{date}T{time}"));
    }

    let offset_start = time.rfind(['+', '-'])?;
    let (clock, offset) = time.split_at(offset_start);

    let digits = offset[1..].bytes().all(|b| b.is_ascii_digit());
    let offset = match offset {
        "+00" | "-00" | "+00:00" | "-00:00" | "+0000" | "-0000" => "Z".to_string(),
        hours if digits && hours.len() == 3 => format!("{hours}:00"),
        compact if digits && compact.len() == 5 => {
            format!("{}:{}", &compact[..3], &compact[3..])
        }
        full => full.to_string(),
    };

    Some(format!("{date}T{clock}{offset}"))
}

/// Interprets a number, or a numeric string, as `value * multiplier`
/// milliseconds since the Unix epoch.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn parse_unix(value: &Value, multiplier: f64) -> Option<DateTime<Utc>> {
    let number = match value {
        Value::Number(number) => number.as_f64()?,
        Value::String(raw) => raw.trim().parse::<f64>().ok()?,
        _ => return None,
    };

    let millis = number * multiplier;
    if !millis.is_finite() {
        return None;
    }

    DateTime::<Utc>::from_timestamp_millis(millis.round() as i64)
}
