//! Typed date values for revived response fields.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{format_date, parse_date_string};

/// A date read from a Traffic Ops response.
///
/// Deserializing never fails on a bad date. A value that does not name a
/// real instant (garbage, or an impossible calendar date such as
/// February 30th) becomes an `ApiDate` whose [`is_valid`](Self::is_valid)
/// is `false`; the raw text is kept.
///
/// # Example
///
/// ```rust
/// use traffic_ops::ApiDate;
///
/// let good: ApiDate = serde_json::from_str(r#""2022-07-18T00:00:00.000Z""#).unwrap();
/// assert!(good.is_valid());
///
/// let bad: ApiDate = serde_json::from_str(r#""2022-02-30 00:00:00+00""#).unwrap();
/// assert!(!bad.is_valid());
/// assert_eq!(bad.raw(), "2022-02-30 00:00:00+00");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ApiDate {
    raw: String,
    date: Option<DateTime<Utc>>,
}

impl ApiDate {
    /// Parses `raw` with the same rules revival uses for date strings.
    #[must_use]
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let date = parse_date_string(&raw);
        Self { raw, date }
    }

    /// Returns `true` if the value names a real instant.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.date.is_some()
    }

    /// Returns the instant, if valid.
    #[must_use]
    pub const fn as_datetime(&self) -> Option<&DateTime<Utc>> {
        self.date.as_ref()
    }

    /// Returns the text this date was parsed from.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

impl From<DateTime<Utc>> for ApiDate {
    fn from(date: DateTime<Utc>) -> Self {
        Self {
            raw: format_date(&date),
            date: Some(date),
        }
    }
}

impl From<String> for ApiDate {
    fn from(raw: String) -> Self {
        Self::parse(raw)
    }
}

impl From<ApiDate> for String {
    fn from(date: ApiDate) -> Self {
        date.date.as_ref().map_or(date.raw, format_date)
    }
}

impl fmt::Display for ApiDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.date {
            Some(date) => f.write_str(&format_date(date)),
            None => f.write_str("Invalid Date"),
        }
    }
}
