//! Alerts and alert classification.
//!
//! Traffic Ops reports diagnostics as a list of severity-tagged alerts next
//! to the `response` field of its envelope. This module provides:
//!
//! - [`Alert`] and [`AlertLevel`]: the wire types
//! - [`AlertLogger`]: the four-channel logging seam
//! - [`AlertClassifier`]: logs alerts and decides whether they raise an [`ApiError`]
//!
//! # Example
//!
//! ```rust
//! use traffic_ops::{Alert, AlertClassifier, AlertLevel, AlertSource};
//!
//! let classifier = AlertClassifier::new(false, None, true);
//! let alerts = vec![
//!     Alert::new(AlertLevel::Warning, "deprecated field"),
//!     Alert::new(AlertLevel::Error, "bad name"),
//! ];
//!
//! let err = classifier.check(AlertSource::Alerts(&alerts)).unwrap_err();
//! assert_eq!(err.message, "bad name");
//! ```

mod logger;

pub use logger::{AlertLogger, LogChannel, TracingLogger};

#[cfg(test)]
pub(crate) use logger::RecordingLogger;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};

use crate::clients::{ApiError, HttpResponse};
use crate::config::ClientConfig;

/// Message used when error-level alerts carry no text.
pub const ERROR_NOT_REPORTED: &str = "error not reported";

/// The severity of an [`Alert`].
///
/// Deserialized case-insensitively. Any severity outside the four known
/// ones is kept verbatim in [`AlertLevel::Other`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AlertLevel {
    /// The operation succeeded.
    Success,
    /// Informational message.
    Info,
    /// Something the caller should look at.
    Warning,
    /// The operation failed.
    Error,
    /// A severity this client does not know.
    Other(String),
}

impl AlertLevel {
    /// Returns the wire representation of this level.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Other(other) => other,
        }
    }
}

impl From<String> for AlertLevel {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "success" => Self::Success,
            "info" => Self::Info,
            "warning" => Self::Warning,
            "error" => Self::Error,
            _ => Self::Other(value),
        }
    }
}

impl From<AlertLevel> for String {
    fn from(level: AlertLevel) -> Self {
        level.as_str().to_string()
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A diagnostic message returned by Traffic Ops.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    /// The alert's severity.
    pub level: AlertLevel,
    /// Human-readable text. Missing or `null` text decodes as empty.
    #[serde(default, deserialize_with = "text_or_empty")]
    pub text: String,
}

fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Alert {
    /// Creates a new alert.
    #[must_use]
    pub fn new(level: AlertLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }

    /// Returns `true` if this is an error-level alert.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.level == AlertLevel::Error
    }
}

/// Joins the text of every error-level alert with `"; "`.
///
/// Returns [`ERROR_NOT_REPORTED`] when no error alert has any text.
#[must_use]
pub fn error_message(alerts: &[Alert]) -> String {
    let texts: Vec<&str> = alerts
        .iter()
        .filter(|alert| alert.is_error() && !alert.text.is_empty())
        .map(|alert| alert.text.as_str())
        .collect();

    if texts.is_empty() {
        ERROR_NOT_REPORTED.to_string()
    } else {
        texts.join("; ")
    }
}

/// What the classifier inspects.
#[derive(Clone, Copy, Debug)]
pub enum AlertSource<'a> {
    /// A bare list of alerts. Errors raised from it carry no status or headers.
    Alerts(&'a [Alert]),
    /// A full response whose body is an envelope.
    Response(&'a HttpResponse),
}

/// Logs alerts and raises error-level ones.
#[derive(Clone, Debug)]
pub struct AlertClassifier {
    logger: Option<Arc<dyn AlertLogger>>,
    raise_error_alerts: bool,
}

impl AlertClassifier {
    /// Creates a classifier.
    ///
    /// When `alert_logging` is on and `logger` is `None`, alerts go to
    /// [`TracingLogger`].
    #[must_use]
    pub fn new(
        alert_logging: bool,
        logger: Option<Arc<dyn AlertLogger>>,
        raise_error_alerts: bool,
    ) -> Self {
        let logger = alert_logging.then(|| {
            logger.unwrap_or_else(|| Arc::new(TracingLogger) as Arc<dyn AlertLogger>)
        });
        Self {
            logger,
            raise_error_alerts,
        }
    }

    /// Creates a classifier from a client configuration.
    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(
            config.alert_logging(),
            config.logger().cloned(),
            config.raise_error_alerts(),
        )
    }

    /// Returns whether error-level alerts raise.
    #[must_use]
    pub const fn raises_errors(&self) -> bool {
        self.raise_error_alerts
    }

    /// Logs every alert in `source`, then raises if any is an error.
    ///
    /// Nothing is logged or raised when there are no alerts.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] when error alerts are raised and at least one
    /// alert has [`AlertLevel::Error`]. Errors from a
    /// [`AlertSource::Response`] carry its status code and headers.
    pub fn check(&self, source: AlertSource<'_>) -> Result<(), ApiError> {
        let owned;
        let alerts: &[Alert] = match source {
            AlertSource::Alerts(alerts) => alerts,
            AlertSource::Response(response) => {
                owned = response.alerts();
                &owned
            }
        };

        if alerts.is_empty() {
            return Ok(());
        }

        if let Some(logger) = &self.logger {
            for alert in alerts {
                LogChannel::for_level(&alert.level).dispatch(logger.as_ref(), &alert.text);
            }
        }

        if !self.raise_error_alerts || !alerts.iter().any(Alert::is_error) {
            return Ok(());
        }

        let error = ApiError::from_alerts(alerts.to_vec());
        Err(match source {
            AlertSource::Alerts(_) => error,
            AlertSource::Response(response) => {
                error.with_response_meta(response.code, response.headers.clone())
            }
        })
    }
}
