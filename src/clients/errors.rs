//! Error types for the request pipeline.
//!
//! Failures fall into three categories that callers can match on
//! independently:
//!
//! - [`InvalidCallError`]: the caller broke a function's argument contract.
//!   Always raised before any network activity.
//! - [`ApiError`]: Traffic Ops reported a failure, through error-level alerts
//!   or an error status.
//! - [`HttpError::Network`]: the transport failed. Passed through from
//!   `reqwest` untouched.
//!
//! # Example
//!
//! ```rust,ignore
//! use traffic_ops::HttpError;
//!
//! match client.request(request).await {
//!     Ok(response) => println!("{}", response.body),
//!     Err(HttpError::InvalidCall(e)) => eprintln!("usage: {e}"),
//!     Err(HttpError::Api(e)) => eprintln!("Traffic Ops said {}: {}", e.response_code, e.message),
//!     Err(HttpError::Network(e)) => eprintln!("network: {e}"),
//! }
//! ```

use std::collections::HashMap;

use thiserror::Error;

use crate::alerts::{error_message, Alert};
use crate::clients::HttpResponse;

/// Message used for failed responses that carry no alerts to report.
pub const GENERIC_ERROR_RESPONSE: &str = "returned error response";

/// A caller violated a function's argument contract.
///
/// This never comes from talking to Traffic Ops.
///
/// # Example
///
/// ```rust
/// use traffic_ops::InvalidCallError;
///
/// let error = InvalidCallError::missing_params("updateServer", &["id", "server"]);
/// assert_eq!(
///     error.to_string(),
///     "invalid call signature to updateServer - 'id', and 'server' must be given"
/// );
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct InvalidCallError {
    /// Description of the violation.
    pub message: String,
}

impl InvalidCallError {
    /// Creates an error from a plain message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Creates an error naming the parameters `method` was called without.
    #[must_use]
    pub fn missing_params(method: &str, params: &[&str]) -> Self {
        let quoted: Vec<String> = params.iter().map(|p| format!("'{p}'")).collect();
        let list = match quoted.split_last() {
            None => String::new(),
            Some((only, [])) => only.clone(),
            Some((last, rest)) => format!("{}, and {last}", rest.join(", ")),
        };

        Self::new(format!(
            "invalid call signature to {method} - {list} must be given"
        ))
    }

    /// The error raised when an authenticated call is made before login.
    #[must_use]
    pub fn not_authenticated() -> Self {
        Self::new("client is not authenticated - call login before making requests")
    }
}

/// Traffic Ops reported a failure.
///
/// Every construction path yields the same shape: `response_code` is `0`
/// and `headers` is empty when no response is at hand, and `alerts` is
/// empty when the failure was not alert-derived.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ApiError {
    /// Human-readable description.
    pub message: String,
    /// HTTP status of the originating response, or `0`.
    pub response_code: u16,
    /// Headers of the originating response (lower-cased names).
    pub headers: HashMap<String, Vec<String>>,
    /// The alerts that triggered the error.
    pub alerts: Vec<Alert>,
}

impl ApiError {
    /// Creates an error from a bare message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            response_code: 0,
            headers: HashMap::new(),
            alerts: Vec::new(),
        }
    }

    /// Creates an error from a list of alerts.
    ///
    /// The message is the `"; "`-joined text of the error-level alerts.
    #[must_use]
    pub fn from_alerts(alerts: Vec<Alert>) -> Self {
        Self {
            message: error_message(&alerts),
            alerts,
            ..Self::new(String::new())
        }
    }

    /// Creates an error from a single alert.
    #[must_use]
    pub fn from_alert(alert: Alert) -> Self {
        Self::from_alerts(vec![alert])
    }

    /// Creates an error from a full response.
    ///
    /// Alerts in the response's envelope provide the message when there are
    /// any; otherwise it is derived from the status line.
    #[must_use]
    pub fn from_response(response: &HttpResponse) -> Self {
        let alerts = response.alerts();
        let base = if alerts.is_empty() {
            Self::new(status_line(response.code))
        } else {
            Self::from_alerts(alerts)
        };
        base.with_response_meta(response.code, response.headers.clone())
    }

    /// Creates the error a binary endpoint raises for a failed response.
    #[must_use]
    pub fn error_response(
        path: &str,
        response_code: u16,
        headers: HashMap<String, Vec<String>>,
    ) -> Self {
        Self::new(format!("{path} {GENERIC_ERROR_RESPONSE}"))
            .with_response_meta(response_code, headers)
    }

    /// Attaches the status code and headers of the originating response.
    #[must_use]
    pub fn with_response_meta(
        mut self,
        response_code: u16,
        headers: HashMap<String, Vec<String>>,
    ) -> Self {
        self.response_code = response_code;
        self.headers = headers;
        self
    }
}

fn status_line(code: u16) -> String {
    let reason = reqwest::StatusCode::from_u16(code)
        .ok()
        .and_then(|status| status.canonical_reason());
    match reason {
        Some(reason) => format!("{code} {reason}"),
        None => code.to_string(),
    }
}

/// Unified error type for the request pipeline.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The call was rejected locally.
    #[error(transparent)]
    InvalidCall(#[from] InvalidCallError),

    /// Traffic Ops reported a failure.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::AlertLevel;
    use serde_json::json;

    #[test]
    fn test_missing_single_param_omits_list_punctuation() {
        let error = InvalidCallError::missing_params("updateCDN", &["cdn"]);
        assert_eq!(
            error.to_string(),
            "invalid call signature to updateCDN - 'cdn' must be given"
        );
    }

    #[test]
    fn test_missing_many_params_lists_them() {
        let error = InvalidCallError::missing_params("assignServers", &["dsID", "servers", "replace"]);
        assert_eq!(
            error.to_string(),
            "invalid call signature to assignServers - 'dsID', 'servers', and 'replace' must be given"
        );
    }

    #[test]
    fn test_invalid_call_from_plain_message() {
        assert_eq!(InvalidCallError::new("nope").to_string(), "nope");
    }

    #[test]
    fn test_api_error_from_message_has_defaults() {
        let error = ApiError::new("boom");
        assert_eq!(error.message, "boom");
        assert_eq!(error.response_code, 0);
        assert!(error.headers.is_empty());
        assert!(error.alerts.is_empty());
    }

    #[test]
    fn test_api_error_from_single_alert() {
        let error = ApiError::from_alert(Alert::new(AlertLevel::Error, "no such CDN"));
        assert_eq!(error.to_string(), "no such CDN");
        assert_eq!(error.alerts.len(), 1);
    }

    #[test]
    fn test_api_error_from_response_with_alerts() {
        let response = HttpResponse::new(
            404,
            HashMap::new(),
            json!({"alerts": [{"level": "error", "text": "not found"}, {"level": "info", "text": "x"}]}),
        );
        let error = ApiError::from_response(&response);
        assert_eq!(error.message, "not found");
        assert_eq!(error.response_code, 404);
        assert_eq!(error.alerts.len(), 2);
    }

    #[test]
    fn test_api_error_from_response_without_alerts_uses_status_line() {
        let response = HttpResponse::new(503, HashMap::new(), json!({}));
        let error = ApiError::from_response(&response);
        assert_eq!(error.message, "503 Service Unavailable");
        assert_eq!(error.response_code, 503);
        assert!(error.alerts.is_empty());
    }

    #[test]
    fn test_status_line_for_unknown_code() {
        assert_eq!(status_line(599), "599");
    }

    #[test]
    fn test_binary_error_response_message() {
        let error = ApiError::error_response("dbdump", 500, HashMap::new());
        assert_eq!(error.message, "dbdump returned error response");
        assert_eq!(error.response_code, 500);
    }

    #[test]
    fn test_http_error_is_transparent() {
        let error: HttpError = ApiError::new("remote said no").into();
        assert_eq!(error.to_string(), "remote said no");
        assert!(matches!(error, HttpError::Api(_)));

        let error: HttpError = InvalidCallError::not_authenticated().into();
        assert!(matches!(error, HttpError::InvalidCall(_)));
    }
}
