//! HTTP response types for the Traffic Ops client.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::alerts::Alert;

/// The `{response, alerts?}` wrapper nearly every endpoint returns.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// The endpoint's payload.
    pub response: T,
    /// Diagnostics sent alongside the payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alerts: Option<Vec<Alert>>,
}

/// The body of the `ping` endpoint, which is not enveloped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PingResponse {
    /// Always `"pong"` from a healthy server.
    pub ping: String,
}

/// A decoded response from Traffic Ops.
///
/// Header names are lower-cased; a header may carry several values.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers.
    pub headers: HashMap<String, Vec<String>>,
    /// The decoded body, with date fields revived.
    pub body: serde_json::Value,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`.
    #[must_use]
    pub const fn new(
        code: u16,
        headers: HashMap<String, Vec<String>>,
        body: serde_json::Value,
    ) -> Self {
        Self {
            code,
            headers,
            body,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the alerts in the body's envelope.
    ///
    /// A missing `alerts` member, or one that is not an array, yields an
    /// empty list. Entries that do not decode as an [`Alert`] are skipped.
    #[must_use]
    pub fn alerts(&self) -> Vec<Alert> {
        self.body
            .get("alerts")
            .and_then(serde_json::Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|entry| Alert::deserialize(entry).ok())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Deserializes the body as an [`Envelope`].
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the body does not have the
    /// envelope shape or `T` does not match the payload.
    pub fn envelope<T: DeserializeOwned>(&self) -> Result<Envelope<T>, serde_json::Error> {
        Envelope::deserialize(&self.body)
    }

    /// Deserializes the whole body as `T`, for endpoints without an envelope.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.body)
    }

    /// Returns all values of a header.
    #[must_use]
    pub fn header_values(&self, name: &str) -> &[String] {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// A response from an endpoint that returns raw bytes.
#[derive(Clone, Debug)]
pub struct BinaryResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers.
    pub headers: HashMap<String, Vec<String>>,
    /// The raw body.
    pub body: Vec<u8>,
}
