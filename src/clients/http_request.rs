//! HTTP request types for the Traffic Ops client.
//!
//! This module provides the [`HttpRequest`] type and its builder. Paths are
//! relative to `<base>/api/<version>/` and never include either.

use std::collections::HashMap;
use std::fmt;

use crate::clients::errors::InvalidCallError;
use crate::dates::{DateKeySpec, DEFAULT_DATE_KEY};

/// HTTP methods used by the Traffic Ops API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for updating resources.
    Put,
    /// HTTP PATCH method for partial updates.
    Patch,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    pub(crate) fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Patch => write!(f, "PATCH"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// An HTTP request to be sent to Traffic Ops.
///
/// # Example
///
/// ```rust
/// use traffic_ops::{DateKeySpec, HttpMethod, HttpRequest};
/// use serde_json::json;
///
/// let get = HttpRequest::builder(HttpMethod::Get, "/cdns")
///     .query_param("name", "ALL")
///     .build()
///     .unwrap();
/// assert_eq!(get.path, "cdns");
///
/// let post = HttpRequest::builder(HttpMethod::Post, "server_capabilities")
///     .body(json!({"name": "RAM"}))
///     .date_keys(DateKeySpec::new().date_string("lastUpdated"))
///     .build()
///     .unwrap();
/// assert!(post.body.is_some());
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The path relative to `api/<version>/`, without leading slashes.
    pub path: String,
    /// The JSON request body, if any.
    pub body: Option<serde_json::Value>,
    /// Query parameters to append to the URL.
    pub query: Option<HashMap<String, String>>,
    /// Additional headers to include in the request.
    pub extra_headers: Option<HashMap<String, String>>,
    /// Fields to revive as dates in the response body.
    pub date_keys: DateKeySpec,
    /// Whether the request needs a session credential.
    pub requires_auth: bool,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, path)
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCallError`] if the path is empty.
    pub fn verify(&self) -> Result<(), InvalidCallError> {
        if self.path.trim().is_empty() {
            return Err(InvalidCallError::new(format!(
                "invalid call to {} - request path cannot be empty",
                self.http_method
            )));
        }
        Ok(())
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    path: String,
    body: Option<serde_json::Value>,
    query: Option<HashMap<String, String>>,
    extra_headers: Option<HashMap<String, String>>,
    date_keys: Option<DateKeySpec>,
    requires_auth: bool,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            http_method: method,
            path: path.into(),
            body: None,
            query: None,
            extra_headers: None,
            date_keys: None,
            requires_auth: true,
        }
    }

    /// Sets the JSON request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets all query parameters at once.
    #[must_use]
    pub fn query(mut self, query: HashMap<String, String>) -> Self {
        self.query = Some(query);
        self
    }

    /// Adds a single query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Adds a single extra header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Overrides which response fields are revived as dates.
    ///
    /// Without an override, `lastUpdated` is treated as a date string.
    #[must_use]
    pub fn date_keys(mut self, spec: DateKeySpec) -> Self {
        self.date_keys = Some(spec);
        self
    }

    /// Marks the request as callable without a session credential.
    #[must_use]
    pub const fn unauthenticated(mut self) -> Self {
        self.requires_auth = false;
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCallError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidCallError> {
        let request = HttpRequest {
            http_method: self.http_method,
            path: self.path.trim_start_matches('/').to_string(),
            body: self.body,
            query: self.query,
            extra_headers: self.extra_headers,
            date_keys: self
                .date_keys
                .unwrap_or_else(|| DateKeySpec::new().date_string(DEFAULT_DATE_KEY)),
            requires_auth: self.requires_auth,
        };
        request.verify()?;
        Ok(request)
    }
}
