//! HTTP client for Traffic Ops communication.
//!
//! This module provides [`HttpClient`], the single path through which every
//! API call is issued. For each request it:
//!
//! 1. Refuses to proceed without a session credential, unless the request
//!    is marked unauthenticated
//! 2. Builds `<base>/api/<version>/<path>`
//! 3. Attaches the session cookie and user agent
//! 4. Decodes the JSON body and revives date fields
//! 5. Adopts any renewed session cookie from the response
//! 6. Runs the alert classifier over the result

use std::collections::HashMap;

use crate::alerts::{AlertClassifier, AlertSource};
use crate::auth::{extract_credential, LoginRequest, SessionState};
use crate::clients::errors::{ApiError, HttpError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::{BinaryResponse, HttpResponse};
use crate::config::{ApiVersion, ClientConfig};
use crate::dates::DateKeySpec;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for the Traffic Ops API.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`. Requests may run concurrently from one
/// client; they share its session credential.
///
/// # Example
///
/// ```rust,ignore
/// use traffic_ops::{BaseUrl, ClientConfig, HttpClient, HttpMethod, HttpRequest, LoginRequest};
///
/// let config = ClientConfig::builder()
///     .base_url(BaseUrl::new("https://trafficops.example.com")?)
///     .build()?;
/// let client = HttpClient::new(config)?;
///
/// client.login(&LoginRequest::password("admin", "twelve12")).await?;
///
/// let request = HttpRequest::builder(HttpMethod::Get, "cdns").build()?;
/// let response = client.request(request).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    config: ClientConfig,
    /// `<base>/api/<version>`, without a trailing slash.
    api_root: String,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
    session: SessionState,
    classifier: AlertClassifier,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates an unauthenticated client.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client cannot
    /// be created (for example, TLS initialization failure).
    pub fn new(config: ClientConfig) -> Result<Self, HttpError> {
        let client = reqwest::Client::builder().use_rustls_tls().build()?;
        Ok(Self::with_reqwest_client(config, client))
    }

    /// Creates an unauthenticated client on top of an existing reqwest client.
    ///
    /// Timeouts and proxies are configured on `client`.
    #[must_use]
    pub fn with_reqwest_client(config: ClientConfig, client: reqwest::Client) -> Self {
        let api_root = format!("{}/api/{}", config.base_url(), config.api_version());

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), config.user_agent().to_string());
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let classifier = AlertClassifier::from_config(&config);

        Self {
            client,
            config,
            api_root,
            default_headers,
            session: SessionState::new(),
            classifier,
        }
    }

    /// Returns the configuration this client was built with.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the API version every request is issued against.
    #[must_use]
    pub const fn api_version(&self) -> ApiVersion {
        self.config.api_version()
    }

    /// Returns `<base>/api/<version>`.
    #[must_use]
    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    /// Returns the absolute URL for a path relative to the API root.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.api_root, path.trim_start_matches('/'))
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns `true` once a login has succeeded.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Logs in and stores the session credential.
    ///
    /// Error-level alerts in the login response raise before the credential
    /// is looked at. A response that does not set the session cookie is
    /// always a failure. On failure any previously held credential is kept.
    ///
    /// # Errors
    ///
    /// - [`HttpError::InvalidCall`] if a required login field is empty
    /// - [`HttpError::Api`] if the login was rejected or set no cookie
    /// - [`HttpError::Network`] on transport failure
    pub async fn login(&self, login: &LoginRequest) -> Result<(), HttpError> {
        login.validate()?;

        let request = HttpRequest::builder(HttpMethod::Post, login.path())
            .body(login.body())
            .date_keys(DateKeySpec::none())
            .unauthenticated()
            .build()?;

        let response = self.execute(&request, None).await?;
        self.classifier
            .check(AlertSource::Alerts(&response.alerts()))?;

        let Some(credential) = extract_credential(&response.headers) else {
            return Err(ApiError {
                message: format!(
                    "login to {} failed: response did not set a session cookie",
                    self.config.base_url()
                ),
                ..ApiError::from_response(&response)
            }
            .into());
        };

        self.session.replace(credential);
        tracing::info!("Logged in to Traffic Ops at {}", self.config.base_url());
        Ok(())
    }

    /// Sends a request and returns the decoded response.
    ///
    /// The caller unwraps the envelope; see [`HttpResponse::envelope`].
    ///
    /// # Errors
    ///
    /// - [`HttpError::InvalidCall`] if the request is invalid, or needs a
    ///   credential and the client is not logged in. Nothing is sent.
    /// - [`HttpError::Api`] if error alerts are raised and the response has
    ///   an error-level alert or a non-2xx status
    /// - [`HttpError::Network`] on transport failure
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;
        let cookie = self.cookie_for(&request)?;

        let response = self.execute(&request, cookie).await?;
        if self.session.refresh_from(&response.headers) {
            tracing::debug!("Session credential renewed by {}", request.path);
        }

        self.classifier.check(AlertSource::Response(&response))?;

        if !response.is_ok() && self.classifier.raises_errors() {
            return Err(ApiError::from_response(&response).into());
        }

        Ok(response)
    }

    /// Sends a request to an endpoint whose body is raw bytes.
    ///
    /// Such endpoints cannot report alerts, so any non-2xx status raises
    /// an [`ApiError`] regardless of configuration.
    ///
    /// # Errors
    ///
    /// Same as [`request`](Self::request).
    pub async fn request_bytes(&self, request: HttpRequest) -> Result<BinaryResponse, HttpError> {
        request.verify()?;
        let cookie = self.cookie_for(&request)?;

        let res = self.send(&request, cookie).await?;
        let code = res.status().as_u16();
        let headers = Self::parse_response_headers(res.headers());
        let body = res.bytes().await?.to_vec();

        if self.session.refresh_from(&headers) {
            tracing::debug!("Session credential renewed by {}", request.path);
        }

        if !(200..=299).contains(&code) {
            return Err(ApiError::error_response(&request.path, code, headers).into());
        }

        Ok(BinaryResponse {
            code,
            headers,
            body,
        })
    }

    fn cookie_for(&self, request: &HttpRequest) -> Result<Option<String>, HttpError> {
        if request.requires_auth {
            Ok(Some(self.session.cookie_header()?))
        } else {
            Ok(self.session.cookie_header().ok())
        }
    }

    /// Sends the request and decodes a JSON body, without touching session
    /// state or alerts.
    async fn execute(
        &self,
        request: &HttpRequest,
        cookie: Option<String>,
    ) -> Result<HttpResponse, HttpError> {
        let res = self.send(request, cookie).await?;

        let code = res.status().as_u16();
        let headers = Self::parse_response_headers(res.headers());
        let body_text = res.text().await?;

        let body = if body_text.trim().is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_str(&body_text)
                .unwrap_or_else(|_| serde_json::json!({ "raw_body": body_text }))
        };

        Ok(HttpResponse::new(
            code,
            headers,
            request.date_keys.revive(body),
        ))
    }

    async fn send(
        &self,
        request: &HttpRequest,
        cookie: Option<String>,
    ) -> Result<reqwest::Response, HttpError> {
        let url = self.url_for(&request.path);
        tracing::debug!("{} {}", request.http_method, url);

        let mut req_builder = self.client.request(request.http_method.as_reqwest(), &url);

        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }
        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                req_builder = req_builder.header(key, value);
            }
        }
        if let Some(cookie) = cookie {
            req_builder = req_builder.header("Cookie", cookie);
        }

        if let Some(query) = &request.query {
            req_builder = req_builder.query(query);
        }

        if let Some(body) = &request.body {
            req_builder = req_builder.json(body);
        }

        Ok(req_builder.send().await?)
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}
