//! HTTP client types for Traffic Ops communication.
//!
//! This module provides the request pipeline every API call goes through.
//!
//! # Overview
//!
//! - [`HttpClient`]: logs in, holds the session, and dispatches requests
//! - [`HttpRequest`]: a request to be sent to the API
//! - [`HttpResponse`]: a decoded response, with dates revived
//! - [`BinaryResponse`]: a response from an endpoint that returns raw bytes
//! - [`Envelope`]: the `{response, alerts}` wrapper most bodies use
//! - [`HttpError`]: the three failure categories
//!
//! # Example
//!
//! ```rust,ignore
//! use traffic_ops::{BaseUrl, ClientConfig, Envelope, HttpClient, HttpMethod, HttpRequest, LoginRequest};
//!
//! let config = ClientConfig::builder()
//!     .base_url(BaseUrl::new("https://trafficops.example.com")?)
//!     .build()?;
//! let client = HttpClient::new(config)?;
//! client.login(&LoginRequest::token("my-login-token")).await?;
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "cdns")
//!     .query_param("name", "ALL")
//!     .build()?;
//! let cdns: Envelope<Vec<serde_json::Value>> = client.request(request).await?.envelope()?;
//! ```
//!
//! # Sessions
//!
//! Traffic Ops may renew the session cookie on any response. The client
//! adopts a renewed cookie as soon as it sees one, so a long-lived client
//! stays logged in for as long as it keeps making requests.

mod endpoints;
mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{ApiError, HttpError, InvalidCallError, GENERIC_ERROR_RESPONSE};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::{BinaryResponse, Envelope, HttpResponse, PingResponse};
