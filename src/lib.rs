//! # Traffic Ops Rust Client
//!
//! An async client core for the Traffic Ops REST API.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ClientConfig`] and [`ClientConfigBuilder`]
//! - Password, token, and OAuth login with automatic session renewal
//! - A single request pipeline ([`HttpClient`]) that refuses unauthenticated
//!   calls before touching the network
//! - Alert logging and error classification via [`AlertClassifier`]
//! - Revival of date fields in response bodies via [`DateKeySpec`]
//! - Three distinct error categories: [`InvalidCallError`], [`ApiError`],
//!   and transport errors
//!
//! ## Quick Start
//!
//! ```rust
//! use traffic_ops::{ApiVersion, BaseUrl, ClientConfig};
//!
//! let config = ClientConfig::builder()
//!     .base_url(BaseUrl::new("https://trafficops.example.com").unwrap())
//!     .api_version(ApiVersion::V4_0)
//!     .raise_error_alerts(false)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.api_version().to_string(), "4.0");
//! ```
//!
//! ## Making API Requests
//!
//! ```rust,ignore
//! use traffic_ops::{HttpClient, HttpMethod, HttpRequest, LoginRequest};
//!
//! let client = HttpClient::new(config)?;
//! client.login(&LoginRequest::password("admin", "twelve12")).await?;
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "servers")
//!     .query_param("type", "EDGE")
//!     .build()?;
//! let response = client.request(request).await?;
//! for alert in response.alerts() {
//!     println!("{}: {}", alert.level, alert.text);
//! }
//! ```
//!
//! ## Dates
//!
//! Response fields named in a request's [`DateKeySpec`] are rewritten to
//! canonical RFC 3339 strings, which deserialize into [`ApiDate`]:
//!
//! ```rust
//! use traffic_ops::{ApiDate, DateKeySpec};
//! use serde_json::json;
//!
//! let spec = DateKeySpec::new().date_string("lastUpdated");
//! let body = spec.revive(json!({"lastUpdated": "2022-07-18 00:00:00+00"}));
//! assert_eq!(body["lastUpdated"], "2022-07-18T00:00:00.000Z");
//!
//! let date: ApiDate = serde_json::from_value(body["lastUpdated"].clone()).unwrap();
//! assert!(date.is_valid());
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: every client owns its configuration and session
//! - **Fail-fast validation**: newtypes and builders validate on construction
//! - **Thread-safe**: all public types are `Send + Sync`
//! - **Async-first**: designed for use with the Tokio runtime

pub mod alerts;
pub mod auth;
pub mod clients;
pub mod config;
pub mod dates;
pub mod error;

// Re-export public types at crate root for convenience
pub use alerts::{Alert, AlertClassifier, AlertLevel, AlertLogger, AlertSource, LogChannel, TracingLogger};
pub use auth::{LoginRequest, OAuthLogin, SessionState};
pub use config::{ApiVersion, BaseUrl, ClientConfig, ClientConfigBuilder};
pub use dates::{ApiDate, DateKeySpec};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    ApiError, BinaryResponse, Envelope, HttpClient, HttpError, HttpMethod, HttpRequest,
    HttpRequestBuilder, HttpResponse, InvalidCallError, PingResponse,
};
