//! Configuration error types for the Traffic Ops client.
//!
//! All configuration constructors return `Result<T, ConfigError>` so that a
//! misconfigured client fails when it is built rather than on its first
//! request.
//!
//! # Example
//!
//! ```rust
//! use traffic_ops::{BaseUrl, ConfigError};
//!
//! let result = BaseUrl::new("not a url");
//! assert!(matches!(result, Err(ConfigError::InvalidBaseUrl { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur while building a client configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The Traffic Ops base URL is invalid.
    #[error("Invalid base URL '{url}'. Expected an http(s) origin such as 'https://trafficops.example.com'.")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// The API version is invalid.
    #[error("Invalid API version '{version}'. Expected format: '<major>.<minor>' (e.g., '5.0').")]
    InvalidApiVersion {
        /// The invalid version string that was provided.
        version: String,
    },

    /// The user agent cannot be empty.
    #[error("User agent cannot be empty.")]
    EmptyUserAgent,

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}
