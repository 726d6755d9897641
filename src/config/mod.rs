//! Configuration types for the Traffic Ops client.
//!
//! # Overview
//!
//! - [`ClientConfig`]: Read-only settings fixed when a client is constructed
//! - [`ClientConfigBuilder`]: A builder for constructing [`ClientConfig`] instances
//! - [`BaseUrl`]: A validated Traffic Ops origin
//! - [`ApiVersion`]: The API version every request is issued against
//!
//! # Example
//!
//! ```rust
//! use traffic_ops::{ApiVersion, BaseUrl, ClientConfig};
//!
//! let config = ClientConfig::builder()
//!     .base_url(BaseUrl::new("https://trafficops.example.com").unwrap())
//!     .api_version(ApiVersion::V4_1)
//!     .raise_error_alerts(false)
//!     .build()
//!     .unwrap();
//!
//! assert!(!config.raise_error_alerts());
//! ```

mod newtypes;
mod version;

pub use newtypes::BaseUrl;
pub use version::ApiVersion;

use std::sync::Arc;

use crate::alerts::AlertLogger;
use crate::error::ConfigError;

/// The user agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = concat!("traffic-ops-client-rust/", env!("CARGO_PKG_VERSION"));

/// Configuration for a Traffic Ops client.
///
/// Fixed at construction and read-only afterwards.
///
/// # Thread Safety
///
/// `ClientConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    base_url: BaseUrl,
    api_version: ApiVersion,
    alert_logging: bool,
    logger: Option<Arc<dyn AlertLogger>>,
    raise_error_alerts: bool,
    user_agent: String,
}

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Returns the Traffic Ops origin.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the API version.
    #[must_use]
    pub const fn api_version(&self) -> ApiVersion {
        self.api_version
    }

    /// Returns whether received alerts are logged.
    #[must_use]
    pub const fn alert_logging(&self) -> bool {
        self.alert_logging
    }

    /// Returns the injected alert logger, if any.
    #[must_use]
    pub fn logger(&self) -> Option<&Arc<dyn AlertLogger>> {
        self.logger.as_ref()
    }

    /// Returns whether error-level alerts are raised as [`ApiError`](crate::ApiError)s.
    #[must_use]
    pub const fn raise_error_alerts(&self) -> bool {
        self.raise_error_alerts
    }

    /// Returns the user agent sent with every request.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

// Verify ClientConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientConfig>();
};

/// Builder for constructing [`ClientConfig`] instances.
///
/// `base_url` is required.
///
/// # Defaults
///
/// - `api_version`: [`ApiVersion::latest`]
/// - `alert_logging`: `true`
/// - `logger`: `None` (alerts go through `tracing`)
/// - `raise_error_alerts`: `true`
/// - `user_agent`: [`DEFAULT_USER_AGENT`]
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    base_url: Option<BaseUrl>,
    api_version: Option<ApiVersion>,
    alert_logging: Option<bool>,
    logger: Option<Arc<dyn AlertLogger>>,
    raise_error_alerts: Option<bool>,
    user_agent: Option<String>,
}

impl ClientConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the Traffic Ops origin (required).
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API version.
    #[must_use]
    pub const fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Enables or disables alert logging.
    #[must_use]
    pub const fn alert_logging(mut self, enabled: bool) -> Self {
        self.alert_logging = Some(enabled);
        self
    }

    /// Sets the logger that receives alerts.
    #[must_use]
    pub fn logger(mut self, logger: Arc<dyn AlertLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Sets whether error-level alerts are raised.
    #[must_use]
    pub const fn raise_error_alerts(mut self, enabled: bool) -> Self {
        self.raise_error_alerts = Some(enabled);
        self
    }

    /// Sets the user agent for HTTP requests.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Builds the [`ClientConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `base_url` is not set,
    /// or [`ConfigError::EmptyUserAgent`] if the user agent is blank.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let base_url = self
            .base_url
            .ok_or(ConfigError::MissingRequiredField { field: "base_url" })?;

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());
        if user_agent.trim().is_empty() {
            return Err(ConfigError::EmptyUserAgent);
        }

        Ok(ClientConfig {
            base_url,
            api_version: self.api_version.unwrap_or_default(),
            alert_logging: self.alert_logging.unwrap_or(true),
            logger: self.logger,
            raise_error_alerts: self.raise_error_alerts.unwrap_or(true),
            user_agent,
        })
    }
}
