//! Validated newtype wrappers for configuration values.

use crate::error::ConfigError;
use std::fmt;

/// A validated Traffic Ops origin, such as `https://trafficops.example.com`.
///
/// Trailing slashes are trimmed so the origin can be joined with the
/// `api/<version>` segment without producing `//`.
///
/// # Example
///
/// ```rust
/// use traffic_ops::BaseUrl;
///
/// let url = BaseUrl::new("https://trafficops.example.com/").unwrap();
/// assert_eq!(url.as_ref(), "https://trafficops.example.com");
/// assert_eq!(url.scheme(), "https");
/// assert_eq!(url.host_name(), "trafficops.example.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl BaseUrl {
    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the scheme is not `http` or
    /// `https`, or if the host is empty.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();
        let invalid = || ConfigError::InvalidBaseUrl { url: url.clone() };

        let scheme_end = url.find("://").ok_or_else(invalid)?;
        let scheme = url[..scheme_end].to_ascii_lowercase();
        if scheme != "http" && scheme != "https" {
            return Err(invalid());
        }

        let host_start = scheme_end + 3;
        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);

        if host_end == host_start || remainder.contains(char::is_whitespace) {
            return Err(invalid());
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (`http` or `https`).
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_accepts_https_origin() {
        let url = BaseUrl::new("https://to.cdn.example.com").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_name(), "to.cdn.example.com");
    }

    #[test]
    fn test_base_url_keeps_port_and_trims_trailing_slashes() {
        let url = BaseUrl::new("http://localhost:8443///").unwrap();
        assert_eq!(url.as_ref(), "http://localhost:8443");
        assert_eq!(url.host_name(), "localhost");
    }

    #[test]
    fn test_base_url_keeps_path_prefix() {
        let url = BaseUrl::new("https://proxy.example.com/to/").unwrap();
        assert_eq!(url.as_ref(), "https://proxy.example.com/to");
    }

    #[test]
    fn test_base_url_rejects_invalid_values() {
        for bad in [
            "",
            "trafficops.example.com",
            "ftp://trafficops.example.com",
            "https://",
            "https://:443",
            "https://bad host",
        ] {
            assert!(
                matches!(BaseUrl::new(bad), Err(ConfigError::InvalidBaseUrl { .. })),
                "expected '{bad}' to be rejected"
            );
        }
    }
}
