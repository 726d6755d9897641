//! Traffic Ops API version definitions.
//!
//! This module provides the [`ApiVersion`] enum used to build the
//! `api/<major>.<minor>` segment of every request URL.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Traffic Ops API version.
///
/// A client speaks exactly one API version for its whole lifetime. Known
/// versions have their own variants; anything else can be expressed with
/// [`ApiVersion::Custom`].
///
/// # Example
///
/// ```rust
/// use traffic_ops::ApiVersion;
///
/// let version: ApiVersion = "4.1".parse().unwrap();
/// assert_eq!(version, ApiVersion::V4_1);
/// assert_eq!(ApiVersion::latest().to_string(), "5.0");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    /// API version 3.0
    V3_0,
    /// API version 3.1
    V3_1,
    /// API version 4.0
    V4_0,
    /// API version 4.1
    V4_1,
    /// API version 5.0
    V5_0,
    /// Any other `<major>.<minor>` version.
    Custom {
        /// Major version number.
        major: u16,
        /// Minor version number.
        minor: u16,
    },
}

impl ApiVersion {
    /// Returns the latest known API version.
    #[must_use]
    pub const fn latest() -> Self {
        Self::V5_0
    }

    /// Returns the major version number.
    #[must_use]
    pub const fn major(&self) -> u16 {
        self.parts().0
    }

    /// Returns the minor version number.
    #[must_use]
    pub const fn minor(&self) -> u16 {
        self.parts().1
    }

    const fn parts(&self) -> (u16, u16) {
        match self {
            Self::V3_0 => (3, 0),
            Self::V3_1 => (3, 1),
            Self::V4_0 => (4, 0),
            Self::V4_1 => (4, 1),
            Self::V5_0 => (5, 0),
            Self::Custom { major, minor } => (*major, *minor),
        }
    }

    const fn from_parts(major: u16, minor: u16) -> Self {
        match (major, minor) {
            (3, 0) => Self::V3_0,
            (3, 1) => Self::V3_1,
            (4, 0) => Self::V4_0,
            (4, 1) => Self::V4_1,
            (5, 0) => Self::V5_0,
            _ => Self::Custom { major, minor },
        }
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        Self::latest()
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major(), self.minor())
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidApiVersion {
            version: s.to_string(),
        };

        let (major, minor) = s.trim().split_once('.').ok_or_else(invalid)?;
        let major = major.parse::<u16>().map_err(|_| invalid())?;
        let minor = minor.parse::<u16>().map_err(|_| invalid())?;

        Ok(Self::from_parts(major, minor))
    }
}
