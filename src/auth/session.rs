//! Session credential storage.
//!
//! This module provides [`SessionState`], which holds at most one session
//! cookie value. The value is never handed back to callers; it only
//! decorates outgoing requests.

use std::collections::HashMap;
use std::fmt;
use std::sync::{PoisonError, RwLock};

use crate::clients::InvalidCallError;

/// Name of the cookie Traffic Ops uses for its session.
pub const SESSION_COOKIE_NAME: &str = "mojolicious";

/// Holds the current session credential.
///
/// Concurrent renewals are not serialized: each one atomically swaps in its
/// value, and the last response processed wins.
#[derive(Default)]
pub struct SessionState {
    credential: RwLock<Option<String>>,
}

impl SessionState {
    /// Creates an unauthenticated session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if a credential is held.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.credential
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Returns the `Cookie` header value carrying the credential.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCallError`] if no credential is held.
    pub(crate) fn cookie_header(&self) -> Result<String, InvalidCallError> {
        self.credential
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|value| format!("{SESSION_COOKIE_NAME}={value}"))
            .ok_or_else(InvalidCallError::not_authenticated)
    }

    /// Replaces any held credential.
    pub(crate) fn replace(&self, value: String) {
        *self
            .credential
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(value);
    }

    /// Replaces the credential if `headers` carry a renewed one.
    ///
    /// Returns `true` if the credential was replaced.
    pub(crate) fn refresh_from(&self, headers: &HashMap<String, Vec<String>>) -> bool {
        match extract_credential(headers) {
            Some(value) => {
                self.replace(value);
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.is_authenticated() {
            "*****"
        } else {
            "none"
        };
        f.debug_struct("SessionState")
            .field("credential", &state)
            .finish()
    }
}

// Verify SessionState is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SessionState>();
};

/// Finds the session cookie value among `Set-Cookie` headers.
///
/// Header names must already be lower-cased. Entries whose name is not
/// [`SESSION_COOKIE_NAME`], and entries with an empty value, are ignored.
#[must_use]
pub fn extract_credential(headers: &HashMap<String, Vec<String>>) -> Option<String> {
    headers
        .get("set-cookie")?
        .iter()
        .filter_map(|cookie| {
            let pair = cookie.split(';').next()?;
            let (name, value) = pair.split_once('=')?;
            (name.trim() == SESSION_COOKIE_NAME && !value.trim().is_empty())
                .then(|| value.trim().to_string())
        })
        .last()
}
