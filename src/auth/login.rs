//! Login request variants.
//!
//! Traffic Ops accepts three kinds of login, each at its own endpoint. They
//! differ only in request shape; all of them yield a session cookie.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::clients::InvalidCallError;

/// The parameters of a delegated (OAuth) login.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthLogin {
    /// The identity provider's token endpoint.
    pub auth_code_token_url: String,
    /// The authorization code returned by the provider.
    pub code: String,
    /// The client ID registered with the provider.
    pub client_id: String,
    /// The redirect URI used in the authorization request.
    pub redirect_uri: String,
}

impl std::fmt::Debug for OAuthLogin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthLogin")
            .field("auth_code_token_url", &self.auth_code_token_url)
            .field("code", &"*****")
            .field("client_id", &self.client_id)
            .field("redirect_uri", &self.redirect_uri)
            .finish()
    }
}

/// How to log in.
///
/// # Example
///
/// ```rust
/// use traffic_ops::LoginRequest;
///
/// let login = LoginRequest::password("admin", "twelve12");
/// assert_eq!(login.path(), "user/login");
/// assert!(login.validate().is_ok());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub enum LoginRequest {
    /// Log in with an opaque login token.
    Token(String),
    /// Log in through a third-party identity provider.
    OAuth(OAuthLogin),
    /// Log in with a username and password.
    Password {
        /// The user's name.
        username: String,
        /// The user's password.
        password: String,
    },
}

impl LoginRequest {
    /// Creates a token login.
    #[must_use]
    pub fn token(token: impl Into<String>) -> Self {
        Self::Token(token.into())
    }

    /// Creates a username/password login.
    #[must_use]
    pub fn password(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Password {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Returns the login endpoint, relative to the API root.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::Token(_) => "user/login/token",
            Self::OAuth(_) => "user/login/oauth",
            Self::Password { .. } => "user/login",
        }
    }

    /// Returns the JSON request body.
    #[must_use]
    pub fn body(&self) -> serde_json::Value {
        match self {
            Self::Token(token) => json!({ "t": token }),
            Self::OAuth(oauth) => json!({
                "authCodeTokenUrl": oauth.auth_code_token_url,
                "code": oauth.code,
                "clientId": oauth.client_id,
                "redirectUri": oauth.redirect_uri,
            }),
            Self::Password { username, password } => json!({ "u": username, "p": password }),
        }
    }

    /// Checks that every required field is non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCallError`] naming the empty fields.
    pub fn validate(&self) -> Result<(), InvalidCallError> {
        let missing: Vec<&str> = match self {
            Self::Token(token) => [("token", token)]
                .into_iter()
                .filter(|(_, v)| v.is_empty())
                .map(|(name, _)| name)
                .collect(),
            Self::OAuth(oauth) => [
                ("authCodeTokenUrl", &oauth.auth_code_token_url),
                ("code", &oauth.code),
                ("clientId", &oauth.client_id),
                ("redirectUri", &oauth.redirect_uri),
            ]
            .into_iter()
            .filter(|(_, v)| v.is_empty())
            .map(|(name, _)| name)
            .collect(),
            Self::Password { username, password } => [("username", username), ("password", password)]
                .into_iter()
                .filter(|(_, v)| v.is_empty())
                .map(|(name, _)| name)
                .collect(),
        };

        if missing.is_empty() {
            Ok(())
        } else {
            Err(InvalidCallError::missing_params("login", &missing))
        }
    }
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Token(_) => f.write_str("Token(*****)"),
            Self::OAuth(oauth) => f.debug_tuple("OAuth").field(oauth).finish(),
            Self::Password { username, .. } => f
                .debug_struct("Password")
                .field("username", username)
                .field("password", &"*****")
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oauth() -> OAuthLogin {
        OAuthLogin {
            auth_code_token_url: "https://idp.example.com/token".to_string(),
            code: "abc".to_string(),
            client_id: "to".to_string(),
            redirect_uri: "https://to.example.com/sso".to_string(),
        }
    }

    #[test]
    fn test_each_variant_has_its_own_endpoint() {
        assert_eq!(LoginRequest::token("t").path(), "user/login/token");
        assert_eq!(LoginRequest::OAuth(oauth()).path(), "user/login/oauth");
        assert_eq!(LoginRequest::password("u", "p").path(), "user/login");
    }

    #[test]
    fn test_request_bodies() {
        assert_eq!(LoginRequest::token("tok").body(), json!({"t": "tok"}));
        assert_eq!(
            LoginRequest::password("admin", "pw").body(),
            json!({"u": "admin", "p": "pw"})
        );
        assert_eq!(
            LoginRequest::OAuth(oauth()).body(),
            json!({
                "authCodeTokenUrl": "https://idp.example.com/token",
                "code": "abc",
                "clientId": "to",
                "redirectUri": "https://to.example.com/sso"
            })
        );
    }

    #[test]
    fn test_validate_names_missing_fields() {
        let err = LoginRequest::password("", "").validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid call signature to login - 'username', and 'password' must be given"
        );

        let err = LoginRequest::token("").validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid call signature to login - 'token' must be given"
        );

        let mut partial = oauth();
        partial.code.clear();
        assert!(LoginRequest::OAuth(partial).validate().is_err());
        assert!(LoginRequest::OAuth(oauth()).validate().is_ok());
    }

    #[test]
    fn test_debug_hides_secrets() {
        let debug = format!(
            "{:?} {:?} {:?}",
            LoginRequest::token("tok-secret"),
            LoginRequest::password("admin", "pw-secret"),
            LoginRequest::OAuth(oauth())
        );
        assert!(!debug.contains("tok-secret"));
        assert!(!debug.contains("pw-secret"));
        assert!(debug.contains("admin"));
        assert!(!debug.contains("\"abc\""));
    }
}
