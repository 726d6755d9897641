//! Authentication types for the Traffic Ops client.
//!
//! - [`SessionState`]: holds the session cookie a client sends with every request
//! - [`LoginRequest`]: the three ways to obtain that cookie
//!
//! There is no logout. A credential lives as long as the client that holds
//! it, and a failed login leaves any previous credential in place.

mod login;
pub mod session;

pub use login::{LoginRequest, OAuthLogin};
pub use session::{extract_credential, SessionState, SESSION_COOKIE_NAME};
