//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::cookie::CookieConfig;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

use crate::error::{AuthError, AuthResult};

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// Session secret key for HMAC signing (32 bytes)
    pub session_secret: [u8; 32],
    /// Lifetime of a session binding (12 hours)
    pub session_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
}

/// Production cookie settings with a freshly generated signing key
///
/// The key lives only as long as the process; set `session_secret` to keep
/// sessions valid across restarts or between instances.
impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "sid".to_string(),
            session_secret: platform::crypto::random_key(),
            session_ttl: Duration::from_secs(12 * 3600), // 12 hours
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
        }
    }
}

impl AuthConfig {
    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Default::default()
        }
    }

    /// Session TTL as a chrono duration, for binding timestamps
    pub fn session_ttl_chrono(&self) -> AuthResult<chrono::Duration> {
        chrono::Duration::from_std(self.session_ttl)
            .map_err(|e| AuthError::Internal(format!("Session TTL out of range: {e}")))
    }

    /// Cookie settings for the session cookie
    pub fn cookie(&self) -> CookieConfig {
        CookieConfig {
            name: self.session_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: Some(self.session_ttl.as_secs()),
        }
    }
}
