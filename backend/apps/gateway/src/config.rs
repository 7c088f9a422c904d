//! Gateway Configuration
//!
//! Read once at startup from the environment (after `.env` is loaded).

use std::env;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use base64::Engine;
use base64::engine::general_purpose;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:31113";
const DEFAULT_ROUTE_PREFIX: &str = "/auth";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:40922,http://127.0.0.1:40922";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_SESSION_TTL_SECS: u64 = 12 * 3600;
const MAX_SESSION_TTL_SECS: u64 = 365 * 24 * 3600;

/// Account created at startup
#[derive(Clone)]
pub struct SeedUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for SeedUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeedUser")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub listen_addr: SocketAddr,
    pub route_prefix: String,
    pub frontend_origins: Vec<String>,
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub auth: AuthConfig,
    pub password_pepper: Option<Vec<u8>>,
    pub seed_users: Vec<SeedUser>,
}

impl GatewayConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let listen_addr = var("GATEWAY_LISTEN_ADDR")
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string())
            .parse()
            .context("GATEWAY_LISTEN_ADDR must be a socket address")?;

        let route_prefix = var("GATEWAY_ROUTE_PREFIX")
            .unwrap_or_else(|| DEFAULT_ROUTE_PREFIX.to_string());

        let frontend_origins = var("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        let database_max_connections = match var("DATABASE_MAX_CONNECTIONS") {
            Some(value) => value
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a positive integer")?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let session_ttl_secs = match var("AUTH_SESSION_TTL_SECS") {
            Some(value) => value
                .parse()
                .context("AUTH_SESSION_TTL_SECS must be a number of seconds")?,
            None => DEFAULT_SESSION_TTL_SECS,
        };
        if session_ttl_secs == 0 || session_ttl_secs > MAX_SESSION_TTL_SECS {
            bail!("AUTH_SESSION_TTL_SECS must be between 1 and {MAX_SESSION_TTL_SECS}");
        }

        let cookie_secure = match var("AUTH_COOKIE_SECURE") {
            Some(value) => parse_bool(&value).context("AUTH_COOKIE_SECURE must be true or false")?,
            None => !cfg!(debug_assertions),
        };

        let session_secret = match var("AUTH_SESSION_SECRET") {
            Some(value) => decode_session_secret(&value)?,
            None if cfg!(debug_assertions) => {
                tracing::warn!("AUTH_SESSION_SECRET not set, using a random secret");
                AuthConfig::default().session_secret
            }
            None => bail!("AUTH_SESSION_SECRET must be set in production"),
        };

        let seed_users = match var("GATEWAY_SEED_USERS") {
            Some(value) => parse_seed_users(&value)?,
            None => Vec::new(),
        };

        Ok(Self {
            listen_addr,
            route_prefix,
            frontend_origins,
            database_url: var("DATABASE_URL"),
            database_max_connections,
            auth: AuthConfig {
                session_secret,
                session_ttl: Duration::from_secs(session_ttl_secs),
                cookie_secure,
                ..AuthConfig::default()
            },
            password_pepper: var("AUTH_PASSWORD_PEPPER").map(String::into_bytes),
            seed_users,
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Decode a base64 (standard alphabet) 32-byte key
pub fn decode_session_secret(value: &str) -> anyhow::Result<[u8; 32]> {
    let bytes = general_purpose::STANDARD
        .decode(value.trim())
        .context("AUTH_SESSION_SECRET must be base64")?;

    bytes.try_into().map_err(|bytes: Vec<u8>| {
        anyhow::anyhow!(
            "AUTH_SESSION_SECRET must decode to 32 bytes (got {})",
            bytes.len()
        )
    })
}

/// Parse `username:email:password` entries separated by commas
///
/// The password is everything after the second colon, so it may contain ':'.
pub fn parse_seed_users(value: &str) -> anyhow::Result<Vec<SeedUser>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| -> anyhow::Result<SeedUser> {
            let mut parts = entry.splitn(3, ':');
            match (parts.next(), parts.next(), parts.next()) {
                (Some(username), Some(email), Some(password))
                    if !username.is_empty() && !email.is_empty() && !password.is_empty() =>
                {
                    Ok(SeedUser {
                        username: username.to_string(),
                        email: email.to_string(),
                        password: password.to_string(),
                    })
                }
                _ => bail!("GATEWAY_SEED_USERS entries must look like username:email:password"),
            }
        })
        .collect()
}
