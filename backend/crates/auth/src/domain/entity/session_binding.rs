//! Session Binding Entity
//!
//! Links a session identifier to a principal for a bounded time.
//! The cookie only carries the signed session id; the principal lives in the
//! session store.

use chrono::{DateTime, Duration, Utc};

use crate::domain::entity::principal::Principal;
use crate::domain::value_object::SessionId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionBinding {
    pub session_id: SessionId,
    pub principal: Principal,
    pub created_at: DateTime<Utc>,
    /// Expiration (Unix timestamp ms)
    pub expires_at_ms: i64,
}

impl SessionBinding {
    /// Bind `principal` to `session_id`, expiring after `ttl`
    ///
    /// `None` when the expiry falls outside the representable date range.
    pub fn new(session_id: SessionId, principal: Principal, ttl: Duration) -> Option<Self> {
        let now = Utc::now();
        let expires_at = now.checked_add_signed(ttl)?;

        Some(Self {
            session_id,
            principal,
            created_at: now,
            expires_at_ms: expires_at.timestamp_millis(),
        })
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() > self.expires_at_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{email::Email, UserId};

    fn principal() -> Principal {
        Principal::new(UserId::new(), "alice", Email::from_db("alice@example.com"))
    }

    #[test]
    fn test_fresh_binding_not_expired() {
        let binding =
            SessionBinding::new(SessionId::new(), principal(), Duration::hours(1)).unwrap();
        assert!(!binding.is_expired());
        assert!(binding.expires_at_ms > binding.created_at.timestamp_millis());
    }

    #[test]
    fn test_binding_with_past_expiry() {
        let binding =
            SessionBinding::new(SessionId::new(), principal(), Duration::seconds(-5)).unwrap();
        assert!(binding.is_expired());
    }

    #[test]
    fn test_unrepresentable_expiry() {
        let ttl = Duration::seconds(10_000_000_000_000);
        assert!(SessionBinding::new(SessionId::new(), principal(), ttl).is_none());
    }
}
