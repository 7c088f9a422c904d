//! In-Memory Implementations
//!
//! Used when no database is configured, and by the tests.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use kernel::error::app_error::{AppError, AppResult};
use tokio::sync::RwLock;

use crate::domain::entity::{
    principal::Principal, session_binding::SessionBinding, user_account::UserAccount,
};
use crate::domain::repository::{Authenticator, SessionStore};
use crate::domain::value_object::{Credentials, SessionId};
use crate::error::BackendResult;

// ============================================================================
// User Directory
// ============================================================================

/// Authenticator over a fixed set of accounts held in memory
#[derive(Clone, Default)]
pub struct InMemoryUserDirectory {
    accounts: Arc<RwLock<Vec<UserAccount>>>,
    pepper: Option<Arc<[u8]>>,
}

impl InMemoryUserDirectory {
    pub fn new(pepper: Option<Vec<u8>>) -> Self {
        Self {
            accounts: Arc::default(),
            pepper: pepper.map(Arc::from),
        }
    }

    /// Hash the password and add the account
    pub async fn register(&self, username: &str, email: &str, password: String) -> AppResult<Principal> {
        let account = UserAccount::register(username, email, password, self.pepper.as_deref())?;
        let principal = account.principal.clone();
        self.insert(account).await?;
        Ok(principal)
    }

    /// Add a pre-built account; usernames and emails must be unique
    pub async fn insert(&self, account: UserAccount) -> AppResult<()> {
        let mut accounts = self.accounts.write().await;

        let taken = accounts.iter().any(|existing| {
            existing.canonical_username() == account.canonical_username()
                || existing.principal.email == account.principal.email
        });
        if taken {
            return Err(AppError::conflict("Username or email already registered"));
        }

        accounts.push(account);
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

impl Authenticator for InMemoryUserDirectory {
    async fn verify(&self, credentials: &Credentials) -> BackendResult<Option<Principal>> {
        let accounts = self.accounts.read().await;

        let principal = accounts
            .iter()
            .find(|account| account.matches(credentials))
            .filter(|account| account.verify_secret(credentials.secret(), self.pepper.as_deref()))
            .map(|account| account.principal.clone());

        Ok(principal)
    }
}

// ============================================================================
// Session Store
// ============================================================================

/// A stored session; unbinding clears the principal but keeps the expiry
struct SessionSlot {
    expires_at_ms: i64,
    binding: Option<SessionBinding>,
}

/// Session store backed by a map
#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, SessionSlot>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the store holds the session at all, bound or not
    pub async fn contains(&self, session_id: &SessionId) -> bool {
        self.sessions.read().await.contains_key(session_id)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

impl SessionStore for InMemorySessionStore {
    async fn bind(&self, binding: &SessionBinding) -> BackendResult<()> {
        let slot = SessionSlot {
            expires_at_ms: binding.expires_at_ms,
            binding: Some(binding.clone()),
        };
        self.sessions.write().await.insert(binding.session_id, slot);
        Ok(())
    }

    async fn find_binding(&self, session_id: &SessionId) -> BackendResult<Option<SessionBinding>> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(session_id).and_then(|slot| slot.binding.clone()))
    }

    async fn unbind(&self, session_id: &SessionId) -> BackendResult<()> {
        if let Some(slot) = self.sessions.write().await.get_mut(session_id) {
            slot.binding = None;
        }
        Ok(())
    }

    async fn destroy(&self, session_id: &SessionId) -> BackendResult<()> {
        self.sessions.write().await.remove(session_id);
        Ok(())
    }

    async fn cleanup_expired(&self) -> BackendResult<u64> {
        let now_ms = Utc::now().timestamp_millis();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();

        sessions.retain(|_, slot| slot.expires_at_ms >= now_ms);

        let deleted = (before - sessions.len()) as u64;
        tracing::info!(sessions_deleted = deleted, "Cleaned up expired sessions");
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{UserId, email::Email};
    use chrono::Duration;

    fn binding(ttl: Duration) -> SessionBinding {
        let principal = Principal::new(UserId::new(), "alice", Email::from_db("alice@example.com"));
        SessionBinding::new(SessionId::new(), principal, ttl).unwrap()
    }

    #[tokio::test]
    async fn test_bind_find_unbind_destroy() {
        let store = InMemorySessionStore::new();
        let binding = binding(Duration::hours(1));
        let id = binding.session_id;

        store.bind(&binding).await.unwrap();
        assert_eq!(store.find_binding(&id).await.unwrap(), Some(binding));

        store.unbind(&id).await.unwrap();
        assert_eq!(store.find_binding(&id).await.unwrap(), None);
        assert!(store.contains(&id).await);

        store.destroy(&id).await.unwrap();
        assert!(!store.contains(&id).await);
    }

    #[tokio::test]
    async fn test_unknown_session_operations_are_noops() {
        let store = InMemorySessionStore::new();
        let id = SessionId::new();

        assert_eq!(store.find_binding(&id).await.unwrap(), None);
        store.unbind(&id).await.unwrap();
        store.destroy(&id).await.unwrap();
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_cleanup_expired() {
        let store = InMemorySessionStore::new();
        let live = binding(Duration::hours(1));
        let expired = binding(Duration::seconds(-10));

        store.bind(&live).await.unwrap();
        store.bind(&expired).await.unwrap();

        assert_eq!(store.cleanup_expired().await.unwrap(), 1);
        assert!(store.contains(&live.session_id).await);
        assert!(!store.contains(&expired.session_id).await);
    }

    #[tokio::test]
    async fn test_cleanup_removes_expired_unbound_sessions() {
        let store = InMemorySessionStore::new();
        let live = binding(Duration::hours(1));
        let expired = binding(Duration::seconds(-10));

        for session in [&live, &expired] {
            store.bind(session).await.unwrap();
            store.unbind(&session.session_id).await.unwrap();
        }

        assert_eq!(store.cleanup_expired().await.unwrap(), 1);
        assert!(store.contains(&live.session_id).await);
        assert!(!store.contains(&expired.session_id).await);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_directory_verify() {
        let directory = InMemoryUserDirectory::new(Some(b"pepper".to_vec()));
        let principal = directory
            .register("alice", "alice@example.com", "Tr0ub4dor&3x".into())
            .await
            .unwrap();

        let ok = Credentials::new("ALICE", "Tr0ub4dor&3x".into()).unwrap();
        assert_eq!(directory.verify(&ok).await.unwrap(), Some(principal.clone()));

        let by_email = Credentials::new("alice@example.com", "Tr0ub4dor&3x".into()).unwrap();
        assert_eq!(directory.verify(&by_email).await.unwrap(), Some(principal));

        let wrong = Credentials::new("alice", "not-the-password".into()).unwrap();
        assert_eq!(directory.verify(&wrong).await.unwrap(), None);

        let unknown = Credentials::new("mallory", "Tr0ub4dor&3x".into()).unwrap();
        assert_eq!(directory.verify(&unknown).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_directory_rejects_duplicates() {
        let directory = InMemoryUserDirectory::default();
        directory
            .register("alice", "alice@example.com", "Tr0ub4dor&3x".into())
            .await
            .unwrap();

        let err = directory
            .register("Alice", "other@example.com", "Tr0ub4dor&3x".into())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 409);
        assert_eq!(directory.len().await, 1);
    }
}
