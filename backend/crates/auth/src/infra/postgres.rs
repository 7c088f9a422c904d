//! PostgreSQL Implementations

use chrono::{DateTime, Utc};
use platform::password::HashedPassword;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{
    principal::Principal, session_binding::SessionBinding, user_account::UserAccount,
};
use crate::domain::repository::{Authenticator, SessionStore};
use crate::domain::value_object::{Credentials, SessionId, UserId, email::Email};
use crate::error::{BackendError, BackendResult};

// ============================================================================
// Authenticator
// ============================================================================

/// Authenticator over the `auth_users` table
#[derive(Clone)]
pub struct PgAuthenticator {
    pool: PgPool,
    pepper: Option<Vec<u8>>,
}

impl PgAuthenticator {
    pub fn new(pool: PgPool, pepper: Option<Vec<u8>>) -> Self {
        Self { pool, pepper }
    }

    /// Insert an account; returns `false` if the username or email is taken
    pub async fn register(&self, account: &UserAccount) -> BackendResult<bool> {
        let principal = &account.principal;

        let inserted = sqlx::query(
            r#"
            INSERT INTO auth_users (
                user_id,
                username,
                username_canonical,
                email,
                password_hash
            ) VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(principal.id.as_uuid())
        .bind(&principal.username)
        .bind(account.canonical_username())
        .bind(principal.email.as_str())
        .bind(account.password_hash.as_phc_string())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(inserted == 1)
    }
}

impl Authenticator for PgAuthenticator {
    async fn verify(&self, credentials: &Credentials) -> BackendResult<Option<Principal>> {
        let query = if credentials.is_email() {
            r#"
            SELECT user_id, username, email, password_hash
            FROM auth_users
            WHERE email = $1
            "#
        } else {
            r#"
            SELECT user_id, username, email, password_hash
            FROM auth_users
            WHERE username_canonical = $1
            "#
        };

        let row = sqlx::query_as::<_, UserRow>(query)
            .bind(credentials.canonical_identifier())
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let hash = HashedPassword::from_phc_string(row.password_hash.as_str()).map_err(|e| {
            BackendError::new(format!("Stored password hash for {} is unreadable", row.user_id))
                .with_source(e)
        })?;

        if !hash.verify(credentials.secret(), self.pepper.as_deref()) {
            return Ok(None);
        }

        Ok(Some(Principal::new(
            UserId::from_uuid(row.user_id),
            row.username,
            Email::from_db(row.email),
        )))
    }
}

// ============================================================================
// Session Store
// ============================================================================

/// Session store over the `auth_sessions` table
///
/// The principal is snapshotted into the session row at login, so status
/// checks need a single primary-key lookup.
#[derive(Clone)]
pub struct PgSessionStore {
    pool: PgPool,
}

impl PgSessionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl SessionStore for PgSessionStore {
    async fn bind(&self, binding: &SessionBinding) -> BackendResult<()> {
        let principal = &binding.principal;

        sqlx::query(
            r#"
            INSERT INTO auth_sessions (
                session_id,
                principal_id,
                principal_username,
                principal_email,
                created_at,
                expires_at_ms
            ) VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (session_id) DO UPDATE SET
                principal_id = EXCLUDED.principal_id,
                principal_username = EXCLUDED.principal_username,
                principal_email = EXCLUDED.principal_email,
                created_at = EXCLUDED.created_at,
                expires_at_ms = EXCLUDED.expires_at_ms
            "#,
        )
        .bind(binding.session_id.as_uuid())
        .bind(principal.id.as_uuid())
        .bind(&principal.username)
        .bind(principal.email.as_str())
        .bind(binding.created_at)
        .bind(binding.expires_at_ms)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_binding(&self, session_id: &SessionId) -> BackendResult<Option<SessionBinding>> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT
                session_id,
                principal_id,
                principal_username,
                principal_email,
                created_at,
                expires_at_ms
            FROM auth_sessions
            WHERE session_id = $1
            "#,
        )
        .bind(session_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.and_then(SessionRow::into_binding))
    }

    async fn unbind(&self, session_id: &SessionId) -> BackendResult<()> {
        sqlx::query(
            r#"
            UPDATE auth_sessions SET
                principal_id = NULL,
                principal_username = NULL,
                principal_email = NULL
            WHERE session_id = $1
            "#,
        )
        .bind(session_id.as_uuid())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn destroy(&self, session_id: &SessionId) -> BackendResult<()> {
        sqlx::query("DELETE FROM auth_sessions WHERE session_id = $1")
            .bind(session_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn cleanup_expired(&self) -> BackendResult<u64> {
        let now_ms = Utc::now().timestamp_millis();

        let deleted = sqlx::query("DELETE FROM auth_sessions WHERE expires_at_ms < $1")
            .bind(now_ms)
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(sessions_deleted = deleted, "Cleaned up expired sessions");

        Ok(deleted)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    username: String,
    email: String,
    password_hash: String,
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    session_id: Uuid,
    principal_id: Option<Uuid>,
    principal_username: Option<String>,
    principal_email: Option<String>,
    created_at: DateTime<Utc>,
    expires_at_ms: i64,
}

impl SessionRow {
    /// `None` for a session whose principal has been unbound
    fn into_binding(self) -> Option<SessionBinding> {
        let principal = Principal::new(
            UserId::from_uuid(self.principal_id?),
            self.principal_username?,
            Email::from_db(self.principal_email?),
        );

        Some(SessionBinding {
            session_id: SessionId::from_uuid(self.session_id),
            principal,
            created_at: self.created_at,
            expires_at_ms: self.expires_at_ms,
        })
    }
}
