//! Login Use Case
//!
//! Verifies credentials and binds the principal to a fresh session.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session_context::SessionContext;
use crate::domain::entity::{principal::Principal, session_binding::SessionBinding};
use crate::domain::repository::{Authenticator, SessionStore};
use crate::domain::value_object::{Credentials, SessionId};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    /// Username or email
    pub identifier: String,
    pub secret: String,
}

impl std::fmt::Debug for LoginInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginInput")
            .field("identifier", &self.identifier)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Login output
#[derive(Debug, Clone)]
pub struct LoginOutput {
    pub principal: Principal,
    /// The newly bound session; the caller must hand it back as a cookie
    pub session_id: SessionId,
}

/// Login use case
pub struct LoginUseCase<A, S>
where
    A: Authenticator,
    S: SessionStore,
{
    authenticator: Arc<A>,
    sessions: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<A, S> LoginUseCase<A, S>
where
    A: Authenticator,
    S: SessionStore,
{
    pub fn new(authenticator: Arc<A>, sessions: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            authenticator,
            sessions,
            config,
        }
    }

    /// Authenticate and bind a new session
    ///
    /// Every successful login gets a new session id. The caller's previous
    /// session, if any, is destroyed only after the new binding is stored, so
    /// a failed login leaves the existing session untouched.
    pub async fn execute(
        &self,
        input: LoginInput,
        current: &SessionContext,
    ) -> AuthResult<LoginOutput> {
        let credentials = Credentials::new(input.identifier, input.secret)?;

        let principal = self
            .authenticator
            .verify(&credentials)
            .await
            .map_err(AuthError::AuthInfrastructure)?
            .ok_or(AuthError::InvalidCredentials)?;

        let session_id = SessionId::new();
        let binding = SessionBinding::new(
            session_id,
            principal.clone(),
            self.config.session_ttl_chrono()?,
        )
        .ok_or_else(|| AuthError::Internal("Session expiry out of range".to_string()))?;

        self.sessions
            .bind(&binding)
            .await
            .map_err(AuthError::Session)?;

        if let Some(previous) = current.session_id() {
            if let Err(e) = self.sessions.destroy(previous).await {
                tracing::warn!(
                    session_id = %previous,
                    error = %e,
                    "Failed to destroy previous session after login"
                );
            }
        }

        tracing::info!(
            user_id = %principal.id,
            session_id = %session_id,
            "User logged in"
        );

        Ok(LoginOutput {
            principal,
            session_id,
        })
    }
}
