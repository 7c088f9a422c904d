//! Authentication Status Use Case
//!
//! Read-only check of whether the caller's session is bound to a principal.

use std::sync::Arc;

use crate::application::session_context::SessionContext;
use crate::domain::entity::principal::Principal;
use crate::domain::repository::SessionStore;
use crate::error::{AuthError, AuthResult};

/// Result of a status check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthenticationStatus {
    Authenticated,
    NotAuthenticated,
}

impl AuthenticationStatus {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthenticationStatus::Authenticated)
    }

    /// Plain-text message returned by the status endpoint
    pub fn message(&self) -> &'static str {
        match self {
            AuthenticationStatus::Authenticated => "You are authenticated",
            AuthenticationStatus::NotAuthenticated => "You are not authenticated",
        }
    }
}

/// Authentication status use case
pub struct AuthenticationStatusUseCase<S>
where
    S: SessionStore,
{
    sessions: Arc<S>,
}

impl<S> AuthenticationStatusUseCase<S>
where
    S: SessionStore,
{
    pub fn new(sessions: Arc<S>) -> Self {
        Self { sessions }
    }

    /// Never fails: a store error is logged and reported as not authenticated
    pub async fn execute(&self, current: &SessionContext) -> AuthenticationStatus {
        match self.current_principal(current).await {
            Ok(Some(_)) => AuthenticationStatus::Authenticated,
            Ok(None) => AuthenticationStatus::NotAuthenticated,
            Err(e) => {
                tracing::warn!(error = %e, "Session lookup failed during status check");
                AuthenticationStatus::NotAuthenticated
            }
        }
    }

    /// Principal bound to the caller's session, if the binding is still live
    ///
    /// Expired bindings are ignored but left in place for `cleanup_expired`.
    pub async fn current_principal(
        &self,
        current: &SessionContext,
    ) -> AuthResult<Option<Principal>> {
        let Some(session_id) = current.session_id() else {
            return Ok(None);
        };

        let binding = self
            .sessions
            .find_binding(session_id)
            .await
            .map_err(AuthError::Session)?;

        Ok(binding
            .filter(|binding| !binding.is_expired())
            .map(|binding| binding.principal))
    }
}
