//! Logout Use Case
//!
//! Clears the principal from the caller's session and discards the session.

use std::sync::Arc;

use crate::application::session_context::SessionContext;
use crate::domain::repository::SessionStore;
use crate::error::{AuthError, AuthResult};

/// Logout use case
pub struct LogoutUseCase<S>
where
    S: SessionStore,
{
    sessions: Arc<S>,
}

impl<S> LogoutUseCase<S>
where
    S: SessionStore,
{
    pub fn new(sessions: Arc<S>) -> Self {
        Self { sessions }
    }

    /// Log out the current session
    ///
    /// Anonymous callers succeed without touching the store. Once the
    /// principal is unbound the logout has taken effect; a failure to destroy
    /// the now-empty session is only logged.
    pub async fn execute(&self, current: &SessionContext) -> AuthResult<()> {
        let Some(session_id) = current.session_id() else {
            tracing::debug!("Logout without a session");
            return Ok(());
        };

        self.sessions
            .unbind(session_id)
            .await
            .map_err(AuthError::Session)?;

        if let Err(e) = self.sessions.destroy(session_id).await {
            tracing::warn!(
                session_id = %session_id,
                error = %e,
                "Failed to destroy session after logout"
            );
        }

        tracing::info!(session_id = %session_id, "User logged out");
        Ok(())
    }
}
