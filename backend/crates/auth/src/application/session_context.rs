//! Session Context
//!
//! The caller's session as seen by the use cases. Handlers build it from the
//! request cookie and pass it in explicitly.

use crate::domain::value_object::SessionId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionContext {
    session_id: Option<SessionId>,
}

impl SessionContext {
    /// No session cookie, or one that failed verification
    pub fn anonymous() -> Self {
        Self { session_id: None }
    }

    pub fn for_session(session_id: SessionId) -> Self {
        Self {
            session_id: Some(session_id),
        }
    }

    pub fn session_id(&self) -> Option<&SessionId> {
        self.session_id.as_ref()
    }
}
