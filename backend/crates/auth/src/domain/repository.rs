//! Collaborator Traits
//!
//! The gateway delegates credential checks and session bookkeeping to these.
//! Implementations live in the infrastructure layer.

use crate::domain::entity::{principal::Principal, session_binding::SessionBinding};
use crate::domain::value_object::{Credentials, SessionId};
use crate::error::BackendResult;

/// Credential verification
#[trait_variant::make(Authenticator: Send)]
pub trait LocalAuthenticator {
    /// Resolve credentials to a principal
    ///
    /// `Ok(None)` means the credentials are wrong. `Err` means the check
    /// itself could not be carried out.
    async fn verify(&self, credentials: &Credentials) -> BackendResult<Option<Principal>>;
}

/// Session storage
#[trait_variant::make(SessionStore: Send)]
pub trait LocalSessionStore {
    /// Store a binding, replacing any binding for the same session id
    async fn bind(&self, binding: &SessionBinding) -> BackendResult<()>;

    /// Find the binding for a session id, expired or not
    async fn find_binding(&self, session_id: &SessionId) -> BackendResult<Option<SessionBinding>>;

    /// Remove the principal from a session, keeping the session itself
    async fn unbind(&self, session_id: &SessionId) -> BackendResult<()>;

    /// Delete the session entirely
    async fn destroy(&self, session_id: &SessionId) -> BackendResult<()>;

    /// Delete expired sessions
    async fn cleanup_expired(&self) -> BackendResult<u64>;
}
