//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::entity::principal::Principal;
use crate::domain::value_object::UserId;

// ============================================================================
// Login
// ============================================================================

/// Login request
///
/// Fields are optional so that a missing field reaches credential
/// validation and is reported like an empty one.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    /// Username or email
    #[serde(alias = "username")]
    pub identifier: Option<String>,
    #[serde(alias = "password")]
    pub secret: Option<String>,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("identifier", &self.identifier)
            .field("secret", &self.secret.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Public view of a principal
#[derive(Debug, Clone, Serialize)]
pub struct PrincipalResponse {
    pub id: UserId,
    pub username: String,
    pub email: String,
}

impl From<Principal> for PrincipalResponse {
    fn from(principal: Principal) -> Self {
        Self {
            id: principal.id,
            username: principal.username,
            email: principal.email.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_aliases() {
        let req: LoginRequest =
            serde_json::from_str(r#"{"username": "alice", "password": "pw"}"#).unwrap();
        assert_eq!(req.identifier.as_deref(), Some("alice"));
        assert_eq!(req.secret.as_deref(), Some("pw"));
    }

    #[test]
    fn test_login_request_missing_fields() {
        let req: LoginRequest = serde_json::from_str("{}").unwrap();
        assert!(req.identifier.is_none());
        assert!(req.secret.is_none());
    }

    #[test]
    fn test_login_request_debug_redacts_secret() {
        let req = LoginRequest {
            identifier: Some("alice".into()),
            secret: Some("hunter2".into()),
        };
        let debug = format!("{:?}", req);
        assert!(!debug.contains("hunter2"));
    }
}
