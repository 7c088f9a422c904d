//! User Account Entity
//!
//! A principal together with its stored password hash. Used by the bundled
//! authenticators; the gateway itself only ever sees [`Principal`].

use kernel::error::app_error::{AppError, AppResult};
use platform::password::{ClearTextPassword, HashedPassword, PasswordPolicyError};

use crate::domain::entity::principal::Principal;
use crate::domain::value_object::{Credentials, UserId, email::Email};

/// Maximum username length
pub const USERNAME_MAX_LENGTH: usize = 64;

#[derive(Debug, Clone)]
pub struct UserAccount {
    pub principal: Principal,
    pub password_hash: HashedPassword,
}

impl UserAccount {
    /// Create an account, enforcing the password policy and hashing the secret
    pub fn register(
        username: &str,
        email: &str,
        password: String,
        pepper: Option<&[u8]>,
    ) -> AppResult<Self> {
        let username = Self::validate_username(username)?;
        let email = Email::new(email)?;

        let password = ClearTextPassword::new(password).map_err(policy_error)?;
        let password_hash = password
            .hash(pepper)
            .map_err(|e| AppError::internal("Failed to hash password").with_source(e))?;

        Ok(Self {
            principal: Principal::new(UserId::new(), username, email),
            password_hash,
        })
    }

    fn validate_username(username: &str) -> AppResult<String> {
        let username = username.trim();

        if username.is_empty() {
            return Err(AppError::bad_request("Username cannot be empty"));
        }

        if username.chars().count() > USERNAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Username must be at most {} characters",
                USERNAME_MAX_LENGTH
            )));
        }

        // '@' marks an email identifier at login
        if username.contains('@') || username.chars().any(|c| c.is_control() || c.is_whitespace())
        {
            return Err(AppError::bad_request("Username contains invalid characters")
                .with_action("Use letters, digits and punctuation other than '@'"));
        }

        Ok(username.to_string())
    }

    /// Lookup key for username logins
    pub fn canonical_username(&self) -> String {
        self.principal.username.to_lowercase()
    }

    /// Whether the identifier in `credentials` names this account
    pub fn matches(&self, credentials: &Credentials) -> bool {
        if credentials.is_email() {
            self.principal.email.as_str() == credentials.canonical_identifier()
        } else {
            self.canonical_username() == credentials.canonical_identifier()
        }
    }

    pub fn verify_secret(&self, secret: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
        self.password_hash.verify(secret, pepper)
    }
}

fn policy_error(err: PasswordPolicyError) -> AppError {
    let action = match err {
        PasswordPolicyError::TooShort { .. } | PasswordPolicyError::TooLong { .. } => {
            "Choose a password of a different length"
        }
        PasswordPolicyError::CommonPattern => "Avoid common or repeated passwords",
        _ => "Choose a different password",
    };

    AppError::bad_request(err.to_string()).with_action(action)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_verify() {
        let account =
            UserAccount::register("Alice", "alice@example.com", "Tr0ub4dor&3x".into(), None)
                .unwrap();

        let credentials = Credentials::new("alice", "Tr0ub4dor&3x".into()).unwrap();
        assert!(account.matches(&credentials));
        assert!(account.verify_secret(credentials.secret(), None));

        let wrong = Credentials::new("alice", "wrong-password".into()).unwrap();
        assert!(!account.verify_secret(wrong.secret(), None));
    }

    #[test]
    fn test_matches_by_email() {
        let account =
            UserAccount::register("alice", "Alice@Example.com", "Tr0ub4dor&3x".into(), None)
                .unwrap();

        let by_email = Credentials::new("ALICE@example.com", "x".into()).unwrap();
        assert!(account.matches(&by_email));

        let other = Credentials::new("bob", "x".into()).unwrap();
        assert!(!account.matches(&other));
    }

    #[test]
    fn test_register_rejects_weak_password() {
        let err = UserAccount::register("alice", "alice@example.com", "short".into(), None)
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_register_rejects_bad_username() {
        assert!(
            UserAccount::register("", "alice@example.com", "Tr0ub4dor&3x".into(), None).is_err()
        );
        assert!(
            UserAccount::register("a@b", "alice@example.com", "Tr0ub4dor&3x".into(), None)
                .is_err()
        );
    }
}
