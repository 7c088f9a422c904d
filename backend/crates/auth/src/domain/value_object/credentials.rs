//! Credentials Value Object
//!
//! The identifier/secret pair presented at login. Transient: it is checked,
//! handed to the authenticator and dropped. The secret is zeroized on drop.

use platform::password::{ClearTextPassword, PasswordPolicyError};
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

/// Maximum identifier length (an email address per RFC 5321)
pub const IDENTIFIER_MAX_LENGTH: usize = 254;

/// Structural problems with login input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialsError {
    #[error("identifier is required")]
    MissingIdentifier,

    #[error("identifier must be at most {max} characters (got {actual})")]
    IdentifierTooLong { max: usize, actual: usize },

    #[error("identifier contains invalid characters")]
    InvalidIdentifier,

    #[error("secret is required")]
    MissingSecret,

    #[error("secret is invalid: {0}")]
    InvalidSecret(PasswordPolicyError),
}

/// Validated login credentials
#[derive(Debug)]
pub struct Credentials {
    canonical: String,
    secret: ClearTextPassword,
}

impl Credentials {
    /// Validate raw login input
    ///
    /// The identifier is NFKC-normalised and trimmed; the secret goes through
    /// [`ClearTextPassword::for_login`], so strength rules do not apply here.
    pub fn new(identifier: impl Into<String>, secret: String) -> Result<Self, CredentialsError> {
        let identifier: String = identifier.into();
        let identifier: String = identifier.nfkc().collect();
        let identifier = identifier.trim().to_string();

        if identifier.is_empty() {
            return Err(CredentialsError::MissingIdentifier);
        }

        let char_count = identifier.chars().count();
        if char_count > IDENTIFIER_MAX_LENGTH {
            return Err(CredentialsError::IdentifierTooLong {
                max: IDENTIFIER_MAX_LENGTH,
                actual: char_count,
            });
        }

        if identifier.chars().any(char::is_control) {
            return Err(CredentialsError::InvalidIdentifier);
        }

        let secret = ClearTextPassword::for_login(secret).map_err(|e| match e {
            PasswordPolicyError::EmptyOrWhitespace => CredentialsError::MissingSecret,
            other => CredentialsError::InvalidSecret(other),
        })?;

        Ok(Self {
            canonical: identifier.to_lowercase(),
            secret,
        })
    }

    /// Lower-cased identifier used for lookups
    pub fn canonical_identifier(&self) -> &str {
        &self.canonical
    }

    /// Whether the identifier should be looked up as an email address
    pub fn is_email(&self) -> bool {
        self.canonical.contains('@')
    }

    pub fn secret(&self) -> &ClearTextPassword {
        &self.secret
    }
}
