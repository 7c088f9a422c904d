//! Email Value Object
//!
//! A principal's email address, lower-cased. Shape checks only; nothing here
//! proves the mailbox exists.

use kernel::error::app_error::{AppError, AppResult};
use serde::Serialize;

/// RFC 5321 path and local-part limits
const MAX_LENGTH: usize = 254;
const MAX_LOCAL_LENGTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Email(String);

impl Email {
    pub fn new(email: impl Into<String>) -> AppResult<Self> {
        let raw: String = email.into();
        let email = raw.trim().to_lowercase();

        match shape_problem(&email) {
            None => Ok(Self(email)),
            Some(problem) => Err(AppError::bad_request(problem)
                .with_action("Use an address like name@example.com")),
        }
    }

    /// Wrap a value read back from storage
    pub fn from_db(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// First rule `email` breaks, if any
fn shape_problem(email: &str) -> Option<&'static str> {
    if email.is_empty() {
        return Some("Email cannot be empty");
    }
    if email.len() > MAX_LENGTH {
        return Some("Email is too long");
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Some("Email must contain '@'");
    };
    if local.is_empty() || local.len() > MAX_LOCAL_LENGTH {
        return Some("Email local part must be 1 to 64 characters");
    }

    // At least two labels of [a-z0-9-], none empty or hyphen-edged
    let labels: Vec<&str> = domain.split('.').collect();
    let labels_ok = labels.len() >= 2
        && labels.iter().all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        });

    (!labels_ok).then_some("Email domain is invalid")
}
