//! Application Error
//!
//! [`AppError`] is what finally reaches the HTTP boundary. Domain crates keep
//! their own `thiserror` enums and convert into this type when responding.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use super::kind::ErrorKind;

type Text = Cow<'static, str>;
type Cause = Box<dyn Error + Send + Sync + 'static>;

/// Client-facing error with an optional hint and a log-only cause
///
/// ```rust
/// use kernel::error::{app_error::AppError, kind::ErrorKind};
///
/// let err = AppError::new(ErrorKind::Unauthorized, "Incorrect credentials")
///     .with_action("Check your username and password");
/// assert_eq!(err.status_code(), 401);
/// assert_eq!(err.action(), Some("Check your username and password"));
/// ```
#[derive(Debug)]
pub struct AppError {
    kind: ErrorKind,
    message: Text,
    /// What the client can do about it
    action: Option<Text>,
    /// Never rendered to the client
    source: Option<Cause>,
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<Text>) -> Self {
        Self {
            kind,
            message: message.into(),
            action: None,
            source: None,
        }
    }

    pub fn bad_request(message: impl Into<Text>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    pub fn conflict(message: impl Into<Text>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    pub fn internal(message: impl Into<Text>) -> Self {
        Self::new(ErrorKind::InternalServerError, message)
    }

    pub fn with_action(self, action: impl Into<Text>) -> Self {
        Self {
            action: Some(action.into()),
            ..self
        }
    }

    pub fn with_source<E>(self, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self {
            source: Some(Box::new(source)),
            ..self
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    pub fn is_server_error(&self) -> bool {
        self.kind.is_server_error()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.action {
            Some(action) => write!(f, "{}: {} ({})", self.kind, self.message, action),
            None => write!(f, "{}: {}", self.kind, self.message),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source.as_deref().map(|cause| cause as &(dyn Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_pick_kind() {
        assert_eq!(AppError::bad_request("bad").kind(), ErrorKind::BadRequest);
        assert_eq!(AppError::conflict("taken").status_code(), 409);
        assert!(AppError::internal("boom").is_server_error());
        assert!(!AppError::bad_request("bad").is_server_error());
    }

    #[test]
    fn test_source_is_kept_out_of_message() {
        let err = AppError::internal("Failed to hash password")
            .with_source(std::io::Error::other("argon2 exploded"));

        assert!(err.source().is_some());
        assert_eq!(err.message(), "Failed to hash password");
        assert!(!err.to_string().contains("argon2"));
    }

    #[test]
    fn test_display() {
        let err = AppError::new(ErrorKind::Unauthorized, "Incorrect credentials");
        assert_eq!(err.to_string(), "Unauthorized: Incorrect credentials");

        let err = AppError::bad_request("Identifier is required").with_action("Enter a username");
        assert_eq!(
            err.to_string(),
            "Bad Request: Identifier is required (Enter a username)"
        );
    }
}
