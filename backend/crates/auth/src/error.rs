//! Auth Error Types
//!
//! [`AuthError`] is the gateway's error taxonomy. [`BackendError`] is what the
//! pluggable collaborators (authenticator, session store) report. The use
//! case that called them decides which `AuthError` bucket a failure lands in.

use std::error::Error as StdError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::value_object::credentials::CredentialsError;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Result type returned by collaborator implementations
pub type BackendResult<T> = Result<T, BackendError>;

/// Failure inside an authenticator or session store implementation
#[derive(Debug, Error)]
#[error("{message}")]
pub struct BackendError {
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<sqlx::Error> for BackendError {
    fn from(err: sqlx::Error) -> Self {
        BackendError::new("Database error").with_source(err)
    }
}

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Malformed login input (caller's fault)
    #[error("Invalid login request: {0}")]
    Validation(String),

    /// The authenticator found no principal for these credentials
    #[error("Incorrect credentials")]
    InvalidCredentials,

    /// The authenticator itself failed
    #[error("Authentication backend failure: {0}")]
    AuthInfrastructure(#[source] BackendError),

    /// The session store failed to bind, read or unbind
    #[error("Session store failure: {0}")]
    Session(#[source] BackendError),

    /// A protected route was called without a bound session
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials | AuthError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AuthError::AuthInfrastructure(_) | AuthError::Session(_) | AuthError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::InvalidCredentials | AuthError::Unauthenticated => ErrorKind::Unauthorized,
            AuthError::AuthInfrastructure(_) | AuthError::Session(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    ///
    /// Server-side failures get a fixed message; backend details stay in the logs.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Validation(detail) => AppError::new(self.kind(), detail.clone())
                .with_action("Provide a non-empty identifier and secret"),
            AuthError::InvalidCredentials => AppError::new(self.kind(), "Incorrect credentials"),
            AuthError::Unauthenticated => {
                AppError::new(self.kind(), "Authentication required").with_action("Log in first")
            }
            AuthError::AuthInfrastructure(_) => {
                AppError::new(self.kind(), "Authentication is temporarily unavailable")
            }
            AuthError::Session(_) => AppError::new(self.kind(), "Session could not be updated"),
            AuthError::Internal(_) => AppError::new(self.kind(), "Internal error"),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::AuthInfrastructure(e) => {
                tracing::error!(error = %e, source = ?e.source(), "Authenticator failure");
            }
            AuthError::Session(e) => {
                tracing::error!(error = %e, source = ?e.source(), "Session store failure");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<CredentialsError> for AuthError {
    fn from(err: CredentialsError) -> Self {
        AuthError::Validation(err.to_string())
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        err.to_app_error()
    }
}
