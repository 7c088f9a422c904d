//! Auth (Session Authentication Gateway) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, collaborator traits
//! - `application/` - Login, logout and status use cases
//! - `infra/` - In-memory and PostgreSQL collaborators
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Login with username or email + password
//! - Server-side sessions referenced by a signed cookie
//! - Session id regeneration on every login
//! - Pluggable [`Authenticator`] and [`SessionStore`]
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (NIST SP 800-63B compliant)
//! - Session cookie is `HttpOnly` and HMAC-SHA256 signed
//! - A cookie with a bad signature is treated as no session

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::{
    AuthenticationStatus, AuthenticationStatusUseCase, LoginInput, LoginOutput, LoginUseCase,
    LogoutUseCase, SessionContext,
};
pub use domain::repository::{Authenticator, SessionStore};
pub use error::{AuthError, AuthResult, BackendError, BackendResult};
pub use infra::{InMemorySessionStore, InMemoryUserDirectory, PgAuthenticator, PgSessionStore};
pub use presentation::router::{auth_router, auth_router_with_state};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
