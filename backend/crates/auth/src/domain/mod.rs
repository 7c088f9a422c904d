//! Domain Layer
//!
//! Entities, value objects, and the collaborator traits the gateway
//! delegates to.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{Principal, SessionBinding, UserAccount};
pub use repository::{Authenticator, SessionStore};
