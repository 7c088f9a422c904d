//! Infrastructure Layer
//!
//! Authenticator and session store implementations.

pub mod memory;
pub mod postgres;

pub use memory::{InMemorySessionStore, InMemoryUserDirectory};
pub use postgres::{PgAuthenticator, PgSessionStore};
