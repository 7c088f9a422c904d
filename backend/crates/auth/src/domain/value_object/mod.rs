//! Value Object Module

pub mod credentials;
pub mod email;

pub use credentials::{Credentials, CredentialsError};
pub use email::Email;
pub use kernel::id::{SessionId, UserId};
