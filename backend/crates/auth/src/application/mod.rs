//! Application Layer
//!
//! Use cases and application services.

pub mod authentication_status;
pub mod config;
pub mod login;
pub mod logout;
pub mod session_context;
pub mod session_token;

// Re-exports
pub use authentication_status::{AuthenticationStatus, AuthenticationStatusUseCase};
pub use config::AuthConfig;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use logout::LogoutUseCase;
pub use session_context::SessionContext;
pub use session_token::SessionTokenSigner;
