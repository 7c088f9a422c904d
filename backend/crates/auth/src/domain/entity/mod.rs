//! Entity Module

pub mod principal;
pub mod session_binding;
pub mod user_account;

pub use principal::Principal;
pub use session_binding::SessionBinding;
pub use user_account::UserAccount;
