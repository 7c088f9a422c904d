//! Shared Kernel
//!
//! Vocabulary that every gateway crate agrees on:
//! - The unified [`error::app_error::AppError`] and its [`error::kind::ErrorKind`]
//! - Typed identifiers ([`id::UserId`], [`id::SessionId`])
//!
//! Anything that only one domain cares about belongs in that domain's crate.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
