//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations for the gateway:
//! - Cryptographic utilities (HMAC-SHA256 signing, random keys, Base64)
//! - Password hashing (Argon2id, NIST SP 800-63B compliant)
//! - Cookie building and parsing

pub mod cookie;
pub mod crypto;
pub mod password;
