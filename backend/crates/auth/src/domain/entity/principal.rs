//! Principal Entity
//!
//! The authenticated identity a session is bound to.

use serde::Serialize;

use crate::domain::value_object::{email::Email, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    pub id: UserId,
    pub username: String,
    pub email: Email,
}

impl Principal {
    pub fn new(id: UserId, username: impl Into<String>, email: Email) -> Self {
        Self {
            id,
            username: username.into(),
            email,
        }
    }
}
