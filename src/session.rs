//! Authenticated user context.
//!
//! A [`Session`] is handed explicitly to every backend request instead of
//! being looked up from ambient global state.

pub mod session_storage;

use crate::model::UserId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: UserId,
    pub username: String,
    pub session_token: String,
}

impl Session {
    pub fn new(user_id: &str, username: &str, session_token: &str) -> Self {
        Self {
            user_id: UserId(user_id.to_string()),
            username: username.to_string(),
            session_token: session_token.to_string(),
        }
    }
}
