//! Backend access
//!
//! [`BackendClient`] dispatches to either the REST client for a
//! Parse-compatible server or the in-process [`MemoryBackend`] used for
//! offline mode and tests. Every call that touches user data takes the
//! [`Session`] explicitly.

mod backend_error;
pub mod memory;
pub mod parse_client;
pub mod query;
pub mod wire;

pub use backend_error::{
    BackendError, ErrorKind, INVALID_SESSION_TOKEN, OBJECT_NOT_FOUND, OPERATION_FORBIDDEN,
};
pub use memory::{MemoryBackend, Operation};
pub use parse_client::ParseClient;

use crate::config::SuggestionConfig;
use crate::model::{ListId, ListSummary, ShoppingItem, ShoppingList};
use crate::session::Session;

/// Where autocomplete candidates are looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionSource {
    pub class_name: String,
    pub field: String,
}

impl From<&SuggestionConfig> for SuggestionSource {
    fn from(config: &SuggestionConfig) -> Self {
        Self {
            class_name: config.class_name.clone(),
            field: config.field.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum BackendClient {
    /// Remote Parse-compatible server
    Parse(ParseClient),
    /// In-process store
    Memory(MemoryBackend),
}

impl BackendClient {
    pub fn name(&self) -> &'static str {
        match self {
            BackendClient::Parse(_) => "parse",
            BackendClient::Memory(_) => "memory",
        }
    }

    pub async fn log_in(&self, username: &str, password: &str) -> Result<Session, BackendError> {
        match self {
            BackendClient::Parse(client) => client.log_in(username, password).await,
            BackendClient::Memory(store) => store.log_in(username, password).await,
        }
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<Session, BackendError> {
        match self {
            BackendClient::Parse(client) => client.sign_up(email, password).await,
            BackendClient::Memory(store) => store.sign_up(email, password).await,
        }
    }

    pub async fn log_out(&self, session: &Session) -> Result<(), BackendError> {
        match self {
            BackendClient::Parse(client) => client.log_out(session).await,
            BackendClient::Memory(store) => store.log_out(session).await,
        }
    }

    pub async fn current_user(&self, session_token: &str) -> Result<Session, BackendError> {
        match self {
            BackendClient::Parse(client) => client.current_user(session_token).await,
            BackendClient::Memory(store) => store.current_user(session_token).await,
        }
    }

    /// Lists owned by the session user, names only.
    pub async fn find_lists(&self, session: &Session) -> Result<Vec<ListSummary>, BackendError> {
        match self {
            BackendClient::Parse(client) => client.find_lists(session).await,
            BackendClient::Memory(store) => store.find_lists(session).await,
        }
    }

    /// `Ok(None)` when the list does not exist or is not visible to the user.
    pub async fn load_list(
        &self,
        session: &Session,
        list_id: &ListId,
    ) -> Result<Option<ShoppingList>, BackendError> {
        match self {
            BackendClient::Parse(client) => client.load_list(session, list_id).await,
            BackendClient::Memory(store) => store.load_list(session, list_id).await,
        }
    }

    pub async fn create_list(
        &self,
        session: &Session,
        name: &str,
    ) -> Result<ShoppingList, BackendError> {
        match self {
            BackendClient::Parse(client) => client.create_list(session, name).await,
            BackendClient::Memory(store) => store.create_list(session, name).await,
        }
    }

    pub async fn rename_list(
        &self,
        session: &Session,
        list_id: &ListId,
        name: &str,
    ) -> Result<(), BackendError> {
        match self {
            BackendClient::Parse(client) => client.rename_list(session, list_id, name).await,
            BackendClient::Memory(store) => store.rename_list(session, list_id, name).await,
        }
    }

    pub async fn delete_list(&self, session: &Session, list_id: &ListId) -> Result<(), BackendError> {
        match self {
            BackendClient::Parse(client) => client.delete_list(session, list_id).await,
            BackendClient::Memory(store) => store.delete_list(session, list_id).await,
        }
    }

    pub async fn save_items(
        &self,
        session: &Session,
        list_id: &ListId,
        items: &[ShoppingItem],
    ) -> Result<(), BackendError> {
        match self {
            BackendClient::Parse(client) => client.save_items(session, list_id, items).await,
            BackendClient::Memory(store) => store.save_items(session, list_id, items).await,
        }
    }

    /// Item names starting with the normalized query, at most `limit`.
    pub async fn find_suggestions(
        &self,
        session: &Session,
        normalized: &str,
        limit: usize,
    ) -> Result<Vec<String>, BackendError> {
        match self {
            BackendClient::Parse(client) => {
                client.find_suggestions(session, normalized, limit).await
            }
            BackendClient::Memory(store) => store.find_suggestions(session, normalized, limit).await,
        }
    }
}
