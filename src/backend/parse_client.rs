//! REST client for a Parse-compatible backend
//!
//! Every call carries the application headers and, when a session is given,
//! the session token. Lists are read and written as whole documents.

use reqwest::{Client, Method, RequestBuilder};
use serde_json::{Value, json};

use super::query::{Query, suggestion_query};
use super::wire::{self, ApiErrorBody};
use super::{BackendError, SuggestionSource};
use crate::config::{BackendConfig, SuggestionConfig};
use crate::error::ShoplistError;
use crate::model::{ListId, ListSummary, ShoppingItem, ShoppingList};
use crate::session::Session;

const HEADER_APP_ID: &str = "X-Parse-Application-Id";
const HEADER_JS_KEY: &str = "X-Parse-Javascript-Key";
const HEADER_SESSION: &str = "X-Parse-Session-Token";
const HEADER_REVOCABLE: &str = "X-Parse-Revocable-Session";

#[derive(Debug, Clone)]
pub struct ParseClient {
    client: Client,
    server_url: String,
    app_id: String,
    javascript_key: Option<String>,
    list_class: String,
    suggestions: SuggestionSource,
}

impl ParseClient {
    pub fn new(
        server_url: &str,
        app_id: &str,
        javascript_key: Option<String>,
        list_class: &str,
        suggestions: SuggestionSource,
    ) -> Self {
        Self {
            client: Client::new(),
            server_url: server_url.trim().trim_end_matches('/').to_string(),
            app_id: app_id.trim().to_string(),
            javascript_key: javascript_key.filter(|k| !k.trim().is_empty()),
            list_class: list_class.to_string(),
            suggestions,
        }
    }

    pub fn from_config(
        backend: &BackendConfig,
        suggestions: &SuggestionConfig,
    ) -> Result<Self, ShoplistError> {
        match (&backend.server_url, &backend.app_id) {
            (Some(url), Some(app_id)) if backend.is_configured() => Ok(Self::new(
                url,
                app_id,
                backend.javascript_key.clone(),
                &backend.list_class,
                SuggestionSource::from(suggestions),
            )),
            _ => Err(ShoplistError::BackendNotConfigured),
        }
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.server_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str, session: Option<&Session>) -> RequestBuilder {
        let mut builder = self
            .client
            .request(method, self.url(path))
            .header(HEADER_APP_ID, &self.app_id);

        if let Some(key) = &self.javascript_key {
            builder = builder.header(HEADER_JS_KEY, key);
        }
        if let Some(session) = session {
            builder = builder.header(HEADER_SESSION, &session.session_token);
        }
        builder
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Value, BackendError> {
        let response = builder
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(api_error(status.as_u16(), &body));
        }
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(|e| BackendError::Decode(e.to_string()))
    }

    async fn find(&self, session: &Session, query: &Query) -> Result<Vec<Value>, BackendError> {
        log::debug!("find {} ({} filters)", query.class_name, query.filters.len());
        let builder = self
            .request(
                Method::GET,
                &format!("classes/{}", query.class_name),
                Some(session),
            )
            .query(&query.to_params());

        let mut response = self.send(builder).await?;
        match response.get_mut("results").map(Value::take) {
            Some(Value::Array(results)) => Ok(results),
            _ => Err(BackendError::Decode("missing results array".to_string())),
        }
    }

    pub async fn log_in(&self, username: &str, password: &str) -> Result<Session, BackendError> {
        log::debug!("log in {}", username);
        let builder = self
            .request(Method::POST, "login", None)
            .header(HEADER_REVOCABLE, "1")
            .json(&json!({ "username": username, "password": password }));
        wire::decode_session(self.send(builder).await?, None)
    }

    /// The email doubles as the username.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<Session, BackendError> {
        log::debug!("sign up {}", email);
        let builder = self
            .request(Method::POST, "users", None)
            .header(HEADER_REVOCABLE, "1")
            .json(&json!({ "username": email, "email": email, "password": password }));

        let mut session = wire::decode_session(self.send(builder).await?, None)?;
        if session.username.is_empty() {
            session.username = email.to_string();
        }
        Ok(session)
    }

    pub async fn log_out(&self, session: &Session) -> Result<(), BackendError> {
        self.send(self.request(Method::POST, "logout", Some(session)))
            .await
            .map(|_| ())
    }

    /// Validate a stored token and recover the user it belongs to.
    pub async fn current_user(&self, session_token: &str) -> Result<Session, BackendError> {
        let builder = self
            .request(Method::GET, "users/me", None)
            .header(HEADER_SESSION, session_token);
        wire::decode_session(self.send(builder).await?, Some(session_token))
    }

    pub async fn find_lists(&self, session: &Session) -> Result<Vec<ListSummary>, BackendError> {
        let query = Query::new(&self.list_class)
            .equal_to("owner", wire::user_pointer(&session.user_id))
            .select(&["name"]);

        self.find(session, &query)
            .await?
            .into_iter()
            .map(wire::decode_summary)
            .collect()
    }

    pub async fn load_list(
        &self,
        session: &Session,
        list_id: &ListId,
    ) -> Result<Option<ShoppingList>, BackendError> {
        let query = Query::new(&self.list_class)
            .equal_to("objectId", list_id.0.as_str())
            .equal_to("owner", wire::user_pointer(&session.user_id))
            .limit(1);

        match self.find(session, &query).await?.into_iter().next() {
            Some(object) => wire::decode_list(object).map(Some),
            None => Ok(None),
        }
    }

    pub async fn create_list(
        &self,
        session: &Session,
        name: &str,
    ) -> Result<ShoppingList, BackendError> {
        let builder = self
            .request(
                Method::POST,
                &format!("classes/{}", self.list_class),
                Some(session),
            )
            .json(&wire::new_list_body(name, &session.user_id));

        let created = self.send(builder).await?;
        let object_id = created
            .get("objectId")
            .and_then(Value::as_str)
            .ok_or_else(|| BackendError::Decode("missing objectId".to_string()))?;

        Ok(ShoppingList {
            id: ListId(object_id.to_string()),
            name: name.to_string(),
            items: Vec::new(),
            owner: session.user_id.clone(),
        })
    }

    /// Fetch a list and make sure the session user owns it.
    async fn fetch_owned(
        &self,
        session: &Session,
        list_id: &ListId,
        action: &str,
    ) -> Result<ShoppingList, BackendError> {
        let path = format!("classes/{}/{}", self.list_class, list_id.0);
        let list = wire::decode_list(self.send(self.request(Method::GET, &path, Some(session))).await?)?;
        if list.owner != session.user_id {
            return Err(BackendError::Forbidden(format!(
                "You don't have permission to {} this list",
                action
            )));
        }
        Ok(list)
    }

    pub async fn rename_list(
        &self,
        session: &Session,
        list_id: &ListId,
        name: &str,
    ) -> Result<(), BackendError> {
        self.fetch_owned(session, list_id, "modify").await?;
        let path = format!("classes/{}/{}", self.list_class, list_id.0);
        let builder = self
            .request(Method::PUT, &path, Some(session))
            .json(&json!({ "name": name }));
        self.send(builder).await.map(|_| ())
    }

    pub async fn delete_list(&self, session: &Session, list_id: &ListId) -> Result<(), BackendError> {
        self.fetch_owned(session, list_id, "delete").await?;
        let path = format!("classes/{}/{}", self.list_class, list_id.0);
        self.send(self.request(Method::DELETE, &path, Some(session)))
            .await
            .map(|_| ())
    }

    /// Overwrite the whole `items` array of a list.
    pub async fn save_items(
        &self,
        session: &Session,
        list_id: &ListId,
        items: &[ShoppingItem],
    ) -> Result<(), BackendError> {
        log::debug!("save {} items to list {}", items.len(), list_id);
        let path = format!("classes/{}/{}", self.list_class, list_id.0);
        let builder = self
            .request(Method::PUT, &path, Some(session))
            .json(&wire::items_body(items)?);
        self.send(builder).await.map(|_| ())
    }

    pub async fn find_suggestions(
        &self,
        session: &Session,
        normalized: &str,
        limit: usize,
    ) -> Result<Vec<String>, BackendError> {
        let query = suggestion_query(
            &self.suggestions.class_name,
            &self.suggestions.field,
            normalized,
            limit,
        );
        let results = self.find(session, &query).await?;
        Ok(wire::decode_suggestions(
            &results,
            &self.suggestions.field,
            limit,
        ))
    }
}

/// Turn a non-2xx response into an [`BackendError::Api`].
fn api_error(status: u16, body: &str) -> BackendError {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) if !parsed.error.is_empty() => BackendError::Api {
            status,
            code: parsed.code,
            message: parsed.error,
        },
        _ => BackendError::Api {
            status,
            code: 0,
            message: if body.trim().is_empty() {
                format!("HTTP {}", status)
            } else {
                body.trim().to_string()
            },
        },
    }
}

#[cfg(test)]
#[path = "parse_client_tests.rs"]
mod parse_client_tests;
