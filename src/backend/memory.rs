//! In-process backend
//!
//! Keeps users, sessions, list objects and the ingredient catalogue in
//! memory and evaluates [`Query`] locally, with the same access rules as the
//! remote server: list objects carry an owner pointer and an ACL. Used for
//! `--offline` runs and as the test double for the worker and the UI.
//!
//! Failures can be injected per operation and every call is counted.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use serde_json::{Value, json};

use super::query::{Query, suggestion_query};
use super::wire;
use super::{BackendError, OBJECT_NOT_FOUND, OPERATION_FORBIDDEN};
use crate::model::{Category, ListId, ListSummary, ShoppingItem, ShoppingList, UserId};
use crate::session::Session;

const LIST_CLASS: &str = "ShoppingList";
const INGREDIENT_FIELD: &str = "name";

/// Account already exists for this username.
const USERNAME_TAKEN: i64 = 202;
/// Missing or malformed username.
const USERNAME_MISSING: i64 = 200;
/// Missing password.
const PASSWORD_MISSING: i64 = 201;

/// Names of the seeded ingredient catalogue.
pub const CATALOGUE: &[&str] = &[
    "Apples",
    "Avocado",
    "Bacon",
    "Bananas",
    "Beer",
    "Bread",
    "Broccoli",
    "Butter",
    "Carrots",
    "Cheese",
    "Chicken",
    "Chocolate",
    "Coffee",
    "Cream",
    "Cucumber",
    "Eggs",
    "Flour",
    "Ice cream",
    "Juice",
    "Lemons",
    "Lettuce",
    "Milk",
    "Millet",
    "Mint",
    "Mushrooms",
    "Olive oil",
    "Onions",
    "Pasta",
    "Peppers",
    "Potatoes",
    "Rice",
    "Salmon",
    "Shampoo",
    "Soap",
    "Sugar",
    "Tea",
    "Tomatoes",
    "Toothpaste",
    "Water",
    "Yogurt",
];

/// Backend operations, for failure injection and call counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    LogIn,
    SignUp,
    LogOut,
    CurrentUser,
    FindLists,
    LoadList,
    CreateList,
    RenameList,
    DeleteList,
    SaveItems,
    FindSuggestions,
}

#[derive(Debug)]
struct StoredUser {
    id: UserId,
    username: String,
    password: String,
}

#[derive(Debug, Default)]
struct Store {
    users: Vec<StoredUser>,
    sessions: HashMap<String, UserId>,
    lists: Vec<Value>,
    ingredients: Vec<Value>,
    failures: HashMap<Operation, VecDeque<BackendError>>,
    calls: HashMap<Operation, usize>,
}

impl Store {
    fn user_for(&self, session_token: &str) -> Result<&StoredUser, BackendError> {
        let user_id = self
            .sessions
            .get(session_token)
            .ok_or_else(BackendError::invalid_session)?;
        self.users
            .iter()
            .find(|u| &u.id == user_id)
            .ok_or_else(BackendError::invalid_session)
    }

    fn open_session(&mut self, user_id: &UserId) -> String {
        let token = format!("r:{}", uuid::Uuid::new_v4().simple());
        self.sessions.insert(token.clone(), user_id.clone());
        token
    }

    fn position(&self, list_id: &ListId, user: &UserId) -> Result<usize, BackendError> {
        self.lists
            .iter()
            .position(|o| {
                o.get("objectId").and_then(Value::as_str) == Some(list_id.0.as_str())
                    && acl_allows(o, user, "read")
            })
            .ok_or_else(object_not_found)
    }
}

/// In-memory backend with the same semantics as the remote server.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    store: Arc<Mutex<Store>>,
    latency: Option<Duration>,
}

impl MemoryBackend {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with the ingredient catalogue.
    pub fn with_catalogue() -> Self {
        let backend = Self::new();
        backend.add_ingredients(CATALOGUE);
        backend
    }

    /// Catalogue plus a demo account (`demo@example.com` / `demo`) owning one
    /// sample list.
    pub fn demo() -> Self {
        let backend = Self::with_catalogue();
        let owner = backend.add_user("demo@example.com", "demo");
        backend.insert_list(
            &owner,
            "Weekend groceries",
            vec![
                ShoppingItem::new("Milk", Category::Dairy),
                ShoppingItem::new("Bananas", Category::FruitsAndVegetables).toggled(),
                ShoppingItem::new("Salmon", Category::MeatAndFish),
                ShoppingItem::new("Soap", Category::Hygiene),
            ],
        );
        backend
    }

    /// Delay every call by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn add_user(&self, username: &str, password: &str) -> UserId {
        let id = UserId(new_object_id());
        self.lock().users.push(StoredUser {
            id: id.clone(),
            username: username.to_string(),
            password: password.to_string(),
        });
        id
    }

    pub fn add_ingredients(&self, names: &[&str]) {
        let mut store = self.lock();
        for name in names {
            store
                .ingredients
                .push(json!({ "objectId": new_object_id(), "name": name }));
        }
    }

    /// Store a list owned by `owner`, readable and writable by them only.
    pub fn insert_list(&self, owner: &UserId, name: &str, items: Vec<ShoppingItem>) -> ListId {
        let id = ListId(new_object_id());
        let mut object = wire::new_list_body(name, owner);
        object["objectId"] = json!(id.0);
        object["items"] = serde_json::to_value(&items).unwrap_or_else(|_| json!([]));
        self.lock().lists.push(object);
        id
    }

    /// Store a raw list object as-is, ACL included (or omitted).
    pub fn insert_list_object(&self, object: Value) {
        self.lock().lists.push(object);
    }

    /// Persisted items of a list, bypassing access rules.
    pub fn stored_items(&self, list_id: &ListId) -> Option<Vec<ShoppingItem>> {
        let store = self.lock();
        let object = store
            .lists
            .iter()
            .find(|o| o.get("objectId").and_then(Value::as_str) == Some(list_id.0.as_str()))?;
        wire::decode_list(object.clone()).ok().map(|list| list.items)
    }

    /// Make the next call of `operation` fail with `error`. Queued failures
    /// are consumed in order.
    pub fn fail_next(&self, operation: Operation, error: BackendError) {
        self.lock()
            .failures
            .entry(operation)
            .or_default()
            .push_back(error);
    }

    pub fn call_count(&self, operation: Operation) -> usize {
        self.lock().calls.get(&operation).copied().unwrap_or(0)
    }

    /// Count the call, take any injected failure, then wait out the latency.
    async fn enter(&self, operation: Operation) -> Result<(), BackendError> {
        let injected = {
            let mut store = self.lock();
            *store.calls.entry(operation).or_default() += 1;
            store
                .failures
                .get_mut(&operation)
                .and_then(VecDeque::pop_front)
        };

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        match injected {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    pub async fn log_in(&self, username: &str, password: &str) -> Result<Session, BackendError> {
        self.enter(Operation::LogIn).await?;
        let mut store = self.lock();
        let user = store
            .users
            .iter()
            .find(|u| u.username == username && u.password == password)
            .map(|u| (u.id.clone(), u.username.clone()))
            .ok_or_else(|| BackendError::Api {
                status: 404,
                code: OBJECT_NOT_FOUND,
                message: "Invalid username/password.".to_string(),
            })?;

        let token = store.open_session(&user.0);
        Ok(Session::new(&(user.0).0, &user.1, &token))
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<Session, BackendError> {
        self.enter(Operation::SignUp).await?;
        if email.trim().is_empty() {
            return Err(bad_request(USERNAME_MISSING, "bad or missing username"));
        }
        if password.is_empty() {
            return Err(bad_request(PASSWORD_MISSING, "password is required"));
        }

        let mut store = self.lock();
        if store.users.iter().any(|u| u.username == email) {
            return Err(bad_request(
                USERNAME_TAKEN,
                "Account already exists for this username.",
            ));
        }

        let id = UserId(new_object_id());
        store.users.push(StoredUser {
            id: id.clone(),
            username: email.to_string(),
            password: password.to_string(),
        });
        let token = store.open_session(&id);
        Ok(Session::new(&id.0, email, &token))
    }

    pub async fn log_out(&self, session: &Session) -> Result<(), BackendError> {
        self.enter(Operation::LogOut).await?;
        match self.lock().sessions.remove(&session.session_token) {
            Some(_) => Ok(()),
            None => Err(BackendError::invalid_session()),
        }
    }

    pub async fn current_user(&self, session_token: &str) -> Result<Session, BackendError> {
        self.enter(Operation::CurrentUser).await?;
        let store = self.lock();
        let user = store.user_for(session_token)?;
        Ok(Session::new(&user.id.0, &user.username, session_token))
    }

    pub async fn find_lists(&self, session: &Session) -> Result<Vec<ListSummary>, BackendError> {
        self.enter(Operation::FindLists).await?;
        let store = self.lock();
        let user = store.user_for(&session.session_token)?;

        let query = Query::new(LIST_CLASS)
            .equal_to("owner", wire::user_pointer(&user.id))
            .select(&["name"]);
        let readable = store.lists.iter().filter(|o| acl_allows(o, &user.id, "read"));

        query
            .apply(readable)
            .into_iter()
            .map(wire::decode_summary)
            .collect()
    }

    pub async fn load_list(
        &self,
        session: &Session,
        list_id: &ListId,
    ) -> Result<Option<ShoppingList>, BackendError> {
        self.enter(Operation::LoadList).await?;
        let store = self.lock();
        let user = store.user_for(&session.session_token)?;

        let query = Query::new(LIST_CLASS)
            .equal_to("objectId", list_id.0.as_str())
            .equal_to("owner", wire::user_pointer(&user.id))
            .limit(1);
        let readable = store.lists.iter().filter(|o| acl_allows(o, &user.id, "read"));

        match query.apply(readable).into_iter().next() {
            Some(object) => wire::decode_list(object).map(Some),
            None => Ok(None),
        }
    }

    pub async fn create_list(
        &self,
        session: &Session,
        name: &str,
    ) -> Result<ShoppingList, BackendError> {
        self.enter(Operation::CreateList).await?;
        let owner = {
            let store = self.lock();
            store.user_for(&session.session_token)?.id.clone()
        };

        let id = self.insert_list(&owner, name, Vec::new());
        Ok(ShoppingList {
            id,
            name: name.to_string(),
            items: Vec::new(),
            owner,
        })
    }

    pub async fn rename_list(
        &self,
        session: &Session,
        list_id: &ListId,
        name: &str,
    ) -> Result<(), BackendError> {
        self.enter(Operation::RenameList).await?;
        let mut store = self.lock();
        let user = store.user_for(&session.session_token)?.id.clone();
        let index = owned_position(&store, list_id, &user, "modify")?;
        store.lists[index]["name"] = json!(name);
        Ok(())
    }

    pub async fn delete_list(&self, session: &Session, list_id: &ListId) -> Result<(), BackendError> {
        self.enter(Operation::DeleteList).await?;
        let mut store = self.lock();
        let user = store.user_for(&session.session_token)?.id.clone();
        let index = owned_position(&store, list_id, &user, "delete")?;
        store.lists.remove(index);
        Ok(())
    }

    pub async fn save_items(
        &self,
        session: &Session,
        list_id: &ListId,
        items: &[ShoppingItem],
    ) -> Result<(), BackendError> {
        self.enter(Operation::SaveItems).await?;
        let body = wire::items_body(items)?;

        let mut store = self.lock();
        let user = store.user_for(&session.session_token)?.id.clone();
        let index = store.position(list_id, &user)?;
        if !acl_allows(&store.lists[index], &user, "write") {
            return Err(bad_request(
                OPERATION_FORBIDDEN,
                "Permission denied for action update on class ShoppingList.",
            ));
        }
        store.lists[index]["items"] = body["items"].clone();
        Ok(())
    }

    pub async fn find_suggestions(
        &self,
        session: &Session,
        normalized: &str,
        limit: usize,
    ) -> Result<Vec<String>, BackendError> {
        self.enter(Operation::FindSuggestions).await?;
        let store = self.lock();
        store.user_for(&session.session_token)?;

        let query = suggestion_query("Ingredient", INGREDIENT_FIELD, normalized, limit);
        let matches = query.apply(store.ingredients.iter());
        Ok(wire::decode_suggestions(&matches, INGREDIENT_FIELD, limit))
    }
}

/// Index of a readable list owned by `user`.
fn owned_position(
    store: &Store,
    list_id: &ListId,
    user: &UserId,
    action: &str,
) -> Result<usize, BackendError> {
    let index = store.position(list_id, user)?;
    let owner = store.lists[index]
        .pointer("/owner/objectId")
        .and_then(Value::as_str);
    if owner != Some(user.0.as_str()) {
        return Err(BackendError::Forbidden(format!(
            "You don't have permission to {} this list",
            action
        )));
    }
    Ok(index)
}

/// Objects without an ACL are public.
fn acl_allows(object: &Value, user: &UserId, permission: &str) -> bool {
    let Some(acl) = object.get("ACL") else {
        return true;
    };
    let granted = |key: &str| {
        acl.get(key)
            .and_then(|entry| entry.get(permission))
            .and_then(Value::as_bool)
            .unwrap_or(false)
    };
    granted("*") || granted(&user.0)
}

fn object_not_found() -> BackendError {
    BackendError::Api {
        status: 404,
        code: OBJECT_NOT_FOUND,
        message: "Object not found.".to_string(),
    }
}

fn bad_request(code: i64, message: &str) -> BackendError {
    BackendError::Api {
        status: 400,
        code,
        message: message.to_string(),
    }
}

/// Ten alphanumeric characters, like server-assigned object ids.
fn new_object_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..10].to_string()
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod memory_tests;
