//! Serialization boundary between backend objects and domain records.
//!
//! Only `name`, `items` and `owner` of a list object are read or written;
//! everything else the backend stores is ignored.

use serde::Deserialize;
use serde_json::{Map, Value, json};

use super::BackendError;
use crate::model::{ListId, ListSummary, ShoppingItem, ShoppingList, UserId};
use crate::session::Session;

pub const USER_CLASS: &str = "_User";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListObject {
    object_id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    items: Option<Vec<Value>>,
    #[serde(default)]
    owner: Option<PointerObject>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PointerObject {
    object_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserObject {
    object_id: String,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    session_token: Option<String>,
}

/// Error payload returned by the backend: `{"code": 101, "error": "..."}`.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub error: String,
}

pub fn pointer(class_name: &str, object_id: &str) -> Value {
    json!({
        "__type": "Pointer",
        "className": class_name,
        "objectId": object_id,
    })
}

pub fn user_pointer(user: &UserId) -> Value {
    pointer(USER_CLASS, &user.0)
}

/// Access list granting read and write to the owner only.
pub fn owner_acl(user: &UserId) -> Value {
    let mut acl = Map::new();
    acl.insert(user.0.clone(), json!({ "read": true, "write": true }));
    Value::Object(acl)
}

pub fn new_list_body(name: &str, owner: &UserId) -> Value {
    json!({
        "name": name,
        "items": [],
        "owner": user_pointer(owner),
        "ACL": owner_acl(owner),
    })
}

pub fn items_body(items: &[ShoppingItem]) -> Result<Value, BackendError> {
    let items = serde_json::to_value(items).map_err(|e| BackendError::Decode(e.to_string()))?;
    Ok(json!({ "items": items }))
}

pub fn decode_list(object: Value) -> Result<ShoppingList, BackendError> {
    let list: ListObject =
        serde_json::from_value(object).map_err(|e| BackendError::Decode(e.to_string()))?;
    Ok(ShoppingList {
        id: ListId(list.object_id),
        name: list.name.unwrap_or_default(),
        items: list
            .items
            .unwrap_or_default()
            .into_iter()
            .filter_map(decode_item)
            .collect(),
        owner: UserId(list.owner.map(|p| p.object_id).unwrap_or_default()),
    })
}

/// An unreadable entry is dropped so the rest of the list still loads.
fn decode_item(value: Value) -> Option<ShoppingItem> {
    match serde_json::from_value(value) {
        Ok(item) => Some(item),
        Err(e) => {
            log::warn!("skipping unreadable list item: {}", e);
            None
        }
    }
}

pub fn decode_summary(object: Value) -> Result<ListSummary, BackendError> {
    decode_list(object).map(|list| list.summary())
}

/// Build a session from a user object. `/users/me` may omit the token, in
/// which case the one used for the request is kept.
pub fn decode_session(object: Value, known_token: Option<&str>) -> Result<Session, BackendError> {
    let user: UserObject =
        serde_json::from_value(object).map_err(|e| BackendError::Decode(e.to_string()))?;
    let token = user
        .session_token
        .or_else(|| known_token.map(str::to_string))
        .ok_or_else(|| BackendError::Decode("missing sessionToken".to_string()))?;

    Ok(Session::new(
        &user.object_id,
        user.username.as_deref().unwrap_or_default(),
        &token,
    ))
}

/// Extract suggestion names, dropping blanks and duplicates, keeping order.
pub fn decode_suggestions(objects: &[Value], field: &str, limit: usize) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for name in objects
        .iter()
        .filter_map(|o| o.get(field).and_then(Value::as_str))
        .map(str::trim)
        .filter(|n| !n.is_empty())
    {
        if names.len() >= limit {
            break;
        }
        if !names.iter().any(|existing| existing == name) {
            names.push(name.to_string());
        }
    }
    names
}
