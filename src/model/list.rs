use std::fmt;

use serde::{Deserialize, Serialize};

use super::ShoppingItem;

/// Backend object id of a shopping list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListId(pub String);

/// Backend object id of a user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named list owned by exactly one user. `items` keeps insertion order.
///
/// The client copy is a disposable cache of the backend's document and is
/// reloaded whenever the list is selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingList {
    pub id: ListId,
    pub name: String,
    pub items: Vec<ShoppingItem>,
    pub owner: UserId,
}

impl ShoppingList {
    pub fn summary(&self) -> ListSummary {
        ListSummary {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }
}

/// Sidebar entry: a list without its items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSummary {
    pub id: ListId,
    pub name: String,
}
