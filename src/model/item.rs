use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Category;

/// Opaque item identifier, unique within a list and immutable once assigned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredItem")]
pub struct ShoppingItem {
    pub id: ItemId,
    pub name: String,
    pub category: Category,
    pub checked: bool,
}

impl ShoppingItem {
    /// A fresh, unchecked item with a newly generated id.
    pub fn new(name: &str, category: Category) -> Self {
        Self {
            id: ItemId::generate(),
            name: name.to_string(),
            category,
            checked: false,
        }
    }

    /// Copy of this item with `checked` flipped.
    pub fn toggled(&self) -> Self {
        Self {
            checked: !self.checked,
            ..self.clone()
        }
    }
}

/// Item as it may be found in stored lists: entries written by older
/// clients can lack any field or hold `null` in it.
#[derive(Deserialize)]
struct StoredItem {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    category: Category,
    #[serde(default)]
    checked: Option<bool>,
}

impl From<StoredItem> for ShoppingItem {
    fn from(stored: StoredItem) -> Self {
        let id = match stored.id {
            Some(id) if !id.trim().is_empty() => ItemId(id),
            _ => ItemId::generate(),
        };
        Self {
            id,
            name: stored.name.unwrap_or_default(),
            category: stored.category,
            checked: stored.checked.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_item_is_unchecked_with_unique_id() {
        let a = ShoppingItem::new("Milk", Category::Dairy);
        let b = ShoppingItem::new("Milk", Category::Dairy);
        assert!(!a.checked);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_toggled_leaves_original_untouched() {
        let item = ShoppingItem::new("Bread", Category::Groceries);
        let toggled = item.toggled();
        assert!(toggled.checked);
        assert!(!item.checked);
        assert_eq!(toggled.id, item.id);
    }

    #[test]
    fn test_serializes_backend_layout() {
        let item = ShoppingItem {
            id: ItemId::from("abc"),
            name: "Apples".to_string(),
            category: Category::FruitsAndVegetables,
            checked: true,
        };
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": "abc",
                "name": "Apples",
                "category": "Fruits and Vegetables",
                "checked": true
            })
        );
    }

    #[test]
    fn test_legacy_item_without_id_gets_one() {
        let item: ShoppingItem =
            serde_json::from_str(r#"{"name": "Soap", "category": "Hygiene"}"#).unwrap();
        assert!(!item.id.as_str().is_empty());
        assert_eq!(item.category, Category::Hygiene);
        assert!(!item.checked);
    }

    #[test]
    fn test_item_without_category_defaults_to_others() {
        let item: ShoppingItem = serde_json::from_str(r#"{"id": "1", "name": "Tape"}"#).unwrap();
        assert_eq!(item.category, Category::Others);
        assert_eq!(item.id, ItemId::from("1"));
    }

    #[test]
    fn test_null_fields_load_with_defaults() {
        let item: ShoppingItem = serde_json::from_str(
            r#"{"id": "7", "name": null, "category": null, "checked": null}"#,
        )
        .unwrap();
        assert_eq!(item.id, ItemId::from("7"));
        assert_eq!(item.name, "");
        assert_eq!(item.category, Category::Others);
        assert!(!item.checked);
    }
}
