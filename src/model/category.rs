use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Fixed set of labels used to group items for display.
///
/// Stored as the label string. Anything outside the closed set, including a
/// missing or empty label, reads back as [`Category::Others`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    FruitsAndVegetables,
    MeatAndFish,
    Groceries,
    Beverages,
    Dairy,
    Frozen,
    Hygiene,
    #[default]
    Others,
}

impl Category {
    /// Picker order.
    pub const ALL: [Category; 8] = [
        Category::FruitsAndVegetables,
        Category::MeatAndFish,
        Category::Groceries,
        Category::Beverages,
        Category::Dairy,
        Category::Frozen,
        Category::Hygiene,
        Category::Others,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::FruitsAndVegetables => "Fruits and Vegetables",
            Category::MeatAndFish => "Meat and Fish",
            Category::Groceries => "Groceries",
            Category::Beverages => "Beverages",
            Category::Dairy => "Dairy",
            Category::Frozen => "Frozen",
            Category::Hygiene => "Hygiene",
            Category::Others => "Others",
        }
    }

    /// Resolve a stored label. Older lists used the long forms
    /// "Dairy Products" and "Frozen Foods".
    pub fn from_label(label: &str) -> Category {
        match label.trim() {
            "Fruits and Vegetables" => Category::FruitsAndVegetables,
            "Meat and Fish" => Category::MeatAndFish,
            "Groceries" => Category::Groceries,
            "Beverages" => Category::Beverages,
            "Dairy" | "Dairy Products" => Category::Dairy,
            "Frozen" | "Frozen Foods" => Category::Frozen,
            "Hygiene" => Category::Hygiene,
            _ => Category::Others,
        }
    }

    fn position(self) -> usize {
        Category::ALL
            .iter()
            .position(|c| *c == self)
            .unwrap_or(Category::ALL.len() - 1)
    }

    pub fn next(self) -> Category {
        Category::ALL[(self.position() + 1) % Category::ALL.len()]
    }

    pub fn previous(self) -> Category {
        let len = Category::ALL.len();
        Category::ALL[(self.position() + len - 1) % len]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = Option::<String>::deserialize(deserializer)?;
        Ok(label.as_deref().map(Category::from_label).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::from_label(category.label()), category);
        }
    }

    #[test]
    fn test_legacy_labels_are_aliases() {
        assert_eq!(Category::from_label("Dairy Products"), Category::Dairy);
        assert_eq!(Category::from_label("Frozen Foods"), Category::Frozen);
    }

    #[test]
    fn test_unknown_or_empty_label_is_others() {
        assert_eq!(Category::from_label("Garden"), Category::Others);
        assert_eq!(Category::from_label(""), Category::Others);
        assert_eq!(Category::default(), Category::Others);
    }

    #[test]
    fn test_null_deserializes_to_others() {
        let category: Category = serde_json::from_str("null").unwrap();
        assert_eq!(category, Category::Others);
    }

    #[test]
    fn test_serializes_as_label() {
        let json = serde_json::to_string(&Category::MeatAndFish).unwrap();
        assert_eq!(json, "\"Meat and Fish\"");
    }

    #[test]
    fn test_next_and_previous_cycle() {
        assert_eq!(Category::Others.next(), Category::FruitsAndVegetables);
        assert_eq!(Category::FruitsAndVegetables.previous(), Category::Others);
        for category in Category::ALL {
            assert_eq!(category.next().previous(), category);
        }
    }
}
