use std::collections::HashSet;

use super::{Category, ShoppingItem};

/// Items of one category, in their relative list order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup<'a> {
    pub category: Category,
    pub items: Vec<&'a ShoppingItem>,
}

/// Partition `items` by category.
///
/// Groups appear in the order their category is first seen; within a group
/// items keep their list order. Every item lands in exactly one group.
pub fn group_by_category(items: &[ShoppingItem]) -> Vec<CategoryGroup<'_>> {
    let mut groups: Vec<CategoryGroup<'_>> = Vec::new();

    for item in items {
        match groups.iter_mut().find(|g| g.category == item.category) {
            Some(group) => group.items.push(item),
            None => groups.push(CategoryGroup {
                category: item.category,
                items: vec![item],
            }),
        }
    }

    groups
}

/// Collapsed/expanded flag per category label. Everything starts expanded
/// and nothing is persisted beyond the session.
#[derive(Debug, Default, Clone)]
pub struct CategoryExpansion {
    collapsed: HashSet<Category>,
}

impl CategoryExpansion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, category: Category) -> bool {
        !self.collapsed.contains(&category)
    }

    pub fn toggle(&mut self, category: Category) {
        if !self.collapsed.remove(&category) {
            self.collapsed.insert(category);
        }
    }
}

#[cfg(test)]
#[path = "grouping_tests.rs"]
mod grouping_tests;
