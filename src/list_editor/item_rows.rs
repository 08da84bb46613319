use crate::model::{Category, CategoryExpansion, CategoryGroup, ItemId};

/// One selectable row of the items pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemRow {
    Header { category: Category, count: usize },
    Item(ItemId),
}

/// Flatten groups into rows: each header, then its items when expanded.
pub fn item_rows(groups: &[CategoryGroup<'_>], expansion: &CategoryExpansion) -> Vec<ItemRow> {
    let mut rows = Vec::new();
    for group in groups {
        rows.push(ItemRow::Header {
            category: group.category,
            count: group.items.len(),
        });
        if expansion.is_expanded(group.category) {
            rows.extend(group.items.iter().map(|item| ItemRow::Item(item.id.clone())));
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ShoppingItem, group_by_category};

    #[test]
    fn test_rows_follow_groups() {
        let items = vec![
            ShoppingItem::new("Milk", Category::Dairy),
            ShoppingItem::new("Soap", Category::Hygiene),
            ShoppingItem::new("Butter", Category::Dairy),
        ];
        let groups = group_by_category(&items);

        let rows = item_rows(&groups, &CategoryExpansion::new());

        assert_eq!(
            rows,
            vec![
                ItemRow::Header {
                    category: Category::Dairy,
                    count: 2
                },
                ItemRow::Item(items[0].id.clone()),
                ItemRow::Item(items[2].id.clone()),
                ItemRow::Header {
                    category: Category::Hygiene,
                    count: 1
                },
                ItemRow::Item(items[1].id.clone()),
            ]
        );
    }

    #[test]
    fn test_collapsed_group_keeps_header_only() {
        let items = vec![
            ShoppingItem::new("Milk", Category::Dairy),
            ShoppingItem::new("Soap", Category::Hygiene),
        ];
        let groups = group_by_category(&items);
        let mut expansion = CategoryExpansion::new();
        expansion.toggle(Category::Dairy);

        let rows = item_rows(&groups, &expansion);

        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows[0],
            ItemRow::Header {
                category: Category::Dairy,
                count: 1
            }
        );
        assert!(matches!(rows[1], ItemRow::Header { .. }));
    }

    #[test]
    fn test_no_items_no_rows() {
        assert!(item_rows(&[], &CategoryExpansion::new()).is_empty());
    }
}
