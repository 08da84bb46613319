//! List Mutator
//!
//! Every edit builds a new item sequence, shows it immediately and hands
//! back a [`SaveRequest`] carrying the whole sequence. The last sequence the
//! backend accepted is kept as `confirmed`; a failed save rolls the visible
//! items back to it.

use crate::backend::BackendError;
use crate::model::{
    Category, CategoryGroup, ItemId, ListId, ShoppingItem, ShoppingList, group_by_category,
};

pub const LOAD_ERROR: &str = "Failed to load the list";
pub const SAVE_ERROR: &str = "Failed to save the list";

/// Whole-list write to send to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRequest {
    pub save_id: u64,
    pub list_id: ListId,
    pub items: Vec<ShoppingItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct OpenList {
    id: ListId,
    name: String,
}

#[derive(Debug, Default)]
pub struct ListEditor {
    current: Option<OpenList>,
    visible: Vec<ShoppingItem>,
    confirmed: Vec<ShoppingItem>,
    /// Save id behind `confirmed`; older successes are superseded
    confirmed_save_id: u64,
    /// Saves sent but not yet answered, oldest first
    pending: Vec<(u64, Vec<ShoppingItem>)>,
    next_save_id: u64,
    /// Latest load request and the list it is for
    loading: Option<(u64, ListId)>,
    next_load_id: u64,
    error: Option<String>,
}

impl ListEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    pub fn current_list_id(&self) -> Option<&ListId> {
        self.current.as_ref().map(|c| &c.id)
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current.as_ref().map(|c| c.name.as_str())
    }

    pub fn items(&self) -> &[ShoppingItem] {
        &self.visible
    }

    pub fn confirmed_items(&self) -> &[ShoppingItem] {
        &self.confirmed
    }

    pub fn pending_saves(&self) -> usize {
        self.pending.len()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_some()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn grouped(&self) -> Vec<CategoryGroup<'_>> {
        group_by_category(&self.visible)
    }

    /// Start loading `list_id`; returns the request id to send. Only the
    /// response to the most recent load is applied.
    pub fn begin_load(&mut self, list_id: &ListId) -> u64 {
        self.next_load_id += 1;
        self.loading = Some((self.next_load_id, list_id.clone()));
        self.error = None;
        self.next_load_id
    }

    pub fn on_loaded(
        &mut self,
        request_id: u64,
        result: Result<Option<ShoppingList>, BackendError>,
    ) {
        match &self.loading {
            Some((latest, _)) if *latest == request_id => self.loading = None,
            _ => {
                log::debug!("ignoring stale list load {}", request_id);
                return;
            }
        }

        match result {
            Ok(Some(list)) => self.open(list),
            Ok(None) => {
                self.close();
                self.error = Some(LOAD_ERROR.to_string());
            }
            Err(e) => {
                log::debug!("list load failed: {}", e);
                self.close();
                self.error = Some(LOAD_ERROR.to_string());
            }
        }
    }

    /// Show `list`, replacing whatever was open.
    pub fn open(&mut self, list: ShoppingList) {
        self.current = Some(OpenList {
            id: list.id,
            name: list.name,
        });
        self.confirmed = list.items.clone();
        self.visible = list.items;
        self.confirmed_save_id = 0;
        self.pending.clear();
        self.loading = None;
        self.error = None;
    }

    pub fn close(&mut self) {
        self.current = None;
        self.visible.clear();
        self.confirmed.clear();
        self.confirmed_save_id = 0;
        self.pending.clear();
        self.loading = None;
        self.error = None;
    }

    /// Keep the header in step with a rename done from the sidebar.
    pub fn rename_current(&mut self, list_id: &ListId, name: &str) {
        if let Some(current) = self.current.as_mut().filter(|c| &c.id == list_id) {
            current.name = name.to_string();
        }
    }

    /// Append an unchecked item. No-op for a blank name or when no list is
    /// open.
    pub fn add_item(&mut self, name: &str, category: Category) -> Option<SaveRequest> {
        let name = name.trim();
        if name.is_empty() || self.current.is_none() {
            return None;
        }

        let mut items = self.visible.clone();
        items.push(ShoppingItem::new(name, category));
        self.persist(items)
    }

    pub fn toggle_item(&mut self, id: &ItemId) -> Option<SaveRequest> {
        let position = self.visible.iter().position(|i| &i.id == id)?;
        let items = self
            .visible
            .iter()
            .enumerate()
            .map(|(i, item)| if i == position { item.toggled() } else { item.clone() })
            .collect();
        self.persist(items)
    }

    pub fn delete_item(&mut self, id: &ItemId) -> Option<SaveRequest> {
        if !self.visible.iter().any(|i| &i.id == id) {
            return None;
        }
        let items = self.visible.iter().filter(|i| &i.id != id).cloned().collect();
        self.persist(items)
    }

    fn persist(&mut self, items: Vec<ShoppingItem>) -> Option<SaveRequest> {
        let list_id = self.current.as_ref()?.id.clone();
        self.next_save_id += 1;
        self.visible = items.clone();
        self.pending.push((self.next_save_id, items.clone()));

        Some(SaveRequest {
            save_id: self.next_save_id,
            list_id,
            items,
        })
    }

    /// Commit or roll back after the backend answered a save.
    pub fn on_saved(&mut self, save_id: u64, list_id: &ListId, result: Result<(), BackendError>) {
        if self.current_list_id() != Some(list_id) {
            return;
        }
        let Some(index) = self.pending.iter().position(|(id, _)| *id == save_id) else {
            return;
        };
        let (_, items) = self.pending.remove(index);

        match result {
            Ok(()) if save_id < self.confirmed_save_id => {
                log::debug!("save {} superseded by {}", save_id, self.confirmed_save_id);
                if self.pending.is_empty() {
                    self.visible = self.confirmed.clone();
                }
            }
            Ok(()) => {
                self.confirmed = items;
                self.confirmed_save_id = save_id;
                if self.pending.is_empty() {
                    self.visible = self.confirmed.clone();
                }
            }
            Err(e) => {
                log::debug!("save {} failed: {}", save_id, e);
                self.visible = self.confirmed.clone();
                self.error = Some(SAVE_ERROR.to_string());
            }
        }
    }
}

#[cfg(test)]
#[path = "editor_state_tests.rs"]
mod editor_state_tests;
