use crate::backend::{BackendError, ErrorKind};
use crate::model::{ListId, ListSummary};
use crate::widgets::TextInput;

pub const LOAD_ERROR: &str = "Failed to load lists";
pub const CREATE_ERROR: &str = "Failed to create the list";
pub const RENAME_ERROR: &str = "Failed to rename the list";
pub const DELETE_ERROR: &str = "Failed to delete the list";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ListsMode {
    #[default]
    Browse,
    Create,
    Rename {
        list_id: ListId,
    },
    ConfirmDelete {
        list_id: ListId,
    },
}

/// Backend work requested by the sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListCommand {
    Create { name: String },
    Rename { list_id: ListId, name: String },
    Delete { list_id: ListId },
}

/// What the open list should become after a delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AfterDelete {
    /// The deleted list was not the open one
    KeepCurrent,
    Open(ListId),
    /// Nothing left to show
    Close,
}

#[derive(Debug, Default)]
pub struct ListsState {
    lists: Vec<ListSummary>,
    selected: usize,
    mode: ListsMode,
    name_input: TextInput,
    loading: bool,
    error: Option<String>,
}

impl ListsState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lists(&self) -> &[ListSummary] {
        &self.lists
    }

    pub fn mode(&self) -> &ListsMode {
        &self.mode
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn name_input(&self) -> &TextInput {
        &self.name_input
    }

    pub fn name_input_mut(&mut self) -> &mut TextInput {
        &mut self.name_input
    }

    /// True while the name field has the keyboard.
    pub fn is_editing_name(&self) -> bool {
        matches!(self.mode, ListsMode::Create | ListsMode::Rename { .. })
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_list(&self) -> Option<&ListSummary> {
        self.lists.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if !self.lists.is_empty() {
            self.selected = (self.selected + 1).min(self.lists.len() - 1);
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_id(&mut self, list_id: &ListId) {
        if let Some(index) = self.lists.iter().position(|l| &l.id == list_id) {
            self.selected = index;
        }
    }

    pub fn begin_loading(&mut self) {
        self.loading = true;
    }

    /// Apply a fresh list of summaries. Returns the list to open when
    /// nothing is open yet: the first one.
    pub fn on_lists_loaded(
        &mut self,
        result: Result<Vec<ListSummary>, BackendError>,
        current: Option<&ListId>,
    ) -> Option<ListId> {
        self.loading = false;
        match result {
            Ok(lists) => {
                self.lists = lists;
                self.error = None;
                match current {
                    Some(id) if self.lists.iter().any(|l| &l.id == id) => {
                        self.select_id(id);
                        None
                    }
                    _ => {
                        self.selected = 0;
                        self.lists.first().map(|l| l.id.clone())
                    }
                }
            }
            Err(e) => {
                log::debug!("loading lists failed: {}", e);
                self.error = Some(LOAD_ERROR.to_string());
                None
            }
        }
    }

    pub fn start_create(&mut self) {
        self.name_input.clear();
        self.error = None;
        self.mode = ListsMode::Create;
    }

    /// Rename the selected list, name field pre-filled.
    pub fn start_rename(&mut self) {
        let Some(list) = self.selected_list() else {
            return;
        };
        let (list_id, name) = (list.id.clone(), list.name.clone());
        self.name_input.set_text(&name);
        self.error = None;
        self.mode = ListsMode::Rename { list_id };
    }

    pub fn start_delete(&mut self) {
        if let Some(list) = self.selected_list() {
            self.mode = ListsMode::ConfirmDelete {
                list_id: list.id.clone(),
            };
        }
    }

    pub fn cancel(&mut self) {
        self.name_input.clear();
        self.mode = ListsMode::Browse;
    }

    /// Submit the name field. A blank name keeps the field open.
    pub fn submit_name(&mut self) -> Option<ListCommand> {
        let name = self.name_input.text().trim().to_string();
        if name.is_empty() {
            return None;
        }

        let command = match &self.mode {
            ListsMode::Create => ListCommand::Create { name },
            ListsMode::Rename { list_id } => ListCommand::Rename {
                list_id: list_id.clone(),
                name,
            },
            _ => return None,
        };
        self.cancel();
        Some(command)
    }

    pub fn confirm_delete(&mut self) -> Option<ListCommand> {
        let ListsMode::ConfirmDelete { list_id } = &self.mode else {
            return None;
        };
        let command = ListCommand::Delete {
            list_id: list_id.clone(),
        };
        self.mode = ListsMode::Browse;
        Some(command)
    }

    pub fn on_created(&mut self, result: Result<ListSummary, BackendError>) {
        match result {
            Ok(summary) => {
                self.lists.push(summary);
                self.selected = self.lists.len() - 1;
                self.error = None;
            }
            Err(e) => self.error = Some(failure_message(&e, CREATE_ERROR)),
        }
    }

    pub fn on_renamed(&mut self, list_id: &ListId, name: &str, result: Result<(), BackendError>) {
        match result {
            Ok(()) => {
                if let Some(list) = self.lists.iter_mut().find(|l| &l.id == list_id) {
                    list.name = name.to_string();
                }
            }
            Err(e) => self.error = Some(failure_message(&e, RENAME_ERROR)),
        }
    }

    pub fn on_deleted(
        &mut self,
        list_id: &ListId,
        result: Result<(), BackendError>,
        current: Option<&ListId>,
    ) -> AfterDelete {
        if let Err(e) = result {
            self.error = Some(failure_message(&e, DELETE_ERROR));
            return AfterDelete::KeepCurrent;
        }

        self.lists.retain(|l| &l.id != list_id);
        self.selected = self.selected.min(self.lists.len().saturating_sub(1));

        if current != Some(list_id) {
            return AfterDelete::KeepCurrent;
        }
        match self.lists.first() {
            Some(first) => {
                self.selected = 0;
                AfterDelete::Open(first.id.clone())
            }
            None => AfterDelete::Close,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Ownership refusals carry their own message; everything else is generic.
fn failure_message(error: &BackendError, generic: &str) -> String {
    log::debug!("{}: {}", generic, error);
    match error.kind() {
        ErrorKind::PermissionDenied => error.to_string(),
        _ => generic.to_string(),
    }
}

#[cfg(test)]
#[path = "lists_state_tests.rs"]
mod lists_state_tests;
