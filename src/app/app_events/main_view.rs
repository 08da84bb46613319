//! Keys for the sidebar, the item rows and the item input.

use std::time::Instant;

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::app_state::{App, Focus};
use crate::list_editor::ItemRow;
use crate::sidebar::{ListCommand, ListsMode};
use crate::worker::BackendRequest;

impl App {
    pub(super) fn handle_main_key(&mut self, key: KeyEvent) {
        // The name field and the delete prompt keep focus until answered
        if self.focus == Focus::Sidebar && self.lists.mode() != &ListsMode::Browse {
            self.handle_list_mode_key(key);
            return;
        }

        if self.focus == Focus::ItemInput {
            self.handle_item_input_key(key);
            return;
        }

        match key.code {
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return;
            }
            KeyCode::BackTab => {
                self.focus = self.focus.previous();
                return;
            }
            KeyCode::Char('q') => {
                self.quit();
                return;
            }
            _ => {}
        }

        match self.focus {
            Focus::Sidebar => self.handle_sidebar_key(key),
            Focus::Items => self.handle_items_key(key),
            Focus::ItemInput => {}
        }
    }

    pub(super) fn paste_into_main(&mut self, line: &str) {
        if self.focus == Focus::Sidebar && self.lists.is_editing_name() {
            let input = self.lists.name_input_mut();
            let pasted = format!("{}{}", input.text(), line);
            input.set_text(&pasted);
            return;
        }

        self.focus = Focus::ItemInput;
        let pasted = format!("{}{}", self.item_input.text(), line);
        self.item_input.set_text(&pasted);
        self.suggestions.on_input(self.item_input.text(), Instant::now());
    }

    fn handle_sidebar_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.lists.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.lists.select_previous(),
            KeyCode::Enter => {
                let Some(list_id) = self.lists.selected_list().map(|l| l.id.clone()) else {
                    return;
                };
                self.open_list(&list_id);
                self.focus = Focus::Items;
            }
            KeyCode::Char('n') => self.lists.start_create(),
            KeyCode::Char('r') => self.lists.start_rename(),
            KeyCode::Char('d') | KeyCode::Delete => self.lists.start_delete(),
            _ => {}
        }
    }

    fn handle_list_mode_key(&mut self, key: KeyEvent) {
        if let ListsMode::ConfirmDelete { .. } = self.lists.mode() {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    if let Some(command) = self.lists.confirm_delete() {
                        self.send_list_command(command);
                    }
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => self.lists.cancel(),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Enter => {
                if let Some(command) = self.lists.submit_name() {
                    self.send_list_command(command);
                }
            }
            KeyCode::Esc => self.lists.cancel(),
            _ => {
                self.lists.name_input_mut().input(key);
            }
        }
    }

    fn send_list_command(&mut self, command: ListCommand) {
        let Some(session) = self.session.clone() else {
            return;
        };
        let request = match command {
            ListCommand::Create { name } => BackendRequest::CreateList { session, name },
            ListCommand::Rename { list_id, name } => BackendRequest::RenameList {
                session,
                list_id,
                name,
            },
            ListCommand::Delete { list_id } => BackendRequest::DeleteList { session, list_id },
        };
        self.send(request);
    }

    fn handle_items_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                let rows = self.item_rows().len();
                if self.item_cursor + 1 < rows {
                    self.item_cursor += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.item_cursor = self.item_cursor.saturating_sub(1);
            }
            KeyCode::Char(' ') => {
                if let Some(ItemRow::Item(id)) = self.selected_row() {
                    let save = self.editor.toggle_item(&id);
                    self.send_save(save);
                }
            }
            KeyCode::Enter => match self.selected_row() {
                Some(ItemRow::Header { category, .. }) => {
                    self.expansion.toggle(category);
                    self.clamp_item_cursor();
                }
                Some(ItemRow::Item(id)) => {
                    let save = self.editor.toggle_item(&id);
                    self.send_save(save);
                }
                None => {}
            },
            KeyCode::Char('x') | KeyCode::Delete => {
                if let Some(ItemRow::Item(id)) = self.selected_row() {
                    let save = self.editor.delete_item(&id);
                    self.send_save(save);
                }
            }
            KeyCode::Char('a') => self.focus = Focus::ItemInput,
            _ => {}
        }
    }

    /// The suggestion popup is shown while the item input has text and a
    /// lookup is running or has produced names.
    pub fn suggestions_visible(&self) -> bool {
        self.focus == Focus::ItemInput
            && !self.item_input.is_empty()
            && (self.suggestions.is_loading() || !self.suggestions.suggestions().is_empty())
    }

    fn handle_item_input_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => {
                self.suggestions.clear();
                self.focus = Focus::Items;
            }
            KeyCode::Enter => self.add_item_from_input(),
            KeyCode::Down if self.suggestions_visible() => self.suggestions.select_next(),
            KeyCode::Up if self.suggestions_visible() => self.suggestions.select_previous(),
            KeyCode::Tab => {
                if !self.accept_suggestion() {
                    self.focus = self.focus.next();
                }
            }
            KeyCode::BackTab => self.focus = self.focus.previous(),
            KeyCode::Right if ctrl => self.category = self.category.next(),
            KeyCode::Left if ctrl => self.category = self.category.previous(),
            _ => {
                if self.item_input.input(key) {
                    self.editor.clear_error();
                    self.suggestions.on_input(self.item_input.text(), Instant::now());
                }
            }
        }
    }

    /// Put the selected suggestion, or the first one, into the input.
    fn accept_suggestion(&mut self) -> bool {
        if !self.suggestions_visible() {
            return false;
        }
        let chosen = self
            .suggestions
            .selected()
            .or_else(|| self.suggestions.suggestions().first().map(String::as_str))
            .map(str::to_string);
        let Some(name) = chosen else {
            return false;
        };
        self.item_input.set_text(&name);
        self.suggestions.clear();
        true
    }

    fn add_item_from_input(&mut self) {
        let text = self.item_input.text().to_string();
        let save = self.editor.add_item(&text, self.category);
        if save.is_none() {
            return;
        }
        self.item_input.clear();
        self.suggestions.clear();
        self.send_save(save);
    }
}
