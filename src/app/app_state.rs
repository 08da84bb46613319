use std::path::PathBuf;
use std::sync::mpsc::Receiver;

use tokio::sync::mpsc::UnboundedSender;

use crate::auth::AuthState;
use crate::config::Config;
use crate::list_editor::{ItemRow, ListEditor, item_rows};
use crate::model::{Category, CategoryExpansion};
use crate::notification::NotificationState;
use crate::session::{Session, session_storage};
use crate::sidebar::ListsState;
use crate::suggestions::SuggestionState;
use crate::theme::ThemeMode;
use crate::widgets::TextInput;
use crate::worker::{BackendRequest, BackendResponse};

pub const SESSION_EXPIRED: &str = "Your session has expired. Please log in again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Checking a stored session token
    Restoring,
    Auth,
    Main,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Items,
    ItemInput,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Sidebar => Focus::Items,
            Focus::Items => Focus::ItemInput,
            Focus::ItemInput => Focus::Sidebar,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Focus::Sidebar => Focus::ItemInput,
            Focus::Items => Focus::Sidebar,
            Focus::ItemInput => Focus::Items,
        }
    }
}

pub struct App {
    pub screen: Screen,
    pub focus: Focus,
    pub session: Option<Session>,
    pub auth: AuthState,
    pub lists: ListsState,
    pub editor: ListEditor,
    pub suggestions: SuggestionState,
    pub expansion: CategoryExpansion,
    /// Row index into [`App::item_rows`]
    pub item_cursor: usize,
    pub item_input: TextInput,
    /// Category given to the next added item
    pub category: Category,
    pub notification: NotificationState,
    pub theme: ThemeMode,
    pub needs_render: bool,
    should_quit: bool,
    /// Where the session token is persisted; `None` keeps it in memory only
    session_path: Option<PathBuf>,
    requests: Option<UnboundedSender<BackendRequest>>,
    responses: Option<Receiver<BackendResponse>>,
}

impl App {
    pub fn new(config: &Config, session_path: Option<PathBuf>) -> Self {
        Self {
            screen: Screen::Auth,
            focus: Focus::Sidebar,
            session: None,
            auth: AuthState::new(),
            lists: ListsState::new(),
            editor: ListEditor::new(),
            suggestions: SuggestionState::new(&config.suggestions),
            expansion: CategoryExpansion::new(),
            item_cursor: 0,
            item_input: TextInput::new(),
            category: Category::default(),
            notification: NotificationState::new(),
            theme: ThemeMode::from_dark_mode(config.ui.dark_mode),
            needs_render: true,
            should_quit: false,
            session_path,
            requests: None,
            responses: None,
        }
    }

    pub fn set_channels(
        &mut self,
        requests: UnboundedSender<BackendRequest>,
        responses: Receiver<BackendResponse>,
    ) {
        self.requests = Some(requests);
        self.responses = Some(responses);
    }

    /// Resume a stored session if there is one, otherwise show the form.
    pub fn start(&mut self) {
        let token = self
            .session_path
            .as_deref()
            .and_then(session_storage::load_token_from_path);

        match token {
            Some(token) => {
                self.screen = Screen::Restoring;
                self.send(BackendRequest::RestoreSession { token });
            }
            None => self.screen = Screen::Auth,
        }
        self.mark_dirty();
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn mark_dirty(&mut self) {
        self.needs_render = true;
    }

    pub fn clear_dirty(&mut self) {
        self.needs_render = false;
    }

    pub fn should_render(&self) -> bool {
        self.needs_render
    }

    pub fn item_rows(&self) -> Vec<ItemRow> {
        item_rows(&self.editor.grouped(), &self.expansion)
    }

    pub fn selected_row(&self) -> Option<ItemRow> {
        self.item_rows().into_iter().nth(self.item_cursor)
    }

    pub fn clamp_item_cursor(&mut self) {
        let rows = self.item_rows().len();
        self.item_cursor = self.item_cursor.min(rows.saturating_sub(1));
    }

    /// Returns false when the worker is gone and the request was dropped.
    pub(super) fn send(&mut self, request: BackendRequest) -> bool {
        let sent = match &self.requests {
            Some(tx) => tx.send(request).is_ok(),
            None => false,
        };
        if !sent {
            log::error!("backend worker is not running");
            self.notification.show_error("Backend worker is not running");
        }
        sent
    }

    pub(super) fn drain_responses(&mut self) -> Vec<BackendResponse> {
        match &self.responses {
            Some(rx) => rx.try_iter().collect(),
            None => Vec::new(),
        }
    }

    pub(super) fn persist_token(&self, token: &str) {
        if let Some(path) = &self.session_path
            && let Err(e) = session_storage::save_token_to_path(path, token)
        {
            log::warn!("could not save session: {}", e);
        }
    }

    pub(super) fn forget_token(&self) {
        if let Some(path) = &self.session_path
            && let Err(e) = session_storage::clear_token_at_path(path)
        {
            log::warn!("could not remove session file: {}", e);
        }
    }

    pub(super) fn reset_user_state(&mut self) {
        self.session = None;
        self.lists.reset();
        self.editor.close();
        self.suggestions.reset();
        self.expansion = CategoryExpansion::new();
        self.item_cursor = 0;
        self.item_input.clear();
        self.category = Category::default();
        self.focus = Focus::Sidebar;
    }
}

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod app_state_tests;
