//! Applying worker responses to the UI state.

use std::time::Instant;

use super::app_state::{App, Focus, SESSION_EXPIRED, Screen};
use crate::backend::{BackendError, ErrorKind};
use crate::list_editor::SaveRequest;
use crate::model::ListId;
use crate::session::Session;
use crate::sidebar::AfterDelete;
use crate::worker::{BackendRequest, BackendResponse};

impl App {
    /// Drain the worker channel and fire a due suggestion lookup.
    pub fn tick(&mut self, now: Instant) {
        for response in self.drain_responses() {
            self.handle_response(response);
            self.mark_dirty();
        }

        if let Some(query) = self.suggestions.poll(now) {
            match self.session.clone() {
                Some(session) => {
                    let limit = self.suggestions.max_results();
                    let sent = self.send(BackendRequest::FindSuggestions {
                        session,
                        query,
                        limit,
                    });
                    if !sent {
                        self.suggestions.cancel_in_flight();
                    }
                }
                None => {
                    self.suggestions.cancel_in_flight();
                    self.suggestions.clear();
                }
            }
            self.mark_dirty();
        }

        if self.notification.clear_if_expired(now) {
            self.mark_dirty();
        }
    }

    pub fn handle_response(&mut self, response: BackendResponse) {
        match response {
            BackendResponse::SessionRestored(result) => match result {
                Ok(session) => self.enter_main(session),
                Err(e) => {
                    log::info!("stored session rejected: {}", e);
                    self.forget_token();
                    self.screen = Screen::Auth;
                    if e.is_session_expired() {
                        self.auth.set_error(SESSION_EXPIRED);
                    }
                }
            },
            BackendResponse::LoggedIn(result) | BackendResponse::SignedUp(result) => {
                if let Some(session) = self.auth.on_result(result) {
                    self.enter_main(session);
                }
            }
            BackendResponse::LoggedOut(result) => {
                if let Err(e) = result {
                    log::warn!("log out failed: {}", e);
                }
            }
            BackendResponse::ListsFound(result) => {
                if self.guard_session(&result) {
                    return;
                }
                let current = self.editor.current_list_id().cloned();
                if let Some(first) = self.lists.on_lists_loaded(result, current.as_ref()) {
                    self.open_list(&first);
                }
            }
            BackendResponse::ListLoaded {
                request_id,
                list_id,
                result,
            } => {
                if self.guard_session(&result) {
                    return;
                }
                log::debug!("list {} loaded (request {})", list_id, request_id);
                self.editor.on_loaded(request_id, result);
                self.item_cursor = 0;
            }
            BackendResponse::ListCreated(result) => {
                if self.guard_session(&result) {
                    return;
                }
                match result {
                    Ok(list) => {
                        self.lists.on_created(Ok(list.summary()));
                        self.editor.open(list);
                        self.item_cursor = 0;
                        self.reload_lists();
                    }
                    Err(e) => self.lists.on_created(Err(e)),
                }
            }
            BackendResponse::ListRenamed {
                list_id,
                name,
                result,
            } => {
                if self.guard_session(&result) {
                    return;
                }
                if result.is_ok() {
                    self.editor.rename_current(&list_id, &name);
                }
                self.lists.on_renamed(&list_id, &name, result);
            }
            BackendResponse::ListDeleted { list_id, result } => {
                if self.guard_session(&result) {
                    return;
                }
                let current = self.editor.current_list_id().cloned();
                match self.lists.on_deleted(&list_id, result, current.as_ref()) {
                    AfterDelete::KeepCurrent => {}
                    AfterDelete::Open(next) => self.open_list(&next),
                    AfterDelete::Close => {
                        self.editor.close();
                        self.item_cursor = 0;
                    }
                }
            }
            BackendResponse::ItemsSaved {
                save_id,
                list_id,
                result,
            } => {
                if self.guard_session(&result) {
                    return;
                }
                self.editor.on_saved(save_id, &list_id, result);
                self.clamp_item_cursor();
            }
            BackendResponse::Suggestions { query, result } => {
                self.suggestions.on_response(&query, result);
            }
            BackendResponse::WorkerFailed(message) => {
                log::error!("backend worker failure: {}", message);
                self.notification.show_error(&message);
            }
        }
    }

    /// Switch to the main view for `session` and fetch its lists.
    pub(super) fn enter_main(&mut self, session: Session) {
        log::info!("signed in as {}", session.username);
        self.persist_token(&session.session_token);
        self.session = Some(session);
        self.screen = Screen::Main;
        self.focus = Focus::Sidebar;
        self.reload_lists();
    }

    pub(super) fn reload_lists(&mut self) {
        let Some(session) = self.session.clone() else {
            return;
        };
        self.lists.begin_loading();
        self.send(BackendRequest::FindLists { session });
    }

    pub(super) fn open_list(&mut self, list_id: &ListId) {
        let Some(session) = self.session.clone() else {
            return;
        };
        self.lists.select_id(list_id);
        let request_id = self.editor.begin_load(list_id);
        self.send(BackendRequest::LoadList {
            request_id,
            session,
            list_id: list_id.clone(),
        });
    }

    pub(super) fn send_save(&mut self, save: Option<SaveRequest>) {
        let (Some(save), Some(session)) = (save, self.session.clone()) else {
            return;
        };
        self.send(BackendRequest::SaveItems {
            save_id: save.save_id,
            session,
            list_id: save.list_id,
            items: save.items,
        });
        self.clamp_item_cursor();
    }

    /// Sign out locally and tell the backend. The backend answer is only
    /// logged.
    pub fn log_out(&mut self) {
        if let Some(session) = self.session.clone() {
            self.send(BackendRequest::LogOut { session });
        }
        self.forget_token();
        self.reset_user_state();
        self.auth.reset();
        self.screen = Screen::Auth;
        self.notification.show("Signed out");
        self.mark_dirty();
    }

    /// A list operation found the session invalid: back to the form.
    fn guard_session<T>(&mut self, result: &Result<T, BackendError>) -> bool {
        let Err(e) = result else {
            return false;
        };
        if e.kind() != ErrorKind::SessionExpired {
            return false;
        }

        log::warn!("session expired: {}", e);
        self.forget_token();
        self.reset_user_state();
        self.auth.reset();
        self.auth.set_error(SESSION_EXPIRED);
        self.screen = Screen::Auth;
        true
    }
}

#[cfg(test)]
#[path = "app_responses_tests.rs"]
mod app_responses_tests;
