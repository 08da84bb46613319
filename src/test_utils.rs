//! Shared test utilities
//!
//! An [`App`] wired to bare channels, so tests can read what it asked the
//! backend for and feed answers back without a worker thread.

#[cfg(test)]
pub mod test_helpers {
    use std::path::PathBuf;
    use std::sync::mpsc::{self, Sender};
    use std::time::Instant;

    use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};

    use crate::app::{App, Screen};
    use crate::config::Config;
    use crate::model::{Category, ListId, ShoppingItem, ShoppingList, UserId};
    use crate::session::Session;
    use crate::worker::{BackendRequest, BackendResponse};

    pub struct Harness {
        pub app: App,
        pub requests: UnboundedReceiver<BackendRequest>,
        pub responses: Sender<BackendResponse>,
    }

    impl Harness {
        pub fn new() -> Self {
            Self::with(&Config::default(), None)
        }

        pub fn with(config: &Config, session_path: Option<PathBuf>) -> Self {
            let (request_tx, requests) = unbounded_channel();
            let (responses, response_rx) = mpsc::channel();
            let mut app = App::new(config, session_path);
            app.set_channels(request_tx, response_rx);
            Self {
                app,
                requests,
                responses,
            }
        }

        /// Everything the app has sent since the last call.
        pub fn sent(&mut self) -> Vec<BackendRequest> {
            let mut sent = Vec::new();
            while let Ok(request) = self.requests.try_recv() {
                sent.push(request);
            }
            sent
        }

        pub fn respond(&mut self, response: BackendResponse) {
            self.responses
                .send(response)
                .expect("app receiver should be alive");
            self.app.tick(Instant::now());
        }

        pub fn press(&mut self, code: KeyCode) {
            self.app.handle_key_event(key(code));
        }

        pub fn press_ctrl(&mut self, code: KeyCode) {
            self.app
                .handle_key_event(key_with_mods(code, KeyModifiers::CONTROL));
        }

        pub fn type_text(&mut self, text: &str) {
            for c in text.chars() {
                self.press(KeyCode::Char(c));
            }
        }

        /// Signed in as [`test_session`] with `list` open and nothing
        /// left in the request channel.
        pub fn signed_in_with(list: ShoppingList) -> Self {
            let mut harness = Self::new();
            harness.respond(BackendResponse::LoggedIn(Ok(test_session())));
            harness.respond(BackendResponse::ListsFound(Ok(vec![list.summary()])));
            let request_id = harness
                .sent()
                .into_iter()
                .find_map(|r| match r {
                    BackendRequest::LoadList { request_id, .. } => Some(request_id),
                    _ => None,
                })
                .expect("first list should be loaded");
            harness.respond(BackendResponse::ListLoaded {
                request_id,
                list_id: list.id.clone(),
                result: Ok(Some(list)),
            });
            assert_eq!(harness.app.screen, Screen::Main);
            harness
        }
    }

    pub fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    pub fn key_with_mods(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    pub fn test_session() -> Session {
        Session::new("u1", "ann@example.com", "r:token")
    }

    pub fn test_list(id: &str, name: &str, items: &[(&str, Category, bool)]) -> ShoppingList {
        ShoppingList {
            id: ListId(id.to_string()),
            name: name.to_string(),
            items: items
                .iter()
                .map(|(name, category, checked)| ShoppingItem {
                    checked: *checked,
                    ..ShoppingItem::new(name, *category)
                })
                .collect(),
            owner: UserId("u1".to_string()),
        }
    }
}
