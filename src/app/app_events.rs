use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io;
use std::time::{Duration, Instant};

use super::app_state::{App, Screen};
use crate::auth::AuthCommand;
use crate::worker::BackendRequest;

mod global;
mod main_view;

const EVENT_POLL_TIMEOUT: Duration = Duration::from_millis(100);

impl App {
    pub fn handle_events(&mut self) -> io::Result<()> {
        self.tick(Instant::now());

        if event::poll(EVENT_POLL_TIMEOUT)? {
            match event::read()? {
                Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    self.handle_key_event(key_event);
                    self.mark_dirty();
                }
                Event::Paste(text) => {
                    self.handle_paste_event(&text);
                    self.mark_dirty();
                }
                Event::Resize(_, _) => self.mark_dirty(),
                _ => {}
            }
        }
        Ok(())
    }

    /// Pasted text goes to whichever field has focus, first line only.
    pub fn handle_paste_event(&mut self, text: &str) {
        let line = text.lines().next().unwrap_or("");
        match self.screen {
            Screen::Auth => {
                let input = self.auth.focused_input_mut();
                let pasted = format!("{}{}", input.text(), line);
                input.set_text(&pasted);
            }
            Screen::Main => self.paste_into_main(line),
            Screen::Restoring => {}
        }
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if global::handle_global_keys(self, key) {
            return;
        }

        match self.screen {
            Screen::Restoring => {}
            Screen::Auth => self.handle_auth_key(key),
            Screen::Main => self.handle_main_key(key),
        }
    }

    fn handle_auth_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                let Some(command) = self.auth.submit() else {
                    return;
                };
                let request = match command {
                    AuthCommand::LogIn { username, password } => {
                        BackendRequest::LogIn { username, password }
                    }
                    AuthCommand::SignUp { email, password } => {
                        BackendRequest::SignUp { email, password }
                    }
                };
                self.send(request);
            }
            KeyCode::Tab | KeyCode::BackTab => self.auth.toggle_field(),
            KeyCode::Char('n') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.auth.toggle_mode();
            }
            _ => {
                self.auth.focused_input_mut().input(key);
            }
        }
    }
}

#[cfg(test)]
#[path = "app_events_tests.rs"]
mod app_events_tests;
