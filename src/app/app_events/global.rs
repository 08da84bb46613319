use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::app_state::{App, Screen};
use crate::notification::NotificationType;

/// Keys that work on every screen. Returns true when the key was consumed.
pub fn handle_global_keys(app: &mut App, key: KeyEvent) -> bool {
    // Errors stay up until acknowledged
    if key.code == KeyCode::Esc
        && app
            .notification
            .current()
            .is_some_and(|n| n.kind == NotificationType::Error)
    {
        app.notification.dismiss();
        return true;
    }

    if !key.modifiers.contains(KeyModifiers::CONTROL) {
        return false;
    }

    match key.code {
        KeyCode::Char('c') => {
            app.quit();
            true
        }
        KeyCode::Char('t') => {
            app.theme = app.theme.toggled();
            true
        }
        KeyCode::Char('o') if app.screen == Screen::Main => {
            app.log_out();
            true
        }
        _ => false,
    }
}
