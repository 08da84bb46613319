use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::style::Style;
use ratatui::widgets::Block;
use tui_textarea::TextArea;

use crate::theme::CURSOR;

/// Single-line text field on top of [`TextArea`].
///
/// Enter and Tab are never inserted; callers handle them before forwarding
/// keys.
#[derive(Debug, Clone)]
pub struct TextInput {
    textarea: TextArea<'static>,
}

impl Default for TextInput {
    fn default() -> Self {
        Self::new()
    }
}

impl TextInput {
    pub fn new() -> Self {
        let mut textarea = TextArea::default();
        textarea.set_cursor_line_style(Style::default());
        textarea.set_cursor_style(CURSOR);
        Self { textarea }
    }

    /// Field that shows every character as a bullet.
    pub fn masked() -> Self {
        let mut input = Self::new();
        input.textarea.set_mask_char('\u{2022}');
        input
    }

    pub fn text(&self) -> &str {
        self.textarea.lines().first().map(String::as_str).unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self.text().is_empty()
    }

    pub fn set_text(&mut self, text: &str) {
        self.clear();
        self.textarea.insert_str(text);
    }

    pub fn clear(&mut self) {
        self.textarea.move_cursor(tui_textarea::CursorMove::End);
        self.textarea.delete_line_by_head();
    }

    /// Forward a key. Returns true when the text changed.
    pub fn input(&mut self, key: KeyEvent) -> bool {
        let newline = matches!(key.code, KeyCode::Enter | KeyCode::Tab)
            || (key.modifiers.contains(KeyModifiers::CONTROL)
                && matches!(key.code, KeyCode::Char('m') | KeyCode::Char('j')));
        if newline {
            return false;
        }
        self.textarea.input(key)
    }

    pub fn set_block(&mut self, block: Block<'static>) {
        self.textarea.set_block(block);
    }

    pub fn set_style(&mut self, style: Style) {
        self.textarea.set_style(style);
    }

    pub fn set_cursor_visible(&mut self, visible: bool) {
        let style = if visible { CURSOR } else { Style::default() };
        self.textarea.set_cursor_style(style);
    }

    pub fn widget(&self) -> &TextArea<'static> {
        &self.textarea
    }
}
