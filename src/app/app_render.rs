use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::app_state::{App, Focus, Screen};
use crate::auth::render_auth;
use crate::list_editor::render_items;
use crate::notification::render_notification;
use crate::sidebar::{ListsMode, render_sidebar};
use crate::suggestions::suggestion_render;
use crate::theme::Palette;

const SIDEBAR_WIDTH: u16 = 28;
const INPUT_HEIGHT: u16 = 3;

impl App {
    pub fn render(&mut self, frame: &mut Frame) {
        let palette = self.theme.palette();
        frame.render_widget(Block::default().style(palette.base()), frame.area());

        match self.screen {
            Screen::Restoring => {
                let [_, middle, _] = Layout::vertical([
                    Constraint::Fill(1),
                    Constraint::Length(1),
                    Constraint::Fill(1),
                ])
                .areas(frame.area());
                let text = Paragraph::new(Line::from(Span::styled(
                    "Restoring session...",
                    Style::default().fg(palette.text_dim),
                )))
                .centered();
                frame.render_widget(text, middle);
            }
            Screen::Auth => render_auth(frame, &mut self.auth, palette),
            Screen::Main => self.render_main(frame, palette),
        }

        render_notification(frame, &self.notification, palette);
    }

    fn render_main(&mut self, frame: &mut Frame, palette: &Palette) {
        let [header_area, body_area, hint_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        self.render_header(frame, header_area, palette);

        let [sidebar_area, list_area] =
            Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
                .areas(body_area);

        let current = self.editor.current_list_id().cloned();
        render_sidebar(
            frame,
            sidebar_area,
            &mut self.lists,
            current.as_ref(),
            self.focus == Focus::Sidebar,
            palette,
        );

        let error = self.inline_error();
        let error_height = u16::from(error.is_some());
        let [items_area, error_area, input_area] = Layout::vertical([
            Constraint::Min(3),
            Constraint::Length(error_height),
            Constraint::Length(INPUT_HEIGHT),
        ])
        .areas(list_area);

        render_items(
            frame,
            items_area,
            &self.editor,
            &self.expansion,
            self.item_cursor,
            self.focus == Focus::Items,
            palette,
        );

        if let Some(message) = error {
            let line = Paragraph::new(Line::from(Span::styled(
                format!(" {}", message),
                Style::default().fg(palette.error),
            )));
            frame.render_widget(line, error_area);
        }

        self.render_item_input(frame, input_area, palette);
        render_hints(frame, hint_area, self.hints(), palette);

        if self.suggestions_visible() {
            suggestion_render::render_popup(frame, &self.suggestions, input_area, palette);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let user = self
            .session
            .as_ref()
            .map(|s| s.username.as_str())
            .unwrap_or("");
        let line = Line::from(vec![
            Span::styled(
                " Shopping List ",
                Style::default()
                    .fg(palette.header_fg)
                    .bg(palette.header_bg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {}", user), Style::default().fg(palette.text)),
            Span::styled(
                format!("  [{}]", self.theme.label()),
                Style::default().fg(palette.text_dim),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_item_input(&mut self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let focused = self.focus == Focus::ItemInput;
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" Add item: {} ", self.category.label()))
            .border_style(palette.border(focused))
            .style(palette.base());
        self.item_input.set_block(block);
        self.item_input.set_style(palette.base());
        self.item_input.set_cursor_visible(focused);
        frame.render_widget(self.item_input.widget(), area);
    }

    /// Editor failures win over suggestion failures.
    fn inline_error(&self) -> Option<&str> {
        self.editor
            .error()
            .or_else(|| self.suggestions.failure().map(|f| f.message()))
    }

    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        match self.focus {
            Focus::Sidebar => match self.lists.mode() {
                ListsMode::Browse => &[
                    ("Enter", "open"),
                    ("n", "new"),
                    ("r", "rename"),
                    ("d", "delete"),
                    ("Tab", "items"),
                    ("Ctrl+O", "log out"),
                    ("q", "quit"),
                ],
                ListsMode::ConfirmDelete { .. } => &[("y", "delete"), ("n", "keep")],
                _ => &[("Enter", "save"), ("Esc", "cancel")],
            },
            Focus::Items => &[
                ("Space", "check"),
                ("Enter", "fold"),
                ("x", "delete"),
                ("a", "add"),
                ("Tab", "input"),
                ("Ctrl+T", "theme"),
                ("q", "quit"),
            ],
            Focus::ItemInput => &[
                ("Enter", "add"),
                ("Up/Down", "choose"),
                ("Tab", "accept"),
                ("Ctrl+Left/Right", "category"),
                ("Esc", "back"),
            ],
        }
    }
}

fn render_hints(frame: &mut Frame, area: Rect, hints: &[(&str, &str)], palette: &Palette) {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, action) in hints {
        spans.push(Span::styled(
            format!(" {}", key),
            Style::default()
                .fg(palette.hint_key)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(" {} ", action),
            Style::default().fg(palette.text_dim),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
