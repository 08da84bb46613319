use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::{AuthField, AuthMode, AuthState};
use crate::theme::Palette;
use crate::widgets::popup;

const FORM_WIDTH: u16 = 50;
const FORM_HEIGHT: u16 = 13;

/// Centered credential form.
pub fn render_auth(frame: &mut Frame, state: &mut AuthState, palette: &Palette) {
    let area = popup::centered_popup(frame.area(), FORM_WIDTH, FORM_HEIGHT);
    popup::clear_area(frame, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", state.mode().title()))
        .border_style(palette.border(true))
        .style(palette.base());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [email_area, password_area, status_area, _, hint_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(2),
    ])
    .areas(inner);

    let field = state.field();
    let text_style = Style::default().fg(palette.text);

    let email = state.email_mut();
    email.set_block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Email ")
            .border_style(palette.border(field == AuthField::Email)),
    );
    email.set_style(text_style);
    email.set_cursor_visible(field == AuthField::Email);
    frame.render_widget(state.email().widget(), email_area);

    let password = state.password_mut();
    password.set_block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Password ")
            .border_style(palette.border(field == AuthField::Password)),
    );
    password.set_style(text_style);
    password.set_cursor_visible(field == AuthField::Password);
    frame.render_widget(state.password().widget(), password_area);

    let status = if state.is_pending() {
        Line::from(Span::styled(
            "Please wait...",
            Style::default().fg(palette.text_dim),
        ))
    } else if let Some(error) = state.error() {
        Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(palette.error),
        ))
    } else {
        Line::default()
    };
    frame.render_widget(Paragraph::new(status), status_area);

    let switch = match state.mode() {
        AuthMode::Login => "no account? sign up",
        AuthMode::SignUp => "have an account? log in",
    };
    let key = Style::default()
        .fg(palette.hint_key)
        .add_modifier(Modifier::BOLD);
    let desc = Style::default().fg(palette.text_dim);
    let hints = vec![
        Line::from(vec![
            Span::styled("Enter", key),
            Span::styled(" submit  ", desc),
            Span::styled("Tab", key),
            Span::styled(" next field", desc),
        ]),
        Line::from(vec![
            Span::styled("Ctrl+N", key),
            Span::styled(format!(" {}  ", switch), desc),
            Span::styled("Ctrl+C", key),
            Span::styled(" quit", desc),
        ]),
    ];
    frame.render_widget(Paragraph::new(hints), hint_area);
}
