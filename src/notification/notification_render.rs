use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::notification_state::{NotificationState, NotificationType};
use crate::theme::Palette;
use crate::widgets::popup;

const MARGIN: u16 = 2;
const HEIGHT: u16 = 3;

/// Border and text colour for each kind.
fn colors(kind: NotificationType, palette: &Palette) -> (Color, Color) {
    match kind {
        NotificationType::Info => (palette.border_focused, palette.text),
        NotificationType::Warning => (palette.warning, palette.warning),
        NotificationType::Error => (palette.error, palette.error),
    }
}

/// Draw the current notification in the top-right corner, over whatever
/// the screen already shows.
pub fn render_notification(frame: &mut Frame, notification: &NotificationState, palette: &Palette) {
    let Some(current) = notification.current() else {
        return;
    };

    let frame_area = frame.area();
    let width = (current.message.chars().count() as u16 + 4)
        .min(frame_area.width.saturating_sub(MARGIN * 2));
    let area = Rect {
        x: frame_area.width.saturating_sub(width + MARGIN),
        y: MARGIN,
        width,
        height: HEIGHT.min(frame_area.height.saturating_sub(MARGIN * 2)),
    };
    if area.width < 5 || area.height < HEIGHT {
        return;
    }

    let (border, fg) = colors(current.kind, palette);
    popup::clear_area(frame, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border).bg(palette.surface))
        .style(Style::default().bg(palette.surface));
    let text = Line::from(Span::styled(
        format!(" {} ", current.message),
        Style::default().fg(fg),
    ));

    frame.render_widget(Paragraph::new(text).block(block), area);
}
