use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

use super::SuggestionState;
use crate::theme::Palette;
use crate::widgets::popup;

const MIN_POPUP_WIDTH: usize = 16;
const MAX_POPUP_WIDTH: usize = 40;
const POPUP_BORDER_HEIGHT: u16 = 2;
const POPUP_PADDING: u16 = 4;
const POPUP_OFFSET_X: u16 = 1;

/// Draw the suggestion list just above `anchor` (the item input).
///
/// Nothing is drawn when there is neither a suggestion nor a lookup in
/// flight.
pub fn render_popup(frame: &mut Frame, state: &SuggestionState, anchor: Rect, palette: &Palette) {
    let suggestions = state.suggestions();
    let loading = state.is_loading();
    if suggestions.is_empty() && !loading {
        return;
    }

    let rows: Vec<ListItem> = if suggestions.is_empty() {
        vec![ListItem::new(Line::from(Span::styled(
            "  Loading...",
            Style::default().fg(palette.text_dim),
        )))]
    } else {
        suggestions
            .iter()
            .enumerate()
            .map(|(i, name)| {
                if state.selected_index() == Some(i) {
                    ListItem::new(Line::from(Span::styled(
                        format!("> {}", name),
                        palette.selected(),
                    )))
                } else {
                    ListItem::new(Line::from(Span::styled(
                        format!("  {}", name),
                        Style::default().fg(palette.text),
                    )))
                }
            })
            .collect()
    };

    let text_width = suggestions
        .iter()
        .map(|s| s.chars().count() + 2)
        .max()
        .unwrap_or(0)
        .clamp(MIN_POPUP_WIDTH, MAX_POPUP_WIDTH);
    let popup_width = text_width as u16 + POPUP_PADDING;
    let popup_height = rows.len() as u16 + POPUP_BORDER_HEIGHT;

    let area = popup::popup_above_anchor(anchor, popup_width, popup_height, POPUP_OFFSET_X);
    if area.height < POPUP_BORDER_HEIGHT + 1 || area.width < 4 {
        return;
    }

    let title = if loading && !suggestions.is_empty() {
        " Suggestions ... "
    } else {
        " Suggestions "
    };

    popup::clear_area(frame, area);
    let list = List::new(rows).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(palette.accent))
            .style(Style::default().bg(palette.surface)),
    );
    frame.render_widget(list, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SuggestionConfig;
    use crate::theme::DARK;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::time::{Duration, Instant};

    const ANCHOR: Rect = Rect {
        x: 0,
        y: 10,
        width: 60,
        height: 3,
    };

    fn render(state: &SuggestionState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 14)).unwrap();
        terminal
            .draw(|f| render_popup(f, state, ANCHOR, &DARK))
            .unwrap();
        terminal.backend().to_string()
    }

    fn fetching(query: &str) -> SuggestionState {
        let now = Instant::now();
        let mut state = SuggestionState::new(&SuggestionConfig::default());
        state.on_input(query, now);
        state.poll(now + Duration::from_millis(300));
        state
    }

    #[test]
    fn test_nothing_rendered_when_idle() {
        let state = SuggestionState::new(&SuggestionConfig::default());
        let output = render(&state);
        assert!(!output.contains("Suggestions"));
    }

    #[test]
    fn test_loading_indicator() {
        let output = render(&fetching("mi"));
        assert!(output.contains("Suggestions"));
        assert!(output.contains("Loading..."));
    }

    #[test]
    fn test_lists_suggestions_with_selection_marker() {
        let mut state = fetching("mi");
        state.on_response("mi", Ok(vec!["Milk".to_string(), "Mint".to_string()]));
        state.select_next();

        let output = render(&state);
        assert!(output.contains("> Milk"));
        assert!(output.contains("  Mint"));
        assert!(!output.contains("Loading"));
    }
}
