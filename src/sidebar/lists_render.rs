use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use super::{ListsMode, ListsState};
use crate::model::ListId;
use crate::theme::Palette;

const INPUT_HEIGHT: u16 = 3;
const FOOTER_HEIGHT: u16 = 1;

pub fn render_sidebar(
    frame: &mut Frame,
    area: Rect,
    state: &mut ListsState,
    current: Option<&ListId>,
    focused: bool,
    palette: &Palette,
) {
    let footer_height = match state.mode() {
        ListsMode::Create | ListsMode::Rename { .. } => INPUT_HEIGHT,
        ListsMode::ConfirmDelete { .. } => FOOTER_HEIGHT,
        ListsMode::Browse if state.error().is_some() => FOOTER_HEIGHT,
        ListsMode::Browse => 0,
    };
    let [list_area, footer_area] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(footer_height)]).areas(area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Lists ")
        .border_style(palette.border(focused && !state.is_editing_name()))
        .style(palette.base());

    if state.lists().is_empty() {
        let text = if state.is_loading() {
            "Loading..."
        } else {
            "No lists. Press n to create one."
        };
        let paragraph = Paragraph::new(Line::from(Span::styled(
            text,
            Style::default().fg(palette.text_dim),
        )))
        .block(block);
        frame.render_widget(paragraph, list_area);
    } else {
        let rows: Vec<ListItem> = state
            .lists()
            .iter()
            .map(|list| {
                let marker = if Some(&list.id) == current { "* " } else { "  " };
                ListItem::new(Line::from(vec![
                    Span::styled(marker, Style::default().fg(palette.accent)),
                    Span::styled(list.name.clone(), Style::default().fg(palette.text)),
                ]))
            })
            .collect();
        let highlight = if focused {
            palette.selected()
        } else {
            Style::default().fg(palette.accent)
        };
        let list = List::new(rows).block(block).highlight_style(highlight);
        let mut list_state = ListState::default().with_selected(Some(state.selected_index()));
        frame.render_stateful_widget(list, list_area, &mut list_state);
    }

    match state.mode().clone() {
        ListsMode::Create | ListsMode::Rename { .. } => {
            let title = if matches!(state.mode(), ListsMode::Create) {
                " New list "
            } else {
                " Rename "
            };
            let input = state.name_input_mut();
            input.set_block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(palette.border(true)),
            );
            input.set_style(Style::default().fg(palette.text));
            frame.render_widget(input.widget(), footer_area);
        }
        ListsMode::ConfirmDelete { list_id } => {
            let name = state
                .lists()
                .iter()
                .find(|l| l.id == list_id)
                .map(|l| l.name.as_str())
                .unwrap_or("this list");
            let line = Line::from(Span::styled(
                format!("Delete '{}'? (y/n)", name),
                Style::default().fg(palette.warning),
            ));
            frame.render_widget(Paragraph::new(line), footer_area);
        }
        ListsMode::Browse => {
            if let Some(error) = state.error() {
                let line = Line::from(Span::styled(error, Style::default().fg(palette.error)));
                frame.render_widget(Paragraph::new(line), footer_area);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::BackendError;
    use crate::model::ListSummary;
    use crate::theme::LIGHT;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(state: &mut ListsState, current: Option<&ListId>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(30, 12)).unwrap();
        terminal
            .draw(|f| render_sidebar(f, f.area(), state, current, true, &LIGHT))
            .unwrap();
        terminal.backend().to_string()
    }

    fn with_lists() -> ListsState {
        let mut state = ListsState::new();
        state.on_lists_loaded(
            Ok(vec![
                ListSummary {
                    id: ListId("a".to_string()),
                    name: "Weekend".to_string(),
                },
                ListSummary {
                    id: ListId("b".to_string()),
                    name: "Party".to_string(),
                },
            ]),
            None,
        );
        state
    }

    #[test]
    fn test_empty_hint() {
        let output = render(&mut ListsState::new(), None);
        assert!(output.contains("No lists"));
    }

    #[test]
    fn test_lists_with_current_marker() {
        let mut state = with_lists();
        let output = render(&mut state, Some(&ListId("b".to_string())));
        assert!(output.contains("  Weekend"));
        assert!(output.contains("* Party"));
    }

    #[test]
    fn test_create_shows_name_input() {
        let mut state = with_lists();
        state.start_create();
        assert!(render(&mut state, None).contains("New list"));
    }

    #[test]
    fn test_confirm_delete_prompt() {
        let mut state = with_lists();
        state.start_delete();
        assert!(render(&mut state, None).contains("Delete 'Weekend'? (y/n)"));
    }

    #[test]
    fn test_error_line() {
        let mut state = with_lists();
        state.on_created(Err(BackendError::Network("down".to_string())));
        assert!(render(&mut state, None).contains("Failed to create"));
    }
}
