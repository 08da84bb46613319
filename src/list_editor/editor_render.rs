use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use super::ListEditor;
use crate::model::CategoryExpansion;
use crate::theme::Palette;

/// Items pane: category headers with counts, items below expanded ones.
/// `cursor` indexes the same rows as [`super::item_rows`].
pub fn render_items(
    frame: &mut Frame,
    area: Rect,
    editor: &ListEditor,
    expansion: &CategoryExpansion,
    cursor: usize,
    focused: bool,
    palette: &Palette,
) {
    let title = match editor.current_name() {
        Some(name) => format!(" {} ", name),
        None => " Items ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(palette.border(focused))
        .style(palette.base());

    let placeholder = if editor.is_loading() {
        Some("Loading...")
    } else if !editor.is_open() {
        Some("No list selected")
    } else if editor.items().is_empty() {
        Some("No items yet. Press a to add one.")
    } else {
        None
    };
    if let Some(text) = placeholder {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            text,
            Style::default().fg(palette.text_dim),
        )))
        .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let mut rows: Vec<ListItem> = Vec::new();
    for group in editor.grouped() {
        let expanded = expansion.is_expanded(group.category);
        let chevron = if expanded { "v" } else { ">" };
        rows.push(ListItem::new(Line::from(Span::styled(
            format!("{} {} ({})", chevron, group.category.label(), group.items.len()),
            Style::default()
                .fg(palette.category)
                .add_modifier(Modifier::BOLD),
        ))));

        if !expanded {
            continue;
        }
        for item in group.items {
            let line = if item.checked {
                Line::from(vec![
                    Span::styled("   [x] ", Style::default().fg(palette.checked)),
                    Span::styled(item.name.clone(), palette.checked_item()),
                ])
            } else {
                Line::from(vec![
                    Span::styled("   [ ] ", Style::default().fg(palette.text_dim)),
                    Span::styled(item.name.clone(), Style::default().fg(palette.text)),
                ])
            };
            rows.push(ListItem::new(line));
        }
    }

    let highlight = if focused {
        palette.selected()
    } else {
        Style::default()
    };
    let list = List::new(rows).block(block).highlight_style(highlight);
    let mut state = ListState::default().with_selected(Some(cursor));
    frame.render_stateful_widget(list, area, &mut state);
}
