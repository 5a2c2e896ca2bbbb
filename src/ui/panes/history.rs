//! History pane rendering
//!
//! Each submitted line takes two rows: the highlighted s-expression and,
//! indented below it, either the converted expression or the error message.

use super::utils::{border_style, highlight_expression, visible_range};
use crate::session::HistoryEntry;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

fn entry_lines(entry: &HistoryEntry) -> [Line<'static>; 2] {
    let mut input = vec![Span::styled("λ ", Style::default().fg(DEFAULT_THEME.comment))];
    input.extend(highlight_expression(&entry.input));

    let result = match &entry.result {
        Ok(output) => Line::from(vec![
            Span::styled("  → ", Style::default().fg(DEFAULT_THEME.success)),
            Span::styled(
                output.clone(),
                Style::default()
                    .fg(DEFAULT_THEME.fg)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Err(error) => Line::from(vec![
            Span::styled("  ✗ ", Style::default().fg(DEFAULT_THEME.error)),
            Span::styled(error.to_string(), Style::default().fg(DEFAULT_THEME.error)),
        ]),
    };

    [Line::from(input), result]
}

/// Render the history pane
pub fn render_history_pane(
    frame: &mut Frame,
    area: Rect,
    history: &[HistoryEntry],
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(" History ")
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    if history.is_empty() {
        let paragraph = Paragraph::new("(no expressions yet)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let all_items: Vec<ListItem> = history
        .iter()
        .flat_map(entry_lines)
        .map(ListItem::new)
        .collect();

    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders, min 1
    let range = visible_range(all_items.len(), visible_height, scroll_offset);

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(range.start)
        .take(range.len())
        .collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}
