//! Trace pane rendering: tokens, calls and arguments of the latest line

use super::utils::{border_style, token_style, visible_range};
use crate::parser::trace::TraceEvent;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

fn event_line(event: &TraceEvent) -> Line<'static> {
    let label_style = Style::default().fg(DEFAULT_THEME.comment);
    match event {
        TraceEvent::Token(token) => Line::from(vec![
            Span::styled(format!("{:<9}", token.kind), label_style),
            Span::styled(token.lexeme.clone(), token_style(token.kind)),
            Span::styled(format!("  @{}", token.location.column), label_style),
        ]),
        TraceEvent::Call(name) => Line::from(vec![
            Span::styled("call     ", label_style),
            Span::styled(
                name.clone(),
                Style::default()
                    .fg(DEFAULT_THEME.function)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        TraceEvent::Argument(argument) => Line::from(vec![
            Span::styled("arg      ", label_style),
            Span::styled(argument.to_string(), Style::default().fg(DEFAULT_THEME.primary)),
        ]),
    }
}

/// Render the trace pane
pub fn render_trace_pane(
    frame: &mut Frame,
    area: Rect,
    events: &[TraceEvent],
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(" Trace ")
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    if events.is_empty() {
        let paragraph = Paragraph::new("(no trace)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    let range = visible_range(events.len(), visible_height, scroll_offset);

    let items: Vec<ListItem> = events[range]
        .iter()
        .map(|event| ListItem::new(event_line(event)))
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
