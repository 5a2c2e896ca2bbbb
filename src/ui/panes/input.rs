//! Input line rendering

use super::utils::{border_style, highlight_expression};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const PROMPT: &str = "> ";

/// Render the input line and place the terminal cursor after the text
pub fn render_input_pane(frame: &mut Frame, area: Rect, input: &str) {
    let block = Block::default()
        .title(" Enter a LISP expression (exit to stop) ")
        .borders(Borders::ALL)
        .border_style(border_style(true));

    let mut spans = vec![Span::styled(PROMPT, Style::default().fg(DEFAULT_THEME.primary))];
    spans.extend(highlight_expression(input));

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);

    frame.set_cursor_position(Position::new(cursor_column(area, input), area.y.saturating_add(1)));
}

/// Column just after the typed text, kept inside the border.
fn cursor_column(area: Rect, input: &str) -> u16 {
    let width = u16::try_from(PROMPT.chars().count() + input.chars().count()).unwrap_or(u16::MAX);
    area.x
        .saturating_add(1)
        .saturating_add(width)
        .min(area.right().saturating_sub(2))
}
