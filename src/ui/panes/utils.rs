//! Shared helpers for pane rendering

use crate::parser::lexer::{tokenize, TokenKind};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    style::{Modifier, Style},
    text::Span,
};

/// Border style for a pane depending on focus
pub fn border_style(is_focused: bool) -> Style {
    if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    }
}

/// Style for a token class
pub fn token_style(kind: TokenKind) -> Style {
    let color = match kind {
        TokenKind::Function => DEFAULT_THEME.function,
        TokenKind::Number => DEFAULT_THEME.number,
        TokenKind::Operator => DEFAULT_THEME.operator,
        TokenKind::LParen | TokenKind::RParen => DEFAULT_THEME.paren,
        TokenKind::Invalid => DEFAULT_THEME.error,
    };
    Style::default().fg(color)
}

/// Highlight an s-expression line using the real lexer.
///
/// Whitespace between tokens is kept as plain spans so the text is unchanged.
pub fn highlight_expression(text: &str) -> Vec<Span<'static>> {
    let chars: Vec<char> = text.chars().collect();
    let mut spans = Vec::new();
    let mut cursor = 0;

    for token in tokenize(text) {
        let start = token.location.column.saturating_sub(1);
        if token.location.line != 1 || start < cursor {
            break;
        }
        if start > cursor {
            spans.push(Span::raw(chars[cursor..start].iter().collect::<String>()));
        }
        cursor = start + token.lexeme.chars().count();
        spans.push(Span::styled(token.lexeme, token_style(token.kind)));
    }

    if cursor < chars.len() {
        spans.push(Span::raw(chars[cursor..].iter().collect::<String>()));
    }

    spans
}

/// Clamp `scroll_offset` so the last page stays full, and return the visible range.
pub fn visible_range(total_items: usize, visible_height: usize, scroll_offset: &mut usize) -> std::ops::Range<usize> {
    if total_items > visible_height {
        let max_scroll = total_items - visible_height;
        *scroll_offset = (*scroll_offset).min(max_scroll);
    } else {
        *scroll_offset = 0;
    }
    *scroll_offset..(*scroll_offset + visible_height).min(total_items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_keeps_text() {
        let text = "( add  1 #)";
        let joined: String = highlight_expression(text)
            .iter()
            .map(|s| s.content.to_string())
            .collect();
        assert_eq!(joined, text);
    }

    #[test]
    fn test_visible_range_clamps() {
        let mut offset = usize::MAX;
        assert_eq!(visible_range(10, 4, &mut offset), 6..10);
        assert_eq!(offset, 6);

        let mut offset = 3;
        assert_eq!(visible_range(2, 4, &mut offset), 0..2);
        assert_eq!(offset, 0);
    }
}
