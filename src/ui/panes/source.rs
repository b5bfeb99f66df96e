//! Source code pane rendering with syntax highlighting
//!
//! This module renders the source code pane, which displays the VkScript
//! program with highlighting taken from the real lexer output.
//!
//! # Features
//!
//! - Token-kind coloring (keywords, literals, operators, unknown lexemes)
//! - Selected-token highlight, kept in view when the selection moves
//! - Lines carrying a syntax error are flagged in the gutter
//! - Line numbering
//!
//! Tokens never span lines, so each line is colored from the tokens the
//! line index hands back for it.

use crate::parser::lexer::{Token, TokenKind};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use rustc_hash::{FxHashMap, FxHashSet};

/// Everything the source pane needs from the app for one frame
pub struct SourceRenderData<'a> {
    pub source_code: &'a str,
    pub tokens: &'a [Token],
    /// Line number → indices into `tokens`
    pub token_lines: &'a FxHashMap<usize, Vec<usize>>,
    pub error_lines: &'a FxHashSet<usize>,
    pub selected_token: Option<usize>,
}

/// Scroll state for the source pane
#[derive(Debug, Default)]
pub struct SourceScrollState {
    pub offset: usize,
    /// Scroll so this 1-based line is visible on the next render
    pub reveal_line: Option<usize>,
}

fn token_style(kind: TokenKind) -> Style {
    match kind {
        TokenKind::Keyword => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        TokenKind::Number | TokenKind::BooleanLiteral => {
            Style::default().fg(DEFAULT_THEME.number)
        }
        TokenKind::LeftParen
        | TokenKind::RightParen
        | TokenKind::LeftBrace
        | TokenKind::RightBrace => Style::default().fg(DEFAULT_THEME.primary), // Brackets
        TokenKind::Assign
        | TokenKind::Equal
        | TokenKind::NotEqual
        | TokenKind::Plus
        | TokenKind::Minus
        | TokenKind::Mul
        | TokenKind::Div
        | TokenKind::GreaterThan
        | TokenKind::LessThan => Style::default().fg(DEFAULT_THEME.operator),
        TokenKind::Unknown => Style::default()
            .fg(DEFAULT_THEME.error)
            .add_modifier(Modifier::UNDERLINED),
        TokenKind::Identifier
        | TokenKind::Semicolon
        | TokenKind::Comma
        | TokenKind::Dot
        | TokenKind::EndOfInput => Style::default().fg(DEFAULT_THEME.fg),
    }
}

/// Split one source line into styled spans using the tokens that start on it
fn highlight_line(
    line: &str,
    token_indices: &[usize],
    tokens: &[Token],
    selected_token: Option<usize>,
) -> Vec<Span<'static>> {
    let chars: Vec<char> = line.chars().collect();
    let mut spans = Vec::new();
    let mut cursor = 0;

    for &index in token_indices {
        let Some(token) = tokens.get(index) else {
            continue;
        };
        let start = token.location().column.saturating_sub(1).min(chars.len());
        let end = (start + token.text().chars().count()).min(chars.len());
        if start < cursor {
            continue;
        }

        if start > cursor {
            spans.push(Span::raw(chars[cursor..start].iter().collect::<String>()));
        }

        let mut style = token_style(token.kind());
        if selected_token == Some(index) {
            style = style
                .bg(DEFAULT_THEME.current_line_bg)
                .add_modifier(Modifier::REVERSED);
        }
        spans.push(Span::styled(chars[start..end].iter().collect::<String>(), style));
        cursor = end;
    }

    if cursor < chars.len() {
        spans.push(Span::raw(chars[cursor..].iter().collect::<String>()));
    }

    spans
}

/// Render the source code pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    data: &SourceRenderData,
    is_focused: bool,
    scroll_state: &mut SourceScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Source Code ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let lines: Vec<&str> = data.source_code.lines().collect();
    let total_lines = lines.len();

    // Calculate visible range: account for borders (2), min 1
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    if let Some(line) = scroll_state.reveal_line.take() {
        let line_idx = line.saturating_sub(1);
        if line_idx < scroll_state.offset {
            scroll_state.offset = line_idx;
        } else if line_idx >= scroll_state.offset + visible_height {
            scroll_state.offset = line_idx + 1 - visible_height;
        }
    }

    // Clamp scroll offset to valid range
    let max_scroll = total_lines.saturating_sub(visible_height);
    scroll_state.offset = scroll_state.offset.min(max_scroll);

    let selected_line = data
        .selected_token
        .and_then(|index| data.tokens.get(index))
        .map(|token| token.location().line);

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let line_num = idx + 1;
            let has_error = data.error_lines.contains(&line_num);
            let is_current = selected_line == Some(line_num);

            let (marker, num_style) = if has_error {
                (
                    "!",
                    Style::default()
                        .fg(DEFAULT_THEME.error)
                        .add_modifier(Modifier::BOLD),
                )
            } else if is_current {
                (
                    ">",
                    Style::default()
                        .fg(DEFAULT_THEME.secondary)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                (" ", Style::default().fg(DEFAULT_THEME.comment))
            };

            let token_indices = data
                .token_lines
                .get(&line_num)
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            let mut spans = vec![Span::styled(
                format!("{}{:4} ", marker, line_num),
                num_style,
            )];
            let content = highlight_line(line, token_indices, data.tokens, data.selected_token);

            if is_current {
                spans.extend(content.into_iter().map(|span| {
                    let line_bg = Style::default().bg(DEFAULT_THEME.current_line_bg);
                    let style = span.style.patch(line_bg);
                    span.style(style)
                }));
            } else {
                spans.extend(content);
            }

            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::Lexer;

    fn contents(spans: &[Span]) -> Vec<String> {
        spans.iter().map(|s| s.content.to_string()).collect()
    }

    #[test]
    fn test_highlight_line_keeps_whitespace() {
        let tokens = Lexer::new("var  a = 1;").tokenize();
        let indices: Vec<usize> = (0..tokens.len()).collect();
        let spans = highlight_line("var  a = 1;", &indices, &tokens, None);

        assert_eq!(
            contents(&spans),
            vec!["var", "  ", "a", " ", "=", " ", "1", ";"]
        );
        assert!(spans[0].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_highlight_line_marks_selection() {
        let tokens = Lexer::new("x = y").tokenize();
        let spans = highlight_line("x = y", &[0, 1, 2], &tokens, Some(2));

        assert_eq!(contents(&spans), vec!["x", " ", "=", " ", "y"]);
        assert!(spans[4].style.add_modifier.contains(Modifier::REVERSED));
        assert!(!spans[0].style.add_modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn test_highlight_line_trailing_text() {
        let tokens = Lexer::new("  a   ").tokenize();
        let spans = highlight_line("  a   ", &[0], &tokens, None);
        assert_eq!(contents(&spans), vec!["  ", "a", "   "]);
    }
}
