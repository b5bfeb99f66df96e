//! Token stream pane rendering

use crate::parser::lexer::{Token, TokenKind};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

/// Data required to render the tokens pane
pub struct TokensRenderData<'a> {
    pub tokens: &'a [Token],
    pub selected_token: Option<usize>,
}

/// Scroll state for the tokens pane
#[derive(Debug, Default)]
pub struct TokensScrollState {
    pub offset: usize,
    /// Bring the selected token into view on the next render
    pub follow_selection: bool,
}

fn kind_style(kind: TokenKind) -> Style {
    match kind {
        TokenKind::Keyword => Style::default().fg(DEFAULT_THEME.keyword),
        TokenKind::Number | TokenKind::BooleanLiteral => Style::default().fg(DEFAULT_THEME.number),
        TokenKind::Unknown => Style::default()
            .fg(DEFAULT_THEME.error)
            .add_modifier(Modifier::BOLD),
        _ => Style::default().fg(DEFAULT_THEME.comment),
    }
}

/// Render the tokens pane
pub fn render_tokens_pane(
    frame: &mut Frame,
    area: Rect,
    data: &TokensRenderData,
    is_focused: bool,
    scroll_state: &mut TokensScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(format!(" Tokens ({}) ", data.tokens.len()))
        .borders(Borders::ALL)
        .border_style(border_style);

    if data.tokens.is_empty() {
        let paragraph = Paragraph::new("(no tokens)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let total_items = data.tokens.len();
    // Account for borders, min 1
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    if scroll_state.follow_selection {
        scroll_state.follow_selection = false;
        if let Some(selected) = data.selected_token {
            if selected < scroll_state.offset {
                scroll_state.offset = selected;
            } else if selected >= scroll_state.offset + visible_height {
                scroll_state.offset = selected + 1 - visible_height;
            }
        }
    }

    let max_scroll = total_items.saturating_sub(visible_height);
    scroll_state.offset = scroll_state.offset.min(max_scroll);

    let visible_items: Vec<ListItem> = data
        .tokens
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(index, token)| {
            let location = token.location();
            let line = Line::from(vec![
                Span::styled(
                    format!("{:<7}", format!("{}:{}", location.line, location.column)),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
                Span::styled(format!("{:<15}", token.kind().name()), kind_style(token.kind())),
                Span::styled(token.text().to_string(), Style::default().fg(DEFAULT_THEME.fg)),
            ]);

            let item = ListItem::new(line);
            if data.selected_token == Some(index) {
                item.style(
                    Style::default()
                        .bg(DEFAULT_THEME.current_line_bg)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                item
            }
        })
        .collect();

    let list = List::new(visible_items).block(block);
    frame.render_widget(list, area);
}
