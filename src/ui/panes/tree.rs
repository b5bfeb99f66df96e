//! Syntax tree pane rendering
//!
//! Shows the program outline produced by [`crate::parser::printer::outline`],
//! followed by every syntax error the recovering parse reported. Rows whose
//! statement starts on the line of the selected token are highlighted.

use crate::parser::parse::SyntaxError;
use crate::parser::printer::OutlineRow;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding},
    Frame,
};

/// Data required to render the syntax tree pane
pub struct TreeRenderData<'a> {
    pub outline: &'a [OutlineRow],
    pub errors: &'a [SyntaxError],
    /// Line of the selected token, if any
    pub selected_line: Option<usize>,
}

fn outline_line(row: &OutlineRow) -> Line<'static> {
    let indent = "  ".repeat(row.depth);
    // Split "VarDecl a = 1" into the node name and the rest
    let (name, rest) = match row.label.split_once(' ') {
        Some((name, rest)) => (name.to_string(), format!(" {}", rest)),
        None => (row.label.clone(), String::new()),
    };
    let name_style = if name == "then" || name == "else" {
        Style::default().fg(DEFAULT_THEME.keyword)
    } else {
        Style::default()
            .fg(DEFAULT_THEME.node_name)
            .add_modifier(Modifier::BOLD)
    };

    Line::from(vec![
        Span::raw(indent),
        Span::styled(name, name_style),
        Span::styled(rest, Style::default().fg(DEFAULT_THEME.fg)),
        Span::styled(
            format!("  @{}:{}", row.location.line, row.location.column),
            Style::default().fg(DEFAULT_THEME.comment),
        ),
    ])
}

fn error_line(error: &SyntaxError) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            "✗ ",
            Style::default()
                .fg(DEFAULT_THEME.error)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(error.to_string(), Style::default().fg(DEFAULT_THEME.error)),
    ])
}

/// Render the syntax tree pane
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    data: &TreeRenderData,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Syntax Tree ")
        .borders(Borders::ALL)
        .border_style(border_style)
        .padding(Padding::new(1, 0, 0, 0));

    let mut items: Vec<ListItem> = Vec::new();

    if data.outline.is_empty() {
        items.push(
            ListItem::new("(empty program)").style(Style::default().fg(DEFAULT_THEME.comment)),
        );
    }

    for row in data.outline {
        let item = ListItem::new(outline_line(row));
        if data.selected_line == Some(row.location.line) {
            items.push(item.style(Style::default().bg(DEFAULT_THEME.current_line_bg)));
        } else {
            items.push(item);
        }
    }

    if !data.errors.is_empty() {
        items.push(ListItem::new(""));
        items.push(
            ListItem::new(format!("Errors ({})", data.errors.len())).style(
                Style::default()
                    .fg(DEFAULT_THEME.error)
                    .add_modifier(Modifier::BOLD),
            ),
        );
        items.extend(data.errors.iter().map(|e| ListItem::new(error_line(e))));
    }

    let total_items = items.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    if total_items > visible_height {
        *scroll_offset = (*scroll_offset).min(total_items - visible_height);
    } else {
        *scroll_offset = 0;
    }

    let visible_items: Vec<ListItem> = items
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::SourceLocation;

    #[test]
    fn test_outline_line_splits_node_name() {
        let row = OutlineRow {
            depth: 2,
            label: "Assign a = (a + 1)".to_string(),
            location: SourceLocation::new(3, 5),
        };
        let line = outline_line(&row);
        let parts: Vec<&str> = line.spans.iter().map(|s| s.content.as_ref()).collect();

        assert_eq!(parts, vec!["    ", "Assign", " a = (a + 1)", "  @3:5"]);
    }
}
