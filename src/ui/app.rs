//! Main TUI application state and logic

use crate::parser::lexer::{Lexer, Token};
use crate::parser::parse::{ParseOutcome, Parser};
use crate::parser::printer::{outline, OutlineRow};
use crate::ui::panes::{
    SourceRenderData, SourceScrollState, StatusRenderData, TokensRenderData, TokensScrollState,
    TreeRenderData,
};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use rustc_hash::{FxHashMap, FxHashSet};
use std::io;
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Tokens,
    Tree,
}

impl FocusedPane {
    /// Move focus to the next pane (left to right: source -> tokens -> tree)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tokens,
            FocusedPane::Tokens => FocusedPane::Tree,
            FocusedPane::Tree => FocusedPane::Source,
        }
    }

    /// Move focus to the previous pane
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tree,
            FocusedPane::Tokens => FocusedPane::Source,
            FocusedPane::Tree => FocusedPane::Tokens,
        }
    }
}

/// The main application state
pub struct App {
    /// The program text being explored
    pub source_code: String,

    /// Every token the lexer produced, in order
    pub tokens: Vec<Token>,

    /// Recovered program and its syntax errors
    pub outcome: ParseOutcome,

    /// Flattened syntax tree for the tree pane
    pub outline: Vec<OutlineRow>,

    /// Line number → indices into `tokens`
    pub token_lines: FxHashMap<usize, Vec<usize>>,

    /// Lines where a syntax error was reported
    pub error_lines: FxHashSet<usize>,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Index into `tokens`; `None` when there are no tokens
    pub selected_token: Option<usize>,

    /// Per-pane scroll state
    pub source_scroll: SourceScrollState,
    pub tokens_scroll: TokensScrollState,
    pub tree_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    /// Lex and parse `source_code` and build the explorer state
    pub fn new(source_code: String) -> Self {
        let tokens = Lexer::new(&source_code).tokenize();
        let outcome = Parser::from_tokens(tokens.clone()).parse_program_with_recovery();
        let outline = outline(&outcome.program);

        let mut token_lines: FxHashMap<usize, Vec<usize>> = FxHashMap::default();
        for (index, token) in tokens.iter().enumerate() {
            token_lines
                .entry(token.location().line)
                .or_default()
                .push(index);
        }

        let error_lines = outcome
            .errors
            .iter()
            .map(|error| error.location().line)
            .collect();

        let status_message = match outcome.errors.len() {
            0 => format!("Parsed {} statement(s)", outcome.program.statements.len()),
            n => format!("{} syntax error(s)", n),
        };

        let selected_token = if tokens.is_empty() { None } else { Some(0) };

        App {
            source_code,
            tokens,
            outcome,
            outline,
            token_lines,
            error_lines,
            focused_pane: FocusedPane::Source,
            selected_token,
            source_scroll: SourceScrollState::default(),
            tokens_scroll: TokensScrollState::default(),
            tree_scroll: 0,
            should_quit: false,
            status_message,
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(POLL_INTERVAL)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    pub fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // 3 panes side by side, plus status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let pane_area = main_chunks[0];
        let status_area = main_chunks[1];

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(40),
                Constraint::Percentage(25),
                Constraint::Percentage(35),
            ])
            .split(pane_area);

        super::panes::render_source_pane(
            frame,
            columns[0],
            &SourceRenderData {
                source_code: &self.source_code,
                tokens: &self.tokens,
                token_lines: &self.token_lines,
                error_lines: &self.error_lines,
                selected_token: self.selected_token,
            },
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        super::panes::render_tokens_pane(
            frame,
            columns[1],
            &TokensRenderData {
                tokens: &self.tokens,
                selected_token: self.selected_token,
            },
            self.focused_pane == FocusedPane::Tokens,
            &mut self.tokens_scroll,
        );

        super::panes::render_tree_pane(
            frame,
            columns[2],
            &TreeRenderData {
                outline: &self.outline,
                errors: &self.outcome.errors,
                selected_line: self.selected_line(),
            },
            self.focused_pane == FocusedPane::Tree,
            &mut self.tree_scroll,
        );

        super::panes::render_status_bar(
            frame,
            status_area,
            &StatusRenderData {
                message: &self.status_message,
                selected_token: self.selected_token,
                token_count: self.tokens.len(),
                error_count: self.outcome.errors.len(),
            },
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Left => self.select_previous(),
            KeyCode::Right => self.select_next(),
            KeyCode::Home => self.select(0),
            KeyCode::End => self.select(self.tokens.len().saturating_sub(1)),
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Source => {
                    self.source_scroll.offset = self.source_scroll.offset.saturating_sub(1);
                }
                FocusedPane::Tokens => self.select_previous(),
                FocusedPane::Tree => {
                    self.tree_scroll = self.tree_scroll.saturating_sub(1);
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Source => {
                    self.source_scroll.offset = self.source_scroll.offset.saturating_add(1);
                }
                FocusedPane::Tokens => self.select_next(),
                FocusedPane::Tree => {
                    self.tree_scroll = self.tree_scroll.saturating_add(1);
                }
            },
            KeyCode::Char('e') => self.jump_to_first_error(),
            _ => {}
        }
    }

    /// Line of the selected token
    pub fn selected_line(&self) -> Option<usize> {
        self.selected_token
            .and_then(|index| self.tokens.get(index))
            .map(|token| token.location().line)
    }

    fn select_previous(&mut self) {
        if let Some(index) = self.selected_token {
            self.select(index.saturating_sub(1));
        }
    }

    fn select_next(&mut self) {
        if let Some(index) = self.selected_token {
            self.select(index + 1);
        }
    }

    /// Select the token at `index` (clamped) and bring it into view
    fn select(&mut self, index: usize) {
        if self.tokens.is_empty() {
            return;
        }
        let index = index.min(self.tokens.len() - 1);
        self.selected_token = Some(index);
        self.source_scroll.reveal_line = self.selected_line();
        self.tokens_scroll.follow_selection = true;

        let token = &self.tokens[index];
        let location = token.location();
        self.status_message = format!("{} at {}:{}", token, location.line, location.column);
    }

    fn jump_to_first_error(&mut self) {
        let Some(error) = self.outcome.errors.first() else {
            self.status_message = "No syntax errors".to_string();
            return;
        };
        let location = error.location();
        let message = error.to_string();

        // Errors at end of input point past the last token
        let index = self
            .tokens
            .iter()
            .position(|token| token.location() == location)
            .unwrap_or(self.tokens.len().saturating_sub(1));
        self.select(index);
        self.status_message = message;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_new_indexes_tokens_by_line() {
        let app = App::new("var a = 1;\nreturn a;".to_string());

        assert_eq!(app.tokens.len(), 8);
        assert_eq!(app.token_lines[&1], vec![0, 1, 2, 3, 4]);
        assert_eq!(app.token_lines[&2], vec![5, 6, 7]);
        assert!(app.outcome.is_ok());
        assert_eq!(app.outline.len(), 2);
        assert_eq!(app.selected_token, Some(0));
    }

    #[test]
    fn test_token_selection_is_clamped() {
        let mut app = App::new("a = 1;".to_string());

        press(&mut app, KeyCode::Left);
        assert_eq!(app.selected_token, Some(0));

        press(&mut app, KeyCode::End);
        assert_eq!(app.selected_token, Some(3));
        press(&mut app, KeyCode::Right);
        assert_eq!(app.selected_token, Some(3));

        press(&mut app, KeyCode::Home);
        assert_eq!(app.selected_token, Some(0));
    }

    #[test]
    fn test_focus_cycles() {
        let mut app = App::new(String::new());
        assert_eq!(app.selected_token, None);

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::Tokens);
        press(&mut app, KeyCode::BackTab);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focused_pane, FocusedPane::Tree);

        // Up/Down in the tokens pane move the selection
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::Tokens);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected_token, None);
    }

    #[test]
    fn test_jump_to_first_error() {
        let mut app = App::new("var a = 1;\nvar b = ;\nreturn b;".to_string());
        assert_eq!(app.outcome.errors.len(), 1);
        assert!(app.error_lines.contains(&2));

        press(&mut app, KeyCode::Char('e'));
        let selected = app.selected_token.unwrap();
        assert_eq!(app.tokens[selected].text(), ";");
        assert_eq!(app.tokens[selected].location().line, 2);
        assert!(app.status_message.starts_with("Syntax error at line 2, column 9"));
    }

    #[test]
    fn test_jump_to_error_at_end_of_input() {
        let mut app = App::new("var a = 1".to_string());
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.selected_token, Some(3));
    }

    #[test]
    fn test_quit() {
        let mut app = App::new("a = 1;".to_string());
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_render_smoke() {
        let source = "var a = 1.8;\nif (b) { a = 4; } else { a = 5; }\nvar c = ;";
        let mut app = App::new(source.to_string());
        let mut terminal = Terminal::new(TestBackend::new(160, 20)).unwrap();

        terminal.draw(|f| app.render(f)).unwrap();
        press(&mut app, KeyCode::End);
        terminal.draw(|f| app.render(f)).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("Source Code"));
        assert!(text.contains("Syntax Tree"));
        assert!(text.contains("1 ERRORS"));
    }
}
