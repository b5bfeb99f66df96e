//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, helper methods, and the main parse entry points.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, error recovery, and coordination
//! - `statements`: Parsing statements (var, assignment, if, while, return) and blocks
//! - `expressions`: Parsing expressions with precedence climbing
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.
//!
//! The parser pulls tokens from its source on demand and keeps exactly one
//! token of lookahead. Once the source is exhausted it keeps presenting a
//! synthesized [`TokenKind::EndOfInput`] token.

use crate::parser::ast::*;
use crate::parser::lexer::{Keyword, Lexer, Token, TokenKind};
use std::fmt;
use thiserror::Error as ThisError;

/// The grammar production being parsed when an error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Production {
    Statement,
    VarDecl,
    Assign,
    If,
    While,
    Return,
    Block,
    Expression,
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Production::Statement => "statement",
            Production::VarDecl => "variable declaration",
            Production::Assign => "assignment",
            Production::If => "if statement",
            Production::While => "while statement",
            Production::Return => "return statement",
            Production::Block => "block",
            Production::Expression => "expression",
        };
        f.write_str(name)
    }
}

/// What the parser was looking for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    Statement,
    Expression,
    Identifier,
    Token(TokenKind),
    /// Parentheses, prefix minus or blocks nested past [`MAX_NESTING_DEPTH`]
    ShallowerNesting,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Statement => write!(f, "statement"),
            Expected::Expression => write!(f, "expression"),
            Expected::Identifier => write!(f, "identifier"),
            Expected::Token(kind) => write!(f, "{}", kind),
            Expected::ShallowerNesting => {
                write!(f, "at most {} levels of nesting", MAX_NESTING_DEPTH)
            }
        }
    }
}

/// Deepest nesting of parentheses, prefix minus and blocks the parser accepts
pub const MAX_NESTING_DEPTH: usize = 256;

/// Parser error type
#[derive(ThisError, Debug, Clone, PartialEq, Eq)]
#[error(
    "Syntax error at line {}, column {} in {production}: expected {expected}, found {found}",
    .found.location().line,
    .found.location().column
)]
pub struct SyntaxError {
    pub production: Production,
    pub expected: Expected,
    pub found: Token,
}

impl SyntaxError {
    pub fn location(&self) -> SourceLocation {
        self.found.location()
    }
}

/// Result of a parse that recovers from syntax errors
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    /// Every statement that parsed cleanly, in source order
    pub program: Program,
    /// Errors in the order they were found
    pub errors: Vec<SyntaxError>,
}

impl ParseOutcome {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Recursive descent parser for VkScript
pub struct Parser<I = Lexer> {
    pub(crate) tokens: I,
    pub(crate) current: Token,
    /// Position just past the last real token; where end of input is reported
    pub(crate) end_location: SourceLocation,
    /// Nested constructs currently open
    pub(crate) depth: usize,
}

impl Parser<Lexer> {
    pub fn new(source: &str) -> Self {
        Self::from_tokens(Lexer::new(source))
    }
}

impl<I: Iterator<Item = Token>> Parser<I> {
    /// Create a parser over any token source
    pub fn from_tokens<T>(tokens: T) -> Self
    where
        T: IntoIterator<Item = Token, IntoIter = I>,
    {
        let mut tokens = tokens.into_iter();
        let end_location = SourceLocation::default();
        let current = match tokens.next() {
            Some(token) => token,
            None => Token::end_of_input(end_location),
        };
        Self {
            end_location: current.end_location(),
            tokens,
            current,
            depth: 0,
        }
    }

    /// Parse the entire program, stopping at the first syntax error
    pub fn parse_program(&mut self) -> Result<Program, SyntaxError> {
        let mut program = Program::new();

        while !self.is_at_end() {
            program.statements.push(self.parse_statement()?);
        }

        Ok(program)
    }

    /// Parse the entire program, collecting every syntax error.
    ///
    /// After an error the parser skips to the next statement boundary and
    /// continues at top level.
    pub fn parse_program_with_recovery(&mut self) -> ParseOutcome {
        let mut outcome = ParseOutcome::default();

        while !self.is_at_end() {
            match self.parse_statement() {
                Ok(stmt) => outcome.program.statements.push(stmt),
                Err(err) => {
                    outcome.errors.push(err);
                    self.synchronize();
                }
            }
        }

        outcome
    }

    /// Skip tokens until just after a `;` or `}`, or until a token that can
    /// start a statement.
    fn synchronize(&mut self) {
        while !self.is_at_end() {
            if matches!(
                self.current.keyword(),
                Some(Keyword::Var | Keyword::If | Keyword::While | Keyword::Return)
            ) {
                return;
            }

            let skipped = self.advance();
            if matches!(
                skipped.kind(),
                TokenKind::Semicolon | TokenKind::RightBrace
            ) {
                return;
            }
        }
    }

    // ===== Helper methods =====

    pub(crate) fn peek(&self) -> &Token {
        &self.current
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current.kind() == kind
    }

    pub(crate) fn check_keyword(&self, keyword: Keyword) -> bool {
        self.current.is_keyword(keyword)
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.check(TokenKind::EndOfInput)
    }

    /// Consume the current token and return it
    pub(crate) fn advance(&mut self) -> Token {
        let next = match self.tokens.next() {
            Some(token) => {
                self.end_location = token.end_location();
                token
            }
            None => Token::end_of_input(self.end_location),
        };
        std::mem::replace(&mut self.current, next)
    }

    /// Run `parse` one nesting level deeper, failing at the current token
    /// once [`MAX_NESTING_DEPTH`] levels are open
    pub(crate) fn nested<T>(
        &mut self,
        production: Production,
        parse: impl FnOnce(&mut Self) -> Result<T, SyntaxError>,
    ) -> Result<T, SyntaxError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.error(production, Expected::ShallowerNesting));
        }

        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    pub(crate) fn match_keyword(&mut self, keyword: Keyword) -> bool {
        if self.check_keyword(keyword) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn error(&self, production: Production, expected: Expected) -> SyntaxError {
        SyntaxError {
            production,
            expected,
            found: self.current.clone(),
        }
    }

    pub(crate) fn expect_token(
        &mut self,
        kind: TokenKind,
        production: Production,
    ) -> Result<Token, SyntaxError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error(production, Expected::Token(kind)))
        }
    }

    pub(crate) fn expect_identifier(
        &mut self,
        production: Production,
    ) -> Result<Identifier, SyntaxError> {
        if self.check(TokenKind::Identifier) {
            let token = self.advance();
            Ok(Identifier::new(token.text(), token.location()))
        } else {
            Err(self.error(production, Expected::Identifier))
        }
    }
}
