//! VkScript source code parser
//!
//! This module transforms VkScript source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens), one token per pull
//! - [`parse`]: Parser state, syntax errors, error recovery
//! - `statements` / `expressions`: the grammar, as `impl Parser` blocks
//! - [`ast`]: AST node definitions
//! - [`printer`]: parenthesized expressions, program outlines, token dumps
//!
//! # Language
//!
//! - Statements: `var` declarations, assignments, `if`/`else`, `while`, `return`
//! - Expressions: numbers, booleans, identifiers, `or`, `and`, `==`, `!=`,
//!   `>`, `<`, `+`, `-`, `*`, `/`, unary `-`, parentheses
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with precedence climbing for binary operators.
//! No external parser generator dependencies.

pub mod ast;
mod expressions;
pub mod lexer;
pub mod parse;
pub mod printer;
mod statements;

pub use expressions::Precedence;
pub use parse::{Expected, ParseOutcome, Parser, Production, SyntaxError, MAX_NESTING_DEPTH};

/// Parse a whole program, stopping at the first syntax error.
pub fn parse(source: &str) -> Result<ast::Program, SyntaxError> {
    Parser::new(source).parse_program()
}
