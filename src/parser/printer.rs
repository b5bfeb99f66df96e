//! Text renderings of tokens and syntax trees
//!
//! - `Display` for [`Expr`] writes a fully parenthesized form that parses
//!   back to the same tree.
//! - [`outline`] flattens a [`Program`] into indented rows for the explorer's
//!   tree pane and the `--dump ast` output.

use crate::parser::ast::*;
use crate::parser::lexer::Token;
use std::fmt;

/// Pending output while printing an expression
enum Piece<'a> {
    Node(&'a Expr),
    Text(&'a str),
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Explicit stack: operator chains can be far deeper than the call stack
        let mut pending = vec![Piece::Node(self)];

        while let Some(piece) = pending.pop() {
            match piece {
                Piece::Text(text) => f.write_str(text)?,
                Piece::Node(Expr::Leaf(token)) => f.write_str(token.text())?,
                Piece::Node(Expr::Unary { op, operand }) => {
                    f.write_str("(")?;
                    f.write_str(op.text())?;
                    pending.push(Piece::Text(")"));
                    pending.push(Piece::Node(operand));
                }
                Piece::Node(Expr::Binary { op, left, right }) => {
                    f.write_str("(")?;
                    pending.push(Piece::Text(")"));
                    pending.push(Piece::Node(right));
                    pending.push(Piece::Text(" "));
                    pending.push(Piece::Text(op.text()));
                    pending.push(Piece::Text(" "));
                    pending.push(Piece::Node(left));
                }
            }
        }

        Ok(())
    }
}

/// One line of a program outline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineRow {
    pub depth: usize,
    pub label: String,
    pub location: SourceLocation,
}

/// Flatten `program` into rows, one per statement plus branch markers.
pub fn outline(program: &Program) -> Vec<OutlineRow> {
    let mut rows = Vec::new();
    outline_block(&program.statements, 0, &mut rows);
    rows
}

fn outline_block(statements: &[Stmt], depth: usize, rows: &mut Vec<OutlineRow>) {
    for stmt in statements {
        outline_statement(stmt, depth, rows);
    }
}

fn row(depth: usize, label: String, location: SourceLocation) -> OutlineRow {
    OutlineRow {
        depth,
        label,
        location,
    }
}

fn outline_statement(stmt: &Stmt, depth: usize, rows: &mut Vec<OutlineRow>) {
    match stmt {
        Stmt::VarDecl {
            name,
            initializer,
            location,
        } => rows.push(row(
            depth,
            format!("VarDecl {} = {}", name.name, initializer),
            *location,
        )),
        Stmt::Assign {
            name,
            value,
            location,
        } => rows.push(row(
            depth,
            format!("Assign {} = {}", name.name, value),
            *location,
        )),
        Stmt::Return { value, location } => {
            rows.push(row(depth, format!("Return {}", value), *location))
        }
        Stmt::If {
            condition,
            then_branch,
            else_branch,
            location,
        } => {
            rows.push(row(depth, format!("If {}", condition), *location));
            rows.push(row(depth + 1, "then".to_string(), *location));
            outline_block(then_branch, depth + 2, rows);
            if let Some(else_branch) = else_branch {
                rows.push(row(depth + 1, "else".to_string(), *location));
                outline_block(else_branch, depth + 2, rows);
            }
        }
        Stmt::While {
            condition,
            body,
            location,
        } => {
            rows.push(row(depth, format!("While {}", condition), *location));
            outline_block(body, depth + 1, rows);
        }
    }
}

/// Plain-text outline, two spaces per depth level
pub fn render_outline(program: &Program) -> String {
    let mut out = String::new();
    for row in outline(program) {
        out.push_str(&"  ".repeat(row.depth));
        out.push_str(&row.label);
        out.push('\n');
    }
    out
}

/// One token per line: `line:col  Kind  text`
pub fn render_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        let location = token.location();
        out.push_str(&format!(
            "{:<8} {:<15} {}\n",
            format!("{}:{}", location.line, location.column),
            token.kind().name(),
            token.text()
        ));
    }
    out
}
