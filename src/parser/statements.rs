//! Statement parsing implementation
//!
//! This module handles parsing of all VkScript statement types:
//!
//! - Variable declarations: `var x = 42;`
//! - Assignments: `x = x + 1;`
//! - Control flow: `if (...) { ... } else { ... }`, `while (...) { ... }`
//! - `return expr;`
//!
//! # Grammar
//!
//! ```text
//! statement  ::= var_decl | assign | if_stmt | while_stmt | return_stmt
//! var_decl   ::= 'var' IDENT '=' expr ';'
//! assign     ::= IDENT '=' expr ';'
//! block      ::= '{' statement* '}'
//! if_stmt    ::= 'if' '(' expr ')' block ( 'else' block )?
//! while_stmt ::= 'while' '(' expr ')' block
//! return_stmt::= 'return' expr ';'
//! ```
//!
//! Block-bodied statements take no trailing `;`. Each block opens one
//! nesting level.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::{Keyword, Token, TokenKind};
use crate::parser::parse::{Expected, Parser, Production, SyntaxError};

impl<I: Iterator<Item = Token>> Parser<I> {
    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> Result<Stmt, SyntaxError> {
        match self.peek().keyword() {
            Some(Keyword::Var) => return self.parse_var_declaration(),
            Some(Keyword::If) => return self.parse_if_statement(),
            Some(Keyword::While) => return self.parse_while_statement(),
            Some(Keyword::Return) => return self.parse_return_statement(),
            _ => {}
        }

        if self.check(TokenKind::Identifier) {
            return self.parse_assignment();
        }

        Err(self.error(Production::Statement, Expected::Statement))
    }

    /// Parse variable declaration: var name = init;
    fn parse_var_declaration(&mut self) -> Result<Stmt, SyntaxError> {
        let location = self.advance().location();

        let name = self.expect_identifier(Production::VarDecl)?;
        self.expect_token(TokenKind::Assign, Production::VarDecl)?;
        let initializer = self.parse_expression()?;
        self.expect_token(TokenKind::Semicolon, Production::VarDecl)?;

        Ok(Stmt::VarDecl {
            name,
            initializer,
            location,
        })
    }

    /// Parse assignment: name = value;
    fn parse_assignment(&mut self) -> Result<Stmt, SyntaxError> {
        let name = self.expect_identifier(Production::Assign)?;
        let location = name.location;

        self.expect_token(TokenKind::Assign, Production::Assign)?;
        let value = self.parse_expression()?;
        self.expect_token(TokenKind::Semicolon, Production::Assign)?;

        Ok(Stmt::Assign {
            name,
            value,
            location,
        })
    }

    /// Parse if statement
    fn parse_if_statement(&mut self) -> Result<Stmt, SyntaxError> {
        let location = self.advance().location();

        let condition = self.parse_condition(Production::If)?;
        let then_branch = self.parse_block()?;

        let else_branch = if self.match_keyword(Keyword::Else) {
            Some(self.parse_block()?)
        } else {
            None
        };

        Ok(Stmt::If {
            condition,
            then_branch,
            else_branch,
            location,
        })
    }

    /// Parse while statement
    fn parse_while_statement(&mut self) -> Result<Stmt, SyntaxError> {
        let location = self.advance().location();

        let condition = self.parse_condition(Production::While)?;
        let body = self.parse_block()?;

        Ok(Stmt::While {
            condition,
            body,
            location,
        })
    }

    /// Parse return statement
    fn parse_return_statement(&mut self) -> Result<Stmt, SyntaxError> {
        let location = self.advance().location();

        let value = self.parse_expression()?;
        self.expect_token(TokenKind::Semicolon, Production::Return)?;

        Ok(Stmt::Return { value, location })
    }

    /// Parenthesized condition of `if` and `while`
    fn parse_condition(&mut self, production: Production) -> Result<Expr, SyntaxError> {
        self.expect_token(TokenKind::LeftParen, production)?;
        let condition = self.parse_expression()?;
        self.expect_token(TokenKind::RightParen, production)?;
        Ok(condition)
    }

    /// Parse a braced block into its statement sequence
    pub(crate) fn parse_block(&mut self) -> Result<Vec<Stmt>, SyntaxError> {
        self.nested(Production::Block, |parser| {
            parser.expect_token(TokenKind::LeftBrace, Production::Block)?;

            let mut statements = Vec::new();
            while !parser.check(TokenKind::RightBrace) {
                if parser.is_at_end() {
                    return Err(parser.error(
                        Production::Block,
                        Expected::Token(TokenKind::RightBrace),
                    ));
                }
                statements.push(parser.parse_statement()?);
            }

            parser.advance();
            Ok(statements)
        })
    }
}
