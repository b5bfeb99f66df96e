//! Expression parsing implementation
//!
//! This module handles parsing of VkScript expressions using precedence
//! climbing for binary operators and recursive descent for the rest.
//!
//! # Supported Expressions
//!
//! - Literals: numbers, `true`, `false`
//! - Identifiers
//! - Binary operators: `or`, `and`, `==`, `!=`, `>`, `<`, `+`, `-`, `*`, `/`
//! - Unary minus: `-x`
//! - Parenthesized sub-expressions
//!
//! # Precedence
//!
//! From loosest to tightest, all binary levels left-associative:
//!
//! | Level          | Operators   |
//! |----------------|-------------|
//! | Or             | `or`        |
//! | And            | `and`       |
//! | Equality       | `==` `!=`   |
//! | Relational     | `>` `<`     |
//! | Additive       | `+` `-`     |
//! | Multiplicative | `*` `/`     |
//!
//! Unary minus binds tighter than every binary operator.
//!
//! Parentheses and prefix minus each open one nesting level; see
//! [`MAX_NESTING_DEPTH`](crate::parser::parse::MAX_NESTING_DEPTH).
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::{Keyword, Token, TokenKind};
use crate::parser::parse::{Expected, Parser, Production, SyntaxError};

/// Binding strength of binary operators, loosest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Or,
    And,
    Equality,
    Relational,
    Additive,
    Multiplicative,
}

impl Precedence {
    /// Precedence of `token` when it appears in binary operator position
    pub fn of_binary(token: &Token) -> Option<Precedence> {
        match token.kind() {
            TokenKind::Keyword => match token.keyword() {
                Some(Keyword::Or) => Some(Precedence::Or),
                Some(Keyword::And) => Some(Precedence::And),
                _ => None,
            },
            TokenKind::Equal | TokenKind::NotEqual => Some(Precedence::Equality),
            TokenKind::GreaterThan | TokenKind::LessThan => Some(Precedence::Relational),
            TokenKind::Plus | TokenKind::Minus => Some(Precedence::Additive),
            TokenKind::Mul | TokenKind::Div => Some(Precedence::Multiplicative),
            _ => None,
        }
    }

    /// Next tighter level; `None` above the multiplicative level
    fn tighter(self) -> Option<Precedence> {
        match self {
            Precedence::Or => Some(Precedence::And),
            Precedence::And => Some(Precedence::Equality),
            Precedence::Equality => Some(Precedence::Relational),
            Precedence::Relational => Some(Precedence::Additive),
            Precedence::Additive => Some(Precedence::Multiplicative),
            Precedence::Multiplicative => None,
        }
    }
}

impl<I: Iterator<Item = Token>> Parser<I> {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, SyntaxError> {
        self.parse_binary(Precedence::Or)
    }

    /// Precedence climbing: fold operators binding at least as tight as
    /// `min`. The right operand is parsed one level tighter, which makes
    /// every level left-associative.
    fn parse_binary(&mut self, min: Precedence) -> Result<Expr, SyntaxError> {
        let mut left = self.parse_unary()?;

        while let Some(precedence) = Precedence::of_binary(self.peek()) {
            if precedence < min {
                break;
            }

            let op = self.advance();
            let right = match precedence.tighter() {
                Some(next) => self.parse_binary(next)?,
                None => self.parse_unary()?,
            };

            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    /// Parse unary minus
    fn parse_unary(&mut self) -> Result<Expr, SyntaxError> {
        if self.check(TokenKind::Minus) {
            return self.nested(Production::Expression, |parser| {
                let op = parser.advance();
                let operand = Box::new(parser.parse_unary()?);
                Ok(Expr::Unary { op, operand })
            });
        }

        self.parse_primary()
    }

    /// Parse primary (literals, identifiers, parenthesized expressions)
    fn parse_primary(&mut self) -> Result<Expr, SyntaxError> {
        match self.peek().kind() {
            TokenKind::Number | TokenKind::Identifier | TokenKind::BooleanLiteral => {
                Ok(Expr::Leaf(self.advance()))
            }
            TokenKind::LeftParen => self.nested(Production::Expression, |parser| {
                parser.advance();
                let expr = parser.parse_expression()?;
                parser.expect_token(TokenKind::RightParen, Production::Expression)?;
                Ok(expr)
            }),
            _ => Err(self.error(Production::Expression, Expected::Expression)),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::lexer::TokenKind;
    use crate::parser::parse::{Expected, Parser, Production, SyntaxError, MAX_NESTING_DEPTH};

    fn parse_expr(source: &str) -> Result<Expr, SyntaxError> {
        let program = Parser::new(&format!("return {};", source)).parse_program()?;
        match program.statements.into_iter().next() {
            Some(Stmt::Return { value, .. }) => Ok(value),
            other => panic!("Expected return statement, got {:?}", other),
        }
    }

    fn parenthesized(source: &str) -> String {
        parse_expr(source).unwrap().to_string()
    }

    #[test]
    fn test_precedence_ladder() {
        assert_eq!(
            parenthesized("a or b and c == d > e + f * g"),
            "(a or (b and (c == (d > (e + (f * g))))))"
        );
        assert_eq!(
            parenthesized("a * b + c > d != e and f or g"),
            "((((((a * b) + c) > d) != e) and f) or g)"
        );
    }

    #[test]
    fn test_left_associativity() {
        assert_eq!(parenthesized("a - b - c"), "((a - b) - c)");
        assert_eq!(parenthesized("a / b * c"), "((a / b) * c)");
        assert_eq!(parenthesized("a == b != c"), "((a == b) != c)");
        assert_eq!(parenthesized("a or b or c"), "((a or b) or c)");
    }

    #[test]
    fn test_parentheses_override_precedence() {
        assert_eq!(parenthesized("(a + b) * c"), "((a + b) * c)");
        assert_eq!(parenthesized("a - (b - c)"), "(a - (b - c))");
        assert_eq!(parenthesized("((a))"), "a");
    }

    #[test]
    fn test_unary_minus() {
        assert_eq!(parenthesized("-a * b"), "((-a) * b)");
        assert_eq!(parenthesized("a - -1"), "(a - (-1))");
        assert_eq!(parenthesized("--a"), "(-(-a))");
    }

    #[test]
    fn test_leaf_kinds() {
        for (source, kind) in [
            ("1.5", TokenKind::Number),
            ("x1", TokenKind::Identifier),
            ("false", TokenKind::BooleanLiteral),
        ] {
            match &parse_expr(source).unwrap() {
                Expr::Leaf(token) => {
                    assert_eq!(token.kind(), kind);
                    assert_eq!(token.text(), source);
                }
                other => panic!("Expected leaf, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_missing_operand() {
        let err = parse_expr("a +").unwrap_err();
        assert_eq!(err.production, Production::Expression);
        assert_eq!(err.expected, Expected::Expression);
        assert_eq!(err.found.kind(), TokenKind::Semicolon);
    }

    #[test]
    fn test_unknown_token_is_rejected() {
        let err = parse_expr("1v23").unwrap_err();
        assert_eq!(err.expected, Expected::Expression);
        assert_eq!(err.found.kind(), TokenKind::Unknown);
        assert_eq!(err.found.text(), "1v23");

        let err = parse_expr("!a").unwrap_err();
        assert_eq!(err.found.text(), "!");
    }

    #[test]
    fn test_unclosed_parenthesis() {
        let err = parse_expr("(a + b").unwrap_err();
        assert_eq!(err.production, Production::Expression);
        assert_eq!(err.expected, Expected::Token(TokenKind::RightParen));
    }

    #[test]
    fn test_unary_plus_is_not_supported() {
        let err = parse_expr("+a").unwrap_err();
        assert_eq!(err.found.kind(), TokenKind::Plus);
    }

    #[test]
    fn test_long_operator_chain() {
        let source = format!("1{}", " + 1".repeat(50_000));
        let expr = parse_expr(&source).unwrap();

        let printed = expr.to_string();
        assert!(printed.ends_with(" + 1) + 1)"));
        assert_eq!(printed.matches('+').count(), 50_000);
        assert_eq!(printed.matches('(').count(), 50_000);
        assert_eq!(expr.location().column, 8);

        let again = parse_expr(&source).unwrap();
        assert!(expr.same_structure(&again));
        assert_eq!(expr, again);
    }

    #[test]
    fn test_parenthesis_nesting_limit() {
        let nested = |depth: usize| format!("{}1{}", "(".repeat(depth), ")".repeat(depth));

        assert_eq!(parenthesized(&nested(MAX_NESTING_DEPTH)), "1");

        let err = parse_expr(&nested(MAX_NESTING_DEPTH + 1)).unwrap_err();
        assert_eq!(err.production, Production::Expression);
        assert_eq!(err.expected, Expected::ShallowerNesting);
        assert_eq!(err.found.kind(), TokenKind::LeftParen);
        assert_eq!(err.location().column, 8 + MAX_NESTING_DEPTH);
    }

    #[test]
    fn test_prefix_minus_nesting_limit() {
        let minus = |depth: usize| format!("{}a", "-".repeat(depth));

        assert!(parse_expr(&minus(MAX_NESTING_DEPTH)).is_ok());

        let err = parse_expr(&minus(MAX_NESTING_DEPTH + 1)).unwrap_err();
        assert_eq!(err.expected, Expected::ShallowerNesting);
        assert_eq!(err.found.kind(), TokenKind::Minus);

        let err = parse_expr(&minus(200_000)).unwrap_err();
        assert_eq!(err.expected, Expected::ShallowerNesting);
    }
}
