//! Lexer (tokenizer) for VkScript source code
//!
//! Converts raw source text into [`Token`]s, one at a time, on demand.
//! The lexer never fails: characters it cannot classify come out as
//! [`TokenKind::Unknown`] tokens and are left for the parser to reject.

use super::ast::SourceLocation;
use std::fmt;

/// Classification of a lexeme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals and names
    Number,
    Identifier,
    Keyword,
    BooleanLiteral,

    // Assignment and comparison
    Assign,   // =
    Equal,    // ==
    NotEqual, // !=

    // Arithmetic
    Plus,  // +
    Minus, // -
    Mul,   // *
    Div,   // /

    // Relational
    GreaterThan, // >
    LessThan,    // <

    // Punctuation
    LeftParen,  // (
    RightParen, // )
    LeftBrace,  // {
    RightBrace, // }
    Semicolon,  // ;
    Comma,      // ,
    Dot,        // .

    Unknown,
    EndOfInput,
}

impl TokenKind {
    /// Short name used by the token dump and the explorer
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Number => "Number",
            TokenKind::Identifier => "Identifier",
            TokenKind::Keyword => "Keyword",
            TokenKind::BooleanLiteral => "BooleanLiteral",
            TokenKind::Assign => "Assign",
            TokenKind::Equal => "Equal",
            TokenKind::NotEqual => "NotEqual",
            TokenKind::Plus => "Plus",
            TokenKind::Minus => "Minus",
            TokenKind::Mul => "Mul",
            TokenKind::Div => "Div",
            TokenKind::GreaterThan => "GreaterThan",
            TokenKind::LessThan => "LessThan",
            TokenKind::LeftParen => "LeftParen",
            TokenKind::RightParen => "RightParen",
            TokenKind::LeftBrace => "LeftBrace",
            TokenKind::RightBrace => "RightBrace",
            TokenKind::Semicolon => "Semicolon",
            TokenKind::Comma => "Comma",
            TokenKind::Dot => "Dot",
            TokenKind::Unknown => "Unknown",
            TokenKind::EndOfInput => "EndOfInput",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number => write!(f, "number"),
            TokenKind::Identifier => write!(f, "identifier"),
            TokenKind::Keyword => write!(f, "keyword"),
            TokenKind::BooleanLiteral => write!(f, "boolean literal"),
            TokenKind::Assign => write!(f, "'='"),
            TokenKind::Equal => write!(f, "'=='"),
            TokenKind::NotEqual => write!(f, "'!='"),
            TokenKind::Plus => write!(f, "'+'"),
            TokenKind::Minus => write!(f, "'-'"),
            TokenKind::Mul => write!(f, "'*'"),
            TokenKind::Div => write!(f, "'/'"),
            TokenKind::GreaterThan => write!(f, "'>'"),
            TokenKind::LessThan => write!(f, "'<'"),
            TokenKind::LeftParen => write!(f, "'('"),
            TokenKind::RightParen => write!(f, "')'"),
            TokenKind::LeftBrace => write!(f, "'{{'"),
            TokenKind::RightBrace => write!(f, "'}}'"),
            TokenKind::Semicolon => write!(f, "';'"),
            TokenKind::Comma => write!(f, "','"),
            TokenKind::Dot => write!(f, "'.'"),
            TokenKind::Unknown => write!(f, "unknown token"),
            TokenKind::EndOfInput => write!(f, "end of input"),
        }
    }
}

/// Reserved words. Matching is case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Var,
    If,
    Else,
    While,
    And,
    Or,
    Return,
}

impl Keyword {
    pub fn from_text(text: &str) -> Option<Keyword> {
        match text {
            "var" => Some(Keyword::Var),
            "if" => Some(Keyword::If),
            "else" => Some(Keyword::Else),
            "while" => Some(Keyword::While),
            "and" => Some(Keyword::And),
            "or" => Some(Keyword::Or),
            "return" => Some(Keyword::Return),
            _ => None,
        }
    }
}

/// A classified lexeme. `text` is always the exact source slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    text: String,
    location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            kind,
            text: text.into(),
            location,
        }
    }

    /// End-of-input sentinel; carries no text.
    pub fn end_of_input(location: SourceLocation) -> Self {
        Self::new(TokenKind::EndOfInput, String::new(), location)
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the source location where this token appears.
    pub fn location(&self) -> SourceLocation {
        self.location
    }

    /// The reserved word this token spells, if it is a keyword.
    pub fn keyword(&self) -> Option<Keyword> {
        if self.kind == TokenKind::Keyword {
            Keyword::from_text(&self.text)
        } else {
            None
        }
    }

    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.keyword() == Some(keyword)
    }

    /// Location of the character just past this token (same line).
    pub fn end_location(&self) -> SourceLocation {
        SourceLocation::new(
            self.location.line,
            self.location.column + self.text.chars().count(),
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Number => write!(f, "number {}", self.text),
            TokenKind::Identifier => write!(f, "identifier '{}'", self.text),
            TokenKind::Keyword => write!(f, "keyword '{}'", self.text),
            TokenKind::BooleanLiteral => write!(f, "boolean literal {}", self.text),
            TokenKind::Unknown => write!(f, "unknown token '{}'", self.text),
            kind => write!(f, "{}", kind),
        }
    }
}

/// Classify a completed alphanumeric run by its whole content.
fn classify_run(text: &str) -> TokenKind {
    let starts_with_digit = text.starts_with(|c: char| c.is_ascii_digit());

    if starts_with_digit {
        if text.chars().all(|c| c.is_ascii_digit() || c == '.') {
            TokenKind::Number
        } else {
            // Digits followed by letters: report the whole run, do not split it
            TokenKind::Unknown
        }
    } else if Keyword::from_text(text).is_some() {
        TokenKind::Keyword
    } else if text == "true" || text == "false" {
        TokenKind::BooleanLiteral
    } else {
        TokenKind::Identifier
    }
}

/// Pull-based lexer for VkScript source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the rest of the input. No end-of-input sentinel is appended.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token() {
            tokens.push(token);
        }
        tokens
    }

    /// Produce the next token, or `None` once the input is exhausted.
    pub fn next_token(&mut self) -> Option<Token> {
        self.skip_whitespace();

        let start = self.position;
        let loc = self.current_location();
        let ch = self.advance()?;

        let kind = match ch {
            c if c.is_ascii_alphanumeric() => self.alphanumeric_run(c),

            '=' => {
                if self.match_char('=') {
                    TokenKind::Equal
                } else {
                    TokenKind::Assign
                }
            }
            '!' => {
                // No unary not in the language; a lone '!' is unknown
                if self.match_char('=') {
                    TokenKind::NotEqual
                } else {
                    TokenKind::Unknown
                }
            }

            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Mul,
            '/' => TokenKind::Div,
            '>' => TokenKind::GreaterThan,
            '<' => TokenKind::LessThan,
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,

            _ => TokenKind::Unknown,
        };

        let text: String = self.input[start..self.position].iter().collect();
        Some(Token::new(kind, text, loc))
    }

    /// Scan the rest of a letter/digit run and classify it.
    ///
    /// A single `.` joins the run only while everything consumed so far is a
    /// digit and a digit follows the dot.
    fn alphanumeric_run(&mut self, first: char) -> TokenKind {
        let start = self.position - 1;
        let mut all_digits = first.is_ascii_digit();
        let mut seen_dot = false;

        loop {
            match self.peek() {
                Some(c) if c.is_ascii_alphanumeric() => {
                    all_digits &= c.is_ascii_digit();
                    self.advance();
                }
                Some('.')
                    if all_digits
                        && !seen_dot
                        && self.peek_ahead(1).is_some_and(|c| c.is_ascii_digit()) =>
                {
                    seen_dot = true;
                    self.advance();
                }
                _ => break,
            }
        }

        let text: String = self.input[start..self.position].iter().collect();
        classify_run(&text)
    }

    fn skip_whitespace(&mut self) {
        while let Some(' ' | '\t' | '\r' | '\n' | '\x0b' | '\x0c') = self.peek() {
            self.advance();
        }
    }

    /// Consume the next character if it equals `expected`
    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<(TokenKind, String)> {
        Lexer::new(source)
            .map(|t| (t.kind(), t.text().to_string()))
            .collect()
    }

    fn expected(pairs: &[(TokenKind, &str)]) -> Vec<(TokenKind, String)> {
        pairs.iter().map(|(k, s)| (*k, s.to_string())).collect()
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            lex("123 1.23 1,23 1v23"),
            expected(&[
                (TokenKind::Number, "123"),
                (TokenKind::Number, "1.23"),
                (TokenKind::Number, "1"),
                (TokenKind::Comma, ","),
                (TokenKind::Number, "23"),
                (TokenKind::Unknown, "1v23"),
            ])
        );
    }

    #[test]
    fn test_numbers_with_extra_whitespace() {
        assert_eq!(
            lex("123     1.23  1,23            1v23"),
            lex("123 1.23 1,23 1v23")
        );
    }

    #[test]
    fn test_identifiers() {
        assert_eq!(
            lex("abc ABC 1a a1 a1b"),
            expected(&[
                (TokenKind::Identifier, "abc"),
                (TokenKind::Identifier, "ABC"),
                (TokenKind::Unknown, "1a"),
                (TokenKind::Identifier, "a1"),
                (TokenKind::Identifier, "a1b"),
            ])
        );
    }

    #[test]
    fn test_leading_and_trailing_whitespace() {
        assert_eq!(
            lex("       abc 123       "),
            expected(&[(TokenKind::Identifier, "abc"), (TokenKind::Number, "123")])
        );
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            lex("+  - * /"),
            expected(&[
                (TokenKind::Plus, "+"),
                (TokenKind::Minus, "-"),
                (TokenKind::Mul, "*"),
                (TokenKind::Div, "/"),
            ])
        );
    }

    #[test]
    fn test_repeated_operators_never_fuse() {
        assert_eq!(
            lex("++  -- ** //"),
            expected(&[
                (TokenKind::Plus, "+"),
                (TokenKind::Plus, "+"),
                (TokenKind::Minus, "-"),
                (TokenKind::Minus, "-"),
                (TokenKind::Mul, "*"),
                (TokenKind::Mul, "*"),
                (TokenKind::Div, "/"),
                (TokenKind::Div, "/"),
            ])
        );
    }

    #[test]
    fn test_equality_operators() {
        assert_eq!(
            lex("!= == ="),
            expected(&[
                (TokenKind::NotEqual, "!="),
                (TokenKind::Equal, "=="),
                (TokenKind::Assign, "="),
            ])
        );
        // maximal munch on '=' pairs, leftover single '='
        assert_eq!(
            lex("==="),
            expected(&[(TokenKind::Equal, "=="), (TokenKind::Assign, "=")])
        );
    }

    #[test]
    fn test_bare_bang_is_unknown() {
        assert_eq!(lex("!"), expected(&[(TokenKind::Unknown, "!")]));
        assert_eq!(
            lex("!a"),
            expected(&[(TokenKind::Unknown, "!"), (TokenKind::Identifier, "a")])
        );
    }

    #[test]
    fn test_keywords() {
        let tokens: Vec<Token> = Lexer::new("var if else while and or return").collect();
        assert_eq!(tokens.len(), 7);
        assert!(tokens.iter().all(|t| t.kind() == TokenKind::Keyword));
        assert_eq!(tokens[0].keyword(), Some(Keyword::Var));
        assert_eq!(tokens[6].keyword(), Some(Keyword::Return));

        assert_eq!(
            lex("variable Var iff"),
            expected(&[
                (TokenKind::Identifier, "variable"),
                (TokenKind::Identifier, "Var"),
                (TokenKind::Identifier, "iff"),
            ])
        );
    }

    #[test]
    fn test_boolean_literals() {
        assert_eq!(
            lex("true false True"),
            expected(&[
                (TokenKind::BooleanLiteral, "true"),
                (TokenKind::BooleanLiteral, "false"),
                (TokenKind::Identifier, "True"),
            ])
        );
    }

    #[test]
    fn test_dot_separation() {
        assert_eq!(
            lex("1.2 a.b"),
            expected(&[
                (TokenKind::Number, "1.2"),
                (TokenKind::Identifier, "a"),
                (TokenKind::Dot, "."),
                (TokenKind::Identifier, "b"),
            ])
        );
    }

    #[test]
    fn test_decimal_point_rules() {
        assert_eq!(
            lex("1.2.3"),
            expected(&[
                (TokenKind::Number, "1.2"),
                (TokenKind::Dot, "."),
                (TokenKind::Number, "3"),
            ])
        );
        assert_eq!(
            lex("1. 5"),
            expected(&[
                (TokenKind::Number, "1"),
                (TokenKind::Dot, "."),
                (TokenKind::Number, "5"),
            ])
        );
        assert_eq!(
            lex("a1.5"),
            expected(&[
                (TokenKind::Identifier, "a1"),
                (TokenKind::Dot, "."),
                (TokenKind::Number, "5"),
            ])
        );
        assert_eq!(lex("1.5a"), expected(&[(TokenKind::Unknown, "1.5a")]));
    }

    #[test]
    fn test_unrecognized_characters() {
        assert_eq!(
            lex("a_b & \"é"),
            expected(&[
                (TokenKind::Identifier, "a"),
                (TokenKind::Unknown, "_"),
                (TokenKind::Identifier, "b"),
                (TokenKind::Unknown, "&"),
                (TokenKind::Unknown, "\""),
                (TokenKind::Unknown, "é"),
            ])
        );
    }

    #[test]
    #[rustfmt::skip]
    fn test_simple_program() {
        let source = "var a = 1.8;\nvar b = true;\n\nif(b){\n    a = 4;\n}\nelse{\n    a = 5;\n}\n\nwhile(b and a > 123){\n    a = a + 1;\n}\n\nreturn a;";
        let kinds: Vec<TokenKind> = lex(source).into_iter().map(|(k, _)| k).collect();

        use TokenKind as K;
        assert_eq!(
            kinds,
            vec![
                K::Keyword, K::Identifier, K::Assign, K::Number, K::Semicolon,
                K::Keyword, K::Identifier, K::Assign, K::BooleanLiteral, K::Semicolon,
                K::Keyword, K::LeftParen, K::Identifier, K::RightParen, K::LeftBrace,
                K::Identifier, K::Assign, K::Number, K::Semicolon, K::RightBrace,
                K::Keyword, K::LeftBrace, K::Identifier, K::Assign, K::Number,
                K::Semicolon, K::RightBrace,
                K::Keyword, K::LeftParen, K::Identifier, K::Keyword, K::Identifier,
                K::GreaterThan, K::Number, K::RightParen, K::LeftBrace,
                K::Identifier, K::Assign, K::Identifier, K::Plus, K::Number,
                K::Semicolon, K::RightBrace,
                K::Keyword, K::Identifier, K::Semicolon,
            ]
        );
    }

    #[test]
    fn test_locations() {
        let tokens: Vec<Token> = Lexer::new("var a\n  = 1;").collect();
        assert_eq!(tokens[0].location(), SourceLocation::new(1, 1));
        assert_eq!(tokens[1].location(), SourceLocation::new(1, 5));
        assert_eq!(tokens[2].location(), SourceLocation::new(2, 3));
        assert_eq!(tokens[3].location(), SourceLocation::new(2, 5));
        assert_eq!(tokens[3].end_location(), SourceLocation::new(2, 6));
    }

    #[test]
    fn test_exhausted_lexer_stays_exhausted() {
        let mut lexer = Lexer::new("  x  ");
        assert!(lexer.next_token().is_some());
        assert!(lexer.next_token().is_none());
        assert!(lexer.next_token().is_none());
        assert!(Lexer::new("").tokenize().is_empty());
    }
}
