//! Lexer (tokenizer) for s-expressions
//!
//! Converts one line of text into a flat [`Token`] sequence consumed by the
//! parser. Scanning never fails: characters that match no token class become
//! [`TokenKind::Invalid`] tokens and are rejected later by the grammar.

use super::ast::SourceLocation;
use super::trace::{NoopObserver, TraceObserver};
use std::fmt;

/// Token classes recognized by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Function, // identifier: letter, then letters/digits
    Number,   // digit or '-', then digits/'.'
    Operator, // + * /
    LParen,   // (
    RParen,   // )
    Invalid,  // anything else, one character
}

impl TokenKind {
    /// Whether a token of this kind may begin a call argument.
    pub fn starts_argument(self) -> bool {
        matches!(
            self,
            TokenKind::Number | TokenKind::Operator | TokenKind::LParen
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Function => "FUNCTION",
            TokenKind::Number => "NUMBER",
            TokenKind::Operator => "OPERATOR",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::Invalid => "INVALID",
        };
        f.pad(name)
    }
}

/// A classified lexeme with its position in the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, location: SourceLocation) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            location,
        }
    }

    /// Placeholder returned by the parser when the sequence is exhausted.
    /// Never produced by the lexer.
    pub fn end_of_input(location: SourceLocation) -> Self {
        Token::new(TokenKind::Invalid, "", location)
    }

    pub fn is_end_of_input(&self) -> bool {
        self.kind == TokenKind::Invalid && self.lexeme.is_empty()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            _ if self.is_end_of_input() => write!(f, "end of input"),
            TokenKind::Function => write!(f, "function '{}'", self.lexeme),
            TokenKind::Number => write!(f, "number '{}'", self.lexeme),
            TokenKind::Operator => write!(f, "operator '{}'", self.lexeme),
            TokenKind::LParen => write!(f, "'('"),
            TokenKind::RParen => write!(f, "')'"),
            TokenKind::Invalid => write!(f, "invalid character '{}'", self.lexeme),
        }
    }
}

/// Lexer for a single line of s-expression text
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a new lexer for the given text.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Vec<Token> {
        self.tokenize_with(NoopObserver)
    }

    /// Tokenize the entire input, reporting each token to `observer`
    pub fn tokenize_with<O: TraceObserver>(&mut self, mut observer: O) -> Vec<Token> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();

            if self.is_at_end() {
                break;
            }

            let token = self.next_token();
            observer.on_token(&token);
            tokens.push(token);
        }

        tokens
    }

    /// Location one past the last character consumed so far
    pub fn end_location(&self) -> SourceLocation {
        self.current_location()
    }

    /// Get next token. The caller guarantees input remains.
    fn next_token(&mut self) -> Token {
        let loc = self.current_location();
        let ch = match self.advance() {
            Some(ch) => ch,
            None => return Token::end_of_input(loc),
        };

        match ch {
            '(' => Token::new(TokenKind::LParen, "(", loc),
            ')' => Token::new(TokenKind::RParen, ")", loc),

            // A leading '-' always starts a number, even when nothing numeric follows
            '0'..='9' | '-' => self.number_literal(ch, loc),

            '+' | '*' | '/' => Token::new(TokenKind::Operator, ch.to_string(), loc),

            'a'..='z' | 'A'..='Z' => self.identifier(ch, loc),

            _ => Token::new(TokenKind::Invalid, ch.to_string(), loc),
        }
    }

    /// Scan the rest of a numeric lexeme. Shape only; `1.2.3` is accepted.
    fn number_literal(&mut self, first: char, loc: SourceLocation) -> Token {
        let mut num_str = String::new();
        num_str.push(first);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() || ch == '.' {
                num_str.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        Token::new(TokenKind::Number, num_str, loc)
    }

    /// Scan the rest of a function name
    fn identifier(&mut self, first: char, loc: SourceLocation) -> Token {
        let mut ident = String::new();
        ident.push(first);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        Token::new(TokenKind::Function, ident, loc)
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if !ch.is_whitespace() {
                break;
            }
            self.advance();
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
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

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

/// Tokenize `text` in one call.
pub fn tokenize(text: &str) -> Vec<Token> {
    Lexer::new(text).tokenize()
}
