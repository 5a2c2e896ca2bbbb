//! Recursive descent parser
//!
//! This module provides the [`Parser`] struct, the [`ParseError`] taxonomy and
//! the [`parse`] entry point that turns a token sequence into call-expression
//! text.
//!
//! # Grammar
//!
//! ```text
//! expression   := '(' functionCall
//! functionCall := FUNCTION argument* ')'
//! argument     := NUMBER | OPERATOR | '(' expression ')'
//! ```
//!
//! The parser holds a single cursor into the token vector and looks at most
//! one token ahead. It never backtracks: once a branch is chosen it either
//! completes or returns an error. Recursion depth equals the nesting depth of
//! the input.

use crate::parser::ast::*;
use crate::parser::lexer::{Token, TokenKind};
use crate::parser::trace::{NoopObserver, TraceObserver};
use thiserror::Error;

/// Which grammar rule was violated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidExpressionStart,
    ExpectedFunctionName,
    UnexpectedTokenInArguments,
    UnexpectedTrailingToken,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidExpressionStart => "InvalidExpressionStart",
            ErrorKind::ExpectedFunctionName => "ExpectedFunctionName",
            ErrorKind::UnexpectedTokenInArguments => "UnexpectedTokenInArguments",
            ErrorKind::UnexpectedTrailingToken => "UnexpectedTrailingToken",
        }
    }
}

/// Parse errors. Each one ends the current parse; none is recovered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// An expression was expected but the current token is not `(`
    #[error("Invalid expression start: expected '(' but found {found} at column {}", .location.column)]
    InvalidExpressionStart {
        found: String,
        location: SourceLocation,
    },

    /// The token after `(` is not a function name
    #[error("Expected function name after '(' but found {found} at column {}", .location.column)]
    ExpectedFunctionName {
        found: String,
        location: SourceLocation,
    },

    /// A token inside an argument list that cannot start an argument or close the call
    #[error("Unexpected token inside arguments: {found} at column {}", .location.column)]
    UnexpectedTokenInArguments {
        found: String,
        location: SourceLocation,
    },

    /// Tokens remain after the top-level expression
    #[error("Unexpected token at the end: {found} at column {}", .location.column)]
    UnexpectedTrailingToken {
        found: String,
        location: SourceLocation,
    },
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::InvalidExpressionStart { .. } => ErrorKind::InvalidExpressionStart,
            ParseError::ExpectedFunctionName { .. } => ErrorKind::ExpectedFunctionName,
            ParseError::UnexpectedTokenInArguments { .. } => ErrorKind::UnexpectedTokenInArguments,
            ParseError::UnexpectedTrailingToken { .. } => ErrorKind::UnexpectedTrailingToken,
        }
    }

    pub fn location(&self) -> SourceLocation {
        match self {
            ParseError::InvalidExpressionStart { location, .. }
            | ParseError::ExpectedFunctionName { location, .. }
            | ParseError::UnexpectedTokenInArguments { location, .. }
            | ParseError::UnexpectedTrailingToken { location, .. } => *location,
        }
    }
}

/// Recursive descent parser over one line's tokens
pub struct Parser<O = NoopObserver> {
    tokens: Vec<Token>,
    position: usize,
    end: SourceLocation,
    observer: O,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser::with_observer(tokens, NoopObserver)
    }
}

impl<O: TraceObserver> Parser<O> {
    pub fn with_observer(tokens: Vec<Token>, observer: O) -> Self {
        let end = tokens
            .last()
            .map(|t| {
                SourceLocation::new(
                    t.location.line,
                    t.location.column + t.lexeme.chars().count(),
                )
            })
            .unwrap_or_default();
        Parser {
            tokens,
            position: 0,
            end,
            observer,
        }
    }

    /// Override where end-of-input is reported (e.g. past trailing whitespace).
    pub fn with_end_location(mut self, end: SourceLocation) -> Self {
        self.end = end;
        self
    }

    /// Parse the single top-level expression.
    ///
    /// Returns `Ok(None)` for an empty token sequence.
    pub fn parse(&mut self) -> Result<Option<Call>, ParseError> {
        if self.tokens.is_empty() {
            return Ok(None);
        }

        let call = self.parse_expression()?;

        if !self.is_at_end() {
            let token = self.peek();
            return Err(ParseError::UnexpectedTrailingToken {
                found: token.to_string(),
                location: token.location,
            });
        }

        Ok(Some(call))
    }

    /// expression := '(' functionCall
    fn parse_expression(&mut self) -> Result<Call, ParseError> {
        let token = self.peek();

        if token.kind != TokenKind::LParen {
            return Err(ParseError::InvalidExpressionStart {
                found: token.to_string(),
                location: token.location,
            });
        }

        self.advance(); // consume '('
        self.parse_function_call(token.location)
    }

    /// functionCall := FUNCTION argument* ')'
    fn parse_function_call(&mut self, open: SourceLocation) -> Result<Call, ParseError> {
        let name_token = self.advance();

        if name_token.kind != TokenKind::Function {
            return Err(ParseError::ExpectedFunctionName {
                found: name_token.to_string(),
                location: name_token.location,
            });
        }

        self.observer.on_call(&name_token.lexeme);

        let mut call = Call::new(name_token.lexeme, open);
        call.args = self.parse_arguments()?;
        Ok(call)
    }

    /// Arguments up to and including the closing ')'
    fn parse_arguments(&mut self) -> Result<Vec<Argument>, ParseError> {
        let mut args = Vec::new();

        loop {
            let token = self.peek();

            if token.kind == TokenKind::RParen {
                self.advance(); // consume ')'
                break;
            }

            if !token.kind.starts_argument() {
                return Err(ParseError::UnexpectedTokenInArguments {
                    found: token.to_string(),
                    location: token.location,
                });
            }

            let arg = match token.kind {
                TokenKind::Number => Argument::Number(self.advance().lexeme),
                TokenKind::Operator => Argument::Operator(self.advance().lexeme),
                _ => Argument::Call(self.parse_expression()?),
            };

            self.observer.on_argument(&arg);
            args.push(arg);
        }

        Ok(args)
    }

    // ===== Cursor =====

    /// Current token, or the end-of-input placeholder.
    fn peek(&self) -> Token {
        self.tokens
            .get(self.position)
            .cloned()
            .unwrap_or_else(|| Token::end_of_input(self.end))
    }

    /// Consume and return the current token, or the placeholder at the end.
    fn advance(&mut self) -> Token {
        let token = self.peek();
        if !self.is_at_end() {
            self.position += 1;
        }
        token
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }
}

/// Parse `tokens` and render the result.
///
/// An empty sequence yields an empty string.
pub fn parse(tokens: Vec<Token>) -> Result<String, ParseError> {
    Ok(Parser::new(tokens)
        .parse()?
        .map(|call| call.to_string())
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::tokenize;
    use crate::parser::trace::{RecordingObserver, TraceEvent};

    fn parse_tree(source: &str) -> Result<Option<Call>, ParseError> {
        Parser::new(tokenize(source)).parse()
    }

    #[test]
    fn test_parse_simple_call() {
        let call = parse_tree("(add 1 2)").unwrap().unwrap();

        assert_eq!(call.name, "add");
        assert_eq!(call.args, vec![Argument::number("1"), Argument::number("2")]);
        assert_eq!(call.location, SourceLocation::new(1, 1));
    }

    #[test]
    fn test_parse_nested_call() {
        let call = parse_tree("(add 1 (mul 2 3))").unwrap().unwrap();

        assert_eq!(call.args.len(), 2);
        match &call.args[1] {
            Argument::Call(inner) => {
                assert_eq!(inner.name, "mul");
                assert_eq!(inner.args.len(), 2);
                assert_eq!(inner.location.column, 8);
            }
            other => panic!("Expected nested call, found {:?}", other),
        }
    }

    #[test]
    fn test_parse_no_arguments() {
        let call = parse_tree("(now)").unwrap().unwrap();
        assert!(call.args.is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_tree("").unwrap(), None);
        assert_eq!(parse(Vec::new()).unwrap(), "");
    }

    #[test]
    fn test_invalid_start() {
        let err = parse_tree("add 1 2").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidExpressionStart);
        assert_eq!(err.location().column, 1);

        let err = parse_tree(")").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidExpressionStart);
    }

    #[test]
    fn test_expected_function_name() {
        assert_eq!(parse_tree("()").unwrap_err().kind(), ErrorKind::ExpectedFunctionName);
        assert_eq!(parse_tree("(1 2)").unwrap_err().kind(), ErrorKind::ExpectedFunctionName);
        // Nested call without a name
        assert_eq!(
            parse_tree("(add (2))").unwrap_err().kind(),
            ErrorKind::ExpectedFunctionName
        );
    }

    #[test]
    fn test_lone_open_paren_reports_end_of_input() {
        let err = parse_tree("(").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ExpectedFunctionName);
        assert_eq!(
            err.to_string(),
            "Expected function name after '(' but found end of input at column 2"
        );
    }

    #[test]
    fn test_unexpected_token_in_arguments() {
        for source in ["(add 1 x)", "(add 1 #)", "(add 1 2"] {
            let err = parse_tree(source).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::UnexpectedTokenInArguments, "{source}");
        }
    }

    #[test]
    fn test_trailing_token() {
        let err = parse_tree("(add 1 2) extra").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedTrailingToken);
        assert_eq!(err.location().column, 11);

        let err = parse_tree("(a)(b)").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedTrailingToken);
    }

    #[test]
    fn test_observer_order() {
        let mut recorder = RecordingObserver::new();
        Parser::with_observer(tokenize("(f 1 (g +))"), &mut recorder)
            .parse()
            .unwrap();

        let events = recorder.into_events();
        assert_eq!(events[0], TraceEvent::Call("f".into()));
        assert_eq!(events[1], TraceEvent::Argument(Argument::number("1")));
        assert_eq!(events[2], TraceEvent::Call("g".into()));
        assert_eq!(events[3], TraceEvent::Argument(Argument::operator("+")));
        assert!(matches!(&events[4], TraceEvent::Argument(Argument::Call(c)) if c.name == "g"));
        assert_eq!(events.len(), 5);
    }
}
