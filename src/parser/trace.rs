//! Optional observation of the conversion pipeline
//!
//! The lexer reports every token it produces and the parser reports every
//! function call it enters and every argument it finishes. Observers only
//! watch: the conversion result is identical whichever observer is attached.

use super::ast::Argument;
use super::lexer::Token;
use std::fmt;

/// Hooks invoked while converting one line. All hooks default to no-ops.
pub trait TraceObserver {
    fn on_token(&mut self, _token: &Token) {}

    fn on_call(&mut self, _name: &str) {}

    fn on_argument(&mut self, _argument: &Argument) {}
}

impl<O: TraceObserver + ?Sized> TraceObserver for &mut O {
    fn on_token(&mut self, token: &Token) {
        (**self).on_token(token)
    }

    fn on_call(&mut self, name: &str) {
        (**self).on_call(name)
    }

    fn on_argument(&mut self, argument: &Argument) {
        (**self).on_argument(argument)
    }
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl TraceObserver for NoopObserver {}

/// Observer that forwards events to `tracing` at debug level
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl TraceObserver for LogObserver {
    fn on_token(&mut self, token: &Token) {
        tracing::debug!(
            kind = %token.kind,
            lexeme = %token.lexeme,
            column = token.location.column,
            "token"
        );
    }

    fn on_call(&mut self, name: &str) {
        tracing::debug!(name, "function call");
    }

    fn on_argument(&mut self, argument: &Argument) {
        match argument {
            Argument::Number(n) => tracing::debug!(value = %n, "argument"),
            Argument::Operator(op) => tracing::debug!(value = %op, "operator"),
            Argument::Call(call) => tracing::debug!(name = %call.name, "nested call"),
        }
    }
}

/// A single recorded trace event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEvent {
    Token(Token),
    Call(String),
    Argument(Argument),
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceEvent::Token(token) => write!(f, "Token: {} '{}'", token.kind, token.lexeme),
            TraceEvent::Call(name) => write!(f, "Function Call: {}", name),
            TraceEvent::Argument(Argument::Number(n)) => write!(f, "Argument: {}", n),
            TraceEvent::Argument(Argument::Operator(op)) => write!(f, "Operator: {}", op),
            TraceEvent::Argument(Argument::Call(call)) => write!(f, "Nested: ({})", call),
        }
    }
}

/// Observer that keeps every event in order
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    events: Vec<TraceEvent>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<TraceEvent> {
        self.events
    }
}

impl TraceObserver for RecordingObserver {
    fn on_token(&mut self, token: &Token) {
        self.events.push(TraceEvent::Token(token.clone()));
    }

    fn on_call(&mut self, name: &str) {
        self.events.push(TraceEvent::Call(name.to_string()));
    }

    fn on_argument(&mut self, argument: &Argument) {
        self.events.push(TraceEvent::Argument(argument.clone()));
    }
}

/// Fans events out to two observers
#[derive(Debug, Clone, Default)]
pub struct Tee<A, B>(pub A, pub B);

impl<A: TraceObserver, B: TraceObserver> TraceObserver for Tee<A, B> {
    fn on_token(&mut self, token: &Token) {
        self.0.on_token(token);
        self.1.on_token(token);
    }

    fn on_call(&mut self, name: &str) {
        self.0.on_call(name);
        self.1.on_call(name);
    }

    fn on_argument(&mut self, argument: &Argument) {
        self.0.on_argument(argument);
        self.1.on_argument(argument);
    }
}
