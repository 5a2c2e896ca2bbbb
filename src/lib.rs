//! # Introduction
//!
//! lisp2c reads one prefix-notation s-expression at a time and produces the
//! equivalent C-style call expression:
//!
//! ```text
//! (add 1 (mul 2 3))   →   add(1, (mul(2, 3)))
//! ```
//!
//! ## Conversion pipeline
//!
//! ```text
//! Text → Lexer → Tokens → Parser → Call → Renderer → Text
//! ```
//!
//! 1. [`parser`] — tokenises the line, parses one expression and renders it.
//! 2. [`session`] — per-line driver state: the `exit` sentinel, history and
//!    outcome counts.
//! 3. [`repl`] — the line-oriented prompt/echo loop.
//! 4. [`ui`] — ratatui-based TUI; not part of the stable library API.
//!
//! Every call to [`convert`] is independent: tokens and the parser cursor are
//! created for the line and dropped when the result is returned.

pub mod parser;
pub mod repl;
pub mod session;
pub mod ui;

use parser::lexer::Lexer;
use parser::parse::{ParseError, Parser};
use parser::trace::{NoopObserver, TraceObserver};

/// Convert one line of s-expression text into call-expression text.
///
/// An empty (or all-whitespace) line converts to an empty string.
pub fn convert(text: &str) -> Result<String, ParseError> {
    convert_with(text, NoopObserver)
}

/// Like [`convert`], reporting tokens, calls and arguments to `observer`.
pub fn convert_with<O: TraceObserver>(text: &str, mut observer: O) -> Result<String, ParseError> {
    let mut lexer = Lexer::new(text);
    let tokens = lexer.tokenize_with(&mut observer);
    let call = Parser::with_observer(tokens, &mut observer)
        .with_end_location(lexer.end_location())
        .parse()?;
    Ok(call.map(|c| c.to_string()).unwrap_or_default())
}
