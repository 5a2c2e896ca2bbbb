//! S-expression to call-expression converter core
//!
//! This module transforms one line of prefix-notation text into C-style call
//! text:
//! - [`lexer`]: Tokenization (text → tokens), never fails
//! - [`parse`]: Parsing (tokens → [`ast::Call`]) and the error taxonomy
//! - [`emit`]: Rendering (`Call` → text)
//! - [`ast`]: Tree node definitions
//! - [`trace`]: Optional observers for tokens, calls and arguments
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with one token of lookahead.
//! No external parser generator dependencies.

pub mod ast;
pub mod emit;
pub mod lexer;
pub mod parse;
pub mod trace;
