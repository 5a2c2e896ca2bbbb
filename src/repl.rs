//! Line-oriented driver
//!
//! Prompts for a line, echoes it, prints the converted expression or the
//! error, and keeps going until `exit` or end of input. Output is styled with
//! crossterm unless colour is turned off.

use crate::session::{Session, Submission};
use anyhow::{Context, Result};
use crossterm::style::{Color, Stylize};
use std::io::{BufRead, Write};

pub const PROMPT: &str = "Enter a LISP expression (or type 'exit' to stop): ";

/// Prompt/echo loop over any reader and writer
pub struct LineDriver<R, W> {
    input: R,
    output: W,
    color: bool,
}

impl<R: BufRead, W: Write> LineDriver<R, W> {
    pub fn new(input: R, output: W) -> Self {
        LineDriver {
            input,
            output,
            color: true,
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Run until `exit` or end of input.
    pub fn run(&mut self, session: &mut Session) -> Result<()> {
        let mut buf = Vec::new();

        loop {
            write!(self.output, "\n{}", PROMPT).context("failed to write prompt")?;
            self.output.flush().context("failed to flush output")?;

            buf.clear();
            let read = self
                .input
                .read_until(b'\n', &mut buf)
                .context("failed to read input line")?;
            if read == 0 {
                tracing::info!("end of input");
                writeln!(self.output)?;
                break;
            }

            // Bytes that are not UTF-8 become U+FFFD and are rejected as invalid tokens
            let line = String::from_utf8_lossy(&buf);
            match session.submit(&line) {
                Submission::Exit => break,
                Submission::Converted { input, output } => {
                    self.echo(&input)?;
                    let label = self.paint("C Expression:", Color::Green);
                    writeln!(self.output, "{} {}", label, output)?;
                }
                Submission::Failed { input, error } => {
                    self.echo(&input)?;
                    let label = self.paint("Error:", Color::Red);
                    writeln!(self.output, "{} {}", label, error)?;
                }
            }
        }

        tracing::info!(summary = %session.summary(), "session finished");
        Ok(())
    }

    /// Convert each expression once. Returns whether all of them converted.
    pub fn run_batch<S: AsRef<str>>(&mut self, session: &mut Session, exprs: &[S]) -> Result<bool> {
        let mut all_ok = true;

        for expr in exprs {
            match session.submit(expr.as_ref()) {
                Submission::Exit => break,
                Submission::Converted { output, .. } => writeln!(self.output, "{}", output)?,
                Submission::Failed { error, .. } => {
                    all_ok = false;
                    let label = self.paint("Error:", Color::Red);
                    writeln!(self.output, "{} {}", label, error)?;
                }
            }
        }

        self.output.flush()?;
        Ok(all_ok)
    }

    fn echo(&mut self, input: &str) -> Result<()> {
        let label = self.paint("LISP Expression:", Color::Cyan);
        writeln!(self.output, "{} {}", label, input)?;
        Ok(())
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            text.with(color).bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_plain(input: &str) -> String {
        let mut session = Session::new();
        let mut driver = LineDriver::new(input.as_bytes(), Vec::new()).with_color(false);
        driver.run(&mut session).unwrap();
        String::from_utf8(driver.into_output()).unwrap()
    }

    #[test]
    fn test_echo_and_result() {
        let out = run_plain("(add 1 2)\nexit\n");
        assert!(out.contains("LISP Expression: (add 1 2)\n"));
        assert!(out.contains("C Expression: add(1, 2)\n"));
        assert_eq!(out.matches(PROMPT).count(), 2);
    }

    #[test]
    fn test_error_then_continue() {
        let out = run_plain("()\n(f 1)\nexit\n");
        assert!(out.contains("Error: Expected function name"));
        assert!(out.contains("C Expression: f(1)"));
    }

    #[test]
    fn test_end_of_input_stops() {
        let out = run_plain("(f 1)");
        assert!(out.contains("C Expression: f(1)"));
        assert_eq!(out.matches(PROMPT).count(), 2);
    }

    #[test]
    fn test_non_utf8_line_is_rejected_and_session_continues() {
        let mut session = Session::new();
        let input: &[u8] = b"(f \xff)\n(add 1 2)\nexit\n";
        let mut driver = LineDriver::new(input, Vec::new()).with_color(false);
        driver.run(&mut session).unwrap();
        let out = String::from_utf8(driver.into_output()).unwrap();

        assert!(out.contains("Error: Unexpected token inside arguments: invalid character '\u{fffd}'"));
        assert!(out.contains("C Expression: add(1, 2)"));
        assert_eq!(session.failed(), 1);
    }

    #[test]
    fn test_exit_stops_reading() {
        let out = run_plain("exit\n(f 1)\n");
        assert!(!out.contains("f(1)"));
    }

    #[test]
    fn test_colored_output_has_escapes() {
        let mut session = Session::new();
        let mut driver = LineDriver::new("(f 1)\n".as_bytes(), Vec::new());
        driver.run(&mut session).unwrap();
        let out = String::from_utf8(driver.into_output()).unwrap();
        assert!(out.contains('\u{1b}'));
    }

    #[test]
    fn test_batch() {
        let mut session = Session::new();
        let mut driver = LineDriver::new(std::io::empty(), Vec::new()).with_color(false);
        let ok = driver.run_batch(&mut session, &["(f 1)", "(g"]).unwrap();
        assert!(!ok);
        let out = String::from_utf8(driver.into_output()).unwrap();
        assert!(out.starts_with("f(1)\n"));
        assert!(out.contains("Error: Unexpected token inside arguments: end of input"));
    }
}
