// Per-line driver state: sentinel handling, history and outcome counts

use crate::convert_with;
use crate::parser::parse::{ErrorKind, ParseError};
use crate::parser::trace::{LogObserver, RecordingObserver, Tee, TraceEvent};
use rustc_hash::FxHashMap;
use std::fmt;

/// The input line that ends a session
pub const EXIT_COMMAND: &str = "exit";

/// Result category of one submitted line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Converted,
    Failed(ErrorKind),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Converted => write!(f, "converted"),
            Outcome::Failed(kind) => write!(f, "{}", kind.as_str()),
        }
    }
}

/// What happened to a submitted line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Exit,
    Converted { input: String, output: String },
    Failed { input: String, error: ParseError },
}

/// One converted (or rejected) line with the events recorded for it
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub input: String,
    pub result: Result<String, ParseError>,
    pub trace: Vec<TraceEvent>,
}

impl HistoryEntry {
    pub fn outcome(&self) -> Outcome {
        match &self.result {
            Ok(_) => Outcome::Converted,
            Err(e) => Outcome::Failed(e.kind()),
        }
    }
}

/// Conversion session spanning many input lines
#[derive(Debug, Default)]
pub struct Session {
    history: Vec<HistoryEntry>,
    tally: FxHashMap<Outcome, usize>,
    trace: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also forward trace events to `tracing` at debug level.
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// Convert one input line. A failed line never ends the session.
    pub fn submit(&mut self, line: &str) -> Submission {
        let line = line.trim_end_matches(['\n', '\r']);

        if line == EXIT_COMMAND {
            return Submission::Exit;
        }

        let mut recorder = RecordingObserver::new();
        let result = if self.trace {
            convert_with(line, Tee(&mut recorder, LogObserver))
        } else {
            convert_with(line, &mut recorder)
        };

        let entry = HistoryEntry {
            input: line.to_string(),
            result,
            trace: recorder.into_events(),
        };
        *self.tally.entry(entry.outcome()).or_insert(0) += 1;

        let submission = match &entry.result {
            Ok(output) => {
                tracing::debug!(input = line, output = %output, "converted");
                Submission::Converted {
                    input: entry.input.clone(),
                    output: output.clone(),
                }
            }
            Err(error) => {
                tracing::debug!(input = line, kind = error.kind().as_str(), "rejected");
                Submission::Failed {
                    input: entry.input.clone(),
                    error: error.clone(),
                }
            }
        };

        self.history.push(entry);
        submission
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.history.last()
    }

    /// Number of lines per outcome
    pub fn tally(&self) -> &FxHashMap<Outcome, usize> {
        &self.tally
    }

    pub fn count(&self, outcome: Outcome) -> usize {
        self.tally.get(&outcome).copied().unwrap_or(0)
    }

    pub fn converted(&self) -> usize {
        self.count(Outcome::Converted)
    }

    pub fn failed(&self) -> usize {
        self.history.len() - self.converted()
    }

    /// One-line summary such as `3 converted, 1 failed (ExpectedFunctionName: 1)`
    pub fn summary(&self) -> String {
        let mut failures: Vec<(Outcome, usize)> = self
            .tally()
            .iter()
            .filter(|(outcome, _)| **outcome != Outcome::Converted)
            .map(|(outcome, n)| (*outcome, *n))
            .collect();
        failures.sort_by_key(|(outcome, _)| outcome.to_string());

        let mut text = format!("{} converted, {} failed", self.converted(), self.failed());
        if !failures.is_empty() {
            let details: Vec<String> = failures
                .iter()
                .map(|(outcome, n)| format!("{}: {}", outcome, n))
                .collect();
            text.push_str(&format!(" ({})", details.join(", ")));
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_sentinel() {
        let mut session = Session::new();
        assert_eq!(session.submit("exit"), Submission::Exit);
        assert_eq!(session.submit("exit\r\n"), Submission::Exit);
        assert!(session.history().is_empty());

        // Only the exact word stops the session
        assert!(matches!(session.submit(" exit"), Submission::Failed { .. }));
        assert!(matches!(session.submit("EXIT"), Submission::Failed { .. }));
    }

    #[test]
    fn test_failure_does_not_end_session() {
        let mut session = Session::new();
        assert!(matches!(session.submit("()"), Submission::Failed { .. }));
        assert_eq!(
            session.submit("(add 1 2)"),
            Submission::Converted {
                input: "(add 1 2)".into(),
                output: "add(1, 2)".into(),
            }
        );
        assert_eq!(session.history().len(), 2);
    }

    #[test]
    fn test_tally_and_summary() {
        let mut session = Session::new();
        session.submit("(f 1)");
        session.submit("(g)");
        session.submit("()");
        session.submit("f 1");
        session.submit("()");

        assert_eq!(session.converted(), 2);
        assert_eq!(session.failed(), 3);
        assert_eq!(session.count(Outcome::Failed(ErrorKind::ExpectedFunctionName)), 2);
        assert_eq!(session.tally().len(), 3);
        assert_eq!(session.tally().get(&Outcome::Converted), Some(&2));
        assert_eq!(
            session.tally().get(&Outcome::Failed(ErrorKind::InvalidExpressionStart)),
            Some(&1)
        );
        assert_eq!(
            session.summary(),
            "2 converted, 3 failed (ExpectedFunctionName: 2, InvalidExpressionStart: 1)"
        );
    }

    #[test]
    fn test_history_keeps_trace() {
        let mut session = Session::new().with_trace(true);
        session.submit("(f 1)");
        let entry = session.last().unwrap();
        // 4 tokens, 1 call, 1 argument
        assert_eq!(entry.trace.len(), 6);
        assert_eq!(entry.outcome(), Outcome::Converted);
    }
}
