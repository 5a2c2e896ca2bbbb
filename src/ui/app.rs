//! Main TUI application state and logic

use crate::session::{Session, Submission};
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    History,
    Trace,
}

impl FocusedPane {
    pub fn next(self) -> Self {
        match self {
            FocusedPane::History => FocusedPane::Trace,
            FocusedPane::Trace => FocusedPane::History,
        }
    }
}

/// The main application state
pub struct App {
    /// Conversion session holding the history
    pub session: Session,

    /// Line being edited
    pub input: String,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub history_scroll: usize,
    pub trace_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    pub fn new(session: Session) -> Self {
        App {
            session,
            input: String::new(),
            focused_pane: FocusedPane::History,
            history_scroll: 0,
            trace_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    pub fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes, input line, status bar
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(main_chunks[0]);

        super::panes::render_history_pane(
            frame,
            columns[0],
            self.session.history(),
            self.focused_pane == FocusedPane::History,
            &mut self.history_scroll,
        );

        let events = self
            .session
            .last()
            .map(|entry| entry.trace.as_slice())
            .unwrap_or(&[]);
        super::panes::render_trace_pane(
            frame,
            columns[1],
            events,
            self.focused_pane == FocusedPane::Trace,
            &mut self.trace_scroll,
        );

        super::panes::render_input_pane(frame, main_chunks[1], &self.input);

        let last_failed = self
            .session
            .last()
            .is_some_and(|entry| entry.result.is_err());
        super::panes::render_status_bar(
            frame,
            main_chunks[2],
            &self.status_message,
            self.session.converted(),
            self.session.failed(),
            last_failed,
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char(c) => {
                self.input.push(c);
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::History => {
                    self.history_scroll = self.history_scroll.saturating_sub(1);
                }
                FocusedPane::Trace => {
                    self.trace_scroll = self.trace_scroll.saturating_sub(1);
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::History => {
                    self.history_scroll = self.history_scroll.saturating_add(1);
                }
                FocusedPane::Trace => {
                    self.trace_scroll = self.trace_scroll.saturating_add(1);
                }
            },
            KeyCode::Enter => self.submit(),
            _ => {}
        }
    }

    /// Submit the current input line
    fn submit(&mut self) {
        let line = std::mem::take(&mut self.input);

        match self.session.submit(&line) {
            Submission::Exit => {
                self.should_quit = true;
            }
            Submission::Converted { output, .. } => {
                self.status_message = format!("Converted: {}", output);
            }
            Submission::Failed { error, .. } => {
                self.status_message = format!("Error: {}", error);
            }
        }

        // Follow the newest entry; render clamps these
        self.history_scroll = usize::MAX;
        self.trace_scroll = 0;
    }
}

/// Set up the terminal, run the app, and restore the terminal.
///
/// Returns the session so the caller can report on it.
pub fn run_tui(session: Session) -> Result<Session> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(session);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.context("terminal UI failed")?;
    Ok(app.session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_line(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
        press(app, KeyCode::Enter);
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_submit_updates_history() {
        let mut app = App::new(Session::new());
        type_line(&mut app, "(add 1 (mul 2 3))");

        assert!(app.input.is_empty());
        assert_eq!(app.session.converted(), 1);
        assert_eq!(app.status_message, "Converted: add(1, (mul(2, 3)))");
    }

    #[test]
    fn test_error_keeps_running() {
        let mut app = App::new(Session::new());
        type_line(&mut app, "()");
        assert!(!app.should_quit);
        assert!(app.status_message.starts_with("Error: Expected function name"));
    }

    #[test]
    fn test_backspace_and_exit() {
        let mut app = App::new(Session::new());
        for c in "exitt".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Enter);
        assert!(app.should_quit);
        assert!(app.session.history().is_empty());
    }

    #[test]
    fn test_focus_cycles() {
        let mut app = App::new(Session::new());
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::Trace);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::History);
    }

    #[test]
    fn test_render_with_very_long_input() {
        let mut app = App::new(Session::new());
        app.input = "9".repeat(65_533);

        let mut terminal = Terminal::new(TestBackend::new(80, 12)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("999"));
    }

    #[test]
    fn test_render_shows_result() {
        let mut app = App::new(Session::new());
        type_line(&mut app, "(add 1 2)");

        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("add(1, 2)"));
        assert!(text.contains("History"));
        assert!(text.contains("FUNCTION"));
    }
}
