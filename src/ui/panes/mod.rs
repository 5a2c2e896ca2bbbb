//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`history`]: Submitted expressions with their conversions or errors
//! - [`trace`]: Tokens, calls and arguments recorded for the latest line
//! - [`input`]: The line being edited
//! - [`status`]: Status bar with counts and keybindings
//! - `utils`: Shared helpers (border styles, token highlighting, scrolling)
//!
//! Each pane module exports a stateless `render_*` function.

mod utils;

pub mod history;
pub mod input;
pub mod status;
pub mod trace;

pub use history::render_history_pane;
pub use input::render_input_pane;
pub use status::render_status_bar;
pub use trace::render_trace_pane;
