// lisp2c: s-expression to C-style call expression converter

use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use lisp2c::repl::LineDriver;
use lisp2c::session::Session;

/// Convert prefix s-expressions such as `(add 1 (mul 2 3))` into call expressions.
#[derive(Debug, Parser)]
#[command(name = "lisp2c", version, about)]
struct Cli {
    /// Open the full-screen terminal UI instead of the line prompt
    #[arg(long)]
    tui: bool,

    /// Log every token, call and argument at debug level
    #[arg(long)]
    trace: bool,

    /// Disable coloured output (also honoured via NO_COLOR)
    #[arg(long)]
    no_color: bool,

    /// Expressions to convert without prompting, one per argument
    #[arg(value_name = "EXPR")]
    exprs: Vec<String>,
}

fn init_logging(trace: bool) {
    let default = if trace { "lisp2c=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<bool> {
    let session = Session::new().with_trace(cli.trace);

    if cli.tui {
        let session = lisp2c::ui::run_tui(session)?;
        eprintln!("{}", session.summary());
        return Ok(true);
    }

    init_logging(cli.trace);
    let color = !cli.no_color && std::env::var_os("NO_COLOR").is_none();

    let mut session = session;
    if cli.exprs.is_empty() {
        let stdin = io::stdin();
        let mut driver = LineDriver::new(stdin.lock(), io::stdout()).with_color(color);
        driver.run(&mut session)?;
        Ok(true)
    } else {
        let mut driver = LineDriver::new(io::empty(), io::stdout()).with_color(color);
        driver.run_batch(&mut session, &cli.exprs)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
