//! Bookshelf CLI entry point.
//!
//! # Responsibility
//! - Parse command line flags and bootstrap logging.
//! - Initialize the catalog in the working directory and hand control to
//!   the interactive shell.

use bookshelf_core::{default_log_level, init_logging, BookCatalog};
use clap::Parser;
use std::io;
use std::process::ExitCode;

mod shell;

use shell::Shell;

#[derive(Debug, Parser)]
#[command(name = "bookshelf")]
#[command(about = "Personal library manager", long_about = None, version)]
struct Cli {
    /// Absolute directory for rolling log files. Logging is off when omitted.
    #[arg(long, value_name = "ABS_PATH")]
    log_dir: Option<String>,
    /// One of trace|debug|info|warn|error.
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or_else(|| default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    }

    let catalog = BookCatalog::default_location();
    if let Err(err) = catalog.initialize() {
        eprintln!("Error: {err}");
        return ExitCode::FAILURE;
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(catalog, stdin.lock(), stdout.lock());
    match shell.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
