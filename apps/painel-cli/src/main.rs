//! # painel
//!
//! Command-line front for the dashboard core: reads the JSON collections the
//! remote API would return, applies period, filter, pagination and grouping,
//! and prints the result as JSON.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  env ──► CliConfig ───────────┐                                         │
//! │                               ▼                                         │
//! │  argv ──► clap ──► dispatch ──► DataDir (sales/products/categories.json)│
//! │                               │                                         │
//! │                               ▼                                         │
//! │                          painel-core ──► JSON on stdout, logs on stderr │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod commands;
mod config;
mod error;

use std::process::ExitCode;

use chrono::Local;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};

fn main() -> ExitCode {
    init_tracing();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Usage(message)) => {
            eprintln!("{message}");
            ExitCode::from(2)
        }
        Err(e) => {
            error!(error = %e, "Command failed");
            eprintln!("error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

fn run() -> CliResult<()> {
    // clap prints usage or help and exits with code 2 on bad arguments.
    let matches = commands::build_cli().get_matches();

    let config = CliConfig::load()?;
    info!(data_dir = %config.data_dir.display(), page_size = config.page_size, "Configuration loaded");

    // The clock is read here and nowhere else.
    let today = Local::now().date_naive();

    let output = commands::dispatch(&matches, &config, today)?;

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Initializes the tracing subscriber for logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug`: every skipped criterion, clamp and dangling reference
/// - `RUST_LOG=info`: one line per command (default)
/// - `RUST_LOG=warn`: only data problems
///
/// Logs go to stderr so stdout stays valid JSON.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,painel=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
