//! # Subcommands
//!
//! Each subcommand is a thin wrapper:
//! 1. Turn its `ArgMatches` into core inputs (criteria, period, page)
//! 2. Load the JSON collections it needs from the data directory
//! 3. Call into painel-core
//! 4. Return a serializable view, printed as JSON by `main`
//!
//! ## Data Directory Layout
//! ```text
//! $PAINEL_DATA_DIR/
//! ├── sales.json        [ { id, date, clientId, operator, total, status } ]
//! ├── products.json     [ { id, name, price, categoryId? } ]
//! └── categories.json   [ { id, name, colorTag } ]
//! ```

pub mod period;
pub mod products;
pub mod sales;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{ArgMatches, Command};
use painel_core::validation::parse_date;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};

/// Build the complete command tree.
pub fn build_cli() -> Command {
    Command::new("painel")
        .about("Dashboard data views over the JSON collections in PAINEL_DATA_DIR")
        .after_help("Environment: PAINEL_DATA_DIR, PAINEL_PAGE_SIZE, PAINEL_STATUS_ALL, RUST_LOG")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(sales::command())
        .subcommand(products::products_command())
        .subcommand(products::reassign_command())
        .subcommand(period::command())
}

/// Runs the matched subcommand.
pub fn dispatch(matches: &ArgMatches, config: &CliConfig, today: NaiveDate) -> CliResult<Value> {
    let data = DataDir::new(&config.data_dir);

    match matches.subcommand() {
        Some(("sales", m)) => sales::run(m, config, &data, today),
        Some(("products", _)) => products::run_products(&data),
        Some(("reassign", m)) => products::run_reassign(m, &data),
        Some(("period", m)) => period::run(m, today),
        Some((other, _)) => Err(CliError::usage(format!("Unknown command '{other}'"))),
        None => Err(CliError::usage("A subcommand is required")),
    }
}

// =============================================================================
// Data Directory
// =============================================================================

/// Read access to the JSON collections.
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    pub fn new(root: impl AsRef<Path>) -> Self {
        DataDir {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Reads `<root>/<name>.json` as a list.
    pub fn load<T: DeserializeOwned>(&self, name: &str) -> CliResult<Vec<T>> {
        let path = self.root.join(format!("{name}.json"));
        let raw = fs::read_to_string(&path).map_err(|source| CliError::Io {
            path: path.clone(),
            source,
        })?;
        let items: Vec<T> =
            serde_json::from_str(&raw).map_err(|source| CliError::Data { path: path.clone(), source })?;

        debug!(path = %path.display(), count = items.len(), "Loaded collection");
        Ok(items)
    }
}

// =============================================================================
// Match Helpers
// =============================================================================

/// Reads an optional date argument with the core's date rules.
pub(crate) fn date_arg(m: &ArgMatches, id: &str) -> CliResult<Option<NaiveDate>> {
    m.get_one::<String>(id)
        .map(|raw| parse_date(id, raw))
        .transpose()
        .map_err(CliError::from)
}

/// Serializes a view for printing.
pub(crate) fn to_output<T: serde::Serialize>(view: &T) -> CliResult<Value> {
    Ok(serde_json::to_value(view)?)
}
