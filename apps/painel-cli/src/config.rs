//! CLI configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | Variable            | Default  | Meaning                              |
//! |---------------------|----------|--------------------------------------|
//! | `PAINEL_DATA_DIR`   | `./data` | Directory holding the JSON files     |
//! | `PAINEL_PAGE_SIZE`  | `10`     | Rows per page, `1..=500`             |
//! | `PAINEL_STATUS_ALL` | `all`    | Status value meaning "any status"    |

use std::env;
use std::path::PathBuf;

use painel_core::validation::validate_page_size;
use painel_core::{DEFAULT_PAGE_SIZE, STATUS_ALL};
use serde::Serialize;

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CliConfig {
    /// Directory with `sales.json`, `products.json` and `categories.json`
    pub data_dir: PathBuf,

    /// Default page size for list views
    pub page_size: usize,

    /// Sentinel that disables the status filter
    pub status_all: String,
}

impl CliConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        CliConfig::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = lookup("PAINEL_DATA_DIR")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| "./data".to_string());

        let page_size = match lookup("PAINEL_PAGE_SIZE") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidValue("PAINEL_PAGE_SIZE".to_string()))?,
            None => DEFAULT_PAGE_SIZE,
        };
        validate_page_size(page_size)
            .map_err(|_| ConfigError::InvalidValue("PAINEL_PAGE_SIZE".to_string()))?;

        let status_all = match lookup("PAINEL_STATUS_ALL") {
            Some(raw) if raw.trim().is_empty() => {
                return Err(ConfigError::InvalidValue("PAINEL_STATUS_ALL".to_string()))
            }
            Some(raw) => raw.trim().to_string(),
            None => STATUS_ALL.to_string(),
        };

        Ok(CliConfig {
            data_dir: PathBuf::from(data_dir),
            page_size,
            status_all,
        })
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
