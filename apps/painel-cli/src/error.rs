//! # CLI Error Type
//!
//! Unified error type for the subcommands.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  config load ──── ConfigError ─────────┐                                │
//! │  read data file ─ io::Error ───────────┤                                │
//! │  parse JSON ───── serde_json::Error ───┼──► CliError ──► stderr, exit 1 │
//! │  core call ────── ValidationError ─────┤                                │
//! │  arg conflict ─── Usage ───────────────┘                    (exit 2)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use painel_core::ValidationError;
use thiserror::Error;

use crate::config::ConfigError;

/// Error returned from a subcommand.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed data in {path}: {source}")]
    Data {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write output: {0}")]
    Output(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),
}

impl CliError {
    /// Creates a usage error.
    pub fn usage(message: impl Into<String>) -> Self {
        CliError::Usage(message.into())
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Usage(_) => 2,
            _ => 1,
        }
    }
}

/// Result type for the CLI layer.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_keep_their_message() {
        let err: CliError = ValidationError::required("start").into();
        assert_eq!(err.to_string(), "Invalid input: start is required");
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_usage_exit_code() {
        assert_eq!(CliError::usage("missing subcommand").exit_code(), 2);
    }
}
