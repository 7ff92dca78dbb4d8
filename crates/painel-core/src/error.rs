//! # Error Types
//!
//! Domain-specific error types for painel-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  painel-core errors (this file)                                        │
//! │  └── ValidationError  - Malformed or missing input                     │
//! │                                                                         │
//! │  painel-cli errors (app)                                               │
//! │  ├── ConfigError      - Bad environment configuration                  │
//! │  └── CliError         - I/O, JSON, config, core failures               │
//! │                                                                         │
//! │  Flow: ValidationError → CliError → stderr + exit code                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, offending value)
//! 3. Errors are enum variants, never String
//! 4. The core never retries and never swallows a `ValidationError`
//!
//! Network failures, missing remote entities and authorization problems are
//! NOT represented here: they belong to the data source collaborator.

use chrono::NaiveDate;
use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// This is the only error kind the core raises. Callers that want
/// resilience catch it and choose their own default.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    ///
    /// ## When This Occurs
    /// - Custom period without a start or end bound
    /// - Mutation response that lacks a field of the entity
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive (e.g. page size).
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g. a date criterion that is not `YYYY-MM-DD`).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// A date range whose start falls after its end.
    #[error("{field} starts on {start} but ends on {end}")]
    InvalidRange {
        field: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

impl ValidationError {
    /// Shorthand for [`ValidationError::Required`].
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Shorthand for [`ValidationError::InvalidFormat`].
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results raised by the core.
pub type CoreResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::required("start");
        assert_eq!(err.to_string(), "start is required");

        let err = ValidationError::MustBePositive {
            field: "page_size".to_string(),
        };
        assert_eq!(err.to_string(), "page_size must be positive");

        let err = ValidationError::invalid_format("dateFrom", "expected YYYY-MM-DD");
        assert_eq!(
            err.to_string(),
            "dateFrom has invalid format: expected YYYY-MM-DD"
        );
    }

    #[test]
    fn test_invalid_range_message() {
        let err = ValidationError::InvalidRange {
            field: "custom period".to_string(),
            start: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "custom period starts on 2024-03-10 but ends on 2024-03-01"
        );
    }
}
