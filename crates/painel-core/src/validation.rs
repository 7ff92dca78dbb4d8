//! # Validation Module
//!
//! Input validation utilities shared by the core components.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (React forms)                                       │
//! │  ├── Date pickers, numeric inputs                                      │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: painel-core (THIS MODULE)                                    │
//! │  ├── Date criteria must parse                                          │
//! │  ├── Page size must be positive                                        │
//! │  └── Custom periods must carry both bounds                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Remote API                                                   │
//! │  └── Source of truth for entity rules                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use painel_core::validation::{parse_date, validate_page_size};
//!
//! assert!(parse_date("dateFrom", "2024-03-01").is_ok());
//! assert!(parse_date("dateFrom", "03/01/2024").is_err());
//! assert!(validate_page_size(0).is_err());
//! ```

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::ValidationError;
use crate::money::Money;
use crate::MAX_PAGE_SIZE;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Blank Checks
// =============================================================================

/// Returns true when a criterion value carries no constraint.
///
/// Absent, empty and whitespace-only values are all "not set".
#[inline]
pub fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

// =============================================================================
// Date Validators
// =============================================================================

/// Parses a date-only value, dropping any time-of-day component.
///
/// ## Accepted Forms
/// - `2024-03-05` (HTML date inputs, most API fields)
/// - `2024-03-05T14:30:00` / `2024-03-05 14:30` (naive timestamps)
/// - `2024-03-05T14:30:00-03:00` (RFC 3339, date taken in its own offset)
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use painel_core::validation::parse_date;
///
/// let expected = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
/// assert_eq!(parse_date("date", "2024-03-05").unwrap(), expected);
/// assert_eq!(parse_date("date", "2024-03-05T23:59:59Z").unwrap(), expected);
/// assert!(parse_date("date", "").is_err());
/// ```
pub fn parse_date(field: &str, value: &str) -> ValidationResult<NaiveDate> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::required(field));
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Ok(instant.date_naive());
    }

    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];
    for format in NAIVE_FORMATS {
        if let Ok(instant) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(instant.date());
        }
    }

    Err(ValidationError::invalid_format(
        field,
        format!("'{}' is not a YYYY-MM-DD date", value),
    ))
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a page size.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_PAGE_SIZE (500)
pub fn validate_page_size(page_size: usize) -> ValidationResult<()> {
    if page_size == 0 {
        return Err(ValidationError::MustBePositive {
            field: "page_size".to_string(),
        });
    }

    if page_size > MAX_PAGE_SIZE {
        return Err(ValidationError::OutOfRange {
            field: "page_size".to_string(),
            min: 1,
            max: MAX_PAGE_SIZE as i64,
        });
    }

    Ok(())
}

/// Validates a product price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
///
/// ## Example
/// ```rust
/// use painel_core::money::Money;
/// use painel_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_cents(1099)).is_ok());
/// assert!(validate_price(Money::zero()).is_ok());
/// assert!(validate_price(Money::from_cents(-100)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a display name (products, categories).
///
/// ## Rules
/// - Must not be blank
/// - At most 200 characters
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::required(field));
    }

    if name.chars().count() > 200 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 1,
            max: 200,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(None));
        assert!(is_blank(Some("")));
        assert!(is_blank(Some("   ")));
        assert!(!is_blank(Some("x")));
    }

    #[test]
    fn test_parse_date_forms() {
        assert_eq!(parse_date("d", "2024-02-29").unwrap(), ymd(2024, 2, 29));
        assert_eq!(parse_date("d", "2024-02-29T08:15").unwrap(), ymd(2024, 2, 29));
        assert_eq!(parse_date("d", "2024-02-29 08:15:30").unwrap(), ymd(2024, 2, 29));
        assert_eq!(parse_date("d", "2024-02-29T08:15:30.250").unwrap(), ymd(2024, 2, 29));
        // Date is read in the timestamp's own offset.
        assert_eq!(parse_date("d", "2024-02-29T23:30:00-03:00").unwrap(), ymd(2024, 2, 29));
    }

    #[test]
    fn test_parse_date_rejects_malformed() {
        assert!(matches!(
            parse_date("dateFrom", "2023-02-29"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            parse_date("dateFrom", "yesterday"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            parse_date("dateFrom", "  "),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_validate_page_size() {
        assert!(validate_page_size(1).is_ok());
        assert!(validate_page_size(MAX_PAGE_SIZE).is_ok());
        assert!(validate_page_size(0).is_err());
        assert!(validate_page_size(MAX_PAGE_SIZE + 1).is_err());
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("name", "Bebidas").is_ok());
        assert!(validate_name("name", " ").is_err());
        assert!(validate_name("name", &"A".repeat(300)).is_err());
    }
}
