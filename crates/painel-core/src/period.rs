//! # Period Resolver
//!
//! Turns the reporting-period dropdown into a concrete date range.
//!
//! ## Period Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Reference date: Wednesday 2024-03-13                                   │
//! │                                                                         │
//! │  today   ──► 2024-03-13 .. 2024-03-13                                   │
//! │  week    ──► 2024-03-10 .. 2024-03-13   (Sunday on/before → reference)  │
//! │  month   ──► 2024-03-01 .. 2024-03-31   (1st → day 0 of next month)     │
//! │  custom  ──► start/end as given, both required                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The resolver never reads the clock. The caller passes the reference
//! instant, so the same inputs always give the same range.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Months, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::error::{CoreResult, ValidationError};
use crate::validation::{is_blank, parse_date};

// =============================================================================
// Date Range
// =============================================================================

/// An inclusive, date-only range. Invariant: `start <= end`.
///
/// Only the resolver builds ranges, so there is no `Deserialize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, TS)]
#[ts(export)]
pub struct DateRange {
    #[ts(as = "String")]
    start: NaiveDate,
    #[ts(as = "String")]
    end: NaiveDate,
}

impl DateRange {
    /// Builds a range, rejecting `start > end`.
    fn new(field: &str, start: NaiveDate, end: NaiveDate) -> CoreResult<Self> {
        if start > end {
            return Err(ValidationError::InvalidRange {
                field: field.to_string(),
                start,
                end,
            });
        }
        Ok(DateRange { start, end })
    }

    #[inline]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    #[inline]
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Checks if a date falls inside the range (both ends inclusive).
    #[inline]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of calendar days covered, counting both ends.
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

// =============================================================================
// Period Selector
// =============================================================================

/// The reporting-period choices offered by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum PeriodSelector {
    Today,
    Week,
    Month,
    Custom,
}

impl PeriodSelector {
    pub const ALL: [PeriodSelector; 4] = [
        PeriodSelector::Today,
        PeriodSelector::Week,
        PeriodSelector::Month,
        PeriodSelector::Custom,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            PeriodSelector::Today => "today",
            PeriodSelector::Week => "week",
            PeriodSelector::Month => "month",
            PeriodSelector::Custom => "custom",
        }
    }
}

impl fmt::Display for PeriodSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeriodSelector {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        PeriodSelector::ALL
            .into_iter()
            .find(|p| p.as_str() == wanted)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "period".to_string(),
                allowed: PeriodSelector::ALL.iter().map(|p| p.to_string()).collect(),
            })
    }
}

// =============================================================================
// Custom Bounds
// =============================================================================

/// Raw bounds from the custom-period date inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CustomBounds {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl CustomBounds {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        CustomBounds {
            start: Some(start.into()),
            end: Some(end.into()),
        }
    }
}

// =============================================================================
// Resolution
// =============================================================================

/// Resolves a period against a reference date.
///
/// ## Errors
/// Only `custom` can fail:
/// - `Required` when a bound is missing or blank
/// - `InvalidFormat` when a bound is not a date
/// - `InvalidRange` when start falls after end
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use painel_core::period::{resolve, PeriodSelector};
///
/// let reference = NaiveDate::from_ymd_opt(2024, 2, 14).unwrap();
/// let range = resolve(PeriodSelector::Month, None, reference).unwrap();
/// assert_eq!(range.start(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
/// assert_eq!(range.end(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// ```
pub fn resolve(
    period: PeriodSelector,
    custom: Option<&CustomBounds>,
    reference: NaiveDate,
) -> CoreResult<DateRange> {
    let range = match period {
        PeriodSelector::Today => DateRange {
            start: reference,
            end: reference,
        },
        PeriodSelector::Week => DateRange {
            start: start_of_week(reference),
            end: reference,
        },
        PeriodSelector::Month => DateRange {
            start: first_of_month(reference),
            end: last_of_month(reference),
        },
        PeriodSelector::Custom => resolve_custom(custom)?,
    };

    debug!(%period, start = %range.start, end = %range.end, "Resolved period");
    Ok(range)
}

/// Resolves a period against a zoned instant.
///
/// The instant is reduced to its calendar date in its own time zone before
/// anything else happens, so the time of day never moves a boundary.
pub fn resolve_at<Tz: TimeZone>(
    period: PeriodSelector,
    custom: Option<&CustomBounds>,
    reference: &DateTime<Tz>,
) -> CoreResult<DateRange> {
    resolve(period, custom, reference.date_naive())
}

fn resolve_custom(custom: Option<&CustomBounds>) -> CoreResult<DateRange> {
    let bounds = custom.cloned().unwrap_or_default();

    if is_blank(bounds.start.as_deref()) {
        return Err(ValidationError::required("start"));
    }
    if is_blank(bounds.end.as_deref()) {
        return Err(ValidationError::required("end"));
    }

    let start = parse_date("start", bounds.start.as_deref().unwrap_or_default())?;
    let end = parse_date("end", bounds.end.as_deref().unwrap_or_default())?;

    DateRange::new("custom period", start, end)
}

/// Most recent Sunday on or before `date`.
fn start_of_week(date: NaiveDate) -> NaiveDate {
    let back = u64::from(date.weekday().num_days_from_sunday());
    date.checked_sub_days(chrono::Days::new(back)).unwrap_or(date)
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Day zero of the next month: the day before the 1st of next month.
fn last_of_month(date: NaiveDate) -> NaiveDate {
    first_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}

// =============================================================================
// Unit Tests
// =============================================================================
