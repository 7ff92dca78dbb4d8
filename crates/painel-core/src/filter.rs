//! # Record Filter Engine
//!
//! Reduces a fetched collection to the records matching every active
//! criterion of a list view, and sorts collections by a single column.
//!
//! ## Filter Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  FilterCriteria            FilterSchema                                 │
//! │  { search: "ana",          search   → Contains [id, clientId, operator] │
//! │    status: "all",          status   → Equals status (bypass on "all")   │
//! │    dateFrom: "2024-03-01", dateFrom → DateFrom date                     │
//! │    dateTo: "" }            dateTo   → DateTo date                       │
//! │          │                        │                                     │
//! │          └──────────┬─────────────┘                                     │
//! │                     ▼                                                   │
//! │  compile(): drop blank / "all" / unknown criteria, parse dates          │
//! │             (malformed date → ValidationError, nothing filtered)        │
//! │                     │                                                   │
//! │                     ▼                                                   │
//! │  [Contains "ana", DateFrom 2024-03-01]   (logical AND)                  │
//! │                     │                                                   │
//! │                     ▼                                                   │
//! │  records.iter().filter(all match) → new Vec, input order kept           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::error::{CoreResult, ValidationError};
use crate::types::Record;
use crate::validation::{is_blank, parse_date};
use crate::STATUS_ALL;

// =============================================================================
// Criteria
// =============================================================================

/// The values a user has entered into a list view's filter controls.
///
/// Absent or blank values carry no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterCriteria(BTreeMap<String, String>);

impl FilterCriteria {
    pub fn new() -> Self {
        FilterCriteria::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Sets a criterion, returning true if its effective value changed.
    ///
    /// Blank values remove the criterion, so "cleared" and "never set"
    /// compare equal.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> bool {
        let name = name.into();
        let value = value.into();

        if is_blank(Some(&value)) {
            return self.0.remove(&name).is_some();
        }

        match self.0.insert(name, value.clone()) {
            Some(previous) => previous != value,
            None => true,
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Checks if no criterion carries a value.
    pub fn is_unconstrained(&self) -> bool {
        self.0.values().all(|v| is_blank(Some(v)))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FilterCriteria {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut criteria = FilterCriteria::new();
        for (name, value) in iter {
            criteria.set(name, value);
        }
        criteria
    }
}

// =============================================================================
// Schema
// =============================================================================

/// How a criterion constrains a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Case-insensitive substring over any of the fields.
    Contains { fields: Vec<String> },
    /// Exact equality, skipped when the value is the sentinel.
    Equals { field: String, all_sentinel: String },
    /// Record date on or after the bound.
    DateFrom { field: String },
    /// Record date on or before the bound.
    DateTo { field: String },
}

/// Binds criterion names to predicates for one kind of list view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSchema {
    predicates: BTreeMap<String, Predicate>,
}

impl FilterSchema {
    pub fn new() -> Self {
        FilterSchema::default()
    }

    /// Builder-style registration of a criterion.
    pub fn with(mut self, criterion: impl Into<String>, predicate: Predicate) -> Self {
        self.predicates.insert(criterion.into(), predicate);
        self
    }

    /// Schema of the sales list with the default "all" sentinel.
    pub fn sales() -> Self {
        FilterSchema::sales_with_sentinel(STATUS_ALL)
    }

    /// Schema of the sales list.
    ///
    /// | criterion  | predicate                              |
    /// |------------|----------------------------------------|
    /// | `search`   | contains in `id`, `clientId`, `operator` |
    /// | `status`   | equals `status`, bypassed on sentinel  |
    /// | `dateFrom` | `date` ≥ bound                         |
    /// | `dateTo`   | `date` ≤ bound                         |
    pub fn sales_with_sentinel(all_sentinel: &str) -> Self {
        FilterSchema::new()
            .with(
                "search",
                Predicate::Contains {
                    fields: vec!["id".into(), "clientId".into(), "operator".into()],
                },
            )
            .with(
                "status",
                Predicate::Equals {
                    field: "status".into(),
                    all_sentinel: all_sentinel.to_string(),
                },
            )
            .with("dateFrom", Predicate::DateFrom { field: "date".into() })
            .with("dateTo", Predicate::DateTo { field: "date".into() })
    }

    pub fn predicate(&self, criterion: &str) -> Option<&Predicate> {
        self.predicates.get(criterion)
    }
}

// =============================================================================
// Compiled Predicates
// =============================================================================

#[derive(Debug)]
enum Active<'s> {
    Contains { fields: &'s [String], needle: String },
    Equals { field: &'s str, value: String },
    DateFrom { field: &'s str, bound: NaiveDate },
    DateTo { field: &'s str, bound: NaiveDate },
}

impl Active<'_> {
    fn matches<R: Record>(&self, record: &R) -> bool {
        match self {
            Active::Contains { fields, needle } => fields.iter().any(|f| {
                record
                    .field(f)
                    .map_or(false, |v| v.to_text().to_lowercase().contains(needle.as_str()))
            }),
            Active::Equals { field, value } => record
                .field(field)
                .map_or(false, |v| v.to_text() == value.as_str()),
            // Records with no readable date cannot satisfy a date bound.
            Active::DateFrom { field, bound } => record
                .field(field)
                .and_then(|v| v.as_date())
                .map_or(false, |d| d >= *bound),
            Active::DateTo { field, bound } => record
                .field(field)
                .and_then(|v| v.as_date())
                .map_or(false, |d| d <= *bound),
        }
    }
}

/// Turns criteria into the list of predicates that actually constrain.
fn compile<'s>(criteria: &FilterCriteria, schema: &'s FilterSchema) -> CoreResult<Vec<Active<'s>>> {
    let mut active = Vec::new();

    for (name, raw) in criteria.iter() {
        if is_blank(Some(raw)) {
            continue;
        }

        let Some(predicate) = schema.predicate(name) else {
            debug!(criterion = name, "Ignoring criterion unknown to the schema");
            continue;
        };

        let value = raw.trim();
        match predicate {
            Predicate::Contains { fields } => active.push(Active::Contains {
                fields,
                needle: value.to_lowercase(),
            }),
            Predicate::Equals { field, all_sentinel } => {
                if value != all_sentinel {
                    active.push(Active::Equals {
                        field,
                        value: value.to_string(),
                    });
                }
            }
            Predicate::DateFrom { field } => active.push(Active::DateFrom {
                field,
                bound: parse_date(name, value)?,
            }),
            Predicate::DateTo { field } => active.push(Active::DateTo {
                field,
                bound: parse_date(name, value)?,
            }),
        }
    }

    Ok(active)
}

// =============================================================================
// Filtering
// =============================================================================

/// Filters records against every active criterion.
///
/// Returns a new list in input order; the input is never touched.
///
/// ## Errors
/// `ValidationError` when a date criterion does not parse, even if the
/// record list is empty.
///
/// ## Example
/// ```rust
/// use painel_core::filter::{filter, FilterCriteria, FilterSchema};
/// use painel_core::JsonRecord;
/// use serde_json::json;
///
/// let records: Vec<JsonRecord> = serde_json::from_value(json!([
///     { "id": 1, "clientId": "ANA-1", "operator": "bruno", "status": "finalizada", "date": "2024-03-02" },
///     { "id": 2, "clientId": "CARLA", "operator": "ana", "status": "cancelada", "date": "2024-03-05" },
///     { "id": 3, "clientId": "DIEGO", "operator": "bruno", "status": "finalizada", "date": "2024-03-09" }
/// ])).unwrap();
///
/// let criteria = FilterCriteria::new().with("search", "Ana").with("status", "all");
/// let found = filter(&records, &criteria, &FilterSchema::sales()).unwrap();
/// assert_eq!(found.len(), 2);
/// ```
pub fn filter<R: Record + Clone>(
    records: &[R],
    criteria: &FilterCriteria,
    schema: &FilterSchema,
) -> CoreResult<Vec<R>> {
    Ok(filter_refs(records, criteria, schema)?
        .into_iter()
        .cloned()
        .collect())
}

/// Like [`filter`], borrowing the matches instead of cloning them.
pub fn filter_refs<'r, R: Record>(
    records: &'r [R],
    criteria: &FilterCriteria,
    schema: &FilterSchema,
) -> CoreResult<Vec<&'r R>> {
    let active = compile(criteria, schema)?;

    let kept: Vec<&R> = records
        .iter()
        .filter(|record| active.iter().all(|p| p.matches(*record)))
        .collect();

    debug!(
        total = records.len(),
        kept = kept.len(),
        active = active.len(),
        "Filtered records"
    );
    Ok(kept)
}

// =============================================================================
// Sorting
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Column sort of a list view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(field: impl Into<String>) -> Self {
        SortSpec {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        SortSpec {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            SortDirection::Asc => write!(f, "{}", self.field),
            SortDirection::Desc => write!(f, "{}:desc", self.field),
        }
    }
}

/// Parses `field`, `field:asc` or `field:desc`.
impl FromStr for SortSpec {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, direction) = match s.trim().split_once(':') {
            Some((field, dir)) => (field.trim(), dir.trim()),
            None => (s.trim(), "asc"),
        };

        if field.is_empty() {
            return Err(ValidationError::required("sort field"));
        }

        let direction = match direction.to_lowercase().as_str() {
            "asc" => SortDirection::Asc,
            "desc" => SortDirection::Desc,
            _ => {
                return Err(ValidationError::NotAllowed {
                    field: "sort direction".to_string(),
                    allowed: vec!["asc".to_string(), "desc".to_string()],
                })
            }
        };

        Ok(SortSpec {
            field: field.to_string(),
            direction,
        })
    }
}

/// Returns the records sorted by one field.
///
/// The sort is stable, and records missing the field go last in both
/// directions.
pub fn sort_records<R: Record + Clone>(records: &[R], spec: &SortSpec) -> Vec<R> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| {
        match (a.field(&spec.field), b.field(&spec.field)) {
            (Some(x), Some(y)) => match spec.direction {
                SortDirection::Asc => x.sort_cmp(&y),
                SortDirection::Desc => y.sort_cmp(&x),
            },
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        }
    });
    sorted
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::{RecordId, Sale, SaleStatus};

    fn sale(id: i64, day: u32, client: &str, operator: &str, status: SaleStatus) -> Sale {
        Sale {
            id: RecordId::Number(id),
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            client_id: client.to_string(),
            operator: operator.to_string(),
            total: Money::from_cents(1000 * id),
            status,
        }
    }

    fn sample() -> Vec<Sale> {
        vec![
            sale(1, 2, "CLI-001", "Marta", SaleStatus::Completed),
            sale(2, 5, "CLI-002", "João", SaleStatus::Cancelled),
            sale(3, 9, "CLI-003", "marta", SaleStatus::Completed),
            sale(14, 20, "CLI-014", "Pedro", SaleStatus::Pending),
        ]
    }

    fn ids(sales: &[Sale]) -> Vec<i64> {
        sales
            .iter()
            .map(|s| match s.id {
                RecordId::Number(n) => n,
                RecordId::Text(_) => -1,
            })
            .collect()
    }

    #[test]
    fn test_empty_criteria_returns_everything() {
        let sales = sample();
        let out = filter(&sales, &FilterCriteria::new(), &FilterSchema::sales()).unwrap();
        assert_eq!(out, sales);

        let blank = FilterCriteria::new().with("search", "   ").with("dateFrom", "");
        assert!(blank.is_unconstrained());
        let out = filter(&sales, &blank, &FilterSchema::sales()).unwrap();
        assert_eq!(out, sales);
    }

    #[test]
    fn test_search_is_case_insensitive_over_any_field() {
        let sales = sample();
        let criteria = FilterCriteria::new().with("search", "MARTA");
        let out = filter(&sales, &criteria, &FilterSchema::sales()).unwrap();
        assert_eq!(ids(&out), vec![1, 3]);

        // Matches the numeric id through its text form.
        let criteria = FilterCriteria::new().with("search", "14");
        let out = filter(&sales, &criteria, &FilterSchema::sales()).unwrap();
        assert_eq!(ids(&out), vec![14]);

        // Unicode lowercase.
        let criteria = FilterCriteria::new().with("search", "JOÃO");
        let out = filter(&sales, &criteria, &FilterSchema::sales()).unwrap();
        assert_eq!(ids(&out), vec![2]);
    }

    #[test]
    fn test_long_search_matches_nothing() {
        let sales = sample();
        let criteria = FilterCriteria::new().with("search", "a".repeat(101));
        let out = filter(&sales, &criteria, &FilterSchema::sales()).unwrap();
        assert_eq!(out, vec![]);

        // Length alone never excludes a record that contains the text.
        let mut long = sample();
        long[0].client_id = "x".repeat(150);
        let criteria = FilterCriteria::new().with("search", "X".repeat(120));
        let out = filter(&long, &criteria, &FilterSchema::sales()).unwrap();
        assert_eq!(ids(&out), vec![1]);
    }

    #[test]
    fn test_status_equality_and_sentinel() {
        let sales = sample();
        let criteria = FilterCriteria::new().with("status", "finalizada");
        let out = filter(&sales, &criteria, &FilterSchema::sales()).unwrap();
        assert_eq!(ids(&out), vec![1, 3]);

        let criteria = FilterCriteria::new().with("status", STATUS_ALL);
        let out = filter(&sales, &criteria, &FilterSchema::sales()).unwrap();
        assert_eq!(out.len(), sales.len());

        let custom = FilterSchema::sales_with_sentinel("todos");
        let criteria = FilterCriteria::new().with("status", "todos");
        assert_eq!(filter(&sales, &criteria, &custom).unwrap().len(), sales.len());
    }

    #[test]
    fn test_inclusive_date_bounds() {
        let sales = sample();
        let criteria = FilterCriteria::new()
            .with("dateFrom", "2024-03-05")
            .with("dateTo", "2024-03-09");
        let out = filter(&sales, &criteria, &FilterSchema::sales()).unwrap();
        assert_eq!(ids(&out), vec![2, 3]);
    }

    #[test]
    fn test_malformed_date_is_rejected() {
        let criteria = FilterCriteria::new().with("dateTo", "31/03/2024");
        let empty: Vec<Sale> = Vec::new();
        let result = filter(&empty, &criteria, &FilterSchema::sales());
        assert!(matches!(result, Err(ValidationError::InvalidFormat { .. })));
    }

    #[test]
    fn test_unknown_criteria_do_not_exclude() {
        let sales = sample();
        let criteria = FilterCriteria::new().with("warehouse", "north");
        let out = filter(&sales, &criteria, &FilterSchema::sales()).unwrap();
        assert_eq!(out.len(), sales.len());
    }

    #[test]
    fn test_criteria_combine_with_and() {
        let sales = sample();
        let criteria = FilterCriteria::new()
            .with("search", "marta")
            .with("status", "finalizada")
            .with("dateFrom", "2024-03-03");
        let out = filter(&sales, &criteria, &FilterSchema::sales()).unwrap();
        assert_eq!(ids(&out), vec![3]);
    }

    #[test]
    fn test_filter_refs_borrows_input() {
        let sales = sample();
        let criteria = FilterCriteria::new().with("status", "pendente");
        let out = filter_refs(&sales, &criteria, &FilterSchema::sales()).unwrap();
        assert_eq!(out.len(), 1);
        assert!(std::ptr::eq(out[0], &sales[3]));
    }

    #[test]
    fn test_criteria_set_reports_changes() {
        let mut criteria = FilterCriteria::new();
        assert!(criteria.set("status", "finalizada"));
        assert!(!criteria.set("status", "finalizada"));
        assert!(criteria.set("status", "cancelada"));
        assert!(criteria.set("status", ""));
        assert!(!criteria.set("status", " "));
        assert_eq!(criteria.get("status"), None);
    }

    #[test]
    fn test_sort_records() {
        let sales = sample();
        let by_total = sort_records(&sales, &SortSpec::desc("total"));
        assert_eq!(ids(&by_total), vec![14, 3, 2, 1]);

        // Stable: equal operators (case-insensitive) keep input order.
        let by_operator = sort_records(&sales, &SortSpec::asc("operator"));
        assert_eq!(ids(&by_operator), vec![2, 1, 3, 14]);

        // Unknown field: nothing moves.
        let untouched = sort_records(&sales, &SortSpec::asc("nope"));
        assert_eq!(untouched, sales);
    }

    #[test]
    fn test_sort_spec_parsing() {
        assert_eq!("date".parse::<SortSpec>().unwrap(), SortSpec::asc("date"));
        assert_eq!("total:DESC".parse::<SortSpec>().unwrap(), SortSpec::desc("total"));
        assert!(":desc".parse::<SortSpec>().is_err());
        assert!("total:up".parse::<SortSpec>().is_err());
        assert_eq!(SortSpec::desc("total").to_string(), "total:desc");
    }
}
