//! # Domain Types
//!
//! Record and entity types the dashboard receives from the remote API.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │                     trait Record                                        │
//! │            record_id() + field(name) -> FieldValue                      │
//! │                          │                                              │
//! │        ┌─────────────────┼──────────────────┐                           │
//! │        ▼                 ▼                  ▼                           │
//! │  ┌────────────┐   ┌─────────────┐   ┌──────────────┐                    │
//! │  │    Sale    │   │   Product   │   │  JsonRecord  │                    │
//! │  │ ────────── │   │ ─────────── │   │ ──────────── │                    │
//! │  │ id         │   │ id          │   │ any JSON     │                    │
//! │  │ date       │   │ name        │   │ object       │                    │
//! │  │ clientId   │   │ price       │   │ (goals,      │                    │
//! │  │ operator   │   │ categoryId ─┼─┐ │ transactions)│                    │
//! │  │ total      │   └─────────────┘ │ └──────────────┘                    │
//! │  │ status     │                   ▼                                     │
//! │  └────────────┘            ┌─────────────┐                              │
//! │                            │  Category   │  id = None → uncategorized   │
//! │                            └─────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Field Names
//! `Record::field` uses the wire names of the remote JSON (`clientId`,
//! `categoryId`), so the same filter schema works on typed and untyped
//! records.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use ts_rs::TS;

use crate::money::Money;
use crate::validation::{parse_date, validate_name, validate_price, ValidationResult};
use crate::{UNCATEGORIZED_COLOR, UNCATEGORIZED_NAME};

// =============================================================================
// Record Identity
// =============================================================================

/// Immutable identity of a remote record: numeric or string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl RecordId {
    /// Parses user input: integers become `Number`, anything else `Text`.
    ///
    /// ```rust
    /// use painel_core::RecordId;
    ///
    /// assert_eq!(RecordId::parse("42"), RecordId::Number(42));
    /// assert_eq!(RecordId::parse("VEN-42"), RecordId::Text("VEN-42".into()));
    /// ```
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        match input.parse::<i64>() {
            Ok(n) => RecordId::Number(n),
            Err(_) => RecordId::Text(input.to_string()),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        RecordId::Number(n)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId::Text(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        RecordId::Text(s)
    }
}

// =============================================================================
// Field Values
// =============================================================================

/// A single field read from a [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    Text(Cow<'a, str>),
    Integer(i64),
    Float(f64),
    Money(Money),
    Date(NaiveDate),
}

impl<'a> FieldValue<'a> {
    /// Text rendering used by substring and equality predicates.
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Text(s) => Cow::Borrowed(s.as_ref()),
            FieldValue::Integer(n) => Cow::Owned(n.to_string()),
            FieldValue::Float(f) => Cow::Owned(f.to_string()),
            FieldValue::Money(m) => Cow::Owned(m.to_decimal_string()),
            FieldValue::Date(d) => Cow::Owned(d.format("%Y-%m-%d").to_string()),
        }
    }

    /// Date-only view of the value. Text is parsed leniently; anything
    /// unparseable is `None`.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(d) => Some(*d),
            FieldValue::Text(s) => parse_date("field", s).ok(),
            _ => None,
        }
    }

    fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(n) => Some(*n as f64),
            FieldValue::Float(f) => Some(*f),
            FieldValue::Money(m) => Some(m.as_major_f64()),
            _ => None,
        }
    }

    /// Ordering used by the sorter.
    ///
    /// Same-kind values compare natively, numbers compare across kinds, and
    /// anything else falls back to case-insensitive text.
    pub fn sort_cmp(&self, other: &FieldValue<'_>) -> Ordering {
        match (self, other) {
            (FieldValue::Money(a), FieldValue::Money(b)) => a.cmp(b),
            (FieldValue::Integer(a), FieldValue::Integer(b)) => a.cmp(b),
            (FieldValue::Date(a), FieldValue::Date(b)) => a.cmp(b),
            _ => match (self.as_number(), other.as_number()) {
                (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
                _ => self
                    .to_text()
                    .to_lowercase()
                    .cmp(&other.to_text().to_lowercase()),
            },
        }
    }
}

// =============================================================================
// Record Trait
// =============================================================================

/// Anything the filter engine, sorter and optimistic updates can work on.
pub trait Record {
    /// Identity of the record, if it has one.
    fn record_id(&self) -> Option<RecordId>;

    /// Reads a field by its wire name. Missing and null fields are `None`.
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;
}

impl<R: Record + ?Sized> Record for &R {
    fn record_id(&self) -> Option<RecordId> {
        (**self).record_id()
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        (**self).field(name)
    }
}

// =============================================================================
// JSON Record
// =============================================================================

/// An untyped remote record (a JSON object).
///
/// Used for collections the core does not model field-by-field, such as
/// goals and transactions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsonRecord(pub Map<String, Value>);

impl JsonRecord {
    /// Wraps a JSON value, returning `None` unless it is an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(JsonRecord(map)),
            _ => None,
        }
    }
}

impl Record for JsonRecord {
    fn record_id(&self) -> Option<RecordId> {
        match self.0.get("id")? {
            Value::Number(n) => n.as_i64().map(RecordId::Number),
            Value::String(s) => Some(RecordId::Text(s.clone())),
            _ => None,
        }
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match self.0.get(name)? {
            Value::String(s) => Some(FieldValue::Text(Cow::Borrowed(s.as_str()))),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Some(FieldValue::Integer(i)),
                None => n.as_f64().map(FieldValue::Float),
            },
            Value::Bool(b) => Some(FieldValue::Text(Cow::Owned(b.to_string()))),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}

// =============================================================================
// Sale Status
// =============================================================================

/// Status of a sale as reported by the remote API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum SaleStatus {
    /// Paid and closed.
    #[serde(rename = "finalizada")]
    Completed,
    /// Cancelled or refunded.
    #[serde(rename = "cancelada")]
    Cancelled,
    /// Opened but not yet closed.
    #[serde(rename = "pendente")]
    Pending,
}

impl SaleStatus {
    /// Wire name of the status.
    pub const fn as_str(&self) -> &'static str {
        match self {
            SaleStatus::Completed => "finalizada",
            SaleStatus::Cancelled => "cancelada",
            SaleStatus::Pending => "pendente",
        }
    }
}

impl fmt::Display for SaleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A sale record from the sales listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Sale {
    pub id: RecordId,

    /// Calendar date of the sale. Timestamps are truncated on the way in.
    #[serde(deserialize_with = "deserialize_date_only")]
    #[ts(as = "String")]
    pub date: NaiveDate,

    pub client_id: String,

    /// Name of the operator (cashier) who rang up the sale.
    pub operator: String,

    #[ts(type = "number")]
    pub total: Money,

    pub status: SaleStatus,
}

impl Record for Sale {
    fn record_id(&self) -> Option<RecordId> {
        Some(self.id.clone())
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(match &self.id {
                RecordId::Number(n) => FieldValue::Integer(*n),
                RecordId::Text(s) => FieldValue::Text(Cow::Borrowed(s.as_str())),
            }),
            "date" => Some(FieldValue::Date(self.date)),
            "clientId" => Some(FieldValue::Text(Cow::Borrowed(self.client_id.as_str()))),
            "operator" => Some(FieldValue::Text(Cow::Borrowed(self.operator.as_str()))),
            "total" => Some(FieldValue::Money(self.total)),
            "status" => Some(FieldValue::Text(Cow::Borrowed(self.status.as_str()))),
            _ => None,
        }
    }
}

/// Footer totals for a list of sales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SalesSummary {
    pub count: usize,
    pub completed: usize,
    pub cancelled: usize,
    /// Sum of completed sales only.
    #[ts(type = "number")]
    pub gross_total: Money,
}

impl SalesSummary {
    /// Summarizes a list of sales.
    pub fn from_sales<'a, I>(sales: I) -> Self
    where
        I: IntoIterator<Item = &'a Sale>,
    {
        sales.into_iter().fold(SalesSummary::default(), |mut acc, sale| {
            acc.count += 1;
            match sale.status {
                SaleStatus::Completed => {
                    acc.completed += 1;
                    acc.gross_total += sale.total;
                }
                SaleStatus::Cancelled => acc.cancelled += 1,
                SaleStatus::Pending => {}
            }
            acc
        })
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    pub id: RecordId,

    pub name: String,

    /// Unit price, never negative.
    #[ts(type = "number")]
    pub price: Money,

    /// Category this product is filed under. `None` or an id that matches no
    /// known category lands the product in the uncategorized bucket.
    #[serde(default)]
    pub category_id: Option<String>,
}

impl Product {
    /// Checks the invariants the remote API is trusted to uphold: a
    /// non-blank name and a non-negative price.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_name("name", &self.name)?;
        validate_price(self.price)
    }
}

impl Record for Product {
    fn record_id(&self) -> Option<RecordId> {
        Some(self.id.clone())
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(match &self.id {
                RecordId::Number(n) => FieldValue::Integer(*n),
                RecordId::Text(s) => FieldValue::Text(Cow::Borrowed(s.as_str())),
            }),
            "name" => Some(FieldValue::Text(Cow::Borrowed(self.name.as_str()))),
            "price" => Some(FieldValue::Money(self.price)),
            "categoryId" => self
                .category_id
                .as_deref()
                .map(|c| FieldValue::Text(Cow::Borrowed(c))),
            _ => None,
        }
    }
}

// =============================================================================
// Category
// =============================================================================

/// A product category.
///
/// `id = None` is reserved for the synthetic uncategorized bucket built by
/// the grouper; remote categories always carry an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Category {
    pub id: Option<String>,
    pub name: String,
    pub color_tag: String,
}

impl Category {
    /// Creates a remote category.
    pub fn new(id: impl Into<String>, name: impl Into<String>, color_tag: impl Into<String>) -> Self {
        Category {
            id: Some(id.into()),
            name: name.into(),
            color_tag: color_tag.into(),
        }
    }

    /// The synthetic catch-all category.
    pub fn uncategorized() -> Self {
        Category {
            id: None,
            name: UNCATEGORIZED_NAME.to_string(),
            color_tag: UNCATEGORIZED_COLOR.to_string(),
        }
    }

    /// Checks if this is the synthetic catch-all category.
    #[inline]
    pub fn is_uncategorized(&self) -> bool {
        self.id.is_none()
    }
}

// =============================================================================
// Serde Helpers
// =============================================================================

fn deserialize_date_only<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date("date", &raw).map_err(serde::de::Error::custom)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_id_untagged() {
        let n: RecordId = serde_json::from_value(json!(7)).unwrap();
        assert_eq!(n, RecordId::Number(7));

        let s: RecordId = serde_json::from_value(json!("abc")).unwrap();
        assert_eq!(s, RecordId::Text("abc".into()));
        assert_eq!(s.to_string(), "abc");
    }

    #[test]
    fn test_sale_from_remote_json() {
        let sale: Sale = serde_json::from_value(json!({
            "id": 101,
            "date": "2024-03-05T14:30:00",
            "clientId": "C-77",
            "operator": "Marta",
            "total": 150.5,
            "status": "finalizada"
        }))
        .unwrap();

        assert_eq!(sale.date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(sale.total.cents(), 15050);
        assert_eq!(sale.status, SaleStatus::Completed);
        assert_eq!(sale.field("clientId").unwrap().to_text(), "C-77");
        assert_eq!(sale.field("id").unwrap().to_text(), "101");
        assert!(sale.field("unknown").is_none());
    }

    #[test]
    fn test_sale_rejects_unknown_status() {
        let result = serde_json::from_value::<Sale>(json!({
            "id": 1,
            "date": "2024-03-05",
            "clientId": "C",
            "operator": "O",
            "total": 1,
            "status": "estornada"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_product_category_defaults_to_none() {
        let product: Product =
            serde_json::from_value(json!({ "id": "p1", "name": "Café", "price": "12.00" })).unwrap();
        assert_eq!(product.category_id, None);
        assert!(product.field("categoryId").is_none());
        assert!(product.validate().is_ok());

        let negative = Product {
            price: Money::from_cents(-1),
            ..product
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_json_record_fields() {
        let record = JsonRecord::from_value(json!({
            "id": "g-1",
            "title": "Meta de março",
            "target": 5000,
            "progress": 0.42,
            "done": false,
            "notes": null
        }))
        .unwrap();

        assert_eq!(record.record_id(), Some(RecordId::Text("g-1".into())));
        assert_eq!(record.field("target"), Some(FieldValue::Integer(5000)));
        assert_eq!(record.field("progress"), Some(FieldValue::Float(0.42)));
        assert_eq!(record.field("done").unwrap().to_text(), "false");
        assert!(record.field("notes").is_none());
        assert!(JsonRecord::from_value(json!([1, 2])).is_none());
    }

    #[test]
    fn test_field_value_sort_cmp() {
        let a = FieldValue::Money(Money::from_cents(100));
        let b = FieldValue::Float(2.5);
        assert_eq!(a.sort_cmp(&b), Ordering::Less);

        let x = FieldValue::Text(Cow::Borrowed("beta"));
        let y = FieldValue::Text(Cow::Borrowed("Alpha"));
        assert_eq!(x.sort_cmp(&y), Ordering::Greater);
    }

    #[test]
    fn test_sales_summary() {
        let base = Sale {
            id: RecordId::Number(1),
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            client_id: "C".into(),
            operator: "O".into(),
            total: Money::from_cents(1000),
            status: SaleStatus::Completed,
        };
        let cancelled = Sale {
            id: RecordId::Number(2),
            status: SaleStatus::Cancelled,
            ..base.clone()
        };

        let summary = SalesSummary::from_sales(&[base.clone(), base, cancelled]);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.completed, 2);
        assert_eq!(summary.cancelled, 1);
        assert_eq!(summary.gross_total.cents(), 2000);
    }

    #[test]
    fn test_uncategorized_category() {
        let c = Category::uncategorized();
        assert!(c.is_uncategorized());
        assert_eq!(c.name, UNCATEGORIZED_NAME);
        assert!(!Category::new("1", "Bebidas", "blue").is_uncategorized());
    }
}
