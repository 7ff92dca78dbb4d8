//! # painel-core: Client-Side Data Logic for the Admin Dashboard
//!
//! This crate holds everything the dashboard does to data *after* it arrives
//! from the remote API and *before* it is rendered. Every function is pure:
//! the current date is a parameter, never read from the clock.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Painel Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                Frontend / painel-cli                            │   │
//! │  │   Sales table ──► Products board ──► Charts ──► Period picker   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ records (JSON) + user criteria         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ painel-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌────────────┐ ┌──────────────┐    │   │
//! │  │   │  period  │ │  filter  │ │ pagination │ │   category   │    │   │
//! │  │   │DateRange │ │ Criteria │ │    Page    │ │   Grouping   │    │   │
//! │  │   └──────────┘ └──────────┘ └────────────┘ └──────────────┘    │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌────────────┐ ┌──────────────┐    │   │
//! │  │   │  types   │ │  money   │ │  mutation  │ │    series    │    │   │
//! │  │   │Sale,Prod │ │  Money   │ │ apply_*()  │ │ ChartSeries  │    │   │
//! │  │   └──────────┘ └──────────┘ └────────────┘ └──────────────┘    │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO NETWORK • PURE FUNCTIONS               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                ▲                                        │
//! │  ┌─────────────────────────────┴───────────────────────────────────┐   │
//! │  │              Remote REST API (sales, products, ...)             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`period`] - Period selector → concrete date range
//! - [`filter`] - Criteria-driven record filtering and sorting
//! - [`pagination`] - Page slicing with clamped navigation
//! - [`category`] - Grouping products into category buckets
//! - [`mutation`] - Folding create/update/delete responses into local lists
//! - [`series`] - Chart series with an explicit "no data" state
//! - [`types`] - Domain records (Sale, Product, Category) and the `Record` trait
//! - [`money`] - Money in integer cents
//! - [`error`] / [`validation`] - `ValidationError` and the checks that raise it
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use painel_core::filter::{filter, FilterCriteria, FilterSchema};
//! use painel_core::pagination::paginate;
//! use painel_core::period::{resolve, PeriodSelector};
//! use painel_core::{Money, RecordId, Sale, SaleStatus};
//!
//! let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
//! let month = resolve(PeriodSelector::Month, None, today).unwrap();
//!
//! let sales: Vec<Sale> = (1..=12)
//!     .map(|day| Sale {
//!         id: RecordId::Number(day),
//!         date: NaiveDate::from_ymd_opt(2024, 3, day as u32).unwrap(),
//!         client_id: format!("C-{day}"),
//!         operator: "ana".into(),
//!         total: Money::from_cents(1_000),
//!         status: SaleStatus::Completed,
//!     })
//!     .collect();
//!
//! let criteria = FilterCriteria::new()
//!     .with("status", "finalizada")
//!     .with("dateFrom", month.start().to_string())
//!     .with("dateTo", month.end().to_string());
//!
//! let visible = filter(&sales, &criteria, &FilterSchema::sales()).unwrap();
//! let page = paginate(&visible, 1, 10).unwrap();
//! assert_eq!(page.items.len(), 10);
//! assert_eq!(page.total_pages, 2);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod category;
pub mod error;
pub mod filter;
pub mod money;
pub mod mutation;
pub mod pagination;
pub mod period;
pub mod series;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Rows per page when the caller does not choose.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Largest page size accepted by [`pagination::paginate`].
pub const MAX_PAGE_SIZE: usize = 500;

/// Status filter value meaning "do not filter by status".
pub const STATUS_ALL: &str = "all";

/// Display name of the bucket for products without a (known) category.
pub const UNCATEGORIZED_NAME: &str = "Uncategorized";

/// Color tag of the uncategorized bucket.
pub const UNCATEGORIZED_COLOR: &str = "gray";
