//! # Paginator
//!
//! Slices a (filtered) list into fixed-size pages.
//!
//! ## Boundary-Tolerant Navigation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  12 items, page size 10 → 2 pages                                       │
//! │                                                                         │
//! │  requested  0 ──► page 1   items 1..=10                                 │
//! │  requested  1 ──► page 1   items 1..=10                                 │
//! │  requested  2 ──► page 2   items 11..=12                                │
//! │  requested 99 ──► page 2   items 11..=12   (clamped, never an error)    │
//! │                                                                         │
//! │  0 items → 1 page, page 1, no items                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Caller Duty: Reset On Filter Change
//! The paginator is stateless. Whenever the filter criteria change, the
//! caller MUST request page 1 again. Keeping the old page number would
//! silently clamp to the last page of the new result, which is not where a
//! user expects to land. [`PageRequest`] does this bookkeeping for callers
//! that hold their list state in one value.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::error::CoreResult;
use crate::filter::FilterCriteria;
use crate::validation::validate_page_size;
use crate::DEFAULT_PAGE_SIZE;

// =============================================================================
// Page
// =============================================================================

/// One page of a list plus the metadata the pagination controls need.
///
/// ## Invariants
/// - `total_pages = max(ceil(total_items / page_size), 1)`
/// - `1 <= page_number <= total_pages`
/// - `items.len() <= page_size`
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_number: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    #[inline]
    pub fn has_previous(&self) -> bool {
        self.page_number > 1
    }

    #[inline]
    pub fn has_next(&self) -> bool {
        self.page_number < self.total_pages
    }

    /// Page number the "previous" button leads to (stays on page 1).
    pub fn previous_page(&self) -> usize {
        self.page_number.saturating_sub(1).max(1)
    }

    /// Page number the "next" button leads to (stays on the last page).
    pub fn next_page(&self) -> usize {
        (self.page_number + 1).min(self.total_pages)
    }

    /// 1-based position of the first item on this page, 0 when empty.
    pub fn first_item_index(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.page_number - 1) * self.page_size + 1
        }
    }

    /// 1-based position of the last item on this page, 0 when empty.
    pub fn last_item_index(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            self.first_item_index() + self.items.len() - 1
        }
    }

    /// Maps the items while keeping the page metadata.
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page_number: self.page_number,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

// =============================================================================
// Pagination
// =============================================================================

/// Returns the requested page of `items`.
///
/// `page_number` is clamped into `[1, total_pages]`, so any integer is
/// accepted.
///
/// ## Errors
/// `ValidationError` when `page_size` is zero or above `MAX_PAGE_SIZE`.
///
/// ## Example
/// ```rust
/// use painel_core::pagination::paginate;
///
/// let items: Vec<u32> = (1..=12).collect();
/// let page = paginate(&items, 2, 10).unwrap();
/// assert_eq!(page.items, vec![11, 12]);
/// assert_eq!(page.total_pages, 2);
///
/// let empty: Vec<u32> = Vec::new();
/// let page = paginate(&empty, 5, 10).unwrap();
/// assert_eq!((page.page_number, page.total_pages), (1, 1));
/// ```
pub fn paginate<T: Clone>(items: &[T], page_number: i64, page_size: usize) -> CoreResult<Page<T>> {
    validate_page_size(page_size)?;

    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size).max(1);

    let effective = clamp_page(page_number, total_pages);
    if effective as i64 != page_number {
        debug!(requested = page_number, effective, total_pages, "Clamped page number");
    }

    let start = ((effective - 1) * page_size).min(total_items);
    let end = (start + page_size).min(total_items);

    Ok(Page {
        items: items[start..end].to_vec(),
        page_number: effective,
        page_size,
        total_items,
        total_pages,
    })
}

fn clamp_page(requested: i64, total_pages: usize) -> usize {
    if requested < 1 {
        return 1;
    }
    usize::try_from(requested)
        .unwrap_or(usize::MAX)
        .min(total_pages)
}

// =============================================================================
// Page Request
// =============================================================================

/// A list view's filter + page state, owned by the caller.
///
/// Changing the criteria through this type always resets the page number to
/// 1; changing them to the same values does not.
///
/// ## Example
/// ```rust
/// use painel_core::pagination::PageRequest;
///
/// let mut request = PageRequest::new(10);
/// request.go_to_page(3);
/// request.set_criterion("status", "cancelada");
/// assert_eq!(request.page_number(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    criteria: FilterCriteria,
    page_number: i64,
    page_size: usize,
}

impl PageRequest {
    pub fn new(page_size: usize) -> Self {
        PageRequest {
            criteria: FilterCriteria::new(),
            page_number: 1,
            page_size,
        }
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn page_number(&self) -> i64 {
        self.page_number
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Updates one criterion; resets to page 1 if the value changed.
    pub fn set_criterion(&mut self, name: impl Into<String>, value: impl Into<String>) -> bool {
        let changed = self.criteria.set(name, value);
        if changed {
            self.page_number = 1;
        }
        changed
    }

    /// Replaces all criteria; resets to page 1 if they differ.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) -> bool {
        let changed = self.criteria != criteria;
        if changed {
            self.criteria = criteria;
            self.page_number = 1;
        }
        changed
    }

    /// Changing the page size also restarts at page 1.
    pub fn set_page_size(&mut self, page_size: usize) {
        if self.page_size != page_size {
            self.page_size = page_size;
            self.page_number = 1;
        }
    }

    pub fn go_to_page(&mut self, page_number: i64) {
        self.page_number = page_number;
    }

    /// Adopts the effective page number of a page that was served, so the
    /// next "previous"/"next" starts from a valid position.
    pub fn sync_with<T>(&mut self, page: &Page<T>) {
        self.page_number = page.page_number as i64;
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        PageRequest::new(DEFAULT_PAGE_SIZE)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
