//! # Category Grouper
//!
//! Partitions the product catalog by category for the grouped products view.
//!
//! ## Grouping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  categories: [Bebidas(1), Doces(2)]                                     │
//! │  products:   Café→1, Bolo→2, Chá→1, Pão→None, Suco→"9" (deleted cat)    │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌───────────────────────────────┐  │
//! │  │ Bebidas (1)  │  │ Doces (2)    │  │ Uncategorized (None)          │  │
//! │  │ Café, Chá    │  │ Bolo         │  │ Pão, Suco                     │  │
//! │  └──────────────┘  └──────────────┘  └───────────────────────────────┘  │
//! │                                                                         │
//! │  • one group per category, in input order, even when empty              │
//! │  • the uncategorized group is always present and always last            │
//! │  • a dangling categoryId is a data-quality issue, never an error        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The grouping is rebuilt from its inputs on every call and owns its data.
//! Member counts are always `members.len()`; no separate counter exists.

use std::borrow::Cow;
use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, warn};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Category, Product, RecordId};

// =============================================================================
// Bucket Key
// =============================================================================

/// Key of a group: a category id or the uncategorized sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BucketKey {
    Category(String),
    Uncategorized,
}

impl BucketKey {
    /// Key for a category id as found on a product or category.
    pub fn from_category_id(id: Option<&str>) -> Self {
        match id {
            Some(id) => BucketKey::Category(id.to_string()),
            None => BucketKey::Uncategorized,
        }
    }
}

// =============================================================================
// Groups
// =============================================================================

/// A category together with the products filed under it.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CategoryGroup {
    pub category: Category,
    pub members: Vec<Product>,
}

impl CategoryGroup {
    fn empty(category: Category) -> Self {
        CategoryGroup {
            category,
            members: Vec::new(),
        }
    }

    pub fn key(&self) -> BucketKey {
        BucketKey::from_category_id(self.category.id.as_deref())
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Sum of member prices.
    pub fn total_value(&self) -> Money {
        self.members.iter().map(|p| p.price).sum()
    }
}

/// The full grouped view: category groups in input order, then the
/// uncategorized group.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CategoryGrouping {
    groups: Vec<CategoryGroup>,
    uncategorized: CategoryGroup,
}

impl CategoryGrouping {
    pub fn get(&self, key: &BucketKey) -> Option<&CategoryGroup> {
        match key {
            BucketKey::Uncategorized => Some(&self.uncategorized),
            BucketKey::Category(id) => self
                .groups
                .iter()
                .find(|g| g.category.id.as_deref() == Some(id.as_str())),
        }
    }

    /// The catch-all group. Always present.
    pub fn uncategorized(&self) -> &CategoryGroup {
        &self.uncategorized
    }

    /// All groups, the uncategorized one last.
    pub fn iter(&self) -> impl Iterator<Item = &CategoryGroup> {
        self.groups.iter().chain(std::iter::once(&self.uncategorized))
    }

    pub fn keys(&self) -> impl Iterator<Item = BucketKey> + '_ {
        self.iter().map(CategoryGroup::key)
    }

    /// Number of groups, including the uncategorized one.
    pub fn len(&self) -> usize {
        self.groups.len() + 1
    }

    /// A grouping is never empty; it always has the uncategorized group.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn total_products(&self) -> usize {
        self.iter().map(CategoryGroup::count).sum()
    }

    /// Flattens into a list, the uncategorized group last.
    pub fn into_groups(self) -> Vec<CategoryGroup> {
        let mut groups = self.groups;
        groups.push(self.uncategorized);
        groups
    }
}

// =============================================================================
// Grouping
// =============================================================================

/// Groups products by category.
///
/// ## Rules
/// - One group per category, in input order; a repeated id keeps its first
///   occurrence
/// - Categories without an id are skipped (that id is reserved for the
///   synthetic bucket)
/// - Products whose category is `None` or unknown go to the uncategorized
///   group
///
/// ## Example
/// ```rust
/// use painel_core::category::{group, BucketKey};
/// use painel_core::{Category, Money, Product, RecordId};
///
/// let categories = vec![Category::new("1", "Bebidas", "blue")];
/// let products = vec![Product {
///     id: RecordId::Number(10),
///     name: "Café".into(),
///     price: Money::from_cents(1200),
///     category_id: Some("404".into()),
/// }];
///
/// let grouping = group(&products, &categories);
/// assert_eq!(grouping.len(), 2);
/// assert_eq!(grouping.get(&BucketKey::Category("1".into())).unwrap().count(), 0);
/// assert_eq!(grouping.uncategorized().count(), 1);
/// ```
pub fn group(products: &[Product], categories: &[Category]) -> CategoryGrouping {
    let mut groups: Vec<CategoryGroup> = Vec::with_capacity(categories.len() + 1);
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(categories.len());

    for category in categories {
        let Some(id) = category.id.as_deref() else {
            warn!(name = %category.name, "Skipping category without id");
            continue;
        };
        if index.contains_key(id) {
            warn!(category_id = id, "Skipping duplicate category");
            continue;
        }
        index.insert(id, groups.len());
        groups.push(CategoryGroup::empty(category.clone()));
    }

    let mut uncategorized = CategoryGroup::empty(Category::uncategorized());

    for product in products {
        let slot = product
            .category_id
            .as_deref()
            .and_then(|id| index.get(id).copied());

        match slot {
            Some(i) => groups[i].members.push(product.clone()),
            None => {
                if let Some(dangling) = product.category_id.as_deref() {
                    debug!(product_id = %product.id, category_id = dangling, "Dangling category reference");
                }
                uncategorized.members.push(product.clone());
            }
        }
    }

    debug!(
        products = products.len(),
        groups = groups.len() + 1,
        "Grouped products by category"
    );
    CategoryGrouping {
        groups,
        uncategorized,
    }
}

// =============================================================================
// Reassignment
// =============================================================================

/// Moves one product to another category (or to none).
///
/// Returns a new list where only the first product with `product_id` has its
/// `category_id` replaced; order and every other field are unchanged. When no
/// product matches, the input itself is returned (`Cow::Borrowed`): the
/// remote system is the source of truth, and a local miss means stale local
/// state, which the caller decides how to surface.
///
/// ## Example
/// ```rust
/// use std::borrow::Cow;
/// use painel_core::category::reassign;
/// use painel_core::{Money, Product, RecordId};
///
/// let products = vec![Product {
///     id: RecordId::Number(1),
///     name: "Café".into(),
///     price: Money::from_cents(1200),
///     category_id: None,
/// }];
///
/// let moved = reassign(&products, &RecordId::Number(1), Some("7"));
/// assert_eq!(moved[0].category_id.as_deref(), Some("7"));
///
/// let missed = reassign(&products, &RecordId::Number(2), Some("7"));
/// assert!(matches!(missed, Cow::Borrowed(_)));
/// ```
pub fn reassign<'a>(
    products: &'a [Product],
    product_id: &RecordId,
    new_category_id: Option<&str>,
) -> Cow<'a, [Product]> {
    let Some(position) = products.iter().position(|p| &p.id == product_id) else {
        debug!(product_id = %product_id, "Reassign target not found, leaving products unchanged");
        return Cow::Borrowed(products);
    };

    let mut updated = products.to_vec();
    updated[position].category_id = new_category_id.map(str::to_string);
    Cow::Owned(updated)
}

// =============================================================================
// Unit Tests
// =============================================================================
