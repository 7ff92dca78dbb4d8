//! # Optimistic Updates
//!
//! Folds a successful create/update/delete response into the collection the
//! dashboard already holds, instead of re-fetching the whole list.
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  User edits product ──► PUT /products/7 ──► 200 { full product }        │
//! │                                                │                        │
//! │                                                ▼                        │
//! │                         decode_mutation_response::<Product>()           │
//! │                         (missing key → ValidationError)                 │
//! │                                                │                        │
//! │                                                ▼                        │
//! │                         apply_updated(&products, updated)               │
//! │                         → new list, item 7 replaced in place            │
//! │                                                                         │
//! │  POST   → apply_created   (append, or replace if the id is known)       │
//! │  DELETE → apply_deleted   (drop by id)                                  │
//! │  A miss on update/delete returns the input unchanged (Cow::Borrowed).   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::borrow::Cow;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::{CoreResult, ValidationError};
use crate::types::{Category, Product, Record, RecordId, Sale};

fn position_of<T: Record>(items: &[T], id: &RecordId) -> Option<usize> {
    items
        .iter()
        .position(|item| item.record_id().as_ref() == Some(id))
}

/// Adds a created record to the list.
///
/// If a record with the same id is already present (the list was refreshed
/// between the request and the response), it is replaced in place instead of
/// duplicated.
pub fn apply_created<T: Record + Clone>(items: &[T], created: T) -> Vec<T> {
    let mut updated = items.to_vec();

    match created.record_id().and_then(|id| position_of(items, &id)) {
        Some(position) => updated[position] = created,
        None => updated.push(created),
    }

    updated
}

/// Replaces the record with the same id as `updated`.
///
/// Returns the input itself when no record matches, leaving the caller to
/// decide whether the miss matters.
pub fn apply_updated<T: Record + Clone>(items: &[T], updated: T) -> Cow<'_, [T]> {
    let Some(id) = updated.record_id() else {
        debug!("Update response carries no id, leaving list unchanged");
        return Cow::Borrowed(items);
    };

    let Some(position) = position_of(items, &id) else {
        debug!(id = %id, "Updated record not in local list");
        return Cow::Borrowed(items);
    };

    let mut list = items.to_vec();
    list[position] = updated;
    Cow::Owned(list)
}

/// Removes the record with `id`.
///
/// Returns the input itself when no record matches.
pub fn apply_deleted<'a, T: Record + Clone>(items: &'a [T], id: &RecordId) -> Cow<'a, [T]> {
    if position_of(items, id).is_none() {
        debug!(id = %id, "Deleted record not in local list");
        return Cow::Borrowed(items);
    }

    Cow::Owned(
        items
            .iter()
            .filter(|item| item.record_id().as_ref() != Some(id))
            .cloned()
            .collect(),
    )
}

// =============================================================================
// Response Decoding
// =============================================================================

/// Keys a create/update response must carry for the entity to be trusted.
///
/// A key may hold `null` where the type allows it; it may not be absent.
/// List payloads are not checked, so `#[serde(default)]` still applies there.
pub trait ResponseFields {
    const REQUIRED: &'static [&'static str];
}

impl ResponseFields for Product {
    const REQUIRED: &'static [&'static str] = &["id", "name", "price", "categoryId"];
}

impl ResponseFields for Sale {
    const REQUIRED: &'static [&'static str] =
        &["id", "date", "clientId", "operator", "total", "status"];
}

impl ResponseFields for Category {
    const REQUIRED: &'static [&'static str] = &["id", "name", "colorTag"];
}

/// Decodes the entity returned by a create/update call.
///
/// The remote API is expected to echo the full entity. A body that lacks a
/// key from [`ResponseFields::REQUIRED`] is `Required`, and a value of the
/// wrong shape is `InvalidFormat`, rather than a silently half-updated row.
///
/// ## Example
/// ```rust
/// use painel_core::mutation::decode_mutation_response;
/// use painel_core::{Product, ValidationError};
/// use serde_json::json;
///
/// let partial = json!({ "id": 7, "name": "Café" });
/// let err = decode_mutation_response::<Product>(partial).unwrap_err();
/// assert_eq!(err, ValidationError::Required { field: "price".into() });
/// ```
pub fn decode_mutation_response<T>(body: Value) -> CoreResult<T>
where
    T: DeserializeOwned + ResponseFields,
{
    let Some(object) = body.as_object() else {
        return Err(ValidationError::invalid_format(
            "response",
            "expected a JSON object",
        ));
    };

    if let Some(missing) = T::REQUIRED.iter().find(|key| !object.contains_key(**key)) {
        debug!(field = *missing, "Mutation response is missing a field");
        return Err(ValidationError::required(*missing));
    }

    serde_json::from_value(body)
        .map_err(|e| ValidationError::invalid_format("response", e.to_string()))
}

/// Decodes a product response and checks the product invariants.
pub fn decode_product_response(body: Value) -> CoreResult<Product> {
    let product: Product = decode_mutation_response(body)?;
    product.validate()?;
    Ok(product)
}

// =============================================================================
// Unit Tests
// =============================================================================
