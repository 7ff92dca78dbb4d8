//! `products` and `reassign` subcommands: the category board.

use std::borrow::Cow;

use clap::{Arg, ArgMatches, Command};
use painel_core::category::{group, reassign, CategoryGrouping};
use painel_core::{Category, Product, RecordId};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use super::{to_output, DataDir};
use crate::error::{CliError, CliResult};

pub fn products_command() -> Command {
    Command::new("products").about("Group the product catalog by category")
}

pub fn reassign_command() -> Command {
    Command::new("reassign")
        .about("Move a product to another category and show the new grouping")
        .arg(
            Arg::new("product-id")
                .required(true)
                .value_name("PRODUCT_ID")
                .help("Id of the product to move"),
        )
        .arg(
            Arg::new("category-id")
                .required(true)
                .value_name("CATEGORY_ID")
                .allow_hyphen_values(true)
                .help("Target category id, or 'none' to leave it uncategorized"),
        )
}

/// Loads and checks the product catalog.
fn load_products(data: &DataDir) -> CliResult<Vec<Product>> {
    let products: Vec<Product> = data.load("products")?;
    for product in &products {
        product.validate()?;
    }
    Ok(products)
}

pub fn run_products(data: &DataDir) -> CliResult<Value> {
    let products = load_products(data)?;
    let categories: Vec<Category> = data.load("categories")?;

    let grouping = group(&products, &categories);
    info!(
        products = grouping.total_products(),
        uncategorized = grouping.uncategorized().count(),
        "Products grouped"
    );
    to_output(&grouping)
}

/// What `reassign` prints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReassignView {
    pub changed: bool,
    pub products: Vec<Product>,
    pub grouping: CategoryGrouping,
}

/// Reads `<product-id> <category-id|none>`.
pub fn reassign_target(m: &ArgMatches) -> CliResult<(RecordId, Option<String>)> {
    let (Some(product), Some(category)) = (
        m.get_one::<String>("product-id"),
        m.get_one::<String>("category-id"),
    ) else {
        return Err(CliError::usage("reassign needs <product-id> <category-id|none>"));
    };

    let target = match category.trim() {
        "" | "none" => None,
        id => Some(id.to_string()),
    };
    Ok((RecordId::parse(product), target))
}

/// Applies the reassignment to already-loaded data.
pub fn reassign_view(
    products: &[Product],
    categories: &[Category],
    product_id: &RecordId,
    category_id: Option<&str>,
) -> ReassignView {
    let updated = reassign(products, product_id, category_id);
    let changed = matches!(updated, Cow::Owned(_));
    if !changed {
        warn!(product_id = %product_id, "No product with this id, nothing reassigned");
    }

    let grouping = group(&updated, categories);
    ReassignView {
        changed,
        products: updated.into_owned(),
        grouping,
    }
}

pub fn run_reassign(m: &ArgMatches, data: &DataDir) -> CliResult<Value> {
    let (product_id, category_id) = reassign_target(m)?;
    let products = load_products(data)?;
    let categories: Vec<Category> = data.load("categories")?;

    to_output(&reassign_view(
        &products,
        &categories,
        &product_id,
        category_id.as_deref(),
    ))
}

#[cfg(test)]
mod tests {
    use super::super::build_cli;
    use super::super::test_support::{data_dir, sub_matches};
    use super::*;
    use painel_core::category::BucketKey;
    use serde_json::json;

    fn files() -> Vec<(&'static str, serde_json::Value)> {
        vec![
            (
                "products",
                json!([
                    { "id": 1, "name": "Café", "price": 12.0, "categoryId": "1" },
                    { "id": 2, "name": "Bolo", "price": "8.50" },
                    { "id": 3, "name": "Suco", "price": 6, "categoryId": "42" }
                ]),
            ),
            (
                "categories",
                json!([
                    { "id": "1", "name": "Bebidas", "colorTag": "blue" },
                    { "id": "2", "name": "Doces", "colorTag": "pink" }
                ]),
            ),
        ]
    }

    #[test]
    fn test_products_grouped() {
        let dir = data_dir(&files());
        let out = run_products(&DataDir::new(dir.path())).unwrap();

        let groups = out["groups"].as_array().unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0]["members"].as_array().unwrap().len(), 1);
        assert_eq!(out["uncategorized"]["category"]["name"], "Uncategorized");
        assert_eq!(out["uncategorized"]["members"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_reassign_target() {
        let m = sub_matches(&["painel", "reassign", "7", "none"]);
        let (id, target) = reassign_target(&m).unwrap();
        assert_eq!(id, RecordId::Number(7));
        assert_eq!(target, None);

        let m = sub_matches(&["painel", "reassign", "sku-9", "2"]);
        let (id, target) = reassign_target(&m).unwrap();
        assert_eq!(id, RecordId::Text("sku-9".into()));
        assert_eq!(target.as_deref(), Some("2"));

        assert!(build_cli()
            .try_get_matches_from(["painel", "reassign", "7"])
            .is_err());
        assert!(build_cli()
            .try_get_matches_from(["painel", "products", "extra"])
            .is_err());
    }

    #[test]
    fn test_reassign_moves_product() {
        let dir = data_dir(&files());
        let out = run_reassign(
            &sub_matches(&["painel", "reassign", "2", "2"]),
            &DataDir::new(dir.path()),
        ).unwrap();

        assert_eq!(out["changed"], true);
        assert_eq!(out["products"][1]["categoryId"], "2");
        assert_eq!(out["grouping"]["uncategorized"]["members"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_reassign_miss_is_reported_not_failed() {
        let products: Vec<Product> = serde_json::from_value(files()[0].1.clone()).unwrap();
        let view = reassign_view(&products, &[], &RecordId::Number(99), Some("1"));
        assert!(!view.changed);
        assert_eq!(view.products, products);
        assert_eq!(view.grouping.get(&BucketKey::Uncategorized).unwrap().count(), 3);
    }
}
