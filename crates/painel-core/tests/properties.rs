//! Property tests for the pure list operations.
//!
//! Run with: cargo test -p painel-core --test properties

use chrono::{Days, NaiveDate};
use painel_core::category::{group, reassign, BucketKey};
use painel_core::filter::{filter, FilterCriteria, FilterSchema};
use painel_core::pagination::paginate;
use painel_core::period::{resolve, CustomBounds, PeriodSelector};
use painel_core::{Category, Money, Product, RecordId, Sale, SaleStatus};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
}

fn any_date() -> impl Strategy<Value = NaiveDate> {
    (0u64..3650).prop_map(|offset| base_date() + Days::new(offset))
}

fn any_status() -> impl Strategy<Value = SaleStatus> {
    prop_oneof![
        Just(SaleStatus::Completed),
        Just(SaleStatus::Cancelled),
        Just(SaleStatus::Pending),
    ]
}

fn any_sales() -> impl Strategy<Value = Vec<Sale>> {
    prop::collection::vec(
        (any_date(), "[a-c]{1,3}", "[a-c]{1,3}", 0i64..100_000, any_status()),
        0..40,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (date, client_id, operator, cents, status))| Sale {
                id: RecordId::Number(i as i64 + 1),
                date,
                client_id,
                operator,
                total: Money::from_cents(cents),
                status,
            })
            .collect()
    })
}

fn any_products() -> impl Strategy<Value = Vec<Product>> {
    prop::collection::vec(prop::option::of(0u8..5), 0..30).prop_map(|slots| {
        slots
            .into_iter()
            .enumerate()
            .map(|(i, slot)| Product {
                id: RecordId::Number(i as i64 + 1),
                name: format!("Produto {i}"),
                price: Money::from_cents(100),
                category_id: slot.map(|s| s.to_string()),
            })
            .collect()
    })
}

fn categories() -> Vec<Category> {
    // Ids "0".."2"; products may point at "3" and "4", which do not exist.
    vec![
        Category::new("0", "Bebidas", "blue"),
        Category::new("1", "Doces", "pink"),
        Category::new("2", "Salgados", "orange"),
    ]
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn resolved_ranges_are_ordered(reference in any_date()) {
        for period in [PeriodSelector::Today, PeriodSelector::Week, PeriodSelector::Month] {
            let range = resolve(period, None, reference).unwrap();
            prop_assert!(range.start() <= range.end());
            prop_assert!(range.contains(reference));
        }
    }

    #[test]
    fn custom_range_accepts_exactly_ordered_bounds(a in any_date(), b in any_date()) {
        let bounds = CustomBounds::new(a.to_string(), b.to_string());
        let result = resolve(PeriodSelector::Custom, Some(&bounds), base_date());
        prop_assert_eq!(result.is_ok(), a <= b);
    }

    #[test]
    fn filter_output_is_ordered_subsequence(
        sales in any_sales(),
        search in "[a-c]{0,2}",
        status in prop_oneof![Just("all"), Just("finalizada"), Just("cancelada")],
        from in any_date(),
    ) {
        let criteria = FilterCriteria::new()
            .with("search", search)
            .with("status", status)
            .with("dateFrom", from.to_string());
        let found = filter(&sales, &criteria, &FilterSchema::sales()).unwrap();

        prop_assert!(found.len() <= sales.len());
        let mut cursor = sales.iter();
        for kept in &found {
            prop_assert!(cursor.any(|s| s == kept));
            prop_assert!(kept.date >= from);
        }
    }

    #[test]
    fn unconstrained_filter_returns_input(sales in any_sales()) {
        let criteria = FilterCriteria::new().with("search", "  ").with("status", "all");
        let found = filter(&sales, &criteria, &FilterSchema::sales()).unwrap();
        prop_assert_eq!(found, sales);
    }

    #[test]
    fn pages_respect_bounds(
        len in 0usize..200,
        page_number in -5i64..50,
        page_size in 1usize..40,
    ) {
        let items: Vec<usize> = (0..len).collect();
        let page = paginate(&items, page_number, page_size).unwrap();

        prop_assert!(page.items.len() <= page_size);
        prop_assert!(page.page_number >= 1);
        prop_assert!(page.page_number <= page.total_pages);
        prop_assert_eq!(page.total_pages, len.div_ceil(page_size).max(1));
        prop_assert_eq!(page.total_items, len);
    }

    #[test]
    fn pages_cover_every_item_once(len in 0usize..120, page_size in 1usize..25) {
        let items: Vec<usize> = (0..len).collect();
        let total_pages = paginate(&items, 1, page_size).unwrap().total_pages;

        let mut seen = Vec::with_capacity(len);
        for n in 1..=total_pages {
            seen.extend(paginate(&items, n as i64, page_size).unwrap().items);
        }
        prop_assert_eq!(seen, items);
    }

    #[test]
    fn grouping_partitions_products(products in any_products()) {
        let grouping = group(&products, &categories());

        prop_assert_eq!(grouping.len(), categories().len() + 1);
        prop_assert!(grouping.keys().any(|k| k == BucketKey::Uncategorized));
        prop_assert_eq!(grouping.total_products(), products.len());

        for product in &products {
            let homes = grouping
                .iter()
                .filter(|g| g.members.iter().any(|m| m.id == product.id))
                .count();
            prop_assert_eq!(homes, 1);
        }
    }

    #[test]
    fn reassign_only_touches_target(
        products in any_products(),
        target in 1i64..35,
        new_category in prop::option::of("[0-4]"),
    ) {
        let id = RecordId::Number(target);
        let updated = reassign(&products, &id, new_category.as_deref());

        prop_assert_eq!(updated.len(), products.len());
        for (before, after) in products.iter().zip(updated.iter()) {
            prop_assert_eq!(&before.id, &after.id);
            prop_assert_eq!(&before.name, &after.name);
            if before.id == id {
                prop_assert_eq!(after.category_id.as_deref(), new_category.as_deref());
            } else {
                prop_assert_eq!(&before.category_id, &after.category_id);
            }
        }
    }
}
