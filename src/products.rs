use serde_json::Value;
use std::collections::HashMap;

use crate::{
    entities::Product,
    util::{first_count, first_number, non_empty_label},
};

/// Joins a games statistic with a product-name list, keyed by `asin`.
///
/// Returns `None` when `stats` is not an array yet (still loading or failed).
/// Output keeps the order of `stats`. When `names` repeats an identifier the
/// last entry wins. Display name falls back to the row's own `name`, then to
/// the identifier.
///
/// Field priority: `review_count` then `reviews`; `avg_rating` then `rating`;
/// `rating` then `avg_rating`.
pub fn combine(stats: Option<&Value>, names: Option<&Value>) -> Option<Vec<Product>> {
    let stats = stats?.as_array()?;

    let mut lookup = HashMap::new();
    if let Some(names) = names.and_then(Value::as_array) {
        for row in names {
            if let (Some(asin), Some(name)) = (
                non_empty_label(row, "asin"),
                non_empty_label(row, "product_name"),
            ) {
                lookup.insert(asin, name);
            }
        }
    }

    let products = stats
        .iter()
        .map(|row| {
            let asin = non_empty_label(row, "asin").unwrap_or_default();
            let product_name = lookup
                .get(&asin)
                .cloned()
                .or_else(|| non_empty_label(row, "name"))
                .or_else(|| (!asin.is_empty()).then(|| asin.clone()));

            Product {
                product_name,
                review_count: first_count(row, &["review_count", "reviews"]),
                avg_rating: first_number(row, &["avg_rating", "rating"]),
                rating: first_number(row, &["rating", "avg_rating"]),
                asin,
            }
        })
        .collect();

    Some(products)
}
