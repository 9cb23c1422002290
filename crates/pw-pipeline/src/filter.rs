//! Candidate filter: the deterministic business rules between the two
//! oracle calls.

use std::collections::HashSet;

use pw_protocol::Product;

/// Keep catalog products that are in one of `categories`, have at least
/// `min_stock` units and an average rating of at least `min_rating`.
///
/// Category matching is exact and case-sensitive. Catalog order is preserved,
/// and an empty category list always yields an empty result.
pub fn filter_products(
    catalog: &[Product],
    categories: &[String],
    min_stock: u32,
    min_rating: f64,
) -> Vec<Product> {
    if categories.is_empty() {
        return Vec::new();
    }

    let wanted: HashSet<&str> = categories.iter().map(String::as_str).collect();
    catalog
        .iter()
        .filter(|p| {
            wanted.contains(p.category.as_str())
                && p.stock_quantity >= min_stock
                && p.avg_rating >= min_rating
        })
        .cloned()
        .collect()
}
