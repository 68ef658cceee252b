//! Pure functions over a product list.
//!
//! Nothing here allocates beyond the returned vectors or can fail: missing
//! prices count as zero and missing reference lists as empty.

use std::cmp::Reverse;

use heirloom_core::Product;

use super::state::{FilterState, PriceRange};

/// Lowest upper bound reported for a listing's price slider.
pub const PRICE_FLOOR: u64 = 100_000;

/// Upper bound of the initial price range when there are no products at all.
pub const EMPTY_LISTING_MAX_PRICE: u64 = 5_000;

/// Most products a recency-sorted listing will consider.
pub const MAX_PRODUCTS: usize = 50;

/// Highest product price, never below [`PRICE_FLOOR`].
#[must_use]
pub fn calculate_max_price(products: &[Product]) -> u64 {
    products
        .iter()
        .map(|p| p.price.rupees())
        .fold(PRICE_FLOOR, u64::max)
}

/// Newest first, undated products last, capped at [`MAX_PRODUCTS`].
///
/// The sort is stable, so products with equal timestamps keep their input order.
#[must_use]
pub fn sort_products_by_date(products: &[Product]) -> Vec<Product> {
    let mut sorted = products.to_vec();
    sorted.sort_by_key(|p| Reverse(p.created_millis()));
    sorted.truncate(MAX_PRODUCTS);
    sorted
}

/// Products passing every active filter.
#[must_use]
pub fn filter_products(products: &[Product], filters: &FilterState) -> Vec<Product> {
    let needle = filters.search_text.to_lowercase();
    products
        .iter()
        .filter(|p| matches(p, filters, &needle))
        .cloned()
        .collect()
}

/// `[0, calculate_max_price]`, or `[0, 5000]` for an empty list.
#[must_use]
pub fn initial_price_range(products: &[Product]) -> PriceRange {
    if products.is_empty() {
        return PriceRange::new(0, EMPTY_LISTING_MAX_PRICE);
    }
    PriceRange::new(0, calculate_max_price(products))
}

/// `needle` is the already-lowercased search text.
fn matches(product: &Product, filters: &FilterState, needle: &str) -> bool {
    let search_ok = needle.is_empty() || matches_search(product, needle);

    let category_ok = filters
        .category
        .as_ref()
        .is_none_or(|slug| product.has_category(slug));

    let collection_ok = filters
        .collection
        .as_ref()
        .is_none_or(|slug| product.has_collection(slug));

    let status_ok = filters
        .status
        .is_none_or(|status| product.product_status == status);

    let price_ok = filters.price_range.contains(product.price.rupees());

    search_ok && category_ok && collection_ok && status_ok && price_ok
}

fn matches_search(product: &Product, needle: &str) -> bool {
    product.title.to_lowercase().contains(needle)
        || product
            .categories
            .iter()
            .any(|c| c.name.to_lowercase().contains(needle))
        || product
            .collections
            .iter()
            .any(|c| c.title.to_lowercase().contains(needle))
}
