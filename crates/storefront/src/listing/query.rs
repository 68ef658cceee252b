//! Query-string codec for filter state.
//!
//! `decode` and `encode` are pure and inverse on canonical input: a shared
//! link reproduces the same listing. Parameters equal to their default are
//! left out so every view has exactly one canonical URL.

use heirloom_core::{CategorySlug, CollectionSlug};
use url::form_urlencoded;

use super::state::{FilterState, PriceRange};

pub const PARAM_SEARCH: &str = "q";
pub const PARAM_CATEGORY: &str = "category";
pub const PARAM_COLLECTION: &str = "collection";
pub const PARAM_STATUS: &str = "status";
pub const PARAM_MIN_PRICE: &str = "minPrice";
pub const PARAM_MAX_PRICE: &str = "maxPrice";

/// Parse a query string into filter state.
///
/// A leading `?` is accepted. Unknown parameters are ignored and malformed
/// values fall back to their defaults. When a parameter repeats, the last
/// occurrence wins.
#[must_use]
pub fn decode(query: &str, bounds: PriceRange) -> FilterState {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut state = FilterState::with_bounds(bounds);
    let mut min = bounds.min();
    let mut max = bounds.max();

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            PARAM_SEARCH => state.search_text = value.into_owned(),
            PARAM_CATEGORY => {
                state.category = non_empty(&value).map(CategorySlug::new);
            }
            PARAM_COLLECTION => {
                state.collection = non_empty(&value).map(CollectionSlug::new);
            }
            PARAM_STATUS => state.status = value.parse().ok(),
            PARAM_MIN_PRICE => min = parse_price(&value).unwrap_or(bounds.min()),
            PARAM_MAX_PRICE => max = parse_price(&value).unwrap_or(bounds.max()),
            _ => {}
        }
    }

    state.price_range = PriceRange::new(min, max);
    state
}

/// Render filter state as a canonical query string (without the leading `?`).
#[must_use]
pub fn encode(state: &FilterState, bounds: PriceRange) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());

    if !state.search_text.is_empty() {
        serializer.append_pair(PARAM_SEARCH, &state.search_text);
    }
    if let Some(category) = &state.category {
        serializer.append_pair(PARAM_CATEGORY, category.as_str());
    }
    if let Some(collection) = &state.collection {
        serializer.append_pair(PARAM_COLLECTION, collection.as_str());
    }
    if let Some(status) = state.status {
        serializer.append_pair(PARAM_STATUS, status.as_str());
    }
    if state.price_range.min() != bounds.min() {
        serializer.append_pair(PARAM_MIN_PRICE, &state.price_range.min().to_string());
    }
    if state.price_range.max() != bounds.max() {
        serializer.append_pair(PARAM_MAX_PRICE, &state.price_range.max().to_string());
    }

    serializer.finish()
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn parse_price(value: &str) -> Option<u64> {
    value.trim().parse().ok()
}
