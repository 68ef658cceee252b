//! Filter selections for one product-listing view.

use heirloom_core::{CategorySlug, CollectionSlug, ProductStatus};
use serde::{Deserialize, Serialize};

/// Step used by the price slider; edits keep `min` and `max` this far apart.
pub const PRICE_STEP: u64 = 500;

/// Inclusive price bounds in rupees.
///
/// Construction always yields `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawPriceRange")]
pub struct PriceRange {
    min: u64,
    max: u64,
}

/// Wire shape of [`PriceRange`]; converted through `PriceRange::new`.
#[derive(Deserialize)]
struct RawPriceRange {
    min: u64,
    max: u64,
}

impl From<RawPriceRange> for PriceRange {
    fn from(raw: RawPriceRange) -> Self {
        Self::new(raw.min, raw.max)
    }
}

impl PriceRange {
    /// Create a range, clamping `min` down to `max` if they are inverted.
    #[must_use]
    pub const fn new(min: u64, max: u64) -> Self {
        Self {
            min: if min > max { max } else { min },
            max,
        }
    }

    #[must_use]
    pub const fn min(&self) -> u64 {
        self.min
    }

    #[must_use]
    pub const fn max(&self) -> u64 {
        self.max
    }

    #[must_use]
    pub const fn contains(&self, price: u64) -> bool {
        price >= self.min && price <= self.max
    }

    /// Move the lower bound, keeping it at most `max - PRICE_STEP`.
    #[must_use]
    pub fn with_min(self, min: u64) -> Self {
        Self {
            min: min.min(self.max.saturating_sub(PRICE_STEP)),
            max: self.max,
        }
    }

    /// Move the upper bound, keeping it at least `min + PRICE_STEP`.
    #[must_use]
    pub fn with_max(self, max: u64) -> Self {
        Self {
            min: self.min,
            max: max.max(self.min.saturating_add(PRICE_STEP)),
        }
    }

    /// Whether this range excludes part of `bounds`.
    #[must_use]
    pub const fn is_narrower_than(&self, bounds: &Self) -> bool {
        self.min > bounds.min || self.max < bounds.max
    }
}

/// The five filter fields of a listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterState {
    pub search_text: String,
    pub category: Option<CategorySlug>,
    pub collection: Option<CollectionSlug>,
    pub status: Option<ProductStatus>,
    pub price_range: PriceRange,
}

impl FilterState {
    /// Defaults for a listing whose full price range is `bounds`.
    #[must_use]
    pub const fn with_bounds(bounds: PriceRange) -> Self {
        Self {
            search_text: String::new(),
            category: None,
            collection: None,
            status: None,
            price_range: bounds,
        }
    }

    /// Composite key over every filter field.
    #[must_use]
    pub fn key(&self) -> FilterKey {
        FilterKey(self.clone())
    }

    /// Whether any selection narrows the listing relative to `bounds`.
    #[must_use]
    pub fn is_active(&self, bounds: &PriceRange) -> bool {
        self.category.is_some()
            || self.collection.is_some()
            || self.status.is_some()
            || self.price_range.is_narrower_than(bounds)
            || !self.search_text.is_empty()
    }
}

/// Snapshot of all filter fields, compared as a unit to detect "any filter changed".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilterKey(FilterState);
