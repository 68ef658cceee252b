//! Filter state store with pagination cursor.
//!
//! Setters only change the filter fields. The cursor is reset by
//! [`FilterStore::settle`], which the listing view runs before every
//! recomputation: when the composite [`FilterKey`] or the product list
//! fingerprint differs from the last settled pair, `display_count` goes back
//! to [`INITIAL_PAGE_SIZE`].

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use heirloom_core::{CategorySlug, CollectionSlug, Product, ProductStatus};

use super::query;
use super::state::{FilterKey, FilterState, PriceRange};

/// Number of products shown before any "load more".
pub const INITIAL_PAGE_SIZE: usize = 10;

/// Where filter changes are reflected outside the store.
pub trait FilterSync {
    /// Called after every filter mutation.
    fn publish(&mut self, state: &FilterState, bounds: PriceRange);

    /// Canonical query string for the current state, if this sync keeps one.
    fn query(&self) -> Option<&str> {
        None
    }
}

/// In-memory only; nothing is reflected anywhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalOnly;

impl FilterSync for LocalOnly {
    fn publish(&mut self, _state: &FilterState, _bounds: PriceRange) {}
}

/// Keeps a canonical query string in step with the filters, so the current
/// view can be shared as a link.
#[derive(Debug, Clone, Default)]
pub struct UrlSync {
    query: String,
}

impl UrlSync {
    /// `path` with the current query appended, e.g. `/shop?category=rings`.
    #[must_use]
    pub fn href(&self, path: &str) -> String {
        if self.query.is_empty() {
            path.to_string()
        } else {
            format!("{path}?{}", self.query)
        }
    }
}

impl FilterSync for UrlSync {
    fn publish(&mut self, state: &FilterState, bounds: PriceRange) {
        let query = query::encode(state, bounds);
        if query != self.query {
            tracing::trace!(%query, "filter query updated");
            self.query = query;
        }
    }

    fn query(&self) -> Option<&str> {
        Some(&self.query)
    }
}

/// Identity of a product list: its length plus the sequence of slugs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListFingerprint {
    len: usize,
    digest: u64,
}

impl ListFingerprint {
    #[must_use]
    pub fn of(products: &[Product]) -> Self {
        let mut hasher = DefaultHasher::new();
        for product in products {
            product.slug.hash(&mut hasher);
        }
        Self {
            len: products.len(),
            digest: hasher.finish(),
        }
    }
}

/// A new cursor value: either exact or derived from the previous one.
pub enum CountUpdate {
    Set(usize),
    Update(Box<dyn FnOnce(usize) -> usize + Send>),
}

impl CountUpdate {
    /// Derive the next count from the previous one.
    pub fn with(f: impl FnOnce(usize) -> usize + Send + 'static) -> Self {
        Self::Update(Box::new(f))
    }

    fn apply(self, previous: usize) -> usize {
        match self {
            Self::Set(count) => count,
            Self::Update(f) => f(previous),
        }
    }
}

impl From<usize> for CountUpdate {
    fn from(count: usize) -> Self {
        Self::Set(count)
    }
}

impl std::fmt::Debug for CountUpdate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Set(count) => f.debug_tuple("Set").field(count).finish(),
            Self::Update(_) => f.write_str("Update(..)"),
        }
    }
}

/// Filter selections and pagination cursor for one listing.
#[derive(Debug, Clone)]
pub struct FilterStore<S: FilterSync = LocalOnly> {
    state: FilterState,
    bounds: PriceRange,
    display_count: usize,
    settled: Option<(FilterKey, ListFingerprint)>,
    sync: S,
}

impl FilterStore<LocalOnly> {
    /// An in-memory store with default filters over `bounds`.
    #[must_use]
    pub fn new(bounds: PriceRange) -> Self {
        Self::with_sync(FilterState::with_bounds(bounds), bounds, LocalOnly)
    }
}

impl FilterStore<UrlSync> {
    /// A URL-synced store seeded from a query string.
    #[must_use]
    pub fn from_query(query: &str, bounds: PriceRange) -> Self {
        let state = query::decode(query, bounds);
        Self::with_sync(state, bounds, UrlSync::default())
    }

    #[must_use]
    pub fn href(&self, path: &str) -> String {
        self.sync.href(path)
    }
}

impl<S: FilterSync> FilterStore<S> {
    pub fn with_sync(state: FilterState, bounds: PriceRange, mut sync: S) -> Self {
        sync.publish(&state, bounds);
        Self {
            state,
            bounds,
            display_count: INITIAL_PAGE_SIZE,
            settled: None,
            sync,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &FilterState {
        &self.state
    }

    /// Default price range for the current product list.
    #[must_use]
    pub const fn bounds(&self) -> PriceRange {
        self.bounds
    }

    #[must_use]
    pub const fn display_count(&self) -> usize {
        self.display_count
    }

    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.sync.query()
    }

    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        self.state.is_active(&self.bounds)
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.state.search_text = text.into();
        self.publish();
    }

    pub fn set_category(&mut self, category: Option<CategorySlug>) {
        self.state.category = category;
        self.publish();
    }

    pub fn set_collection(&mut self, collection: Option<CollectionSlug>) {
        self.state.collection = collection;
        self.publish();
    }

    pub fn set_status(&mut self, status: Option<ProductStatus>) {
        self.state.status = status;
        self.publish();
    }

    pub fn set_price_range(&mut self, range: PriceRange) {
        self.state.price_range = range;
        self.publish();
    }

    /// Slider edit of the lower bound; clamped below the upper bound.
    pub fn set_min_price(&mut self, min: u64) {
        self.state.price_range = self.state.price_range.with_min(min);
        self.publish();
    }

    /// Slider edit of the upper bound; clamped above the lower bound.
    pub fn set_max_price(&mut self, max: u64) {
        self.state.price_range = self.state.price_range.with_max(max);
        self.publish();
    }

    /// Clear every filter back to its default.
    pub fn reset_filters(&mut self) {
        self.state = FilterState::with_bounds(self.bounds);
        self.publish();
    }

    pub fn set_display_count(&mut self, update: impl Into<CountUpdate>) {
        self.display_count = update.into().apply(self.display_count);
    }

    /// Adopt the default price range of a new product list.
    ///
    /// An untouched price filter follows the new bounds; a narrowed one is kept.
    pub fn set_bounds(&mut self, bounds: PriceRange) {
        if bounds == self.bounds {
            return;
        }
        if !self.state.price_range.is_narrower_than(&self.bounds) {
            self.state.price_range = bounds;
        }
        self.bounds = bounds;
        self.publish();
    }

    /// Reset the cursor if the filters or the product list changed since the
    /// last call. Returns whether a reset happened.
    pub fn settle(&mut self, fingerprint: ListFingerprint) -> bool {
        let current = (self.state.key(), fingerprint);
        let changed = self.settled.as_ref().is_some_and(|prev| *prev != current);
        if changed {
            tracing::debug!(
                previous = self.display_count,
                "filters changed, resetting display count"
            );
            self.display_count = INITIAL_PAGE_SIZE;
        }
        self.settled = Some(current);
        changed
    }

    fn publish(&mut self) {
        self.sync.publish(&self.state, self.bounds);
    }
}
