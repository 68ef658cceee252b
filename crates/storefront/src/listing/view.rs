//! Listing view: a product list composed with a filter store.
//!
//! Derived data (the filtered list) is cached against the filter key and the
//! product list fingerprint, so repeated snapshots with unchanged inputs skip
//! the filter pass entirely.

use heirloom_core::Product;
use serde::Serialize;

use super::predicates::{calculate_max_price, filter_products, initial_price_range};
use super::state::{FilterKey, FilterState, PriceRange};
use super::store::{CountUpdate, FilterStore, FilterSync, ListFingerprint, LocalOnly, UrlSync};

/// Filtered result for one (filter key, product list) pair.
#[derive(Debug, Clone)]
struct Derived {
    key: FilterKey,
    fingerprint: ListFingerprint,
    filtered: Vec<Product>,
}

/// Derived view data for rendering one listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingSnapshot<'a> {
    pub max_price: u64,
    pub price_bounds: PriceRange,
    pub filters: &'a FilterState,
    pub total: usize,
    pub display_count: usize,
    pub products: &'a [Product],
    pub has_more_products: bool,
    pub has_active_filters: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<&'a str>,
    #[serde(skip)]
    pub filtered: &'a [Product],
}

/// A product list plus the filter state that narrows it.
#[derive(Debug, Clone)]
pub struct ListingView<S: FilterSync = LocalOnly> {
    products: Vec<Product>,
    fingerprint: ListFingerprint,
    max_price: u64,
    store: FilterStore<S>,
    derived: Option<Derived>,
}

impl ListingView<LocalOnly> {
    /// A view with in-memory filters at their defaults.
    #[must_use]
    pub fn local(products: Vec<Product>) -> Self {
        let bounds = initial_price_range(&products);
        Self::new(products, FilterStore::new(bounds))
    }
}

impl ListingView<UrlSync> {
    /// A view whose filters are seeded from, and reflected to, a query string.
    #[must_use]
    pub fn from_query(products: Vec<Product>, query: &str) -> Self {
        let bounds = initial_price_range(&products);
        Self::new(products, FilterStore::from_query(query, bounds))
    }
}

impl<S: FilterSync> ListingView<S> {
    pub fn new(products: Vec<Product>, store: FilterStore<S>) -> Self {
        let fingerprint = ListFingerprint::of(&products);
        let max_price = calculate_max_price(&products);
        Self {
            products,
            fingerprint,
            max_price,
            store,
            derived: None,
        }
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub const fn store(&self) -> &FilterStore<S> {
        &self.store
    }

    /// Mutable access for filter handlers.
    pub const fn store_mut(&mut self) -> &mut FilterStore<S> {
        &mut self.store
    }

    /// Swap in a new product list (e.g. a fresh server-side result).
    pub fn replace_products(&mut self, products: Vec<Product>) {
        self.fingerprint = ListFingerprint::of(&products);
        self.max_price = calculate_max_price(&products);
        self.store.set_bounds(initial_price_range(&products));
        self.products = products;
    }

    pub fn set_display_count(&mut self, update: impl Into<CountUpdate>) {
        // Settle first so a pending filter change does not wipe this update.
        self.recompute();
        self.store.set_display_count(update);
    }

    /// Number of products passing the current filters.
    pub fn filtered_len(&mut self) -> usize {
        self.recompute();
        self.derived.as_ref().map_or(0, |d| d.filtered.len())
    }

    pub fn has_more_products(&mut self) -> bool {
        let total = self.filtered_len();
        self.store.display_count() < total
    }

    /// Bring derived data up to date with the current inputs.
    pub fn recompute(&mut self) {
        self.store.settle(self.fingerprint);

        let key = self.store.state().key();
        let fresh = self
            .derived
            .as_ref()
            .is_some_and(|d| d.key == key && d.fingerprint == self.fingerprint);
        if fresh {
            return;
        }

        let filtered = filter_products(&self.products, self.store.state());
        tracing::debug!(
            products = self.products.len(),
            matched = filtered.len(),
            "recomputed listing"
        );
        self.derived = Some(Derived {
            key,
            fingerprint: self.fingerprint,
            filtered,
        });
    }

    /// Current view data.
    pub fn snapshot(&mut self) -> ListingSnapshot<'_> {
        self.recompute();

        let filtered = self
            .derived
            .as_ref()
            .map(|d| d.filtered.as_slice())
            .unwrap_or_default();
        let display_count = self.store.display_count();
        let shown = display_count.min(filtered.len());

        ListingSnapshot {
            max_price: self.max_price,
            price_bounds: self.store.bounds(),
            filters: self.store.state(),
            total: filtered.len(),
            display_count,
            products: filtered.get(..shown).unwrap_or(filtered),
            has_more_products: display_count < filtered.len(),
            has_active_filters: self.store.has_active_filters(),
            query: self.store.query(),
            filtered,
        }
    }
}
