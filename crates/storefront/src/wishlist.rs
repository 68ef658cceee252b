//! Wishlist state container.

use heirloom_core::{Product, ProductSlug};
use serde::{Deserialize, Serialize};

use crate::storage::Persisted;

/// Saved products, serialized as `{"items": [Product, ...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wishlist {
    items: Vec<Product>,
}

impl Persisted for Wishlist {
    const STORAGE_KEY: &'static str = "wishlist-storage";
}

impl Wishlist {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn contains(&self, slug: &ProductSlug) -> bool {
        self.items.iter().any(|p| &p.slug == slug)
    }

    /// Add the product if absent, remove it if present.
    /// Returns `true` if the product is now in the wishlist.
    pub fn toggle(&mut self, product: Product) -> bool {
        if self.remove(&product.slug) {
            false
        } else {
            self.items.push(product);
            true
        }
    }

    /// Returns whether anything was removed.
    pub fn remove(&mut self, slug: &ProductSlug) -> bool {
        let before = self.items.len();
        self.items.retain(|p| &p.slug != slug);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
