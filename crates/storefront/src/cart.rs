//! Shopping cart state container.
//!
//! Pieces are mostly one-of-a-kind, but the CMS occasionally lists a few
//! identical items under one slug, so lines carry a quantity. Lines are keyed
//! by product slug; adding an existing slug merges quantities.

use heirloom_core::{CartLine, Price, Product, ProductSlug};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::storage::Persisted;

/// Errors from cart mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// The piece is sold or reserved.
    #[error("{0} is no longer available")]
    Unavailable(ProductSlug),

    /// Quantity must be at least one.
    #[error("quantity must be at least 1")]
    ZeroQuantity,
}

/// The cart, serialized as `{"items": [{"product": ..., "quantity": n}]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartLine>,
}

impl Persisted for Cart {
    const STORAGE_KEY: &'static str = "cart-storage";
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn items(&self) -> &[CartLine] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add `quantity` of `product`, merging with an existing line.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Unavailable` for pieces that are not purchasable
    /// and `CartError::ZeroQuantity` for a zero quantity.
    pub fn add(&mut self, product: Product, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::ZeroQuantity);
        }
        if !product.product_status.is_purchasable() {
            return Err(CartError::Unavailable(product.slug));
        }

        if let Some(line) = self.line_mut(&product.slug) {
            line.quantity = line.quantity.saturating_add(quantity);
            // Keep the freshest product data (price edits, new images).
            line.product = product;
        } else {
            self.items.push(CartLine::new(product, quantity));
        }
        Ok(())
    }

    /// Set a line's quantity; zero removes the line. Unknown slugs are ignored.
    pub fn update_quantity(&mut self, slug: &ProductSlug, quantity: u32) {
        if quantity == 0 {
            self.remove(slug);
        } else if let Some(line) = self.line_mut(slug) {
            line.quantity = quantity;
        }
    }

    /// Remove a line. Returns whether anything was removed.
    pub fn remove(&mut self, slug: &ProductSlug) -> bool {
        let before = self.items.len();
        self.items.retain(|line| &line.product.slug != slug);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[must_use]
    pub fn contains(&self, slug: &ProductSlug) -> bool {
        self.items.iter().any(|line| &line.product.slug == slug)
    }

    /// Total number of pieces across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0, |acc, line| acc.saturating_add(line.quantity))
    }

    /// Sum of effective line prices.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        Price::new(
            self.items
                .iter()
                .fold(0, |acc, line| acc.saturating_add(line.line_total().rupees())),
        )
    }

    fn line_mut(&mut self, slug: &ProductSlug) -> Option<&mut CartLine> {
        self.items.iter_mut().find(|line| &line.product.slug == slug)
    }
}
