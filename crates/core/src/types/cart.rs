//! Cart line type shared by the storefront and the CLI.

use serde::{Deserialize, Serialize};

use crate::types::price::Price;
use crate::types::product::Product;

/// One product in a cart, with the quantity requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    #[must_use]
    pub const fn new(product: Product, quantity: u32) -> Self {
        Self { product, quantity }
    }

    /// Effective unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.effective_price().times(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total_uses_discount_price() {
        let mut product = Product::new("jade-bangle", "Jade Bangle", 9_000);
        product.discount_price = Some(Price::new(7_500));
        let line = CartLine::new(product, 2);
        assert_eq!(line.line_total(), Price::new(15_000));
    }
}
