//! WhatsApp checkout.
//!
//! There is no payment processing: checkout opens a WhatsApp chat with the
//! store, prefilled with an order summary. The store confirms availability
//! and payment details in the chat.

use std::fmt::Write as _;

use heirloom_core::{CartLine, Product};
use thiserror::Error;

use crate::cart::Cart;

const WHATSAPP_BASE: &str = "https://wa.me";
const MIN_NUMBER_DIGITS: usize = 8;
const MAX_NUMBER_DIGITS: usize = 15;

/// Errors that can occur building a checkout link.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// Nothing to order.
    #[error("cart is empty")]
    EmptyCart,

    /// The configured WhatsApp number is not an international phone number.
    #[error("invalid WhatsApp number: {0}")]
    InvalidNumber(String),
}

/// Builds `wa.me` links for the store's WhatsApp number.
#[derive(Debug, Clone)]
pub struct WhatsAppCheckout {
    number: String,
    base_url: Option<String>,
}

impl WhatsAppCheckout {
    /// Accepts numbers like `+91 98765-43210`; separators are stripped.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::InvalidNumber` unless the number has 8-15 digits
    /// and nothing but digits, spaces, dashes, parentheses and a leading `+`.
    pub fn new(number: &str) -> Result<Self, CheckoutError> {
        let trimmed = number.trim();
        let without_plus = trimmed.strip_prefix('+').unwrap_or(trimmed);
        let mut digits = String::with_capacity(without_plus.len());
        for c in without_plus.chars() {
            match c {
                '0'..='9' => digits.push(c),
                ' ' | '-' | '(' | ')' => {}
                _ => return Err(CheckoutError::InvalidNumber(number.to_string())),
            }
        }
        if !(MIN_NUMBER_DIGITS..=MAX_NUMBER_DIGITS).contains(&digits.len()) {
            return Err(CheckoutError::InvalidNumber(number.to_string()));
        }
        Ok(Self {
            number: digits,
            base_url: None,
        })
    }

    /// Include product page links (`<base_url>/products/<slug>`) in messages.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let url: String = base_url.into();
        self.base_url = Some(url.trim_end_matches('/').to_string());
        self
    }

    /// Digits only, as used in the link.
    #[must_use]
    pub fn number(&self) -> &str {
        &self.number
    }

    /// Link that opens a chat prefilled with the whole cart.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` if the cart has no lines.
    pub fn cart_link(&self, cart: &Cart) -> Result<String, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        Ok(self.link(&self.order_message(cart)))
    }

    /// Link that opens a chat asking about a single piece.
    #[must_use]
    pub fn enquiry_link(&self, product: &Product) -> String {
        let mut message = format!(
            "Hi! I'm interested in {} ({}).",
            product.title,
            product.effective_price()
        );
        if let Some(url) = self.product_url(product) {
            let _ = write!(message, "\n{url}");
        }
        self.link(&message)
    }

    /// Plain-text order summary sent as the chat's first message.
    #[must_use]
    pub fn order_message(&self, cart: &Cart) -> String {
        let mut message = String::from("Hi! I'd like to order:\n");
        for (index, line) in cart.items().iter().enumerate() {
            let _ = write!(message, "\n{}. {}", index + 1, self.describe_line(line));
        }
        let _ = write!(
            message,
            "\n\nItems: {}\nTotal: {}",
            cart.item_count(),
            cart.subtotal()
        );
        message
    }

    fn describe_line(&self, line: &CartLine) -> String {
        let mut text = format!(
            "{} x{} - {}",
            line.product.title,
            line.quantity,
            line.line_total()
        );
        if let Some(url) = self.product_url(&line.product) {
            let _ = write!(text, "\n   {url}");
        }
        text
    }

    fn product_url(&self, product: &Product) -> Option<String> {
        self.base_url
            .as_ref()
            .map(|base| format!("{base}/products/{}", product.slug))
    }

    fn link(&self, message: &str) -> String {
        format!(
            "{WHATSAPP_BASE}/{}?text={}",
            self.number,
            urlencoding::encode(message)
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use heirloom_core::Price;

    use super::*;

    fn checkout() -> WhatsAppCheckout {
        WhatsAppCheckout::new("+91 98765-43210").unwrap()
    }

    #[test]
    fn test_number_is_normalized() {
        assert_eq!(checkout().number(), "919876543210");
    }

    #[test]
    fn test_invalid_numbers_are_rejected() {
        for bad in ["", "12345", "+91 98765 4321x", "1234567890123456", "++919876543210"] {
            assert!(
                matches!(WhatsAppCheckout::new(bad), Err(CheckoutError::InvalidNumber(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_empty_cart_has_no_link() {
        assert_eq!(checkout().cart_link(&Cart::new()), Err(CheckoutError::EmptyCart));
    }

    #[test]
    fn test_order_message_lists_lines_and_total() {
        let mut cart = Cart::new();
        let mut ring = Product::new("gold-ring", "Gold Ring", 2_000);
        ring.discount_price = Some(Price::new(1_800));
        cart.add(ring, 2).unwrap();
        cart.add(Product::new("kundan-set", "Kundan Set", 125_000), 1).unwrap();

        let message = checkout().order_message(&cart);
        assert!(message.contains("1. Gold Ring x2 - ₹3,600"));
        assert!(message.contains("2. Kundan Set x1 - ₹1,25,000"));
        assert!(message.contains("Items: 3"));
        assert!(message.ends_with("Total: ₹1,28,600"));
    }

    #[test]
    fn test_cart_link_is_url_encoded() {
        let mut cart = Cart::new();
        cart.add(Product::new("gold-ring", "Gold Ring", 2_000), 1).unwrap();

        let link = checkout().cart_link(&cart).unwrap();
        assert!(link.starts_with("https://wa.me/919876543210?text=Hi%21%20I%27d%20like"));
        assert!(!link.contains(' '));
        assert!(!link.contains('\n'));
    }

    #[test]
    fn test_enquiry_link_includes_product_url() {
        let checkout = checkout().with_base_url("https://heirloom.example/");
        let product = Product::new("opal-pendant", "Opal Pendant", 6_500);
        let link = checkout.enquiry_link(&product);
        assert!(link.contains("Opal%20Pendant"));
        assert!(link.contains(&*urlencoding::encode(
            "https://heirloom.example/products/opal-pendant"
        )));
    }
}
