//! WhatsApp checkout handler.
//!
//! The browser keeps the cart in local storage and posts its lines here.
//! Prices and availability are taken from the catalog, never from the
//! request body.

use axum::{Json, extract::State};
use heirloom_core::ProductSlug;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::cart::Cart;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::state::AppState;

/// One cart line as the client stores it.
#[derive(Debug, Deserialize)]
pub struct CheckoutItem {
    pub slug: ProductSlug,
    #[serde(default = "one")]
    pub quantity: u32,
}

const fn one() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub items: Vec<CheckoutItem>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    /// `wa.me` link prefilled with the order summary.
    pub url: String,
    pub item_count: u32,
    pub total: String,
}

/// Build a WhatsApp order link for the posted cart.
#[instrument(skip_all, fields(lines = request.items.len()))]
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>> {
    let mut cart = Cart::new();
    for item in request.items {
        let product = state
            .catalog()
            .get(&item.slug)
            .ok_or_else(|| AppError::NotFound(format!("product {}", item.slug)))?;
        cart.add(product.clone(), item.quantity)?;
    }

    let url = state.checkout().cart_link(&cart)?;
    let item_count = cart.item_count();
    let total = cart.subtotal().display();

    add_breadcrumb(
        "checkout",
        "WhatsApp order link created",
        Some(&[("total", total.as_str())]),
    );
    tracing::info!(item_count, %total, "checkout link created");

    Ok(Json(CheckoutResponse {
        url,
        item_count,
        total,
    }))
}
