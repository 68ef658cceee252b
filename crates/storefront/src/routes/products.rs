//! Product route handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, RawQuery, State},
    response::{IntoResponse, Redirect, Response},
};
use heirloom_core::{Product, ProductSlug, ProductStatus};
use serde::Serialize;
use tracing::instrument;
use url::form_urlencoded;

use crate::error::{AppError, Result};
use crate::listing::{
    FilterState, INITIAL_PAGE_SIZE, LOAD_MORE_BATCH, ListingSnapshot, ListingView, MAX_PRODUCTS,
    PriceRange, initial_price_range, query,
};
use crate::state::AppState;

/// Query parameter carrying the number of products to show.
pub const PARAM_COUNT: &str = "count";

/// Product card data for listings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub slug: String,
    pub title: String,
    pub price: u64,
    pub display_price: String,
    /// Original price, shown struck through when a discount applies.
    pub compare_at_price: Option<String>,
    pub status: ProductStatus,
    pub image: Option<String>,
    pub href: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        let effective = product.effective_price();
        Self {
            slug: product.slug.to_string(),
            title: product.title.clone(),
            price: effective.rupees(),
            display_price: effective.display(),
            compare_at_price: (effective != product.price).then(|| product.price.display()),
            status: product.product_status,
            image: product.primary_image().map(str::to_string),
            href: format!("/products/{}", product.slug),
        }
    }
}

/// One page of a filtered listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingResponse {
    pub products: Vec<ProductView>,
    pub total: usize,
    pub display_count: usize,
    pub has_more_products: bool,
    pub has_active_filters: bool,
    pub max_price: u64,
    pub price_bounds: PriceRange,
    pub filters: FilterState,
    /// Canonical filter query, without `count`.
    pub query: String,
    /// Link to the same listing with one more batch shown.
    pub next_page: Option<String>,
}

impl ListingResponse {
    fn from_snapshot(snapshot: &ListingSnapshot<'_>) -> Self {
        let query = snapshot.query.unwrap_or_default().to_string();
        let next_page = snapshot
            .has_more_products
            .then(|| listing_href(&query, snapshot.display_count + LOAD_MORE_BATCH));

        Self {
            products: snapshot.products.iter().map(ProductView::from).collect(),
            total: snapshot.total,
            display_count: snapshot.display_count,
            has_more_products: snapshot.has_more_products,
            has_active_filters: snapshot.has_active_filters,
            max_price: snapshot.max_price,
            price_bounds: snapshot.price_bounds,
            filters: snapshot.filters.clone(),
            query,
            next_page,
        }
    }
}

/// Filtered product listing.
///
/// Filters come from the query string exactly as a shared link carries them;
/// `count` selects how many matches to return.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Response {
    let raw = raw.unwrap_or_default();
    let recent = state.catalog().recent();
    let bounds = initial_price_range(recent);
    let canonical = query::encode(&query::decode(&raw, bounds), bounds);
    let count = display_count(&raw);
    let key = format!("{canonical}#{count}");

    let listing = state
        .listings()
        .get_with(key, async {
            let mut view = ListingView::from_query(recent.to_vec(), &raw);
            view.set_display_count(count);
            let listing = ListingResponse::from_snapshot(&view.snapshot());
            tracing::debug!(
                query = %listing.query,
                total = listing.total,
                shown = listing.products.len(),
                "listing rendered"
            );
            Arc::new(listing)
        })
        .await;

    Json(listing.as_ref()).into_response()
}

/// Full product record.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Product>> {
    let product = find(&state, slug)?;
    Ok(Json(product.clone()))
}

/// Redirect to a WhatsApp chat asking about one piece.
#[instrument(skip(state))]
pub async fn enquire(State(state): State<AppState>, Path(slug): Path<String>) -> Result<Redirect> {
    let product = find(&state, slug)?;
    Ok(Redirect::to(&state.checkout().enquiry_link(product)))
}

fn find(state: &AppState, slug: String) -> Result<&Product> {
    let slug = ProductSlug::new(slug);
    state
        .catalog()
        .get(&slug)
        .ok_or_else(|| AppError::NotFound(format!("product {slug}")))
}

/// `count` from the raw query, clamped to `1..=MAX_PRODUCTS`.
fn display_count(raw: &str) -> usize {
    form_urlencoded::parse(raw.as_bytes())
        .filter(|(key, _)| key == PARAM_COUNT)
        .last()
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(INITIAL_PAGE_SIZE)
        .clamp(1, MAX_PRODUCTS)
}

fn listing_href(query: &str, count: usize) -> String {
    let count = count.min(MAX_PRODUCTS);
    if query.is_empty() {
        format!("/products?{PARAM_COUNT}={count}")
    } else {
        format!("/products?{query}&{PARAM_COUNT}={count}")
    }
}
