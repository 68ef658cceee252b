//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                   - Health check
//!
//! # Products
//! GET  /products                 - Filtered listing (q, category, collection,
//!                                  status, minPrice, maxPrice, count)
//! GET  /products/{slug}          - Product detail
//! GET  /products/{slug}/enquire  - Redirect to a WhatsApp enquiry
//!
//! # Facets
//! GET  /categories               - Categories with product counts
//! GET  /collections              - Collections with product counts
//!
//! # Checkout
//! POST /checkout                 - WhatsApp order link for a cart
//! ```

pub mod catalog;
pub mod checkout;
pub mod products;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::middleware::{make_request_span, request_id_middleware};
use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{slug}", get(products::show))
        .route("/{slug}/enquire", get(products::enquire))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/products", product_routes())
        .route("/categories", get(catalog::categories))
        .route("/collections", get(catalog::collections))
        .route("/checkout", post(checkout::create))
}

/// The full application: routes, health check and per-request middleware.
///
/// Sentry layers are added by the binary so tests run without a client.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
