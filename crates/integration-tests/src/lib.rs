//! Integration tests for the Heirloom storefront.
//!
//! The storefront router is driven in-process with `tower::ServiceExt::oneshot`,
//! so no server or network is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p heirloom-integration-tests
//! ```

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use heirloom_core::Product;
use heirloom_storefront::{AppState, app, catalog::Catalog, config::StorefrontConfig};
use serde_json::Value;
use tower::ServiceExt;

pub const WHATSAPP_NUMBER: &str = "+91 98765 43210";

/// Storefront router over `products`, configured as in production apart
/// from the missing Sentry layers.
pub fn storefront(products: Vec<Product>) -> Router {
    let config = StorefrontConfig::from_lookup(|key| match key {
        "STOREFRONT_CATALOG_PATH" => Some("catalog.json".to_string()),
        "WHATSAPP_NUMBER" => Some(WHATSAPP_NUMBER.to_string()),
        "STOREFRONT_BASE_URL" => Some("https://heirloom.example".to_string()),
        _ => None,
    })
    .unwrap();
    let catalog = Catalog::from_products(products).unwrap();
    app(AppState::new(config, catalog).unwrap())
}

/// A decoded response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

async fn send(router: Router, request: Request<Body>) -> TestResponse {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    TestResponse {
        status,
        headers,
        body,
    }
}

pub async fn get(router: &Router, uri: &str) -> TestResponse {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(router.clone(), request).await
}

pub async fn post_json(router: &Router, uri: &str, body: &Value) -> TestResponse {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(router.clone(), request).await
}

/// Slugs of the products in a listing response, in order.
pub fn slugs(listing: &Value) -> Vec<String> {
    listing["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["slug"].as_str().unwrap().to_string())
        .collect()
}
