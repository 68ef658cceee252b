//! End-to-end tests for the storefront HTTP API.
//!
//! Each test builds the full router over a fixed catalog and drives it
//! in-process.

#![allow(clippy::unwrap_used)]

use axum::http::{StatusCode, header};
use heirloom_core::Product;
use heirloom_integration_tests::{get, post_json, slugs, storefront};
use serde_json::{Value, json};

fn product(slug: &str, price: u64, category: &str, status: &str, day: u32) -> Product {
    serde_json::from_value(json!({
        "slug": slug,
        "title": slug.replace('-', " "),
        "description": format!("Handcrafted {category}"),
        "price": price,
        "productStatus": status,
        "categories": [{"name": category, "slug": category.to_lowercase()}],
        "collections": [{"title": "Heritage", "slug": "heritage"}],
        "createdAt": format!("2024-05-{day:02}T10:00:00Z"),
    }))
    .unwrap()
}

/// Twelve products, `piece-12` newest. Every third is a ring, the rest are chains.
fn twelve() -> Vec<Product> {
    (1..=12)
        .map(|i| {
            let category = if i % 3 == 0 { "Rings" } else { "Chains" };
            let status = if i == 6 { "sold" } else { "available" };
            product(&format!("piece-{i}"), u64::from(i) * 1_000, category, status, i)
        })
        .collect()
}

/// Fixture from the listing walkthrough: a ring, a chain and a pricier ring.
fn three() -> Vec<Product> {
    vec![
        product("gold-ring", 2_000, "Rings", "available", 1),
        product("silver-chain", 8_000, "Chains", "sold", 2),
        product("ruby-ring", 15_000, "Rings", "available", 3),
    ]
}

#[tokio::test]
async fn test_health_sets_request_id() {
    let app = storefront(twelve());
    let response = get(&app, "/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, Value::String("ok".to_string()));

    let id = response.headers.get("x-request-id").unwrap();
    assert!(!id.to_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_first_page_shows_ten_newest() {
    let app = storefront(twelve());
    let response = get(&app, "/products").await;
    assert_eq!(response.status, StatusCode::OK);

    let listing = &response.body;
    assert_eq!(listing["total"], 12);
    assert_eq!(listing["displayCount"], 10);
    assert_eq!(listing["hasMoreProducts"], true);
    assert_eq!(listing["hasActiveFilters"], false);
    assert_eq!(listing["maxPrice"], 100_000);
    assert_eq!(listing["nextPage"], "/products?count=20");

    let shown = slugs(listing);
    assert_eq!(shown.len(), 10);
    assert_eq!(shown.first().map(String::as_str), Some("piece-12"));
    assert_eq!(shown.last().map(String::as_str), Some("piece-3"));
}

#[tokio::test]
async fn test_second_page_shows_the_rest() {
    let app = storefront(twelve());
    let listing = get(&app, "/products?count=20").await.body;
    assert_eq!(slugs(&listing).len(), 12);
    assert_eq!(listing["hasMoreProducts"], false);
    assert!(listing["nextPage"].is_null());
}

#[tokio::test]
async fn test_category_and_price_filters_combine() {
    let app = storefront(three());
    let listing = get(&app, "/products?category=rings&maxPrice=10000").await.body;
    assert_eq!(slugs(&listing), vec!["gold-ring"]);
    assert_eq!(listing["hasActiveFilters"], true);
    assert_eq!(listing["query"], "category=rings&maxPrice=10000");
}

#[tokio::test]
async fn test_status_filter() {
    let app = storefront(three());
    let listing = get(&app, "/products?status=sold").await.body;
    assert_eq!(slugs(&listing), vec!["silver-chain"]);
}

#[tokio::test]
async fn test_search_is_case_insensitive() {
    let app = storefront(three());
    let listing = get(&app, "/products?q=RUBY").await.body;
    assert_eq!(slugs(&listing), vec!["ruby-ring"]);

    let listing = get(&app, "/products?q=Chains").await.body;
    assert_eq!(slugs(&listing), vec!["silver-chain"]);

    let listing = get(&app, "/products?q=heritage").await.body;
    assert_eq!(slugs(&listing).len(), 3);
}

#[tokio::test]
async fn test_no_matches_is_an_empty_page() {
    let app = storefront(three());
    let listing = get(&app, "/products?category=watches").await.body;
    assert_eq!(listing["total"], 0);
    assert!(slugs(&listing).is_empty());
    assert_eq!(listing["hasMoreProducts"], false);
}

#[tokio::test]
async fn test_malformed_params_fall_back_to_defaults() {
    let app = storefront(three());
    let listing = get(&app, "/products?status=lost&minPrice=cheap&count=many").await.body;
    assert_eq!(slugs(&listing).len(), 3);
    assert_eq!(listing["displayCount"], 10);
    assert_eq!(listing["hasActiveFilters"], false);
    assert_eq!(listing["query"], "");
}

#[tokio::test]
async fn test_equivalent_queries_share_a_canonical_form() {
    let app = storefront(three());
    let a = get(&app, "/products?maxPrice=10000&category=rings").await.body;
    let b = get(&app, "/products?category=rings&maxPrice=10000&minPrice=0").await.body;
    assert_eq!(a["query"], b["query"]);
    assert_eq!(slugs(&a), slugs(&b));
}

#[tokio::test]
async fn test_product_detail_and_missing_product() {
    let app = storefront(three());

    let response = get(&app, "/products/ruby-ring").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["price"], 15_000);
    assert_eq!(response.body["productStatus"], "available");

    let response = get(&app, "/products/emerald-ring").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.body["error"].as_str().unwrap().contains("emerald-ring"));
}

#[tokio::test]
async fn test_enquiry_redirects_to_whatsapp() {
    let app = storefront(three());
    let response = get(&app, "/products/gold-ring/enquire").await;
    assert!(response.status.is_redirection());

    let location = response.headers.get(header::LOCATION).unwrap().to_str().unwrap();
    assert!(location.starts_with("https://wa.me/919876543210?text="));
    assert!(location.contains("gold%20ring"));
}

#[tokio::test]
async fn test_facets_count_products() {
    let app = storefront(three());
    let categories = get(&app, "/categories").await.body;
    assert_eq!(
        categories,
        json!([
            {"slug": "chains", "name": "Chains", "count": 1},
            {"slug": "rings", "name": "Rings", "count": 2},
        ])
    );

    let collections = get(&app, "/collections").await.body;
    assert_eq!(collections[0]["count"], 3);
}

#[tokio::test]
async fn test_checkout_builds_order_link() {
    let app = storefront(three());
    let response = post_json(
        &app,
        "/checkout",
        &json!({"items": [{"slug": "gold-ring", "quantity": 2}, {"slug": "ruby-ring"}]}),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["itemCount"], 3);
    assert_eq!(response.body["total"], "₹19,000");

    let url = response.body["url"].as_str().unwrap();
    assert!(url.starts_with("https://wa.me/919876543210?text="));
    assert!(url.contains("Total%3A"));
}

#[tokio::test]
async fn test_checkout_rejects_bad_carts() {
    let app = storefront(three());

    let sold = post_json(&app, "/checkout", &json!({"items": [{"slug": "silver-chain"}]})).await;
    assert_eq!(sold.status, StatusCode::BAD_REQUEST);

    let empty = post_json(&app, "/checkout", &json!({"items": []})).await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);

    let unknown = post_json(&app, "/checkout", &json!({"items": [{"slug": "tiara"}]})).await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
}
