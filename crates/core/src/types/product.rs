//! Catalog product as exported by the CMS.
//!
//! Field names follow the CMS document shape (`camelCase`). Every field
//! except `slug` and `title` may be missing or `null` and falls back to a
//! default, so a partially-authored product never breaks a listing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::types::price::Price;
use crate::types::slug::{CategorySlug, CollectionSlug, ProductSlug};
use crate::types::status::ProductStatus;

/// Reference from a product to one of its categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub name: String,
    pub slug: CategorySlug,
}

/// Reference from a product to one of its collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionRef {
    pub title: String,
    pub slug: CollectionSlug,
}

/// A single resale piece.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub slug: ProductSlug,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: Price,
    #[serde(default)]
    pub discount_price: Option<Price>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub product_status: ProductStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub categories: Vec<CategoryRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub collections: Vec<CollectionRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<String>,
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Create a product with only the required fields set.
    #[must_use]
    pub fn new(slug: impl Into<ProductSlug>, title: impl Into<String>, price: u64) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            description: String::new(),
            price: Price::new(price),
            discount_price: None,
            product_status: ProductStatus::default(),
            categories: Vec::new(),
            collections: Vec::new(),
            images: Vec::new(),
            created_at: None,
        }
    }

    /// The price a customer actually pays: the discount price when present.
    #[must_use]
    pub fn effective_price(&self) -> Price {
        self.discount_price.unwrap_or(self.price)
    }

    /// Creation time in milliseconds since the epoch; missing sorts as oldest.
    #[must_use]
    pub fn created_millis(&self) -> i64 {
        self.created_at.map_or(0, |at| at.timestamp_millis())
    }

    /// First image URL, if any.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    #[must_use]
    pub fn has_category(&self, slug: &CategorySlug) -> bool {
        self.categories.iter().any(|c| &c.slug == slug)
    }

    #[must_use]
    pub fn has_collection(&self, slug: &CollectionSlug) -> bool {
        self.collections.iter().any(|c| &c.slug == slug)
    }
}

/// Treat an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parse an RFC 3339 timestamp, mapping anything unparsable to `None`.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| {
        DateTime::parse_from_rfc3339(&s)
            .ok()
            .map(|at| at.with_timezone(&Utc))
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_cms_document() {
        let json = r#"{
            "slug": "victorian-garnet-ring",
            "title": "Victorian Garnet Ring",
            "price": 18500,
            "discountPrice": 16000,
            "productStatus": "reserved",
            "categories": [{"name": "Rings", "slug": "rings"}],
            "collections": [{"title": "Antique", "slug": "antique"}],
            "createdAt": "2024-03-01T10:00:00.000Z"
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.slug.as_str(), "victorian-garnet-ring");
        assert_eq!(product.price, Price::new(18_500));
        assert_eq!(product.effective_price(), Price::new(16_000));
        assert_eq!(product.product_status, ProductStatus::Reserved);
        assert!(product.has_category(&CategorySlug::new("rings")));
        assert!(product.has_collection(&CollectionSlug::new("antique")));
        assert!(product.created_millis() > 0);
    }

    #[test]
    fn test_deserialize_sparse_document_uses_defaults() {
        let json = r#"{
            "slug": "plain-band",
            "title": "Plain Band",
            "price": null,
            "categories": null,
            "createdAt": "last tuesday"
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.price, Price::ZERO);
        assert_eq!(product.product_status, ProductStatus::Available);
        assert!(product.categories.is_empty());
        assert!(product.collections.is_empty());
        assert_eq!(product.created_at, None);
        assert_eq!(product.created_millis(), 0);
    }

    #[test]
    fn test_effective_price_without_discount() {
        let product = Product::new("pearl-studs", "Pearl Studs", 4_200);
        assert_eq!(product.effective_price(), Price::new(4_200));
    }
}
