//! Product catalog exported from the CMS.
//!
//! The CMS layer fetches products and writes them out as JSON, either a bare
//! array or `{"products": [...]}`. The storefront loads that export once at
//! startup and serves every listing from memory.

use std::collections::HashMap;
use std::collections::btree_map::{BTreeMap, Entry};
use std::path::Path;

use heirloom_core::{Product, ProductSlug};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::listing::sort_products_by_date;

/// Errors that can occur when loading the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Export file could not be read.
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Export is not valid product JSON.
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two products share a slug.
    #[error("duplicate product slug: {0}")]
    DuplicateSlug(ProductSlug),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Export {
    Bare(Vec<Product>),
    Wrapped { products: Vec<Product> },
}

/// A category or collection with the number of products tagged with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Facet {
    pub slug: String,
    pub name: String,
    pub count: usize,
}

/// All products, indexed by slug.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    by_slug: HashMap<ProductSlug, usize>,
    recent: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from already-fetched products.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateSlug` if two products share a slug.
    pub fn from_products(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut by_slug = HashMap::with_capacity(products.len());
        for (index, product) in products.iter().enumerate() {
            if by_slug.insert(product.slug.clone(), index).is_some() {
                return Err(CatalogError::DuplicateSlug(product.slug.clone()));
            }
        }
        let recent = sort_products_by_date(&products);
        Ok(Self {
            products,
            by_slug,
            recent,
        })
    }

    /// Parse a CMS export.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the JSON is malformed or slugs repeat.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products = match serde_json::from_str::<Export>(json)? {
            Export::Bare(products) | Export::Wrapped { products } => products,
        };
        Self::from_products(products)
    }

    /// Read and parse a CMS export file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the file cannot be read or parsed.
    pub async fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| CatalogError::Io {
                path: path.display().to_string(),
                source,
            })?;
        let catalog = Self::from_json(&json)?;
        tracing::info!(
            path = %path.display(),
            products = catalog.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    #[must_use]
    pub fn get(&self, slug: &ProductSlug) -> Option<&Product> {
        self.by_slug
            .get(slug)
            .and_then(|&index| self.products.get(index))
    }

    /// Newest products first, capped at `MAX_PRODUCTS`. Every listing starts here.
    #[must_use]
    pub fn recent(&self) -> &[Product] {
        &self.recent
    }

    /// Categories in name order with product counts.
    #[must_use]
    pub fn categories(&self) -> Vec<Facet> {
        count_facets(self.products.iter().flat_map(|p| {
            p.categories
                .iter()
                .map(|c| (c.slug.as_str(), c.name.as_str()))
        }))
    }

    /// Collections in title order with product counts.
    #[must_use]
    pub fn collections(&self) -> Vec<Facet> {
        count_facets(self.products.iter().flat_map(|p| {
            p.collections
                .iter()
                .map(|c| (c.slug.as_str(), c.title.as_str()))
        }))
    }
}

fn count_facets<'a>(refs: impl Iterator<Item = (&'a str, &'a str)>) -> Vec<Facet> {
    let mut by_slug: BTreeMap<&str, Facet> = BTreeMap::new();
    for (slug, name) in refs {
        match by_slug.entry(slug) {
            Entry::Occupied(mut entry) => entry.get_mut().count += 1,
            Entry::Vacant(entry) => {
                entry.insert(Facet {
                    slug: slug.to_string(),
                    name: name.to_string(),
                    count: 1,
                });
            }
        }
    }
    let mut facets: Vec<Facet> = by_slug.into_values().collect();
    facets.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.slug.cmp(&b.slug)));
    facets
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const EXPORT: &str = r#"{"products": [
        {"slug": "gold-ring", "title": "Gold Ring", "price": 2000,
         "categories": [{"name": "Rings", "slug": "rings"}],
         "collections": [{"title": "Bridal", "slug": "bridal"}],
         "createdAt": "2024-02-01T00:00:00Z"},
        {"slug": "silver-chain", "title": "Silver Chain", "price": 8000,
         "productStatus": "sold",
         "categories": [{"name": "Chains", "slug": "chains"}],
         "createdAt": "2024-03-01T00:00:00Z"},
        {"slug": "ruby-ring", "title": "Ruby Ring", "price": 15000,
         "categories": [{"name": "Rings", "slug": "rings"}]}
    ]}"#;

    #[test]
    fn test_parses_wrapped_and_bare_exports() {
        let catalog = Catalog::from_json(EXPORT).unwrap();
        assert_eq!(catalog.len(), 3);

        let bare = Catalog::from_json(r#"[{"slug": "a", "title": "A"}]"#).unwrap();
        assert_eq!(bare.len(), 1);
    }

    #[test]
    fn test_rejects_duplicate_slugs() {
        let result = Catalog::from_json(
            r#"[{"slug": "a", "title": "A"}, {"slug": "a", "title": "Again"}]"#,
        );
        assert!(matches!(result, Err(CatalogError::DuplicateSlug(_))));
    }

    #[test]
    fn test_lookup_by_slug() {
        let catalog = Catalog::from_json(EXPORT).unwrap();
        let product = catalog.get(&ProductSlug::new("ruby-ring")).unwrap();
        assert_eq!(product.title, "Ruby Ring");
        assert!(catalog.get(&ProductSlug::new("missing")).is_none());
    }

    #[test]
    fn test_recent_orders_newest_first() {
        let catalog = Catalog::from_json(EXPORT).unwrap();
        let slugs: Vec<&str> = catalog.recent().iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["silver-chain", "gold-ring", "ruby-ring"]);
    }

    #[test]
    fn test_facets_count_products() {
        let catalog = Catalog::from_json(EXPORT).unwrap();
        let categories = catalog.categories();
        assert_eq!(
            categories,
            vec![
                Facet {
                    slug: "chains".to_string(),
                    name: "Chains".to_string(),
                    count: 1
                },
                Facet {
                    slug: "rings".to_string(),
                    name: "Rings".to_string(),
                    count: 2
                },
            ]
        );
        assert_eq!(catalog.collections().len(), 1);
    }

    #[tokio::test]
    async fn test_load_reports_missing_file() {
        let result = Catalog::load(Path::new("/nonexistent/catalog.json")).await;
        assert!(matches!(result, Err(CatalogError::Io { .. })));
    }
}
