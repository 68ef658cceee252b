//! Subcommand implementations.

pub mod cart;
pub mod listing;
pub mod wishlist;

use std::path::PathBuf;

use heirloom_core::{Product, ProductSlug};
use heirloom_storefront::cart::CartError;
use heirloom_storefront::catalog::{Catalog, CatalogError};
use heirloom_storefront::checkout::CheckoutError;
use heirloom_storefront::storage::{FileStorage, StorageError};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// The slug is not in the catalog.
    #[error("No product with slug: {0}")]
    UnknownProduct(ProductSlug),

    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Paths shared by every command.
#[derive(Debug, Clone)]
pub struct Context {
    catalog_path: PathBuf,
    data_dir: PathBuf,
}

impl Context {
    pub const fn new(catalog_path: PathBuf, data_dir: PathBuf) -> Self {
        Self {
            catalog_path,
            data_dir,
        }
    }

    pub async fn catalog(&self) -> Result<Catalog, CliError> {
        Ok(Catalog::load(&self.catalog_path).await?)
    }

    pub fn storage(&self) -> FileStorage {
        FileStorage::new(&self.data_dir)
    }

    /// Look a product up in the catalog, by its slug.
    pub async fn product(&self, slug: &ProductSlug) -> Result<Product, CliError> {
        self.catalog()
            .await?
            .get(slug)
            .cloned()
            .ok_or_else(|| CliError::UnknownProduct(slug.clone()))
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::Path;

    use super::Context;

    pub const CATALOG: &str = r#"[
        {"slug": "gold-ring", "title": "Gold Ring", "price": 2000, "discountPrice": 1800},
        {"slug": "opal-pendant", "title": "Opal Pendant", "price": 6500},
        {"slug": "ruby-earrings", "title": "Ruby Earrings", "price": 9000, "productStatus": "sold"}
    ]"#;

    /// Context rooted in `dir`, with the sample catalog written out.
    #[allow(clippy::unwrap_used)]
    pub fn context(dir: &Path) -> Context {
        let catalog = dir.join("catalog.json");
        std::fs::write(&catalog, CATALOG).unwrap();
        Context::new(catalog, dir.join("data"))
    }
}
