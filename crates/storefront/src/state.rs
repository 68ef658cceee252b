//! Application state shared across handlers.

use std::sync::Arc;

use moka::future::Cache;

use crate::catalog::Catalog;
use crate::checkout::{CheckoutError, WhatsAppCheckout};
use crate::config::StorefrontConfig;
use crate::routes::products::ListingResponse;

/// Cache of rendered listings keyed by canonical query plus display count.
pub type ListingCache = Cache<String, Arc<ListingResponse>>;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the catalog, checkout link builder and listing cache.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    checkout: WhatsAppCheckout,
    listings: ListingCache,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `catalog` - Products loaded from the CMS export
    ///
    /// # Errors
    ///
    /// Returns an error if the configured WhatsApp number is invalid.
    pub fn new(config: StorefrontConfig, catalog: Catalog) -> Result<Self, CheckoutError> {
        let checkout = config.checkout()?;
        let listings = Cache::builder()
            .max_capacity(config.listing_cache.capacity)
            .time_to_live(config.listing_cache.ttl)
            .build();

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                checkout,
                listings,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the WhatsApp checkout link builder.
    #[must_use]
    pub fn checkout(&self) -> &WhatsAppCheckout {
        &self.inner.checkout
    }

    /// Get a reference to the listing cache.
    #[must_use]
    pub fn listings(&self) -> &ListingCache {
        &self.inner.listings
    }
}
