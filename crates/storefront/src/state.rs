//! Application state shared across handlers.

use std::sync::Arc;

use proscience_core::Catalog;

use crate::cart::PricingPolicy;
use crate::config::StorefrontConfig;
use crate::content::{ContentError, ContentStore};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. Everything in it is read-only
/// after startup; per-visitor state lives in the session.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    content: ContentStore,
}

impl AppState {
    /// Build state from configuration, loading content pages from
    /// `config.content_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the content directory cannot be read.
    pub fn new(config: StorefrontConfig, catalog: Catalog) -> Result<Self, ContentError> {
        let content = ContentStore::load(&config.content_dir)?;
        Ok(Self::with_content(config, catalog, content))
    }

    /// Build state from already-loaded parts.
    #[must_use]
    pub fn with_content(config: StorefrontConfig, catalog: Catalog, content: ContentStore) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                content,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// The product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the content store.
    #[must_use]
    pub fn content(&self) -> &ContentStore {
        &self.inner.content
    }

    /// Shipping and tax rules.
    #[must_use]
    pub fn pricing(&self) -> &PricingPolicy {
        &self.inner.config.pricing
    }
}
