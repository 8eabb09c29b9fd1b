//! Application state shared across handlers.

use std::sync::Arc;

use proscience_core::Catalog;
use tokio::sync::RwLock;

use crate::config::AdminConfig;
use crate::data::{BackOffice, ReviewBook};
use crate::services::AdminAuthService;

/// Application state shared across all handlers.
///
/// Cheap to clone. The catalog, orders and customers are read-only; reviews
/// sit behind a lock because moderation edits them in place.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    auth: AdminAuthService,
    catalog: Catalog,
    back_office: BackOffice,
    reviews: RwLock<ReviewBook>,
}

impl AppState {
    #[must_use]
    pub fn new(
        config: AdminConfig,
        auth: AdminAuthService,
        catalog: Catalog,
        reviews: ReviewBook,
    ) -> Self {
        let back_office = BackOffice::seeded(&catalog);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                auth,
                catalog,
                back_office,
                reviews: RwLock::new(reviews),
            }),
        }
    }

    /// Get a reference to the admin configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn auth(&self) -> &AdminAuthService {
        &self.inner.auth
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Orders and customers.
    #[must_use]
    pub fn back_office(&self) -> &BackOffice {
        &self.inner.back_office
    }

    #[must_use]
    pub fn reviews(&self) -> &RwLock<ReviewBook> {
        &self.inner.reviews
    }
}
