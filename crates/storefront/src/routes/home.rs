//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use chrono::Utc;
use proscience_core::ProductCategory;
use tracing::instrument;

use super::products::{ProductCardView, cards};
use crate::filters;
use crate::state::AppState;

/// A category tile on the home page.
#[derive(Clone)]
pub struct CategoryTile {
    pub slug: &'static str,
    pub name: &'static str,
    pub product_count: usize,
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct HomeTemplate {
    pub featured_products: Vec<ProductCardView>,
    pub categories: Vec<CategoryTile>,
    pub free_shipping_threshold: String,
}

/// Display the home page.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> HomeTemplate {
    let catalog = state.catalog();

    HomeTemplate {
        featured_products: cards(catalog.featured(), Utc::now()),
        categories: ProductCategory::ALL
            .into_iter()
            .map(|category| CategoryTile {
                slug: category.slug(),
                name: category.name(),
                product_count: catalog.by_category(category).len(),
            })
            .collect(),
        free_shipping_threshold: proscience_core::Price::usd(
            state.pricing().free_shipping_threshold,
        )
        .display(),
    }
}
