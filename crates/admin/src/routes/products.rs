//! Product catalog handler.
//!
//! The catalog is read-only reference data, so this is a listing with stock
//! status and nothing to edit.

use askama::Template;
use axum::{
    Router,
    extract::{Query, State},
    response::Html,
    routing::get,
};
use proscience_core::{Catalog, Product, ProductCategory};
use serde::Deserialize;
use tracing::instrument;

use super::{AdminUserView, FilterOption, non_blank, render};
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Build the products router.
pub fn router() -> Router<AppState> {
    Router::new().route("/products", get(index))
}

/// Product list query parameters. Unknown categories are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct ProductListQuery {
    pub category: Option<String>,
    pub q: Option<String>,
}

/// Products in `category` whose name or description contains `search`.
#[must_use]
pub fn filter_products<'a>(
    catalog: &'a Catalog,
    category: Option<ProductCategory>,
    search: Option<&str>,
) -> Vec<&'a Product> {
    let needle = search.map(str::to_lowercase);
    catalog
        .all()
        .iter()
        .filter(|p| category.is_none_or(|c| p.category == c))
        .filter(|p| {
            needle.as_deref().is_none_or(|n| {
                p.name.to_lowercase().contains(n) || p.description.to_lowercase().contains(n)
            })
        })
        .collect()
}

/// Product row for the catalog table.
#[derive(Debug, Clone)]
pub struct ProductRow {
    pub name: String,
    pub slug: String,
    pub image: String,
    pub category: &'static str,
    pub price: String,
    pub compare_at_price: Option<String>,
    pub stock_label: String,
    /// "in", "low" or "out"; drives the badge colour.
    pub stock_level: &'static str,
    pub status_label: &'static str,
}

impl From<&Product> for ProductRow {
    fn from(product: &Product) -> Self {
        let stock_label = match (product.in_stock, product.stock_quantity) {
            (false, _) => "Out of Stock".to_string(),
            (true, Some(quantity)) => format!("{quantity} in stock"),
            (true, None) => "In Stock".to_string(),
        };
        let stock_level = if !product.in_stock {
            "out"
        } else if product.is_low_stock() {
            "low"
        } else {
            "in"
        };
        let status_label = if product.featured {
            "Featured"
        } else if product.in_stock {
            "Active"
        } else {
            "Inactive"
        };

        Self {
            name: product.name.clone(),
            slug: product.slug.clone(),
            image: product.images.first().cloned().unwrap_or_default(),
            category: product.category.name(),
            price: product.unit_price().display(),
            compare_at_price: product
                .compare_at_price
                .filter(|_| product.discount_percent() > 0)
                .map(|amount| proscience_core::Price::usd(amount).display()),
            stock_label,
            stock_level,
            status_label,
        }
    }
}

/// Products page template.
#[derive(Template)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub products: Vec<ProductRow>,
    pub total_count: usize,
    pub low_stock_count: usize,
    pub category_options: Vec<FilterOption>,
    pub search: String,
}

/// Catalog listing.
///
/// GET /products
#[instrument(skip(admin, state))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Result<Html<String>> {
    let category: Option<ProductCategory> =
        non_blank(query.category.as_deref()).and_then(|c| c.parse().ok());
    let search = non_blank(query.q.as_deref());
    let catalog = state.catalog();

    let products = filter_products(catalog, category, search)
        .into_iter()
        .map(ProductRow::from)
        .collect();

    render(&ProductsIndexTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: "/products".to_string(),
        products,
        total_count: catalog.len(),
        low_stock_count: catalog.low_stock().len(),
        category_options: FilterOption::list(
            ProductCategory::ALL.iter().map(|c| (c.slug(), c.name())),
            category.map(|c| c.slug()),
        ),
        search: search.unwrap_or_default().to_string(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn slugs(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.slug.clone()).collect()
    }

    #[test]
    fn test_filter_by_category_and_search() {
        let catalog = Catalog::seeded();
        assert_eq!(filter_products(&catalog, None, None).len(), catalog.len());

        let protein = filter_products(&catalog, Some(ProductCategory::Protein), None);
        assert_eq!(
            slugs(&protein),
            vec!["whey-protein-isolate", "plant-protein-blend", "casein-night-protein"]
        );

        let whey = filter_products(&catalog, Some(ProductCategory::Protein), Some("WHEY"));
        assert_eq!(slugs(&whey), vec!["whey-protein-isolate"]);

        assert!(filter_products(&catalog, Some(ProductCategory::Sports), Some("whey")).is_empty());
    }

    #[test]
    fn test_stock_labels() {
        let catalog = Catalog::seeded();

        let casein = ProductRow::from(catalog.by_slug("casein-night-protein").unwrap());
        assert_eq!(casein.stock_label, "Out of Stock");
        assert_eq!(casein.stock_level, "out");
        assert_eq!(casein.status_label, "Inactive");

        let d3 = ProductRow::from(catalog.by_slug("vitamin-d3-k2").unwrap());
        assert_eq!(d3.stock_label, "18 in stock");
        assert_eq!(d3.stock_level, "low");

        let magnesium = ProductRow::from(catalog.by_slug("magnesium-glycinate").unwrap());
        assert_eq!(magnesium.stock_label, "In Stock");
        assert_eq!(magnesium.stock_level, "in");
    }
}
