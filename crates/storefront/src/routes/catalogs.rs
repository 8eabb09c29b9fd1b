//! Catalog downloads page.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use proscience_core::ProductCategory;
use tracing::instrument;

use crate::filters;
use crate::state::AppState;

/// A downloadable or on-request catalog document.
#[derive(Clone, Copy)]
pub struct CatalogDocument {
    pub title: &'static str,
    pub description: &'static str,
    pub kind: &'static str,
    pub size: &'static str,
    pub pages: &'static str,
}

const DOCUMENTS: &[CatalogDocument] = &[
    CatalogDocument {
        title: "2024 Product Catalog",
        description: "Our complete range with detailed descriptions, usage guidelines and nutritional information.",
        kind: "PDF",
        size: "12.5 MB",
        pages: "48",
    },
    CatalogDocument {
        title: "Wholesale Catalog",
        description: "Volume pricing and terms for retailers and distributors.",
        kind: "Request",
        size: "Available upon request",
        pages: "Custom",
    },
    CatalogDocument {
        title: "Product Specification Sheets",
        description: "Technical specifications, ingredient lists and quality certifications for each product.",
        kind: "PDF",
        size: "8.2 MB",
        pages: "32",
    },
    CatalogDocument {
        title: "Nutrition Guide",
        description: "Recommended dosages and how to fit our products into a wellness routine.",
        kind: "PDF",
        size: "5.8 MB",
        pages: "24",
    },
];

/// One product row in the overview table.
#[derive(Clone)]
pub struct CatalogEntry {
    pub slug: String,
    pub name: String,
    pub price: String,
}

/// Products in one category, for the overview table.
#[derive(Clone)]
pub struct CategorySection {
    pub slug: &'static str,
    pub name: &'static str,
    pub products: Vec<CatalogEntry>,
}

/// Catalogs page template.
#[derive(Template, WebTemplate)]
#[template(path = "catalogs.html")]
pub struct CatalogsTemplate {
    pub documents: &'static [CatalogDocument],
    pub sections: Vec<CategorySection>,
}

/// Display catalog downloads and a per-category product overview.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> CatalogsTemplate {
    let catalog = state.catalog();

    let sections = ProductCategory::ALL
        .into_iter()
        .map(|category| CategorySection {
            slug: category.slug(),
            name: category.name(),
            products: catalog
                .by_category(category)
                .into_iter()
                .map(|p| CatalogEntry {
                    slug: p.slug.clone(),
                    name: p.name.clone(),
                    price: p.unit_price().display(),
                })
                .collect(),
        })
        .collect();

    CatalogsTemplate {
        documents: DOCUMENTS,
        sections,
    }
}
