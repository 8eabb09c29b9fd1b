//! Product route handlers.

use std::str::FromStr;

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, Query, State};
use chrono::{DateTime, Utc};
use proscience_core::catalog::RELATED_PRODUCT_LIMIT;
use proscience_core::{
    Price, Product, ProductCategory, ProductQuery, SortOption, StockFilter,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use crate::cart::MAX_LINE_QUANTITY;
use crate::error::{AppError, Result};
use crate::filters;
use crate::state::AppState;

/// Product card data for listing grids.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: i32,
    pub slug: String,
    pub name: String,
    pub category: String,
    pub short_description: String,
    pub price: String,
    pub compare_at_price: Option<String>,
    pub discount_percent: u32,
    pub image: String,
    pub in_stock: bool,
    pub is_new: bool,
    pub flavour: Option<String>,
}

impl ProductCardView {
    #[must_use]
    pub fn new(product: &Product, now: DateTime<Utc>) -> Self {
        Self {
            id: product.id.as_i32(),
            slug: product.slug.clone(),
            name: product.name.clone(),
            category: product.category.name().to_string(),
            short_description: product.short_description.clone(),
            price: product.unit_price().display(),
            compare_at_price: product
                .compare_at_price
                .filter(|compare_at| *compare_at > product.price)
                .map(|compare_at| Price::usd(compare_at).display()),
            discount_percent: product.discount_percent(),
            image: product.images.first().cloned().unwrap_or_default(),
            in_stock: product.in_stock,
            is_new: product.is_new(now),
            flavour: product.flavour.clone(),
        }
    }
}

/// Build card views for a list of products.
pub fn cards<'a>(products: impl IntoIterator<Item = &'a Product>, now: DateTime<Utc>) -> Vec<ProductCardView> {
    products
        .into_iter()
        .map(|product| ProductCardView::new(product, now))
        .collect()
}

/// A row of the supplement facts panel.
#[derive(Clone)]
pub struct NutrientView {
    pub name: String,
    pub amount: String,
    pub daily_value: String,
}

/// Full product data for the detail page.
#[derive(Clone)]
pub struct ProductDetailView {
    pub card: ProductCardView,
    pub category_slug: String,
    pub description: String,
    pub images: Vec<String>,
    pub ingredients: Vec<String>,
    pub benefits: Vec<String>,
    pub usage_instructions: String,
    pub serving_size: Option<String>,
    pub servings_per_container: Option<u32>,
    pub nutrients: Vec<NutrientView>,
    /// Units left, shown only when stock is running low.
    pub low_stock: Option<u32>,
    /// Upper bound for the quantity picker.
    pub max_quantity: u32,
    pub tags: Vec<String>,
}

impl ProductDetailView {
    fn new(product: &Product, now: DateTime<Utc>) -> Self {
        let facts = product.nutrition_facts.as_ref();
        Self {
            card: ProductCardView::new(product, now),
            category_slug: product.category.slug().to_string(),
            description: product.description.clone(),
            images: product.images.clone(),
            ingredients: product.ingredients.clone(),
            benefits: product.benefits.clone(),
            usage_instructions: product.usage_instructions.clone(),
            serving_size: facts.map(|f| f.serving_size.clone()),
            servings_per_container: facts.map(|f| f.servings_per_container),
            nutrients: facts
                .map(|f| {
                    f.nutrients
                        .iter()
                        .map(|n| NutrientView {
                            name: n.name.clone(),
                            amount: n.amount.clone(),
                            daily_value: n.daily_value.clone().unwrap_or_else(|| "†".to_string()),
                        })
                        .collect()
                })
                .unwrap_or_default(),
            low_stock: product
                .stock_quantity
                .filter(|_| product.is_low_stock()),
            max_quantity: product
                .stock_quantity
                .map_or(MAX_LINE_QUANTITY, |stock| stock.min(MAX_LINE_QUANTITY)),
            tags: product.tags.clone(),
        }
    }
}

/// Category filter option.
#[derive(Clone)]
pub struct CategoryOption {
    pub slug: &'static str,
    pub name: &'static str,
    pub selected: bool,
}

/// Flavour filter option.
#[derive(Clone)]
pub struct FlavourOption {
    pub name: String,
    pub selected: bool,
}

/// Listing query parameters.
///
/// Everything is taken as text so that blank form fields are simply ignored
/// instead of failing extraction.
#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    pub category: Option<String>,
    pub q: Option<String>,
    /// Comma-separated flavour names.
    pub flavour: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    /// `in` or `out`.
    pub stock: Option<String>,
    /// `true` to show only new products.
    pub new: Option<String>,
    pub sort: Option<String>,
}

impl ListingQuery {
    /// Convert to a catalog query, dropping values that don't parse.
    #[must_use]
    pub fn to_product_query(&self) -> ProductQuery {
        ProductQuery {
            category: non_blank(self.category.as_deref())
                .and_then(|c| ProductCategory::from_str(c).ok()),
            search: non_blank(self.q.as_deref()).map(str::to_string),
            flavours: self
                .flavour
                .as_deref()
                .map(|list| {
                    list.split(',')
                        .map(str::trim)
                        .filter(|f| !f.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            min_price: parse_price(self.min_price.as_deref()),
            max_price: parse_price(self.max_price.as_deref()),
            stock: non_blank(self.stock.as_deref())
                .and_then(|s| StockFilter::from_str(s).ok())
                .unwrap_or_default(),
            new_only: non_blank(self.new.as_deref())
                .is_some_and(|v| matches!(v, "true" | "1" | "on")),
            sort: non_blank(self.sort.as_deref())
                .and_then(|s| SortOption::from_str(s).ok())
                .unwrap_or_default(),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_price(value: Option<&str>) -> Option<Decimal> {
    non_blank(value)
        .and_then(|v| Decimal::from_str(v).ok())
        .filter(|price| !price.is_sign_negative())
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub products: Vec<ProductCardView>,
    pub total: usize,
    pub categories: Vec<CategoryOption>,
    pub flavours: Vec<FlavourOption>,
    pub search: String,
    pub min_price: String,
    pub max_price: String,
    pub stock: &'static str,
    pub new_only: bool,
    pub sort: &'static str,
    pub has_filters: bool,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductDetailView,
    pub related_products: Vec<ProductCardView>,
}

/// Display product listing page.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> ProductsIndexTemplate {
    let catalog = state.catalog();
    let product_query = query.to_product_query();
    let products = catalog.query(&product_query, Utc::now());

    let (floor, ceiling) = catalog
        .price_bounds()
        .unwrap_or((Decimal::ZERO, Decimal::ZERO));
    let min_price = product_query.min_price.unwrap_or(floor);
    let max_price = product_query.max_price.unwrap_or(ceiling);

    ProductsIndexTemplate {
        total: products.len(),
        products: cards(products, Utc::now()),
        categories: ProductCategory::ALL
            .into_iter()
            .map(|category| CategoryOption {
                slug: category.slug(),
                name: category.name(),
                selected: product_query.category == Some(category),
            })
            .collect(),
        flavours: catalog
            .flavours()
            .into_iter()
            .map(|name| FlavourOption {
                selected: product_query
                    .flavours
                    .iter()
                    .any(|f| f.eq_ignore_ascii_case(name)),
                name: name.to_string(),
            })
            .collect(),
        search: product_query.search.clone().unwrap_or_default(),
        min_price: format!("{min_price:.2}"),
        max_price: format!("{max_price:.2}"),
        stock: match product_query.stock {
            StockFilter::All => "",
            StockFilter::InStock => "in",
            StockFilter::OutOfStock => "out",
        },
        new_only: product_query.new_only,
        sort: product_query.sort.as_str(),
        has_filters: product_query.has_filters(),
    }
}

/// Display product detail page.
///
/// # Errors
///
/// Returns 404 if no product has this slug.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<ProductShowTemplate> {
    let catalog = state.catalog();
    let product = catalog
        .by_slug(&slug)
        .ok_or_else(|| AppError::NotFound(format!("product {slug}")))?;

    let now = Utc::now();
    Ok(ProductShowTemplate {
        product: ProductDetailView::new(product, now),
        related_products: cards(catalog.related(product, RELATED_PRODUCT_LIMIT), now),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> ListingQuery {
        let mut q = ListingQuery::default();
        for (key, value) in pairs {
            let value = Some((*value).to_string());
            match *key {
                "category" => q.category = value,
                "q" => q.q = value,
                "flavour" => q.flavour = value,
                "min_price" => q.min_price = value,
                "max_price" => q.max_price = value,
                "stock" => q.stock = value,
                "new" => q.new = value,
                "sort" => q.sort = value,
                _ => {}
            }
        }
        q
    }

    #[test]
    fn test_blank_fields_are_ignored() {
        let pq = query(&[("category", ""), ("min_price", " "), ("q", ""), ("sort", "")])
            .to_product_query();
        assert!(!pq.has_filters());
        assert_eq!(pq.sort, SortOption::Default);
    }

    #[test]
    fn test_query_parsing() {
        let pq = query(&[
            ("category", "Protein"),
            ("flavour", "Chocolate, Vanilla,"),
            ("min_price", "20"),
            ("max_price", "not-a-number"),
            ("stock", "in"),
            ("new", "true"),
            ("sort", "price-high"),
        ])
        .to_product_query();

        assert_eq!(pq.category, Some(ProductCategory::Protein));
        assert_eq!(pq.flavours, vec!["Chocolate", "Vanilla"]);
        assert_eq!(pq.min_price, Some(Decimal::new(20, 0)));
        assert_eq!(pq.max_price, None);
        assert_eq!(pq.stock, StockFilter::InStock);
        assert!(pq.new_only);
        assert_eq!(pq.sort, SortOption::PriceHigh);
    }

    #[test]
    fn test_unknown_category_is_ignored() {
        let pq = query(&[("category", "snacks")]).to_product_query();
        assert_eq!(pq.category, None);
    }
}
