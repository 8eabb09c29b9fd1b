//! The product catalog.
//!
//! A [`Catalog`] is an immutable list of [`Product`]s with the lookups the
//! storefront and admin need: by id or slug, featured and related products,
//! listing queries (filters plus sort) and quick search.

mod seed;

use core::cmp::Ordering;
use core::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::types::{Product, ProductCategory, ProductId};

/// Maximum results returned by quick search.
pub const SEARCH_RESULT_LIMIT: usize = 8;

/// Maximum related products shown on a product page.
pub const RELATED_PRODUCT_LIMIT: usize = 4;

/// Listing sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOption {
    /// Catalog order.
    #[default]
    Default,
    PriceLow,
    PriceHigh,
    NameAsc,
    NameDesc,
}

impl SortOption {
    /// Query-string value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
            Self::NameAsc => "name-asc",
            Self::NameDesc => "name-desc",
        }
    }
}

impl FromStr for SortOption {
    type Err = core::convert::Infallible;

    /// Unknown values fall back to catalog order.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "price-low" => Self::PriceLow,
            "price-high" => Self::PriceHigh,
            "name-asc" => Self::NameAsc,
            "name-desc" => Self::NameDesc,
            _ => Self::Default,
        })
    }
}

/// Stock availability filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StockFilter {
    #[default]
    All,
    InStock,
    OutOfStock,
}

impl FromStr for StockFilter {
    type Err = core::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "in" | "in-stock" => Self::InStock,
            "out" | "out-of-stock" => Self::OutOfStock,
            _ => Self::All,
        })
    }
}

/// Listing filters. Every set field narrows the result; they compose with AND.
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    pub category: Option<ProductCategory>,
    /// Free text, matched against name, description and benefits.
    pub search: Option<String>,
    /// Keep products whose flavour is one of these. Empty means any.
    pub flavours: Vec<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub stock: StockFilter,
    /// Only products added in the last 30 days.
    pub new_only: bool,
    pub sort: SortOption,
}

impl ProductQuery {
    /// Whether any filter (not counting sort) is active.
    #[must_use]
    pub fn has_filters(&self) -> bool {
        self.category.is_some()
            || self.search.as_deref().is_some_and(|s| !s.trim().is_empty())
            || !self.flavours.is_empty()
            || self.min_price.is_some()
            || self.max_price.is_some()
            || self.stock != StockFilter::All
            || self.new_only
    }

    fn accepts(&self, product: &Product, needle: Option<&str>, now: DateTime<Utc>) -> bool {
        if self.category.is_some_and(|category| product.category != category) {
            return false;
        }
        if needle.is_some_and(|needle| !product.matches_text(needle)) {
            return false;
        }
        if !self.flavours.is_empty() {
            let Some(flavour) = product.flavour.as_deref() else {
                return false;
            };
            if !self.flavours.iter().any(|f| f.eq_ignore_ascii_case(flavour)) {
                return false;
            }
        }
        if self.min_price.is_some_and(|min| product.price < min)
            || self.max_price.is_some_and(|max| product.price > max)
        {
            return false;
        }
        match self.stock {
            StockFilter::All => {}
            StockFilter::InStock if !product.in_stock => return false,
            StockFilter::OutOfStock if product.in_stock => return false,
            StockFilter::InStock | StockFilter::OutOfStock => {}
        }
        !self.new_only || product.is_new(now)
    }
}

/// Immutable product catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Wrap an existing product list.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The compiled-in ProScience range.
    #[must_use]
    pub fn seeded() -> Self {
        Self::new(seed::products())
    }

    /// All products, in catalog order.
    #[must_use]
    pub fn all(&self) -> &[Product] {
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

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Look up a product by URL slug.
    #[must_use]
    pub fn by_slug(&self, slug: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.slug == slug)
    }

    /// Featured products, in catalog order.
    #[must_use]
    pub fn featured(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.featured).collect()
    }

    /// Products in one category.
    #[must_use]
    pub fn by_category(&self, category: ProductCategory) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.category == category)
            .collect()
    }

    /// Up to `limit` other products from the same category.
    #[must_use]
    pub fn related(&self, product: &Product, limit: usize) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.category == product.category && p.id != product.id)
            .take(limit)
            .collect()
    }

    /// Lowest and highest unit price, or `None` for an empty catalog.
    #[must_use]
    pub fn price_bounds(&self) -> Option<(Decimal, Decimal)> {
        let min = self.products.iter().map(|p| p.price).min()?;
        let max = self.products.iter().map(|p| p.price).max()?;
        Some((min, max))
    }

    /// Distinct flavours, in first-seen order.
    #[must_use]
    pub fn flavours(&self) -> Vec<&str> {
        let mut flavours: Vec<&str> = Vec::new();
        for flavour in self.products.iter().filter_map(|p| p.flavour.as_deref()) {
            if !flavours.contains(&flavour) {
                flavours.push(flavour);
            }
        }
        flavours
    }

    /// Products at or under the low-stock threshold, or out of stock.
    #[must_use]
    pub fn low_stock(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.is_low_stock()).collect()
    }

    /// Quick search: case-insensitive substring over name, description,
    /// benefits and category. A blank query returns nothing.
    #[must_use]
    pub fn search(&self, query: &str, limit: usize) -> Vec<&Product> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        self.products
            .iter()
            .filter(|p| p.matches_text(&needle) || p.category.slug().contains(&needle))
            .take(limit)
            .collect()
    }

    /// Run a listing query. Sorting is stable, so ties keep catalog order.
    #[must_use]
    pub fn query(&self, query: &ProductQuery, now: DateTime<Utc>) -> Vec<&Product> {
        let needle = query
            .search
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());

        let mut products: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| query.accepts(p, needle.as_deref(), now))
            .collect();

        match query.sort {
            SortOption::Default => {}
            SortOption::PriceLow => products.sort_by(|a, b| a.price.cmp(&b.price)),
            SortOption::PriceHigh => products.sort_by(|a, b| b.price.cmp(&a.price)),
            SortOption::NameAsc => products.sort_by(|a, b| compare_names(a, b)),
            SortOption::NameDesc => products.sort_by(|a, b| compare_names(b, a)),
        }

        products
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::seeded()
    }
}

fn compare_names(a: &Product, b: &Product) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.name.cmp(&b.name))
}
