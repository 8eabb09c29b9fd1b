//! Product reference data.

use core::fmt;
use core::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// Products younger than this are badged as new.
pub const NEW_PRODUCT_WINDOW_DAYS: i64 = 30;

/// Stock level at or below which the admin flags a product.
pub const LOW_STOCK_THRESHOLD: u32 = 20;

/// Top-level catalog category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    Vitamins,
    Protein,
    Wellness,
    Sports,
}

impl ProductCategory {
    /// All categories, in navigation order.
    pub const ALL: [Self; 4] = [Self::Vitamins, Self::Protein, Self::Wellness, Self::Sports];

    /// URL slug.
    #[must_use]
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::Vitamins => "vitamins",
            Self::Protein => "protein",
            Self::Wellness => "wellness",
            Self::Sports => "sports",
        }
    }

    /// Display name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Vitamins => "Vitamins",
            Self::Protein => "Protein",
            Self::Wellness => "Wellness",
            Self::Sports => "Sports",
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Error returned for an unknown category slug.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown product category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for ProductCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.slug().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownCategory(s.to_owned()))
    }
}

/// One row of a supplement facts panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionFact {
    pub name: String,
    pub amount: String,
    pub daily_value: Option<String>,
}

/// Supplement facts panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionFacts {
    pub serving_size: String,
    pub servings_per_container: u32,
    pub nutrients: Vec<NutritionFact>,
}

/// A catalog product.
///
/// Products are immutable reference data: they are built once from seed data
/// and shared read-only. Carts hold their own clone of the record so a cart
/// line always renders with the name and price it was added at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub slug: String,
    pub name: String,
    pub category: ProductCategory,
    pub price: Decimal,
    pub compare_at_price: Option<Decimal>,
    pub images: Vec<String>,
    pub description: String,
    pub short_description: String,
    pub ingredients: Vec<String>,
    pub nutrition_facts: Option<NutritionFacts>,
    pub benefits: Vec<String>,
    pub usage_instructions: String,
    pub in_stock: bool,
    /// Units on hand, when tracked. `None` means stock is not counted.
    pub stock_quantity: Option<u32>,
    pub tags: Vec<String>,
    pub featured: bool,
    pub flavour: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Unit price as a [`Price`].
    #[must_use]
    pub const fn unit_price(&self) -> Price {
        Price::usd(self.price)
    }

    /// Percentage saved against the compare-at price, rounded to a whole
    /// percent. Zero when there is no (higher) compare-at price.
    #[must_use]
    pub fn discount_percent(&self) -> u32 {
        let Some(compare_at) = self.compare_at_price else {
            return 0;
        };
        if compare_at <= self.price || compare_at.is_zero() {
            return 0;
        }

        let percent = ((compare_at - self.price) / compare_at * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero);
        percent.to_u32().unwrap_or(0)
    }

    /// Whether the product was added within the last 30 days of `now`.
    #[must_use]
    pub fn is_new(&self, now: DateTime<Utc>) -> bool {
        self.created_at > now - Duration::days(NEW_PRODUCT_WINDOW_DAYS)
    }

    /// Whether the admin should flag this product for restocking.
    #[must_use]
    pub fn is_low_stock(&self) -> bool {
        !self.in_stock
            || self
                .stock_quantity
                .is_some_and(|quantity| quantity <= LOW_STOCK_THRESHOLD)
    }

    /// Case-insensitive substring match against name, description and
    /// benefits. `needle` must already be lowercased.
    #[must_use]
    pub fn matches_text(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self
                .benefits
                .iter()
                .any(|benefit| benefit.to_lowercase().contains(needle))
    }
}
