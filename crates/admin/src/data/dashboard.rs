//! Dashboard figures.

use proscience_core::{Catalog, Price};
use rust_decimal::Decimal;
use serde::Serialize;

use super::analytics::{TopProduct, top_products};
use super::{ReviewStats, format_count};

/// Number of best sellers shown on the dashboard.
pub const DASHBOARD_TOP_PRODUCTS: usize = 4;

/// Headline numbers for the dashboard and `/api/stats`.
///
/// Product counts come from the live catalog and the review count from the
/// review book; the sales figures are fixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_revenue: Decimal,
    pub today_revenue: Decimal,
    pub total_orders: u32,
    pub today_orders: u32,
    pub total_products: usize,
    pub low_stock_products: usize,
    pub total_customers: u32,
    pub pending_orders: u32,
    pub pending_reviews: usize,
    pub average_order_value: Decimal,
    /// Percent of sessions that convert.
    pub conversion_rate: Decimal,
}

impl DashboardStats {
    #[must_use]
    pub fn compute(catalog: &Catalog, reviews: &ReviewStats) -> Self {
        Self {
            total_revenue: Decimal::new(12_543_050, 2),
            today_revenue: Decimal::new(124_550, 2),
            total_orders: 1247,
            today_orders: 12,
            total_products: catalog.len(),
            low_stock_products: catalog.low_stock().len(),
            total_customers: 10_234,
            pending_orders: 23,
            pending_reviews: reviews.pending,
            average_order_value: Decimal::new(10_058, 2),
            conversion_rate: Decimal::new(32, 1),
        }
    }

    /// The six dashboard cards.
    #[must_use]
    pub fn cards(&self) -> Vec<StatCard> {
        vec![
            StatCard {
                title: "Total Revenue",
                value: Price::usd(self.total_revenue).display_grouped(),
                change: "+12.5%",
                positive: true,
                subtitle: format!("Today: {}", Price::usd(self.today_revenue).display()),
                href: "/analytics",
            },
            StatCard {
                title: "Total Orders",
                value: format_count(u64::from(self.total_orders)),
                change: "+8.2%",
                positive: true,
                subtitle: format!("{} today", self.today_orders),
                href: "/orders",
            },
            StatCard {
                title: "Total Products",
                value: self.total_products.to_string(),
                change: "+3",
                positive: true,
                subtitle: format!("{} low stock", self.low_stock_products),
                href: "/products",
            },
            StatCard {
                title: "Total Customers",
                value: format_count(u64::from(self.total_customers)),
                change: "+15.3%",
                positive: true,
                subtitle: "Active customers".to_owned(),
                href: "/customers",
            },
            StatCard {
                title: "Pending Orders",
                value: self.pending_orders.to_string(),
                change: "-5",
                positive: false,
                subtitle: "Needs attention".to_owned(),
                href: "/orders?status=pending",
            },
            StatCard {
                title: "Average Order Value",
                value: Price::usd(self.average_order_value).display(),
                change: "+3.9%",
                positive: true,
                subtitle: format!("{}% conversion", self.conversion_rate),
                href: "/analytics",
            },
        ]
    }

    #[must_use]
    pub fn top_products() -> Vec<TopProduct> {
        top_products(DASHBOARD_TOP_PRODUCTS)
    }
}

/// One dashboard tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    pub title: &'static str,
    pub value: String,
    pub change: &'static str,
    pub positive: bool,
    pub subtitle: String,
    pub href: &'static str,
}

/// A line in the recent activity feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Activity {
    pub icon: &'static str,
    pub message: &'static str,
    pub time: &'static str,
}

pub const RECENT_ACTIVITY: [Activity; 4] = [
    Activity {
        icon: "🛒",
        message: "New order from Sarah Johnson",
        time: "2 minutes ago",
    },
    Activity {
        icon: "📦",
        message: "Product \"Omega-3 Premium\" stock updated",
        time: "15 minutes ago",
    },
    Activity {
        icon: "⭐",
        message: "New review received for \"Whey Protein\"",
        time: "1 hour ago",
    },
    Activity {
        icon: "👤",
        message: "New customer registered: John Doe",
        time: "2 hours ago",
    },
];

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::data::ReviewBook;

    #[test]
    fn test_catalog_derived_counts() {
        let catalog = Catalog::seeded();
        let stats = DashboardStats::compute(&catalog, &ReviewBook::seeded().stats());
        assert_eq!(stats.total_products, 12);
        // Casein (out of stock), D3 (18) and probiotic (12).
        assert_eq!(stats.low_stock_products, 3);
        assert_eq!(stats.pending_reviews, 2);
    }

    #[test]
    fn test_cards() {
        let stats = DashboardStats::compute(&Catalog::seeded(), &ReviewBook::seeded().stats());
        let cards = stats.cards();
        assert_eq!(cards.len(), 6);

        let revenue = cards.first().unwrap();
        assert_eq!(revenue.value, "$125,430.50");
        assert_eq!(revenue.subtitle, "Today: $1245.50");

        let products = cards.get(2).unwrap();
        assert_eq!(products.subtitle, "3 low stock");

        let pending = cards.get(4).unwrap();
        assert!(!pending.positive);
        assert_eq!(pending.href, "/orders?status=pending");
    }

    #[test]
    fn test_stats_serialize_for_api() {
        let stats = DashboardStats::compute(&Catalog::seeded(), &ReviewBook::seeded().stats());
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json.get("total_orders").and_then(|v| v.as_u64()), Some(1247));
        assert_eq!(
            json.get("total_revenue").and_then(|v| v.as_str()),
            Some("125430.50")
        );
    }
}
