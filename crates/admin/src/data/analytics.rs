//! Sales analytics.
//!
//! Headline metrics, top products and category sales are fixed figures. The
//! daily series is generated from a weekly order pattern so every range has
//! plausible, repeatable numbers.

use core::fmt;
use core::str::FromStr;

use chrono::{Datelike, Days, NaiveDate};
use proscience_core::{Price, ProductCategory, round_cents};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

use super::format_count;

/// Orders per weekday, Monday first.
const WEEKLY_ORDERS: [u32; 7] = [38, 42, 45, 41, 47, 52, 35];

/// Average order value used to price the daily series.
const AVERAGE_ORDER_CENTS: i64 = 10_058;

/// Reporting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalyticsRange {
    Last7Days,
    #[default]
    Last30Days,
    Last90Days,
}

impl AnalyticsRange {
    pub const ALL: [Self; 3] = [Self::Last7Days, Self::Last30Days, Self::Last90Days];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Last7Days => "7d",
            Self::Last30Days => "30d",
            Self::Last90Days => "90d",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Last7Days => "Last 7 days",
            Self::Last30Days => "Last 30 days",
            Self::Last90Days => "Last 90 days",
        }
    }

    #[must_use]
    pub const fn days(&self) -> u64 {
        match self {
            Self::Last7Days => 7,
            Self::Last30Days => 30,
            Self::Last90Days => 90,
        }
    }
}

impl fmt::Display for AnalyticsRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown analytics range: {0}")]
pub struct UnknownRange(pub String);

impl FromStr for AnalyticsRange {
    type Err = UnknownRange;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|range| range.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownRange(s.to_owned()))
    }
}

/// A headline figure compared with the previous period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metric {
    pub label: &'static str,
    pub current: Decimal,
    pub previous: Decimal,
    pub money: bool,
}

impl Metric {
    /// Percentage change against the previous period, one decimal place.
    #[must_use]
    pub fn change_percent(&self) -> Decimal {
        if self.previous.is_zero() {
            return Decimal::ZERO;
        }
        ((self.current - self.previous) / self.previous * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
    }

    #[must_use]
    pub fn is_increase(&self) -> bool {
        self.current >= self.previous
    }

    /// "↑ 12.5%" or "↓ 3.0%".
    #[must_use]
    pub fn change_label(&self) -> String {
        let arrow = if self.is_increase() { '↑' } else { '↓' };
        format!("{arrow} {}%", self.change_percent().abs())
    }

    #[must_use]
    pub fn value_display(&self) -> String {
        if self.money {
            Price::usd(self.current).display_grouped()
        } else {
            format_count(self.current.to_u64().unwrap_or(0))
        }
    }
}

/// A best-selling product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopProduct {
    pub name: &'static str,
    pub sales: u32,
    pub revenue: Decimal,
}

impl TopProduct {
    #[must_use]
    pub fn revenue_display(&self) -> String {
        Price::usd(self.revenue).display_grouped()
    }
}

/// Units and revenue for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySales {
    pub category: ProductCategory,
    pub sales: u32,
    pub revenue: Decimal,
    /// Bar width relative to the best-selling category.
    pub width_percent: u32,
}

/// Orders and revenue for one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub orders: u32,
    pub revenue: Decimal,
    /// Bar height relative to the busiest day in the series.
    pub height_percent: u32,
}

const TOP_PRODUCTS: [(&str, u32, i64); 5] = [
    ("Omega-3 Premium", 342, 1_025_858),
    ("Whey Protein Isolate", 298, 894_002),
    ("Vitamin D3 + K2", 256, 767_944),
    ("Pre-Workout Energy", 189, 567_011),
    ("Probiotic Complex", 167, 500_833),
];

const CATEGORY_SALES: [(ProductCategory, u32, i64); 4] = [
    (ProductCategory::Vitamins, 856, 2_568_000),
    (ProductCategory::Protein, 623, 1_869_000),
    (ProductCategory::Wellness, 445, 1_335_000),
    (ProductCategory::Sports, 312, 936_000),
];

/// Best sellers, highest revenue first.
#[must_use]
pub fn top_products(limit: usize) -> Vec<TopProduct> {
    TOP_PRODUCTS
        .iter()
        .take(limit)
        .map(|&(name, sales, cents)| TopProduct {
            name,
            sales,
            revenue: Decimal::new(cents, 2),
        })
        .collect()
}

fn headline_metrics() -> Vec<Metric> {
    vec![
        Metric {
            label: "Revenue",
            current: Decimal::new(12_543_050, 2),
            previous: Decimal::new(11_152_000, 2),
            money: true,
        },
        Metric {
            label: "Orders",
            current: Decimal::from(1247),
            previous: Decimal::from(1152),
            money: false,
        },
        Metric {
            label: "Customers",
            current: Decimal::from(10_234),
            previous: Decimal::from(8876),
            money: false,
        },
        Metric {
            label: "Avg. Order Value",
            current: Decimal::new(AVERAGE_ORDER_CENTS, 2),
            previous: Decimal::new(9681, 2),
            money: true,
        },
    ]
}

fn category_sales() -> Vec<CategorySales> {
    let top = CATEGORY_SALES
        .iter()
        .map(|&(_, _, cents)| cents)
        .max()
        .unwrap_or(0);
    CATEGORY_SALES
        .iter()
        .map(|&(category, sales, cents)| CategorySales {
            category,
            sales,
            revenue: Decimal::new(cents, 2),
            width_percent: percent_of(cents, top),
        })
        .collect()
}

fn percent_of(value: i64, max: i64) -> u32 {
    if max <= 0 {
        return 0;
    }
    u32::try_from(value.saturating_mul(100) / max).unwrap_or(0)
}

/// The daily series ending at `today`, oldest first.
fn daily_series(range: AnalyticsRange, today: NaiveDate) -> Vec<DailyPoint> {
    let average = Decimal::new(AVERAGE_ORDER_CENTS, 2);
    let mut points: Vec<DailyPoint> = (0..range.days())
        .rev()
        .filter_map(|back| today.checked_sub_days(Days::new(back)))
        .map(|date| {
            let weekday = date.weekday().num_days_from_monday() as usize;
            let orders = WEEKLY_ORDERS.get(weekday).copied().unwrap_or(0);
            DailyPoint {
                date,
                orders,
                revenue: round_cents(average * Decimal::from(orders)),
                height_percent: 0,
            }
        })
        .collect();

    let busiest = points.iter().map(|p| i64::from(p.orders)).max().unwrap_or(0);
    for point in &mut points {
        point.height_percent = percent_of(i64::from(point.orders), busiest);
    }
    points
}

/// Everything the analytics page shows for one range.
#[derive(Debug, Clone)]
pub struct AnalyticsReport {
    pub range: AnalyticsRange,
    pub metrics: Vec<Metric>,
    pub series: Vec<DailyPoint>,
    pub total_orders: u32,
    pub total_revenue: Decimal,
    pub top_products: Vec<TopProduct>,
    pub categories: Vec<CategorySales>,
}

impl AnalyticsReport {
    /// Build the report for `range`, with the series ending at `today`.
    #[must_use]
    pub fn build(range: AnalyticsRange, today: NaiveDate) -> Self {
        let series = daily_series(range, today);
        let total_orders = series.iter().map(|p| p.orders).sum();
        let total_revenue = series.iter().map(|p| p.revenue).sum();
        Self {
            range,
            metrics: headline_metrics(),
            series,
            total_orders,
            total_revenue,
            top_products: top_products(TOP_PRODUCTS.len()),
            categories: category_sales(),
        }
    }

    #[must_use]
    pub fn total_revenue_display(&self) -> String {
        Price::usd(self.total_revenue).display_grouped()
    }

    #[must_use]
    pub fn total_orders_display(&self) -> String {
        format_count(u64::from(self.total_orders))
    }

    /// Series revenue over series orders.
    #[must_use]
    pub fn average_order_display(&self) -> String {
        if self.total_orders == 0 {
            return Price::usd(Decimal::ZERO).display();
        }
        Price::usd(self.total_revenue / Decimal::from(self.total_orders)).display()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 21).unwrap()
    }

    #[test]
    fn test_range_parsing() {
        assert_eq!("7d".parse::<AnalyticsRange>().unwrap(), AnalyticsRange::Last7Days);
        assert_eq!(" 90D ".parse::<AnalyticsRange>().unwrap(), AnalyticsRange::Last90Days);
        assert!("1y".parse::<AnalyticsRange>().is_err());
        assert_eq!(AnalyticsRange::default(), AnalyticsRange::Last30Days);
    }

    #[test]
    fn test_week_totals() {
        let report = AnalyticsReport::build(AnalyticsRange::Last7Days, today());
        assert_eq!(report.series.len(), 7);
        assert_eq!(report.total_orders, 300);
        assert_eq!(report.total_revenue, Decimal::new(3_017_400, 2));
        assert_eq!(report.total_revenue_display(), "$30,174.00");
        assert_eq!(report.average_order_display(), "$100.58");
    }

    #[test]
    fn test_series_ends_today_oldest_first() {
        let report = AnalyticsReport::build(AnalyticsRange::Last90Days, today());
        assert_eq!(report.series.len(), 90);
        assert_eq!(report.series.last().unwrap().date, today());
        let dates: Vec<NaiveDate> = report.series.iter().map(|p| p.date).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(dates, sorted);
        assert!(report.series.iter().any(|p| p.height_percent == 100));
    }

    #[test]
    fn test_headline_changes() {
        let report = AnalyticsReport::build(AnalyticsRange::default(), today());
        let changes: Vec<String> = report
            .metrics
            .iter()
            .map(|m| m.change_percent().to_string())
            .collect();
        assert_eq!(changes, vec!["12.5", "8.2", "15.3", "3.9"]);

        let revenue = report.metrics.first().unwrap();
        assert_eq!(revenue.value_display(), "$125,430.50");
        assert_eq!(revenue.change_label(), "↑ 12.5%");
        assert_eq!(report.metrics.get(2).unwrap().value_display(), "10,234");
    }

    #[test]
    fn test_category_widths() {
        let report = AnalyticsReport::build(AnalyticsRange::default(), today());
        let widths: Vec<u32> = report.categories.iter().map(|c| c.width_percent).collect();
        assert_eq!(widths, vec![100, 72, 51, 36]);
        assert_eq!(report.top_products.len(), 5);
    }
}
