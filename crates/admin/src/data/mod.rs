//! Mock back-office data.
//!
//! There is no order or customer database. Orders and customers are fixed
//! records built at startup (order lines are priced from the catalog), reviews
//! are the only records that can change, and dashboard and analytics figures
//! are canned numbers.

pub mod analytics;
pub mod customers;
pub mod dashboard;
pub mod orders;
pub mod reviews;

use proscience_core::{Catalog, CustomerId, OrderId};

pub use analytics::{AnalyticsRange, AnalyticsReport, TopProduct};
pub use customers::{Customer, CustomerFilter};
pub use dashboard::{Activity, DashboardStats, RECENT_ACTIVITY, StatCard};
pub use orders::{Order, OrderFilter, OrderLine};
pub use reviews::{Review, ReviewBook, ReviewFilter, ReviewStats};

/// A postal address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

impl Address {
    /// Address lines for display, blank parts skipped.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![self.line1.clone()];
        if let Some(line2) = &self.line2 {
            lines.push(line2.clone());
        }
        lines.push(format!("{}, {} {}", self.city, self.state, self.zip_code));
        lines.push(self.country.clone());
        lines
    }
}

/// Case-insensitive substring match. `needle` must already be lowercased.
pub(crate) fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Trim and lowercase a search box value; blank means no search.
pub(crate) fn normalize_search(search: Option<&str>) -> Option<String> {
    search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

/// Format a count with thousands separators ("10,234").
#[must_use]
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Read-only orders and customers.
#[derive(Debug, Clone)]
pub struct BackOffice {
    orders: Vec<Order>,
    customers: Vec<Customer>,
}

impl BackOffice {
    /// Build the mock records, pricing order lines from `catalog`.
    #[must_use]
    pub fn seeded(catalog: &Catalog) -> Self {
        let customers = customers::seed();
        let orders = orders::seed(catalog, &customers);
        Self { orders, customers }
    }

    /// All orders, newest first.
    #[must_use]
    pub fn all_orders(&self) -> &[Order] {
        &self.orders
    }

    /// Orders matching a status and search filter, newest first.
    #[must_use]
    pub fn orders(&self, filter: &OrderFilter) -> Vec<&Order> {
        let search = normalize_search(filter.search.as_deref());
        self.orders
            .iter()
            .filter(|order| order.matches(filter.status, search.as_deref()))
            .collect()
    }

    #[must_use]
    pub fn order(&self, id: OrderId) -> Option<&Order> {
        self.orders.iter().find(|order| order.id == id)
    }

    /// The most recent `limit` orders.
    #[must_use]
    pub fn recent_orders(&self, limit: usize) -> &[Order] {
        &self.orders[..limit.min(self.orders.len())]
    }

    /// All customers.
    #[must_use]
    pub fn all_customers(&self) -> &[Customer] {
        &self.customers
    }

    /// Customers whose name or email contains the search text.
    #[must_use]
    pub fn customers(&self, filter: &CustomerFilter) -> Vec<&Customer> {
        let search = normalize_search(filter.search.as_deref());
        self.customers
            .iter()
            .filter(|customer| customer.matches(search.as_deref()))
            .collect()
    }

    #[must_use]
    pub fn customer(&self, id: CustomerId) -> Option<&Customer> {
        self.customers.iter().find(|customer| customer.id == id)
    }

    /// Orders placed by one customer, newest first.
    #[must_use]
    pub fn orders_for(&self, id: CustomerId) -> Vec<&Order> {
        self.orders
            .iter()
            .filter(|order| order.customer_id == id)
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use proscience_core::OrderStatus;

    use super::*;

    fn back_office() -> BackOffice {
        BackOffice::seeded(&Catalog::seeded())
    }

    fn numbers(orders: &[&Order]) -> Vec<String> {
        orders.iter().map(|o| o.order_number.clone()).collect()
    }

    #[test]
    fn test_orders_newest_first() {
        let office = back_office();
        let placed: Vec<_> = office.all_orders().iter().map(|o| o.placed_at).collect();
        let mut sorted = placed.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(placed, sorted);
        assert_eq!(office.recent_orders(5).len(), 5);
        assert_eq!(office.recent_orders(50).len(), office.all_orders().len());
    }

    #[test]
    fn test_order_status_filter() {
        let office = back_office();
        let pending = office.orders(&OrderFilter {
            status: Some(OrderStatus::Pending),
            search: None,
        });
        assert_eq!(numbers(&pending), vec!["ORD-2024-001", "ORD-2024-005"]);
    }

    #[test]
    fn test_order_search_is_case_insensitive() {
        let office = back_office();
        let by_name = office.orders(&OrderFilter {
            status: None,
            search: Some("  SARAH ".to_string()),
        });
        assert_eq!(numbers(&by_name), vec!["ORD-2024-001", "ORD-2023-045"]);

        let by_number = office.orders(&OrderFilter {
            status: None,
            search: Some("2024-003".to_string()),
        });
        assert_eq!(numbers(&by_number), vec!["ORD-2024-003"]);

        let combined = office.orders(&OrderFilter {
            status: Some(OrderStatus::Delivered),
            search: Some("sarah@".to_string()),
        });
        assert_eq!(numbers(&combined), vec!["ORD-2023-045"]);
    }

    #[test]
    fn test_customer_search_and_orders() {
        let office = back_office();
        let found = office.customers(&CustomerFilter {
            search: Some("michael@EXAMPLE".to_string()),
        });
        assert_eq!(found.len(), 1);
        let michael = found.first().unwrap();
        assert_eq!(michael.name, "Michael Chen");

        let orders = office.orders_for(michael.id);
        assert!(orders.iter().all(|o| o.customer_id == michael.id));
        assert_eq!(orders.len(), 2);

        assert_eq!(office.customers(&CustomerFilter::default()).len(), 5);
        assert!(office.customer(CustomerId::new(99)).is_none());
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1247), "1,247");
        assert_eq!(format_count(1_000_000), "1,000,000");
    }

    #[test]
    fn test_address_lines() {
        let office = back_office();
        let sarah = office.customer(CustomerId::new(1)).unwrap();
        assert_eq!(
            sarah.address.lines(),
            vec!["123 Main Street", "Apt 4B", "New York, NY 10001", "United States"]
        );
    }
}
