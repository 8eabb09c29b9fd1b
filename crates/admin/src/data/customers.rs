//! Mock customers.
//!
//! Lifetime figures cover the full order history, not just the handful of
//! mock orders kept in [`super::orders`].

use chrono::NaiveDate;
use proscience_core::{CustomerId, CustomerStatus, Price, round_cents};
use rust_decimal::Decimal;

use super::{Address, contains_ci};

#[derive(Debug, Clone)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: Address,
    pub status: CustomerStatus,
    pub registered_on: NaiveDate,
    pub last_order_on: NaiveDate,
    pub lifetime_orders: u32,
    pub lifetime_spent: Decimal,
}

impl Customer {
    /// Lifetime spend divided by order count; zero with no orders.
    #[must_use]
    pub fn average_order_value(&self) -> Decimal {
        if self.lifetime_orders == 0 {
            return Decimal::ZERO;
        }
        round_cents(self.lifetime_spent / Decimal::from(self.lifetime_orders))
    }

    #[must_use]
    pub fn lifetime_spent_display(&self) -> String {
        Price::usd(self.lifetime_spent).display_grouped()
    }

    /// `needle` must already be lowercased.
    pub(crate) fn matches(&self, needle: Option<&str>) -> bool {
        needle.is_none_or(|needle| contains_ci(&self.name, needle) || contains_ci(&self.email, needle))
    }
}

/// Customer list filter.
#[derive(Debug, Clone, Default)]
pub struct CustomerFilter {
    pub search: Option<String>,
}

struct CustomerSeed {
    id: i32,
    name: &'static str,
    email: &'static str,
    phone: &'static str,
    address: (&'static str, Option<&'static str>, &'static str, &'static str, &'static str),
    status: CustomerStatus,
    registered: (i32, u32, u32),
    last_order: (i32, u32, u32),
    orders: u32,
    spent_cents: i64,
}

const CUSTOMERS: &[CustomerSeed] = &[
    CustomerSeed {
        id: 1,
        name: "Sarah Johnson",
        email: "sarah@example.com",
        phone: "+1 (555) 123-4567",
        address: ("123 Main Street", Some("Apt 4B"), "New York", "NY", "10001"),
        status: CustomerStatus::Active,
        registered: (2023, 6, 15),
        last_order: (2024, 1, 20),
        orders: 12,
        spent_cents: 124_550,
    },
    CustomerSeed {
        id: 2,
        name: "Michael Chen",
        email: "michael@example.com",
        phone: "+1 (555) 234-5678",
        address: ("88 Market Street", None, "San Francisco", "CA", "94103"),
        status: CustomerStatus::Active,
        registered: (2023, 7, 2),
        last_order: (2024, 1, 20),
        orders: 8,
        spent_cents: 89_025,
    },
    CustomerSeed {
        id: 3,
        name: "Emily Rodriguez",
        email: "emily@example.com",
        phone: "+1 (555) 345-6789",
        address: ("4100 Congress Avenue", Some("Suite 210"), "Austin", "TX", "78701"),
        status: CustomerStatus::Active,
        registered: (2023, 8, 21),
        last_order: (2024, 1, 19),
        orders: 5,
        spent_cents: 45_099,
    },
    CustomerSeed {
        id: 4,
        name: "David Thompson",
        email: "david@example.com",
        phone: "+1 (555) 456-7890",
        address: ("17 Elm Road", None, "Denver", "CO", "80202"),
        status: CustomerStatus::Active,
        registered: (2023, 9, 10),
        last_order: (2024, 1, 18),
        orders: 3,
        spent_cents: 29_999,
    },
    CustomerSeed {
        id: 5,
        name: "Jessica Martinez",
        email: "jessica@example.com",
        phone: "+1 (555) 567-8901",
        address: ("2250 Ocean Drive", None, "Miami", "FL", "33139"),
        status: CustomerStatus::Inactive,
        registered: (2023, 12, 28),
        last_order: (2024, 1, 15),
        orders: 1,
        spent_cents: 6_750,
    },
];

fn date((year, month, day): (i32, u32, u32)) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

fn build(seed: &CustomerSeed) -> Option<Customer> {
    let (line1, line2, city, state, zip_code) = seed.address;
    Some(Customer {
        id: CustomerId::new(seed.id),
        name: seed.name.to_owned(),
        email: seed.email.to_owned(),
        phone: seed.phone.to_owned(),
        address: Address {
            line1: line1.to_owned(),
            line2: line2.map(str::to_owned),
            city: city.to_owned(),
            state: state.to_owned(),
            zip_code: zip_code.to_owned(),
            country: "United States".to_owned(),
        },
        status: seed.status,
        registered_on: date(seed.registered)?,
        last_order_on: date(seed.last_order)?,
        lifetime_orders: seed.orders,
        lifetime_spent: Decimal::new(seed.spent_cents, 2),
    })
}

pub(super) fn seed() -> Vec<Customer> {
    CUSTOMERS.iter().filter_map(build).collect()
}
