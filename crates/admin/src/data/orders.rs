//! Mock orders.

use chrono::{DateTime, NaiveDate, Utc};
use proscience_core::{
    Catalog, CustomerId, OrderId, OrderStatus, PaymentStatus, Price, round_cents,
};
use rust_decimal::Decimal;

use super::{Address, Customer, contains_ci};

/// Orders at or under this subtotal paid flat-rate shipping.
const FREE_SHIPPING_OVER: Decimal = Decimal::from_parts(5000, 0, 0, false, 2);
const FLAT_SHIPPING: Decimal = Decimal::from_parts(999, 0, 0, false, 2);
const TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

/// One product line on an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    pub product_slug: String,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl OrderLine {
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// A placed order.
#[derive(Debug, Clone)]
pub struct Order {
    pub id: OrderId,
    pub order_number: String,
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    pub shipping_address: Address,
    pub lines: Vec<OrderLine>,
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: String,
    pub placed_at: DateTime<Utc>,
}

impl Order {
    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    #[must_use]
    pub fn total_display(&self) -> String {
        Price::usd(self.total).display()
    }

    /// `needle` must already be lowercased.
    pub(crate) fn matches(&self, status: Option<OrderStatus>, needle: Option<&str>) -> bool {
        if status.is_some_and(|status| status != self.status) {
            return false;
        }
        needle.is_none_or(|needle| {
            contains_ci(&self.order_number, needle)
                || contains_ci(&self.customer_name, needle)
                || contains_ci(&self.email, needle)
        })
    }
}

/// Order list filter. `None` fields match everything.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub search: Option<String>,
}

struct OrderSeed {
    id: i32,
    number: &'static str,
    customer: i32,
    placed: (i32, u32, u32, u32, u32),
    status: OrderStatus,
    payment_status: PaymentStatus,
    payment_method: &'static str,
    lines: &'static [(&'static str, u32)],
}

const ORDERS: &[OrderSeed] = &[
    OrderSeed {
        id: 1,
        number: "ORD-2024-001",
        customer: 1,
        placed: (2024, 1, 20, 10, 30),
        status: OrderStatus::Pending,
        payment_status: PaymentStatus::Paid,
        payment_method: "Credit Card",
        lines: &[
            ("omega-3-premium", 2),
            ("vitamin-d3-k2", 1),
            ("probiotic-complex", 1),
        ],
    },
    OrderSeed {
        id: 2,
        number: "ORD-2024-002",
        customer: 2,
        placed: (2024, 1, 20, 14, 5),
        status: OrderStatus::Processing,
        payment_status: PaymentStatus::Paid,
        payment_method: "PayPal",
        lines: &[("whey-protein-isolate", 2)],
    },
    OrderSeed {
        id: 3,
        number: "ORD-2024-003",
        customer: 3,
        placed: (2024, 1, 19, 9, 12),
        status: OrderStatus::Shipped,
        payment_status: PaymentStatus::Paid,
        payment_method: "Credit Card",
        lines: &[("vitamin-d3-k2", 1)],
    },
    OrderSeed {
        id: 4,
        number: "ORD-2024-004",
        customer: 4,
        placed: (2024, 1, 18, 16, 40),
        status: OrderStatus::Delivered,
        payment_status: PaymentStatus::Paid,
        payment_method: "Credit Card",
        lines: &[
            ("pre-workout-energy", 2),
            ("creatine-monohydrate", 1),
            ("bcaa-recovery", 1),
        ],
    },
    OrderSeed {
        id: 5,
        number: "ORD-2024-005",
        customer: 5,
        placed: (2024, 1, 18, 11, 2),
        status: OrderStatus::Pending,
        payment_status: PaymentStatus::Pending,
        payment_method: "PayPal",
        lines: &[("magnesium-glycinate", 1), ("collagen-peptides", 1)],
    },
    OrderSeed {
        id: 6,
        number: "ORD-2023-045",
        customer: 1,
        placed: (2023, 12, 15, 14, 20),
        status: OrderStatus::Delivered,
        payment_status: PaymentStatus::Paid,
        payment_method: "Credit Card",
        lines: &[("multivitamin-complete", 1), ("omega-3-premium", 1)],
    },
    OrderSeed {
        id: 7,
        number: "ORD-2024-006",
        customer: 2,
        placed: (2024, 1, 21, 8, 45),
        status: OrderStatus::Cancelled,
        payment_status: PaymentStatus::Failed,
        payment_method: "Credit Card",
        lines: &[("plant-protein-blend", 1)],
    },
];

fn timestamp((year, month, day, hour, minute): (i32, u32, u32, u32, u32)) -> Option<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, month, day)?
        .and_hms_opt(hour, minute, 0)
        .map(|naive| naive.and_utc())
}

fn build(seed: &OrderSeed, catalog: &Catalog, customers: &[Customer]) -> Option<Order> {
    let customer_id = CustomerId::new(seed.customer);
    let customer = customers.iter().find(|c| c.id == customer_id)?;
    let placed_at = timestamp(seed.placed)?;

    let lines: Vec<OrderLine> = seed
        .lines
        .iter()
        .filter_map(|(slug, quantity)| {
            let product = catalog.by_slug(slug)?;
            Some(OrderLine {
                product_slug: product.slug.clone(),
                product_name: product.name.clone(),
                quantity: *quantity,
                unit_price: product.price,
            })
        })
        .collect();

    let subtotal: Decimal = lines.iter().map(OrderLine::line_total).sum();
    let shipping = if subtotal > FREE_SHIPPING_OVER {
        Decimal::ZERO
    } else {
        FLAT_SHIPPING
    };
    let tax = round_cents(subtotal * TAX_RATE);

    Some(Order {
        id: OrderId::new(seed.id),
        order_number: seed.number.to_owned(),
        customer_id,
        customer_name: customer.name.clone(),
        email: customer.email.clone(),
        phone: customer.phone.clone(),
        shipping_address: customer.address.clone(),
        lines,
        subtotal,
        shipping,
        tax,
        total: subtotal + shipping + tax,
        status: seed.status,
        payment_status: seed.payment_status,
        payment_method: seed.payment_method.to_owned(),
        placed_at,
    })
}

/// Build the mock orders, newest first.
pub(super) fn seed(catalog: &Catalog, customers: &[Customer]) -> Vec<Order> {
    let mut orders: Vec<Order> = ORDERS
        .iter()
        .filter_map(|seed| build(seed, catalog, customers))
        .collect();
    orders.sort_by(|a, b| b.placed_at.cmp(&a.placed_at));
    orders
}
