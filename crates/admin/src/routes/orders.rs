//! Order route handlers.

use askama::Template;
use axum::{
    Router,
    extract::{Path, Query, State},
    response::Html,
    routing::get,
};
use proscience_core::{OrderId, OrderStatus, Price};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use super::{AdminUserView, FilterOption, format_date, missing, non_blank, render};
use crate::data::{Order, OrderFilter, OrderLine};
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Build the orders router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", get(index))
        .route("/orders/{id}", get(show))
}

/// Order list query parameters. Unknown statuses are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct OrderQuery {
    pub status: Option<String>,
    pub q: Option<String>,
}

impl OrderQuery {
    #[must_use]
    pub fn to_filter(&self) -> OrderFilter {
        OrderFilter {
            status: non_blank(self.status.as_deref()).and_then(|s| s.parse().ok()),
            search: non_blank(self.q.as_deref()).map(String::from),
        }
    }
}

/// Order row for list tables.
#[derive(Debug, Clone)]
pub struct OrderRow {
    pub id: i32,
    pub number: String,
    pub customer: String,
    pub email: String,
    pub date: String,
    pub items: u32,
    pub total: String,
    pub status: &'static str,
    pub status_label: &'static str,
    pub payment_label: &'static str,
}

impl From<&Order> for OrderRow {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.as_i32(),
            number: order.order_number.clone(),
            customer: order.customer_name.clone(),
            email: order.email.clone(),
            date: format_date(order.placed_at.date_naive()),
            items: order.item_count(),
            total: order.total_display(),
            status: order.status.as_str(),
            status_label: order.status.label(),
            payment_label: order.payment_status.label(),
        }
    }
}

/// Order line for the detail page.
#[derive(Debug, Clone)]
pub struct OrderLineView {
    pub name: String,
    pub slug: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
}

impl From<&OrderLine> for OrderLineView {
    fn from(line: &OrderLine) -> Self {
        Self {
            name: line.product_name.clone(),
            slug: line.product_slug.clone(),
            quantity: line.quantity,
            unit_price: Price::usd(line.unit_price).display(),
            line_total: Price::usd(line.line_total()).display(),
        }
    }
}

/// Full order for the detail page.
#[derive(Debug, Clone)]
pub struct OrderDetailView {
    pub number: String,
    pub placed_at: String,
    pub status: &'static str,
    pub status_label: &'static str,
    pub payment_status: &'static str,
    pub payment_label: &'static str,
    pub payment_method: String,
    pub customer_id: i32,
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    pub address_lines: Vec<String>,
    pub lines: Vec<OrderLineView>,
    pub item_count: u32,
    pub subtotal: String,
    pub shipping: String,
    pub tax: String,
    pub total: String,
}

impl From<&Order> for OrderDetailView {
    fn from(order: &Order) -> Self {
        let shipping = if order.shipping == Decimal::ZERO {
            "Free".to_string()
        } else {
            Price::usd(order.shipping).display()
        };
        Self {
            number: order.order_number.clone(),
            placed_at: order.placed_at.format("%B %-d, %Y at %-I:%M %p").to_string(),
            status: order.status.as_str(),
            status_label: order.status.label(),
            payment_status: order.payment_status.as_str(),
            payment_label: order.payment_status.label(),
            payment_method: order.payment_method.clone(),
            customer_id: order.customer_id.as_i32(),
            customer_name: order.customer_name.clone(),
            email: order.email.clone(),
            phone: order.phone.clone(),
            address_lines: order.shipping_address.lines(),
            lines: order.lines.iter().map(OrderLineView::from).collect(),
            item_count: order.item_count(),
            subtotal: Price::usd(order.subtotal).display(),
            shipping,
            tax: Price::usd(order.tax).display(),
            total: order.total_display(),
        }
    }
}

/// Orders list template.
#[derive(Template)]
#[template(path = "orders/index.html")]
pub struct OrdersIndexTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub orders: Vec<OrderRow>,
    pub total_count: usize,
    pub status_options: Vec<FilterOption>,
    pub search: String,
}

/// Order detail template.
#[derive(Template)]
#[template(path = "orders/show.html")]
pub struct OrderShowTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub order: OrderDetailView,
}

/// Orders list page.
///
/// GET /orders
#[instrument(skip(admin, state))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<OrderQuery>,
) -> Result<Html<String>> {
    let filter = query.to_filter();
    let office = state.back_office();
    let orders: Vec<OrderRow> = office.orders(&filter).into_iter().map(OrderRow::from).collect();

    render(&OrdersIndexTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: "/orders".to_string(),
        orders,
        total_count: office.all_orders().len(),
        status_options: FilterOption::list(
            OrderStatus::ALL.iter().map(|s| (s.as_str(), s.label())),
            filter.status.map(|s| s.as_str()),
        ),
        search: filter.search.unwrap_or_default(),
    })
}

/// Order detail page.
///
/// GET /orders/{id}
#[instrument(skip(admin, state))]
pub async fn show(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<Html<String>> {
    let order = state
        .back_office()
        .order(id)
        .ok_or_else(|| missing("order", id))?;

    render(&OrderShowTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: "/orders".to_string(),
        order: OrderDetailView::from(order),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use proscience_core::Catalog;

    use super::*;
    use crate::data::BackOffice;

    #[test]
    fn test_query_ignores_unknown_status() {
        let query = OrderQuery {
            status: Some("lost".to_string()),
            q: Some("  ".to_string()),
        };
        let filter = query.to_filter();
        assert!(filter.status.is_none());
        assert!(filter.search.is_none());

        let query = OrderQuery {
            status: Some("Shipped".to_string()),
            q: Some(" emily ".to_string()),
        };
        let filter = query.to_filter();
        assert_eq!(filter.status, Some(OrderStatus::Shipped));
        assert_eq!(filter.search.as_deref(), Some("emily"));
    }

    #[test]
    fn test_detail_view() {
        let office = BackOffice::seeded(&Catalog::seeded());
        let order = office.order(OrderId::new(1)).unwrap();
        let view = OrderDetailView::from(order);

        assert_eq!(view.placed_at, "January 20, 2024 at 10:30 AM");
        assert_eq!(view.shipping, "Free");
        assert_eq!(view.total, "$145.76");
        assert_eq!(view.lines.len(), 3);
        assert_eq!(view.lines.first().unwrap().line_total, "$69.98");
        assert_eq!(view.address_lines.first().unwrap(), "123 Main Street");
    }

    #[test]
    fn test_row_view() {
        let office = BackOffice::seeded(&Catalog::seeded());
        let row = OrderRow::from(office.order(OrderId::new(3)).unwrap());
        assert_eq!(row.date, "Jan 19, 2024");
        assert_eq!(row.status, "shipped");
        assert_eq!(row.total, "$36.98");
    }
}
