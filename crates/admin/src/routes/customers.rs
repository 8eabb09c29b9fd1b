//! Customer route handlers.

use askama::Template;
use axum::{
    Router,
    extract::{Path, Query, State},
    response::Html,
    routing::get,
};
use proscience_core::{CustomerId, Price};
use serde::Deserialize;
use tracing::instrument;

use super::orders::OrderRow;
use super::{AdminUserView, format_date, missing, non_blank, render};
use crate::data::{Customer, CustomerFilter};
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Build the customers router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/customers", get(index))
        .route("/customers/{id}", get(show))
}

#[derive(Debug, Default, Deserialize)]
pub struct CustomerQuery {
    pub q: Option<String>,
}

/// Customer data for list and detail pages.
#[derive(Debug, Clone)]
pub struct CustomerView {
    pub id: i32,
    pub name: String,
    pub initials: String,
    pub email: String,
    pub phone: String,
    pub address_lines: Vec<String>,
    pub status: &'static str,
    pub status_label: &'static str,
    pub registered: String,
    pub last_order: String,
    pub orders: u32,
    pub spent: String,
    pub average_order: String,
}

impl From<&Customer> for CustomerView {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id.as_i32(),
            name: customer.name.clone(),
            initials: initials(&customer.name),
            email: customer.email.clone(),
            phone: customer.phone.clone(),
            address_lines: customer.address.lines(),
            status: customer.status.as_str(),
            status_label: customer.status.label(),
            registered: format_date(customer.registered_on),
            last_order: format_date(customer.last_order_on),
            orders: customer.lifetime_orders,
            spent: customer.lifetime_spent_display(),
            average_order: Price::usd(customer.average_order_value()).display(),
        }
    }
}

/// First letter of each name part, e.g. "SJ".
fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Customers list template.
#[derive(Template)]
#[template(path = "customers/index.html")]
pub struct CustomersIndexTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub customers: Vec<CustomerView>,
    pub total_count: usize,
    pub search: String,
}

/// Customer detail template.
#[derive(Template)]
#[template(path = "customers/show.html")]
pub struct CustomerShowTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub customer: CustomerView,
    pub orders: Vec<OrderRow>,
}

/// Customers list page.
///
/// GET /customers
#[instrument(skip(admin, state))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<CustomerQuery>,
) -> Result<Html<String>> {
    let filter = CustomerFilter {
        search: non_blank(query.q.as_deref()).map(String::from),
    };
    let office = state.back_office();
    let customers = office
        .customers(&filter)
        .into_iter()
        .map(CustomerView::from)
        .collect();

    render(&CustomersIndexTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: "/customers".to_string(),
        customers,
        total_count: office.all_customers().len(),
        search: filter.search.unwrap_or_default(),
    })
}

/// Customer detail page.
///
/// GET /customers/{id}
#[instrument(skip(admin, state))]
pub async fn show(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<CustomerId>,
) -> Result<Html<String>> {
    let office = state.back_office();
    let customer = office.customer(id).ok_or_else(|| missing("customer", id))?;
    let orders = office.orders_for(id).into_iter().map(OrderRow::from).collect();

    render(&CustomerShowTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: "/customers".to_string(),
        customer: CustomerView::from(customer),
        orders,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use proscience_core::Catalog;

    use super::*;
    use crate::data::BackOffice;

    #[test]
    fn test_initials() {
        assert_eq!(initials("Sarah Johnson"), "SJ");
        assert_eq!(initials("  emily   rodriguez "), "ER");
        assert_eq!(initials(""), "");
    }

    #[test]
    fn test_customer_view() {
        let office = BackOffice::seeded(&Catalog::seeded());
        let view = CustomerView::from(office.customer(CustomerId::new(1)).unwrap());
        assert_eq!(view.registered, "Jun 15, 2023");
        assert_eq!(view.spent, "$1,245.50");
        assert_eq!(view.average_order, "$103.79");
        assert_eq!(view.status, "active");
    }
}
