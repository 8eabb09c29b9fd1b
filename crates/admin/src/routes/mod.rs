//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check (public)
//!
//! # Auth
//! GET  /auth/login             - Login page
//! POST /auth/login             - Email + password login
//! POST /auth/logout            - Logout
//!
//! # Everything below requires a signed-in admin
//! GET  /                       - Dashboard overview
//! GET  /orders                 - Order listing (?status=&q=)
//! GET  /orders/{id}            - Order detail
//! GET  /customers              - Customer listing (?q=)
//! GET  /customers/{id}         - Customer detail with their orders
//! GET  /reviews                - Reviews with moderation stats (?status=&q=)
//! POST /reviews/{id}/approve   - Approve a review
//! POST /reviews/{id}/reject    - Reject a review
//! POST /reviews/{id}/delete    - Delete a review
//! GET  /products               - Catalog with stock status (?category=&q=)
//! GET  /analytics              - Sales analytics (?range=7d|30d|90d)
//! GET  /api/stats              - Dashboard stats as JSON
//! ```

pub mod analytics;
pub mod api;
pub mod auth;
pub mod customers;
pub mod dashboard;
pub mod orders;
pub mod products;
pub mod reviews;

use askama::Template;
use axum::{Router, http::StatusCode, response::Html};
use chrono::NaiveDate;

use crate::error::{AppError, Result};
use crate::models::CurrentAdmin;
use crate::state::AppState;

/// Build every admin route.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(dashboard::router())
        .merge(orders::router())
        .merge(customers::router())
        .merge(reviews::router())
        .merge(products::router())
        .merge(analytics::router())
        .merge(api::router())
}

/// Signed-in admin as shown in the layout header.
#[derive(Debug, Clone)]
pub struct AdminUserView {
    pub name: String,
    pub email: String,
}

impl From<&CurrentAdmin> for AdminUserView {
    fn from(admin: &CurrentAdmin) -> Self {
        Self {
            name: admin.name.clone(),
            email: admin.email.to_string(),
        }
    }
}

/// One choice in a filter dropdown.
#[derive(Debug, Clone)]
pub struct FilterOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

impl FilterOption {
    /// Options for each `(value, label)` pair, marking the one equal to
    /// `current`.
    pub fn list(
        pairs: impl IntoIterator<Item = (&'static str, &'static str)>,
        current: Option<&str>,
    ) -> Vec<Self> {
        pairs
            .into_iter()
            .map(|(value, label)| Self {
                value,
                label,
                selected: current == Some(value),
            })
            .collect()
    }
}

/// Render a template to HTML.
///
/// # Errors
///
/// Returns `AppError::Render` if the template fails.
pub fn render<T: Template>(template: &T) -> Result<Html<String>> {
    Ok(Html(template.render()?))
}

/// Treat a blank query value as absent.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Short date used across list pages, e.g. "Jan 20, 2024".
pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Not found page template.
#[derive(Template)]
#[template(path = "errors/not_found.html")]
pub struct NotFoundTemplate;

/// Fallback for unknown paths.
pub async fn not_found() -> (StatusCode, Html<String>) {
    let body = NotFoundTemplate
        .render()
        .unwrap_or_else(|_| String::from("Not found"));
    (StatusCode::NOT_FOUND, Html(body))
}

/// Map a missing record to a 404.
pub(crate) fn missing(what: &str, id: impl std::fmt::Display) -> AppError {
    AppError::NotFound(format!("{what} {id}"))
}
