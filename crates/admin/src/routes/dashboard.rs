//! Dashboard route handler.

use askama::Template;
use axum::{Router, extract::State, response::Html, routing::get};
use tracing::instrument;

use super::orders::OrderRow;
use super::{AdminUserView, render};
use crate::data::{Activity, DashboardStats, RECENT_ACTIVITY, StatCard, TopProduct};
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Orders shown in the "Recent Orders" table.
const RECENT_ORDER_LIMIT: usize = 5;

/// Build the dashboard router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(dashboard))
}

/// Dashboard template.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub cards: Vec<StatCard>,
    pub pending_reviews: usize,
    pub recent_orders: Vec<OrderRow>,
    pub top_products: Vec<TopProduct>,
    pub recent_activity: Vec<Activity>,
}

/// Current dashboard numbers.
pub(crate) async fn current_stats(state: &AppState) -> DashboardStats {
    let review_stats = state.reviews().read().await.stats();
    DashboardStats::compute(state.catalog(), &review_stats)
}

/// Dashboard page handler.
///
/// GET /
#[instrument(skip(admin, state))]
pub async fn dashboard(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Html<String>> {
    let stats = current_stats(&state).await;
    let recent_orders = state
        .back_office()
        .recent_orders(RECENT_ORDER_LIMIT)
        .iter()
        .map(OrderRow::from)
        .collect();

    render(&DashboardTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: "/".to_string(),
        cards: stats.cards(),
        pending_reviews: stats.pending_reviews,
        recent_orders,
        top_products: DashboardStats::top_products(),
        recent_activity: RECENT_ACTIVITY.to_vec(),
    })
}
