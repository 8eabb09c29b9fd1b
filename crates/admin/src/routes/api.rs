//! JSON endpoints for admin.
//!
//! Unauthenticated requests under `/api/` get a bare 401 instead of the
//! login redirect.

use axum::{Json, Router, extract::State, routing::get};
use tracing::instrument;

use super::dashboard::current_stats;
use crate::data::DashboardStats;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Build the API router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/stats", get(stats))
}

/// Dashboard stats as JSON.
///
/// GET /api/stats
#[instrument(skip_all)]
pub async fn stats(_admin: RequireAdminAuth, State(state): State<AppState>) -> Json<DashboardStats> {
    Json(current_stats(&state).await)
}
