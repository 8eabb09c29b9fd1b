//! Analytics route handler.

use askama::Template;
use axum::{
    Router,
    extract::Query,
    response::Html,
    routing::get,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::instrument;

use super::{AdminUserView, FilterOption, format_date, non_blank, render};
use crate::data::{AnalyticsRange, AnalyticsReport};
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Build the analytics router.
pub fn router() -> Router<AppState> {
    Router::new().route("/analytics", get(index))
}

/// `range` falls back to 30 days when missing or unknown.
#[derive(Debug, Default, Deserialize)]
pub struct AnalyticsQuery {
    pub range: Option<String>,
}

impl AnalyticsQuery {
    #[must_use]
    pub fn range(&self) -> AnalyticsRange {
        non_blank(self.range.as_deref())
            .and_then(|r| r.parse().ok())
            .unwrap_or_default()
    }
}

/// Analytics template.
#[derive(Template)]
#[template(path = "analytics.html")]
pub struct AnalyticsTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub report: AnalyticsReport,
    pub range_options: Vec<FilterOption>,
    pub first_day: String,
    pub last_day: String,
}

/// Analytics page.
///
/// GET /analytics
#[instrument(skip(admin))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Html<String>> {
    let range = query.range();
    let report = AnalyticsReport::build(range, Utc::now().date_naive());
    let first_day = report.series.first().map(|p| format_date(p.date)).unwrap_or_default();
    let last_day = report.series.last().map(|p| format_date(p.date)).unwrap_or_default();

    render(&AnalyticsTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: "/analytics".to_string(),
        range_options: FilterOption::list(
            AnalyticsRange::ALL.iter().map(|r| (r.as_str(), r.label())),
            Some(range.as_str()),
        ),
        report,
        first_day,
        last_day,
    })
}
