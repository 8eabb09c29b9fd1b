//! Review moderation handlers.
//!
//! Moderation forms post back the list's current filter so the redirect lands
//! on the same view.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, Query, State},
    response::{Html, Redirect},
    routing::{get, post},
};
use proscience_core::{ReviewId, ReviewStatus};
use serde::Deserialize;
use tracing::instrument;

use super::{AdminUserView, FilterOption, format_date, missing, non_blank, render};
use crate::data::{Review, ReviewFilter, ReviewStats};
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Build the reviews router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/reviews", get(index))
        .route("/reviews/{id}/approve", post(approve))
        .route("/reviews/{id}/reject", post(reject))
        .route("/reviews/{id}/delete", post(delete))
}

/// Review list filter, from the query string or a moderation form.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ReviewQuery {
    pub status: Option<String>,
    pub q: Option<String>,
}

impl ReviewQuery {
    #[must_use]
    pub fn to_filter(&self) -> ReviewFilter {
        ReviewFilter {
            status: non_blank(self.status.as_deref()).and_then(|s| s.parse().ok()),
            search: non_blank(self.q.as_deref()).map(String::from),
        }
    }

    /// `/reviews` with the recognised filter values re-encoded.
    #[must_use]
    pub fn list_url(&self) -> String {
        let filter = self.to_filter();
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        if let Some(status) = filter.status {
            query.append_pair("status", status.as_str());
        }
        if let Some(search) = &filter.search {
            query.append_pair("q", search);
        }
        let query = query.finish();
        if query.is_empty() {
            "/reviews".to_string()
        } else {
            format!("/reviews?{query}")
        }
    }
}

/// Review card data.
#[derive(Debug, Clone)]
pub struct ReviewView {
    pub id: i32,
    pub product_name: String,
    pub product_slug: String,
    pub customer_name: String,
    pub customer_email: String,
    pub rating: u8,
    pub stars: String,
    pub comment: String,
    pub date: String,
    pub status: &'static str,
    pub status_label: &'static str,
    pub verified: bool,
    pub can_approve: bool,
    pub can_reject: bool,
}

impl From<&Review> for ReviewView {
    fn from(review: &Review) -> Self {
        Self {
            id: review.id.as_i32(),
            product_name: review.product_name.clone(),
            product_slug: review.product_slug.clone(),
            customer_name: review.customer_name.clone(),
            customer_email: review.customer_email.clone(),
            rating: review.rating,
            stars: review.stars(),
            comment: review.comment.clone(),
            date: format_date(review.submitted_on),
            status: review.status.as_str(),
            status_label: review.status.label(),
            verified: review.verified,
            can_approve: review.status != ReviewStatus::Approved,
            can_reject: review.status != ReviewStatus::Rejected,
        }
    }
}

/// Reviews page template.
#[derive(Template)]
#[template(path = "reviews/index.html")]
pub struct ReviewsIndexTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub reviews: Vec<ReviewView>,
    pub stats: ReviewStats,
    pub status_options: Vec<FilterOption>,
    /// Selected status value, empty for all.
    pub status: String,
    pub search: String,
}

/// Reviews list with moderation stats.
///
/// GET /reviews
#[instrument(skip(admin, state))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<ReviewQuery>,
) -> Result<Html<String>> {
    let filter = query.to_filter();
    let (reviews, stats) = {
        let book = state.reviews().read().await;
        let reviews: Vec<ReviewView> = book.filter(&filter).into_iter().map(ReviewView::from).collect();
        (reviews, book.stats())
    };

    let status = filter.status.map(|s| s.as_str());
    render(&ReviewsIndexTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: "/reviews".to_string(),
        reviews,
        stats,
        status_options: FilterOption::list(
            ReviewStatus::ALL.iter().map(|s| (s.as_str(), s.label())),
            status,
        ),
        status: status.unwrap_or_default().to_string(),
        search: filter.search.unwrap_or_default(),
    })
}

async fn moderate(
    state: &AppState,
    id: ReviewId,
    status: ReviewStatus,
    admin: &str,
) -> Result<()> {
    let mut book = state.reviews().write().await;
    let review = book
        .set_status(id, status)
        .ok_or_else(|| missing("review", id))?;
    tracing::info!(
        review_id = %id,
        product = %review.product_slug,
        status = %status,
        admin,
        "Review moderated"
    );
    Ok(())
}

/// Approve a review.
///
/// POST /reviews/{id}/approve
#[instrument(skip(admin, state, form))]
pub async fn approve(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<ReviewId>,
    Form(form): Form<ReviewQuery>,
) -> Result<Redirect> {
    moderate(&state, id, ReviewStatus::Approved, admin.email.as_str()).await?;
    Ok(Redirect::to(&form.list_url()))
}

/// Reject a review.
///
/// POST /reviews/{id}/reject
#[instrument(skip(admin, state, form))]
pub async fn reject(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<ReviewId>,
    Form(form): Form<ReviewQuery>,
) -> Result<Redirect> {
    moderate(&state, id, ReviewStatus::Rejected, admin.email.as_str()).await?;
    Ok(Redirect::to(&form.list_url()))
}

/// Delete a review.
///
/// POST /reviews/{id}/delete
#[instrument(skip(admin, state, form))]
pub async fn delete(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<ReviewId>,
    Form(form): Form<ReviewQuery>,
) -> Result<Redirect> {
    let removed = state
        .reviews()
        .write()
        .await
        .delete(id)
        .ok_or_else(|| missing("review", id))?;
    tracing::info!(
        review_id = %id,
        product = %removed.product_slug,
        admin = %admin.email,
        "Review deleted"
    );
    Ok(Redirect::to(&form.list_url()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_url_keeps_known_filters() {
        let query = ReviewQuery {
            status: Some("pending".to_string()),
            q: Some("omega 3".to_string()),
        };
        assert_eq!(query.list_url(), "/reviews?status=pending&q=omega+3");

        let query = ReviewQuery {
            status: Some("spam".to_string()),
            q: None,
        };
        assert_eq!(query.list_url(), "/reviews");
        assert_eq!(ReviewQuery::default().list_url(), "/reviews");
    }
}
