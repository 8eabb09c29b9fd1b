//! Instant search route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use chrono::Utc;
use proscience_core::catalog::SEARCH_RESULT_LIMIT;
use serde::Deserialize;
use tracing::instrument;

use super::products::{ProductCardView, cards};
use crate::state::AppState;

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// Search results fragment (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/search_results.html")]
pub struct SearchResultsTemplate {
    pub query: String,
    pub results: Vec<ProductCardView>,
}

/// Search the catalog. A blank query renders no results.
#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> SearchResultsTemplate {
    let q = query.q.trim().to_string();
    let results = cards(
        state.catalog().search(&q, SEARCH_RESULT_LIMIT),
        Utc::now(),
    );

    SearchResultsTemplate { query: q, results }
}
