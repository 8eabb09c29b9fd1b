//! Authentication route handlers for admin.
//!
//! A single email and password login. Success cycles the session ID and stores
//! the admin under `current_admin`; failures re-render the form with a 401.

use askama::Template;
use axum::{
    Form, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use super::render;
use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::middleware::{OptionalAdminAuth, clear_current_admin, set_current_admin};
use crate::state::AppState;

/// Message shown for any failed login.
const LOGIN_FAILED: &str = "Invalid email or password";

/// Login page template.
#[derive(Template)]
#[template(path = "auth/login.html")]
struct LoginPageTemplate {
    email: String,
    error: Option<&'static str>,
}

/// Login form data.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/login", get(login_page).post(login))
        .route("/auth/logout", post(logout))
}

/// Render the login page. Already signed-in admins go to the dashboard.
///
/// GET /auth/login
async fn login_page(OptionalAdminAuth(admin): OptionalAdminAuth) -> Result<Response> {
    if admin.is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    let page = LoginPageTemplate {
        email: String::new(),
        error: None,
    };
    Ok(render(&page)?.into_response())
}

/// Check credentials and start an admin session.
///
/// POST /auth/login
#[instrument(skip_all, fields(email = %form.email.trim()))]
async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    match state.auth().authenticate(&form.email, &form.password) {
        Ok(admin) => {
            // New session ID on privilege change
            session.cycle_id().await?;
            set_current_admin(&session, &admin).await?;
            set_sentry_user(admin.email.as_str());
            tracing::info!(admin = %admin.email, "Admin signed in");
            Ok(Redirect::to("/").into_response())
        }
        Err(err) => {
            tracing::warn!(error = %err, "Admin login failed");
            let page = LoginPageTemplate {
                email: form.email.trim().to_string(),
                error: Some(LOGIN_FAILED),
            };
            Ok((StatusCode::UNAUTHORIZED, render(&page)?).into_response())
        }
    }
}

/// Logout and clear session.
///
/// POST /auth/logout
async fn logout(session: Session) -> Result<Redirect> {
    clear_current_admin(&session).await?;
    clear_sentry_user();
    tracing::info!("Admin signed out");

    Ok(Redirect::to("/auth/login"))
}
