//! Checkout route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use tower_sessions::Session;
use tracing::instrument;

use super::cart::CartView;
use crate::checkout::{CheckoutError, CheckoutForm, OrderConfirmation, place_order};
use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::models::{load_cart, load_last_order, save_cart, save_last_order};
use crate::state::AppState;
use crate::validation::ValidationErrors;

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutTemplate {
    pub form: CheckoutForm,
    pub errors: ValidationErrors,
    pub cart: CartView,
}

/// Order confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/success.html")]
pub struct CheckoutSuccessTemplate {
    pub order: OrderConfirmation,
}

/// Display the checkout form. An empty cart goes back to `/cart`.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Response {
    let cart = load_cart(&session).await;
    if cart.is_empty() {
        return Redirect::to("/cart").into_response();
    }

    CheckoutTemplate {
        form: CheckoutForm::blank(),
        errors: ValidationErrors::new(),
        cart: CartView::new(&cart, state.pricing()),
    }
    .into_response()
}

/// Validate the form and place the order.
///
/// Invalid forms are re-rendered with inline errors and a 422 status.
///
/// # Errors
///
/// Returns 500 if the session cannot be written.
#[instrument(skip_all, fields(payment_method = form.payment_method.as_str()))]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CheckoutForm>,
) -> Result<Response> {
    let mut cart = load_cart(&session).await;

    match place_order(&mut cart, &form, state.pricing(), Utc::now()) {
        Ok(order) => {
            save_cart(&session, &cart).await?;
            save_last_order(&session, &order).await?;

            add_breadcrumb(
                "checkout",
                "Order placed",
                Some(&[("order_number", order.order_number.as_str())]),
            );
            tracing::info!(
                order_number = %order.order_number,
                total = %order.summary.total,
                "Order placed"
            );

            Ok(Redirect::to("/checkout/success").into_response())
        }
        Err(CheckoutError::EmptyCart) => Ok(Redirect::to("/cart").into_response()),
        Err(CheckoutError::Invalid(errors)) => {
            tracing::debug!(fields = ?errors.fields().collect::<Vec<_>>(), "Checkout form rejected");
            let page = CheckoutTemplate {
                cart: CartView::new(&cart, state.pricing()),
                form,
                errors,
            };
            Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response())
        }
    }
}

/// Show the confirmation for the last order placed in this session.
#[instrument(skip(session))]
pub async fn success(session: Session) -> Response {
    match load_last_order(&session).await {
        Some(order) => CheckoutSuccessTemplate { order }.into_response(),
        None => Redirect::to("/").into_response(),
    }
}
