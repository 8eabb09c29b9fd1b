//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! Each handler loads the cart from the session, applies one store operation
//! and saves it back. Mutations answer with an `HX-Trigger: cart-updated`
//! header so the badge and sidebar refresh themselves.
//!
//! Update, remove and clear are posted from both the cart page and the
//! header sidebar; the `view` field picks which fragment comes back.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use proscience_core::ProductId;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::cart::{Cart, CartLine, MAX_LINE_QUANTITY, OrderSummary, PricingPolicy};
use crate::error::{AppError, Result};
use crate::filters;
use crate::models::{load_cart, save_cart};
use crate::state::AppState;

/// Event name HTMX listeners refresh on.
pub const CART_UPDATED_EVENT: &str = "cart-updated";

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub product_id: i32,
    pub slug: String,
    pub name: String,
    pub image: String,
    pub flavour: Option<String>,
    pub quantity: u32,
    /// Quantity sent by the "-" button. Zero removes the line.
    pub decrement_to: u32,
    pub increment_to: u32,
    pub can_increment: bool,
    pub price: String,
    pub line_price: String,
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        let product = &line.product;
        let max = product
            .stock_quantity
            .map_or(MAX_LINE_QUANTITY, |stock| stock.min(MAX_LINE_QUANTITY));
        Self {
            product_id: product.id.as_i32(),
            slug: product.slug.clone(),
            name: product.name.clone(),
            image: product.images.first().cloned().unwrap_or_default(),
            flavour: product.flavour.clone(),
            quantity: line.quantity,
            decrement_to: line.quantity.saturating_sub(1),
            increment_to: line.quantity.saturating_add(1),
            can_increment: line.quantity < max,
            price: line.unit_price().display(),
            line_price: proscience_core::Price::usd(line.line_total()).display(),
        }
    }
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub item_count: u32,
    pub subtotal: String,
    pub shipping: String,
    pub tax: String,
    pub tax_percent: String,
    pub total: String,
    /// "Add $X more for free shipping", when applicable.
    pub free_shipping_hint: Option<String>,
}

impl CartView {
    #[must_use]
    pub fn new(cart: &Cart, policy: &PricingPolicy) -> Self {
        let summary = OrderSummary::for_cart(cart, policy);
        Self {
            items: cart.lines().iter().map(CartItemView::from).collect(),
            item_count: cart.total_items(),
            subtotal: summary.subtotal_display(),
            shipping: summary.shipping_display(),
            tax: summary.tax_display(),
            tax_percent: policy.tax_percent_label(),
            total: summary.total_display(),
            free_shipping_hint: summary.amount_to_free_shipping.map(|remaining| {
                format!(
                    "Add {} more for free shipping",
                    proscience_core::Price::usd(remaining).display()
                )
            }),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: ProductId,
    pub quantity: Option<u32>,
}

/// Fragment a cart mutation answers with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CartFragment {
    /// `#cart-items` on the cart page.
    #[default]
    Items,
    /// The header `#cart-sidebar`.
    Sidebar,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: ProductId,
    pub quantity: i64,
    #[serde(default)]
    pub view: CartFragment,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: ProductId,
    #[serde(default)]
    pub view: CartFragment,
}

/// Clear cart form data.
#[derive(Debug, Default, Deserialize)]
pub struct ClearCartForm {
    #[serde(default)]
    pub view: CartFragment,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Cart sidebar fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_sidebar.html")]
pub struct CartSidebarTemplate {
    pub cart: CartView,
}

fn fragment_response(state: &AppState, cart: &Cart, view: CartFragment) -> Response {
    let cart = CartView::new(cart, state.pricing());
    let trigger = AppendHeaders([("HX-Trigger", CART_UPDATED_EVENT)]);
    match view {
        CartFragment::Items => (trigger, CartItemsTemplate { cart }).into_response(),
        CartFragment::Sidebar => (trigger, CartSidebarTemplate { cart }).into_response(),
    }
}

/// Display cart page.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> CartShowTemplate {
    let cart = load_cart(&session).await;
    CartShowTemplate {
        cart: CartView::new(&cart, state.pricing()),
    }
}

/// Add item to cart (HTMX).
///
/// Returns the updated count badge.
///
/// # Errors
///
/// Returns 404 for an unknown product and 400 when the cart refuses the add.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let product = state
        .catalog()
        .get(form.product_id)
        .ok_or_else(|| AppError::NotFound(format!("product {}", form.product_id)))?;

    let mut cart = load_cart(&session).await;
    let quantity = cart.add_item(product, form.quantity.unwrap_or(1))?;
    save_cart(&session, &cart).await?;

    tracing::info!(product = %product.slug, quantity, "Added to cart");

    Ok((
        AppendHeaders([("HX-Trigger", CART_UPDATED_EVENT)]),
        CartCountTemplate {
            count: cart.total_items(),
        },
    )
        .into_response())
}

/// Update cart item quantity (HTMX). A quantity of 0 removes the line.
///
/// # Errors
///
/// Returns 400 when the new quantity exceeds stock or the per-line limit.
#[instrument(skip(state, session))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<UpdateCartForm>,
) -> Result<Response> {
    let mut cart = load_cart(&session).await;
    cart.update_quantity(form.product_id, form.quantity)?;
    save_cart(&session, &cart).await?;

    Ok(fragment_response(&state, &cart, form.view))
}

/// Remove item from cart (HTMX).
///
/// # Errors
///
/// Returns 500 if the session cannot be written.
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response> {
    let mut cart = load_cart(&session).await;
    if cart.remove_item(form.product_id) {
        save_cart(&session, &cart).await?;
    }

    Ok(fragment_response(&state, &cart, form.view))
}

/// Empty the cart (HTMX).
///
/// # Errors
///
/// Returns 500 if the session cannot be written.
#[instrument(skip(state, session))]
pub async fn clear(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ClearCartForm>,
) -> Result<Response> {
    let mut cart = load_cart(&session).await;
    cart.clear();
    save_cart(&session, &cart).await?;

    Ok(fragment_response(&state, &cart, form.view))
}

/// Get cart count badge (HTMX).
#[instrument(skip(session))]
pub async fn count(session: Session) -> CartCountTemplate {
    CartCountTemplate {
        count: load_cart(&session).await.total_items(),
    }
}

/// Get the cart sidebar (HTMX).
#[instrument(skip(state, session))]
pub async fn sidebar(State(state): State<AppState>, session: Session) -> CartSidebarTemplate {
    let cart = load_cart(&session).await;
    CartSidebarTemplate {
        cart: CartView::new(&cart, state.pricing()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use proscience_core::Catalog;

    use super::*;

    #[test]
    fn test_cart_view_totals_and_hint() {
        let catalog = Catalog::seeded();
        let mut cart = Cart::new();
        cart.add_item(catalog.by_slug("magnesium-glycinate").unwrap(), 1)
            .unwrap();

        let view = CartView::new(&cart, &PricingPolicy::default());
        assert_eq!(view.item_count, 1);
        assert_eq!(view.subtotal, "$19.99");
        assert_eq!(view.shipping, "$9.99");
        assert_eq!(view.tax, "$1.60");
        assert_eq!(view.total, "$31.58");
        assert_eq!(
            view.free_shipping_hint.as_deref(),
            Some("Add $30.01 more for free shipping")
        );
    }

    #[test]
    fn test_item_view_buttons() {
        let catalog = Catalog::seeded();
        let mut cart = Cart::new();
        // Vitamin D3 + K2 has 18 in stock.
        let d3 = catalog.by_slug("vitamin-d3-k2").unwrap();
        cart.add_item(d3, 1).unwrap();
        let item = CartItemView::from(cart.line(d3.id).unwrap());
        assert_eq!(item.decrement_to, 0);
        assert!(item.can_increment);

        cart.update_quantity(d3.id, 18).unwrap();
        let item = CartItemView::from(cart.line(d3.id).unwrap());
        assert!(!item.can_increment);
    }

    #[test]
    fn test_sidebar_has_controls_and_totals() {
        let catalog = Catalog::seeded();
        let mut cart = Cart::new();
        let magnesium = catalog.by_slug("magnesium-glycinate").unwrap();
        cart.add_item(magnesium, 2).unwrap();

        let html = CartSidebarTemplate {
            cart: CartView::new(&cart, &PricingPolicy::default()),
        }
        .render()
        .unwrap();

        assert!(html.contains(r##"hx-target="#cart-sidebar""##));
        assert!(html.contains(r#""quantity": 1, "view": "sidebar""#));
        assert!(html.contains(r#""quantity": 3, "view": "sidebar""#));
        assert!(html.contains(r#"hx-post="/cart/remove""#));
        assert!(html.contains(r#"hx-post="/cart/clear""#));
        assert!(html.contains("Shipping"));
        assert!(html.contains("$9.99"));
        assert!(html.contains("Total"));

        let html = CartSidebarTemplate {
            cart: CartView::new(&Cart::new(), &PricingPolicy::default()),
        }
        .render()
        .unwrap();
        assert!(html.contains("Your cart is empty."));
        assert!(!html.contains("hx-post"));
    }

    #[test]
    fn test_fragment_view_defaults_to_items() {
        let form: ClearCartForm = serde_json::from_str("{}").unwrap();
        assert_eq!(form.view, CartFragment::Items);
        let form: ClearCartForm = serde_json::from_str(r#"{"view":"sidebar"}"#).unwrap();
        assert_eq!(form.view, CartFragment::Sidebar);
    }
}
