//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Health check
//!
//! # Products
//! GET  /products               - Product listing (filters + sort in query)
//! GET  /products/{slug}        - Product detail with related products
//! GET  /search?q=              - Instant search results (fragment)
//! GET  /catalogs               - Catalog downloads and category overview
//! GET  /reviews                - Customer testimonials
//!
//! # Cart (HTMX fragments)
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add to cart (returns badge, triggers cart-updated)
//! POST /cart/update            - Set quantity, 0 removes (cart_items or sidebar fragment)
//! POST /cart/remove            - Remove line (cart_items or sidebar fragment)
//! POST /cart/clear             - Empty cart (cart_items or sidebar fragment)
//! GET  /cart/count             - Cart count badge (fragment)
//! GET  /cart/sidebar           - Cart sidebar (fragment)
//!
//! # Checkout
//! GET  /checkout               - Checkout form (redirects to /cart when empty)
//! POST /checkout               - Validate and place order
//! GET  /checkout/success       - Order confirmation
//!
//! # Content
//! GET  /contact                - Contact page
//! POST /contact                - Contact form submission (JSON)
//! GET  /faq /about /press /terms-of-service /privacy-policy /return-policy
//! ```

pub mod cart;
pub mod catalogs;
pub mod checkout;
pub mod contact;
pub mod home;
pub mod pages;
pub mod products;
pub mod reviews;
pub mod search;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use crate::filters;
use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{slug}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
        .route("/sidebar", get(cart::sidebar))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(checkout::show).post(checkout::submit))
        .route("/success", get(checkout::success))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .nest("/products", product_routes())
        .route("/search", get(search::search))
        .route("/catalogs", get(catalogs::index))
        .route("/reviews", get(reviews::index))
        .nest("/cart", cart_routes())
        .nest("/checkout", checkout_routes())
        .route("/contact", get(contact::show).post(contact::submit))
        .merge(pages::router())
}

/// 404 page template.
#[derive(Template, WebTemplate)]
#[template(path = "errors/not_found.html")]
pub struct NotFoundTemplate;

/// Fallback for unknown paths.
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, NotFoundTemplate)
}
