//! Values stored in the visitor's session.
//!
//! The cart is read at the start of a request, mutated in the handler, and
//! written back before the response. A missing or unreadable entry is treated
//! as an empty cart.

use tower_sessions::Session;

use crate::cart::Cart;
use crate::checkout::OrderConfirmation;

/// Session keys.
pub mod keys {
    /// The visitor's cart.
    pub const CART: &str = "cart";

    /// The most recently placed order, for the confirmation page.
    pub const LAST_ORDER: &str = "last_order";
}

/// Load the session's cart, or an empty one.
pub async fn load_cart(session: &Session) -> Cart {
    match session.get::<Cart>(keys::CART).await {
        Ok(cart) => cart.unwrap_or_default(),
        Err(e) => {
            tracing::warn!("Discarding unreadable cart: {e}");
            Cart::new()
        }
    }
}

/// Store the cart back into the session.
///
/// # Errors
///
/// Returns an error if the session store rejects the write.
pub async fn save_cart(session: &Session, cart: &Cart) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::CART, cart).await
}

/// The last order placed in this session, if any.
pub async fn load_last_order(session: &Session) -> Option<OrderConfirmation> {
    session
        .get::<OrderConfirmation>(keys::LAST_ORDER)
        .await
        .ok()
        .flatten()
}

/// Remember a placed order for the confirmation page.
///
/// # Errors
///
/// Returns an error if the session store rejects the write.
pub async fn save_last_order(
    session: &Session,
    order: &OrderConfirmation,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::LAST_ORDER, order).await
}
