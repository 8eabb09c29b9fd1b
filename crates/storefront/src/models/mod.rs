//! Session-backed models for the storefront.

pub mod session;

pub use session::{keys as session_keys, load_cart, load_last_order, save_cart, save_last_order};
