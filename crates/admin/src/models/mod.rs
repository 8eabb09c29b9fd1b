//! Domain models for admin.
//!
//! Back-office records (orders, customers, reviews) live in [`crate::data`];
//! this module only holds what is kept in the admin's session.

pub mod session;

pub use session::{CurrentAdmin, keys as session_keys};
