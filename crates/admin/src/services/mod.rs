//! Business logic services for admin.
//!
//! # Services
//!
//! - `auth` - Configured-credential login with Argon2id hashing

pub mod auth;

pub use auth::{AdminAuthError, AdminAuthService};
