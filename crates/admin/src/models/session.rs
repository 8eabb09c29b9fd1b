//! Session-related types for admin authentication.
//!
//! Types stored in the session for authentication state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use proscience_core::Email;

/// Session-stored admin identity.
///
/// Presence of this value under [`keys::CURRENT_ADMIN`] is what makes a
/// session authenticated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// Admin's email address.
    pub email: Email,
    /// Admin's display name.
    pub name: String,
    /// When this session logged in.
    pub signed_in_at: DateTime<Utc>,
}

/// Session keys for admin authentication data.
pub mod keys {
    /// Key for storing the current logged-in admin.
    pub const CURRENT_ADMIN: &str = "current_admin";
}
