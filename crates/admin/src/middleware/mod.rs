//! HTTP middleware stack for admin.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request span with method, uri, status, latency)
//! 3. Request ID (recorded on the span, echoed in `x-request-id`)
//! 4. Session layer (tower-sessions with an in-memory store)
//!
//! Authentication is not a layer: protected handlers take the
//! [`RequireAdminAuth`] extractor.

pub mod auth;
pub mod request_id;
pub mod session;

pub use auth::{
    AdminAuthRejection, OptionalAdminAuth, RequireAdminAuth, clear_current_admin,
    set_current_admin,
};
pub use request_id::request_id_middleware;
pub use session::create_session_layer;
