//! HTTP middleware stack for the storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, HTTP context)
//! 2. `TraceLayer` (request span)
//! 3. Request ID (recorded in the span, echoed in the response)
//! 4. Session layer (tower-sessions, in-memory store)
//!
//! Seller identity is resolved per handler by the extractors in [`auth`].

pub mod auth;
pub mod request_id;
pub mod session;

pub use auth::{OptionalSeller, RequireSeller, set_current_seller};
pub use request_id::request_id_middleware;
pub use session::create_session_layer;
