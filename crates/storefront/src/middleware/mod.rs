//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (added by the binary)
//! 2. `TraceLayer` (request span)
//! 3. Request ID (fills the span's `request_id`, echoes the header)

pub mod request_id;

pub use request_id::{REQUEST_ID_HEADER, make_request_span, request_id_middleware};
