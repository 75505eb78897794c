//! HTTP middleware stack for the storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, transactions)
//! 2. `TraceLayer` (`http_request` span with status and latency)
//! 3. Request ID (recorded on the span, echoed in `x-request-id`)
//! 4. CORS (the screens may be served from another origin)

pub mod request_id;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
