//! HTTP route handlers for the storefront.
//!
//! Every screen of the demo is exposed as JSON; the service holds exactly
//! one shopper session.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                          - Health check
//!
//! # Session
//! GET    /api/session                     - Persona, view, cart badge
//! PUT    /api/session                     - Switch persona and/or view
//! GET    /api/screen                      - Payload of the active view
//!
//! # Storefront
//! GET    /api/storefront                  - Listing with active filters
//! PUT    /api/storefront/category         - Select category chip
//! POST   /api/storefront/search           - AI search (substring fallback)
//! DELETE /api/storefront/search           - Clear search
//!
//! # Cart
//! GET    /api/cart                        - Lines and persona-priced total
//! POST   /api/cart/items                  - Add product (quantity defaults to 1)
//!
//! # B2B portal (B2B persona only)
//! POST   /api/b2b/quick-order             - Quick order by SKU
//! GET    /api/b2b/banner                  - Current quick-order banner
//! DELETE /api/b2b/banner                  - Dismiss banner
//! GET    /api/b2b/recent-skus             - Quick-order shortcuts
//! GET    /api/b2b/approvals               - Pending purchase orders
//! POST   /api/b2b/approvals/{id}/approve  - Approve
//! POST   /api/b2b/approvals/{id}/reject   - Reject
//! GET    /api/b2b/price-lists             - Negotiated price lists
//!
//! # Admin
//! GET    /api/admin/dashboard             - KPIs, analytics, drafts, orders
//! GET    /api/admin/insights              - Insights slot
//! POST   /api/admin/insights              - Generate insights
//! DELETE /api/admin/insights              - Start new analysis
//! GET    /api/admin/description           - Description slot
//! POST   /api/admin/description           - Generate description
//!
//! # Assistant
//! GET    /api/assistant/messages          - Chat history
//! POST   /api/assistant/messages          - Send a message
//! ```

pub mod admin;
pub mod assistant;
pub mod b2b;
pub mod cart;
pub mod session;
pub mod storefront;

use std::future::Future;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Run a model call and its session write-back on its own task.
///
/// The task owns its inputs, so a dropped request still settles the slot it
/// marked pending.
pub(crate) async fn detached<T, F>(task: F) -> Result<T>
where
    F: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    tokio::spawn(task)
        .await
        .map_err(|e| AppError::Internal(format!("AI task failed: {e}")))
}

/// Create the storefront routes router.
pub fn storefront_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(storefront::show))
        .route("/category", put(storefront::select_category))
        .route(
            "/search",
            post(storefront::search).delete(storefront::clear_search),
        )
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/items", post(cart::add))
}

/// Create the B2B portal routes router.
pub fn b2b_routes() -> Router<AppState> {
    Router::new()
        .route("/quick-order", post(b2b::quick_order))
        .route("/banner", get(b2b::banner).delete(b2b::dismiss_banner))
        .route("/recent-skus", get(b2b::recent))
        .route("/approvals", get(b2b::approvals))
        .route("/approvals/{id}/approve", post(b2b::approve))
        .route("/approvals/{id}/reject", post(b2b::reject))
        .route("/price-lists", get(b2b::price_lists))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(admin::dashboard))
        .route(
            "/insights",
            get(admin::insights)
                .post(admin::generate_insights)
                .delete(admin::reset_insights),
        )
        .route(
            "/description",
            get(admin::description).post(admin::generate_description),
        )
}

/// Create the assistant routes router.
pub fn assistant_routes() -> Router<AppState> {
    Router::new().route(
        "/messages",
        get(assistant::messages).post(assistant::send),
    )
}

/// Create all API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/session", get(session::show).put(session::update))
        .route("/api/screen", get(session::screen))
        .nest("/api/storefront", storefront_routes())
        .nest("/api/cart", cart_routes())
        .nest("/api/b2b", b2b_routes())
        .nest("/api/admin", admin_routes())
        .nest("/api/assistant", assistant_routes())
}
