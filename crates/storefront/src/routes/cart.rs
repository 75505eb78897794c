//! Cart route handlers.
//!
//! Totals are computed when the view is built, so the same lines show
//! retail or wholesale pricing depending on the persona at read time.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use nexus_core::cart::CartLine;
use nexus_core::context::AppContext;
use nexus_core::types::{Persona, Price, ProductId, Sku};

use crate::error::{Result, add_breadcrumb};
use crate::state::AppState;

/// Cart line display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartLineView {
    pub product_id: ProductId,
    pub sku: Sku,
    pub name: String,
    pub image: String,
    pub quantity: u32,
    pub unit_price: Price,
    pub line_total: Price,
}

impl CartLineView {
    fn new(line: &CartLine, persona: Persona) -> Self {
        Self {
            product_id: line.product.id.clone(),
            sku: line.product.sku.clone(),
            name: line.product.name.clone(),
            image: line.product.image.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price(persona),
            line_total: line.line_total(persona),
        }
    }
}

/// Cart screen payload.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub persona: Persona,
    pub lines: Vec<CartLineView>,
    pub item_count: u32,
    pub total: Price,
    /// Total formatted for display, e.g. `$698.00`.
    pub total_display: String,
}

impl CartView {
    #[must_use]
    pub fn new(context: &AppContext) -> Self {
        let total = context.cart_total();
        Self {
            persona: context.persona,
            lines: context
                .cart
                .lines()
                .iter()
                .map(|line| CartLineView::new(line, context.persona))
                .collect(),
            item_count: context.cart_count(),
            total,
            total_display: total.to_string(),
        }
    }
}

/// GET /api/cart
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<CartView> {
    Json(CartView::new(&state.session().context))
}

/// Add to cart request body.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: ProductId,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

const fn default_quantity() -> u32 {
    1
}

/// POST /api/cart/items
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Json(body): Json<AddToCartRequest>,
) -> Result<(StatusCode, Json<CartView>)> {
    let view = {
        let mut session = state.session();
        let quantity =
            session
                .context
                .add_to_cart(state.catalog(), &body.product_id, body.quantity)?;
        info!(product_id = %body.product_id, quantity, "added to cart");
        CartView::new(&session.context)
    };

    add_breadcrumb(
        "cart",
        "Added to cart",
        &[("product_id", body.product_id.as_str())],
    );
    Ok((StatusCode::CREATED, Json(view)))
}
