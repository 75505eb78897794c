//! B2B purchasing portal: quick order, approvals, price lists.
//!
//! Every handler here answers 403 unless the B2B persona is active.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use nexus_core::admin::{ApprovalDecision, PendingPurchaseOrder, PriceListDocument};
use nexus_core::quick_order::{Banner, recent_skus};
use nexus_core::seed::PARTNER_TIER_NOTE;
use nexus_core::types::{PurchaseOrderId, Sku};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::state::{AppState, ShopSession};

fn require_wholesale(session: &ShopSession) -> Result<()> {
    if session.context.persona.is_wholesale() {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "the B2B portal requires the B2B persona".to_string(),
        ))
    }
}

fn ensure_wholesale(state: &AppState) -> Result<()> {
    require_wholesale(&state.session())
}

/// Quick order request body.
#[derive(Debug, Deserialize)]
pub struct QuickOrderRequest {
    #[serde(default)]
    pub sku: String,
    /// Values below 1 (or missing) order a single unit.
    pub quantity: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuickOrderResponse {
    pub banner: Banner,
    pub cart_count: u32,
}

/// POST /api/b2b/quick-order
///
/// An unknown SKU is not an HTTP error: the error banner is the response.
#[instrument(skip(state))]
pub async fn quick_order(
    State(state): State<AppState>,
    Json(body): Json<QuickOrderRequest>,
) -> Result<Json<QuickOrderResponse>> {
    let response = {
        let mut session = state.session();
        require_wholesale(&session)?;

        let banner = session.context.quick_order(
            state.catalog(),
            &body.sku,
            body.quantity.unwrap_or(1),
            Utc::now(),
        );
        session.banner = Some(banner.clone());
        QuickOrderResponse {
            banner,
            cart_count: session.context.cart_count(),
        }
    };

    info!(sku = %body.sku, kind = ?response.banner.kind, "quick order");
    add_breadcrumb("b2b", "Quick order", &[("sku", &body.sku)]);
    Ok(Json(response))
}

/// GET /api/b2b/banner
///
/// The banner, or `null` once it has expired or been dismissed.
#[instrument(skip(state))]
pub async fn banner(State(state): State<AppState>) -> Result<Json<Option<Banner>>> {
    let mut session = state.session();
    require_wholesale(&session)?;

    let now = Utc::now();
    if session.banner.as_ref().is_some_and(|b| !b.is_active(now)) {
        session.banner = None;
    }
    Ok(Json(session.banner.clone()))
}

/// DELETE /api/b2b/banner
#[instrument(skip(state))]
pub async fn dismiss_banner(State(state): State<AppState>) -> Result<StatusCode> {
    let mut session = state.session();
    require_wholesale(&session)?;
    session.banner = None;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/b2b/recent-skus
#[instrument(skip(state))]
pub async fn recent(State(state): State<AppState>) -> Result<Json<Vec<Sku>>> {
    ensure_wholesale(&state)?;
    Ok(Json(recent_skus(state.catalog())))
}

/// GET /api/b2b/approvals
#[instrument(skip(state))]
pub async fn approvals(State(state): State<AppState>) -> Result<Json<Vec<PendingPurchaseOrder>>> {
    let session = state.session();
    require_wholesale(&session)?;
    Ok(Json(session.approvals.pending().to_vec()))
}

#[derive(Debug, Clone, Serialize)]
pub struct DecisionResponse {
    pub decision: ApprovalDecision,
    pub order: PendingPurchaseOrder,
    pub pending: Vec<PendingPurchaseOrder>,
}

fn decide(
    state: &AppState,
    id: &PurchaseOrderId,
    decision: ApprovalDecision,
) -> Result<DecisionResponse> {
    let mut session = state.session();
    require_wholesale(&session)?;

    let order = session.approvals.decide(id, decision)?;
    info!(purchase_order = %id, ?decision, "purchase order decided");
    Ok(DecisionResponse {
        decision,
        order,
        pending: session.approvals.pending().to_vec(),
    })
}

/// POST /api/b2b/approvals/{id}/approve
#[instrument(skip(state))]
pub async fn approve(
    State(state): State<AppState>,
    Path(id): Path<PurchaseOrderId>,
) -> Result<Json<DecisionResponse>> {
    decide(&state, &id, ApprovalDecision::Approve).map(Json)
}

/// POST /api/b2b/approvals/{id}/reject
#[instrument(skip(state))]
pub async fn reject(
    State(state): State<AppState>,
    Path(id): Path<PurchaseOrderId>,
) -> Result<Json<DecisionResponse>> {
    decide(&state, &id, ApprovalDecision::Reject).map(Json)
}

#[derive(Debug, Clone, Serialize)]
pub struct PriceListsView {
    pub documents: Vec<PriceListDocument>,
    pub partner_tier_note: &'static str,
}

/// GET /api/b2b/price-lists
#[instrument(skip(state))]
pub async fn price_lists(State(state): State<AppState>) -> Result<Json<PriceListsView>> {
    ensure_wholesale(&state)?;
    Ok(Json(PriceListsView {
        documents: state.admin().price_lists.clone(),
        partner_tier_note: PARTNER_TIER_NOTE,
    }))
}
