//! Admin console data: orders, analytics, content drafts, B2B approvals.
//!
//! The dashboard is presentation over static arrays. The only mutable piece
//! is the purchase approval queue, which forgets an order once it has been
//! approved or rejected; nothing is written back anywhere.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{
    DraftId, DraftStatus, OrderChannel, OrderId, OrderStatus, Price, PurchaseOrderId,
};

/// A placed order, as listed under recent transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_name: String,
    pub total: Price,
    pub status: OrderStatus,
    pub date: String,
    pub channel: OrderChannel,
}

/// Sales for one period, split by channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsPoint {
    pub name: String,
    pub b2c_sales: u32,
    pub b2b_sales: u32,
}

/// A CMS page revision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CmsDraft {
    pub id: DraftId,
    pub page: String,
    pub author: String,
    pub status: DraftStatus,
    pub last_modified: String,
}

/// Staging actions a draft can offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftAction {
    Merge,
    Rollback,
}

impl CmsDraft {
    /// Actions offered for this draft. Only staged drafts can be merged or
    /// rolled back.
    #[must_use]
    pub fn actions(&self) -> Vec<DraftAction> {
        match self.status {
            DraftStatus::Staged => vec![DraftAction::Merge, DraftAction::Rollback],
            DraftStatus::Draft | DraftStatus::Live => Vec::new(),
        }
    }
}

/// Headline metric card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Kpi {
    pub label: String,
    pub value: String,
    pub note: String,
}

/// Downloadable negotiated price list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceListDocument {
    pub title: String,
    pub updated: String,
    pub size: String,
}

/// A purchase order raised by a B2B buyer and awaiting sign-off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingPurchaseOrder {
    pub id: PurchaseOrderId,
    pub requester: String,
    pub items: u32,
    pub total: Price,
    pub date: String,
}

/// Approver verdict on a purchase order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalDecision {
    Approve,
    Reject,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApprovalError {
    #[error("purchase order not found: {0}")]
    NotFound(PurchaseOrderId),
}

/// Local list of purchase orders awaiting a decision.
#[derive(Debug, Clone, Default)]
pub struct ApprovalQueue {
    pending: Vec<PendingPurchaseOrder>,
}

impl ApprovalQueue {
    #[must_use]
    pub const fn new(pending: Vec<PendingPurchaseOrder>) -> Self {
        Self { pending }
    }

    #[must_use]
    pub fn pending(&self) -> &[PendingPurchaseOrder] {
        &self.pending
    }

    /// Record a decision. Either verdict drops the order from the queue.
    ///
    /// # Errors
    ///
    /// Returns `ApprovalError::NotFound` if the order is not pending.
    pub fn decide(
        &mut self,
        id: &PurchaseOrderId,
        _decision: ApprovalDecision,
    ) -> Result<PendingPurchaseOrder, ApprovalError> {
        let index = self
            .pending
            .iter()
            .position(|po| &po.id == id)
            .ok_or_else(|| ApprovalError::NotFound(id.clone()))?;
        Ok(self.pending.remove(index))
    }
}

/// A staged draft with the actions it offers.
#[derive(Debug, Clone, Serialize)]
pub struct DraftView {
    #[serde(flatten)]
    pub draft: CmsDraft,
    pub actions: Vec<DraftAction>,
}

/// Everything the admin control center shows besides the AI widgets.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub kpis: Vec<Kpi>,
    pub analytics: Vec<AnalyticsPoint>,
    pub drafts: Vec<DraftView>,
    pub orders: Vec<Order>,
}

impl Dashboard {
    #[must_use]
    pub fn new(
        kpis: Vec<Kpi>,
        analytics: Vec<AnalyticsPoint>,
        drafts: &[CmsDraft],
        orders: Vec<Order>,
    ) -> Self {
        let drafts = drafts
            .iter()
            .map(|draft| DraftView {
                actions: draft.actions(),
                draft: draft.clone(),
            })
            .collect();
        Self {
            kpis,
            analytics,
            drafts,
            orders,
        }
    }
}
