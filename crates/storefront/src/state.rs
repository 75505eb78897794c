//! Application state shared across handlers.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use nexus_core::admin::{
    AnalyticsPoint, ApprovalQueue, CmsDraft, Dashboard, Kpi, Order, PriceListDocument,
};
use nexus_core::catalog::Catalog;
use nexus_core::chat::Conversation;
use nexus_core::context::AppContext;
use nexus_core::quick_order::Banner;
use nexus_core::search::SearchState;
use nexus_core::seed;
use nexus_core::types::CallState;

use crate::config::StorefrontConfig;
use crate::gemini::{GeminiClient, GeminiError};

/// Everything the single shopper can change.
///
/// Lives behind one mutex. Handlers must not hold the guard across an
/// `.await`; AI calls mark their slot pending, drop the guard, await the
/// call and lock again to write the result.
#[derive(Debug)]
pub struct ShopSession {
    pub context: AppContext,
    pub search: SearchState,
    pub insights: CallState<String>,
    pub description: CallState<String>,
    pub conversation: Conversation,
    pub approvals: ApprovalQueue,
    pub banner: Option<Banner>,
}

impl Default for ShopSession {
    fn default() -> Self {
        Self {
            context: AppContext::new(),
            search: SearchState::default(),
            insights: CallState::Idle,
            description: CallState::Idle,
            conversation: Conversation::new(),
            approvals: ApprovalQueue::new(seed::pending_purchase_orders()),
            banner: None,
        }
    }
}

/// Read-only admin console data.
#[derive(Debug, Clone)]
pub struct AdminData {
    pub kpis: Vec<Kpi>,
    pub analytics: Vec<AnalyticsPoint>,
    pub drafts: Vec<CmsDraft>,
    pub orders: Vec<Order>,
    pub price_lists: Vec<PriceListDocument>,
}

impl AdminData {
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            kpis: seed::kpis(),
            analytics: seed::analytics(),
            drafts: seed::cms_drafts(),
            orders: seed::orders(),
            price_lists: seed::price_lists(),
        }
    }

    #[must_use]
    pub fn dashboard(&self) -> Dashboard {
        Dashboard::new(
            self.kpis.clone(),
            self.analytics.clone(),
            &self.drafts,
            self.orders.clone(),
        )
    }
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// catalog, the AI client and the shopper's session.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    admin: AdminData,
    gemini: GeminiClient,
    session: Mutex<ShopSession>,
}

impl AppState {
    /// Create a new application state with the demo data.
    ///
    /// # Errors
    ///
    /// Returns an error if the AI client cannot be built.
    pub fn new(config: StorefrontConfig) -> Result<Self, GeminiError> {
        let gemini = GeminiClient::new(&config.gemini)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog: seed::catalog(),
                admin: AdminData::seeded(),
                gemini,
                session: Mutex::new(ShopSession::default()),
            }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    #[must_use]
    pub fn admin(&self) -> &AdminData {
        &self.inner.admin
    }

    #[must_use]
    pub fn gemini(&self) -> &GeminiClient {
        &self.inner.gemini
    }

    /// Lock the shopper's session.
    ///
    /// A handler that panicked mid-update leaves the session usable.
    pub fn session(&self) -> MutexGuard<'_, ShopSession> {
        self.inner
            .session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
