//! Persona and view switching, and the active screen.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use nexus_core::types::{Persona, Price, View};

use super::admin::{AdminView, admin_view};
use super::cart::CartView;
use super::storefront::{StorefrontView, storefront_view};
use crate::state::AppState;

/// Header state: who is shopping, where they are, what is in the cart.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub persona: Persona,
    pub persona_label: &'static str,
    pub view: View,
    pub cart_count: u32,
    pub cart_total: Price,
}

fn session_view(state: &AppState) -> SessionView {
    let session = state.session();
    let context = &session.context;
    SessionView {
        persona: context.persona,
        persona_label: context.persona.label(),
        view: context.view,
        cart_count: context.cart_count(),
        cart_total: context.cart_total(),
    }
}

/// GET /api/session
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<SessionView> {
    Json(session_view(&state))
}

/// Fields left out are not changed.
#[derive(Debug, Deserialize)]
pub struct UpdateSessionRequest {
    pub persona: Option<Persona>,
    pub view: Option<View>,
}

/// PUT /api/session
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Json(body): Json<UpdateSessionRequest>,
) -> Json<SessionView> {
    {
        let mut session = state.session();
        if let Some(persona) = body.persona {
            session.context.switch_persona(persona);
            info!(%persona, "persona switched");
        }
        if let Some(view) = body.view {
            session.context.navigate(view);
        }
    }
    Json(session_view(&state))
}

/// Payload of whichever screen is active.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "view", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Screen {
    Storefront(StorefrontView),
    Admin(Box<AdminView>),
    Cart(CartView),
}

/// GET /api/screen
#[instrument(skip(state))]
pub async fn screen(State(state): State<AppState>) -> Json<Screen> {
    let view = state.session().context.view;
    let screen = match view {
        View::Storefront => Screen::Storefront(storefront_view(&state)),
        View::Admin => Screen::Admin(Box::new(admin_view(&state))),
        View::Cart => Screen::Cart(CartView::new(&state.session().context)),
    };
    Json(screen)
}
