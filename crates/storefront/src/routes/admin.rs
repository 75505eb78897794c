//! Admin control center: dashboard data and the AI widgets.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use nexus_core::admin::Dashboard;
use nexus_core::types::CallState;

use crate::error::{AppError, Result};
use crate::routes::detached;
use crate::services::{DescriptionService, InsightsService};
use crate::state::AppState;

/// Admin screen payload.
#[derive(Debug, Clone, Serialize)]
pub struct AdminView {
    #[serde(flatten)]
    pub dashboard: Dashboard,
    pub insights: CallState<String>,
    pub description: CallState<String>,
}

#[must_use]
pub fn admin_view(state: &AppState) -> AdminView {
    let session = state.session();
    AdminView {
        dashboard: state.admin().dashboard(),
        insights: session.insights.clone(),
        description: session.description.clone(),
    }
}

/// GET /api/admin/dashboard
#[instrument(skip(state))]
pub async fn dashboard(State(state): State<AppState>) -> Json<AdminView> {
    Json(admin_view(&state))
}

/// GET /api/admin/insights
#[instrument(skip(state))]
pub async fn insights(State(state): State<AppState>) -> Json<CallState<String>> {
    Json(state.session().insights.clone())
}

/// POST /api/admin/insights
///
/// Overlapping requests are not de-duplicated; the last to finish wins.
#[instrument(skip(state))]
pub async fn generate_insights(
    State(state): State<AppState>,
) -> Result<Json<CallState<String>>> {
    state.session().insights = CallState::Pending;

    let result = detached(async move {
        let result = InsightsService::new(state.gemini())
            .generate(&state.admin().analytics)
            .await;
        state.session().insights = result.clone();
        result
    })
    .await?;

    Ok(Json(result))
}

/// DELETE /api/admin/insights
///
/// "Start new analysis": back to idle.
#[instrument(skip(state))]
pub async fn reset_insights(State(state): State<AppState>) -> StatusCode {
    state.session().insights = CallState::Idle;
    StatusCode::NO_CONTENT
}

/// GET /api/admin/description
#[instrument(skip(state))]
pub async fn description(State(state): State<AppState>) -> Json<CallState<String>> {
    Json(state.session().description.clone())
}

#[derive(Debug, Deserialize)]
pub struct DescriptionRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub keywords: String,
}

/// POST /api/admin/description
#[instrument(skip(state))]
pub async fn generate_description(
    State(state): State<AppState>,
    Json(body): Json<DescriptionRequest>,
) -> Result<Json<CallState<String>>> {
    let name = body.name.trim().to_string();
    let keywords = body.keywords.trim().to_string();
    if name.is_empty() || keywords.is_empty() {
        return Err(AppError::BadRequest(
            "product name and keywords are both required".to_string(),
        ));
    }

    state.session().description = CallState::Pending;

    let result = detached(async move {
        let result = DescriptionService::new(state.gemini())
            .generate(&name, &keywords)
            .await;
        state.session().description = result.clone();
        result
    })
    .await?;

    Ok(Json(result))
}
