//! Shopping assistant chat.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use nexus_core::chat::ChatMessage;

use crate::error::Result;
use crate::routes::detached;
use crate::services::AssistantService;
use crate::state::AppState;

#[derive(Debug, Clone, Serialize)]
pub struct ConversationView {
    pub messages: Vec<ChatMessage>,
    /// A reply is on its way; sends are refused until it lands.
    pub pending: bool,
}

fn conversation_view(state: &AppState) -> ConversationView {
    let session = state.session();
    ConversationView {
        messages: session.conversation.messages().to_vec(),
        pending: session.conversation.is_pending(),
    }
}

/// GET /api/assistant/messages
#[instrument(skip(state))]
pub async fn messages(State(state): State<AppState>) -> Json<ConversationView> {
    Json(conversation_view(&state))
}

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub text: String,
}

/// POST /api/assistant/messages
///
/// Blank input is a 400; a send while the previous reply is pending is a 409.
#[instrument(skip(state, body))]
pub async fn send(
    State(state): State<AppState>,
    Json(body): Json<SendMessageRequest>,
) -> Result<Json<ConversationView>> {
    let (transcript, persona) = {
        let mut session = state.session();
        let transcript = session.conversation.push_user(&body.text)?;
        (transcript, session.context.persona)
    };

    let task_state = state.clone();
    detached(async move {
        let reply = AssistantService::new(task_state.gemini(), task_state.catalog())
            .reply(&transcript, persona)
            .await;
        task_state.session().conversation.push_model(reply);
    })
    .await?;

    Ok(Json(conversation_view(&state)))
}
