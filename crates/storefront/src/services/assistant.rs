//! Shopping assistant chat.
//!
//! The full transcript, welcome message included, is sent on every turn
//! under a system instruction listing the catalog with both price tiers.

use tracing::{info, instrument, warn};

use nexus_core::catalog::Catalog;
use nexus_core::chat::ChatMessage;
use nexus_core::types::Persona;

use crate::gemini::{GeminiClient, GenerateContentRequest};

use super::AiCallError;
use super::prompts::assistant_instruction;

pub const EMPTY_REPLY: &str = "I'm having trouble connecting right now. Please try again.";
pub const REPLY_FAILED: &str =
    "Sorry, I encountered an error. Please check your API key configuration.";

/// Produces assistant replies grounded in the catalog.
pub struct AssistantService<'a> {
    gemini: &'a GeminiClient,
    catalog: &'a Catalog,
}

impl<'a> AssistantService<'a> {
    #[must_use]
    pub const fn new(gemini: &'a GeminiClient, catalog: &'a Catalog) -> Self {
        Self { gemini, catalog }
    }

    /// Reply to the last user turn of `transcript`.
    ///
    /// Always yields text to append; failures become an apology.
    #[instrument(skip(self, transcript), fields(turns = transcript.len()))]
    pub async fn reply(&self, transcript: &[ChatMessage], persona: Persona) -> String {
        let result = async {
            let instruction = assistant_instruction(self.catalog, persona)?;
            let request = GenerateContentRequest::conversation(transcript, instruction);
            Ok::<_, AiCallError>(self.gemini.generate(&request).await?)
        }
        .await;
        settle_reply(result)
    }
}

/// Text to append as the model's turn.
#[must_use]
pub fn settle_reply(result: Result<String, AiCallError>) -> String {
    match result {
        Ok(text) if text.trim().is_empty() => EMPTY_REPLY.to_string(),
        Ok(text) => {
            info!(chars = text.len(), "assistant replied");
            text
        }
        Err(e) => {
            warn!(error = %e, "assistant reply failed");
            REPLY_FAILED.to_string()
        }
    }
}
