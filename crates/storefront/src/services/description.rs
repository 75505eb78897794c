//! Product description generator.

use tracing::{info, instrument, warn};

use nexus_core::types::CallState;

use crate::gemini::{GeminiClient, GenerateContentRequest};

use super::AiCallError;
use super::prompts::description_prompt;

pub const DESCRIPTION_UNAVAILABLE: &str = "Error generating content. Please check API key.";

/// Writes marketing copy from a product name and feature keywords.
pub struct DescriptionService<'a> {
    gemini: &'a GeminiClient,
}

impl<'a> DescriptionService<'a> {
    #[must_use]
    pub const fn new(gemini: &'a GeminiClient) -> Self {
        Self { gemini }
    }

    /// Generate a description. Callers must reject blank inputs first.
    #[instrument(skip(self))]
    pub async fn generate(&self, name: &str, keywords: &str) -> CallState<String> {
        let result = async {
            let prompt = description_prompt(name, keywords)?;
            let text = self
                .gemini
                .generate(&GenerateContentRequest::prompt(prompt))
                .await?;
            Ok::<_, AiCallError>(text)
        }
        .await;
        settle_description(result)
    }
}

/// Final slot state for a description call. Empty text is kept as-is.
#[must_use]
pub fn settle_description(result: Result<String, AiCallError>) -> CallState<String> {
    match result {
        Ok(text) => {
            info!(chars = text.len(), "description generated");
            CallState::Succeeded(text)
        }
        Err(e) => {
            warn!(error = %e, "description generation failed");
            CallState::Failed(DESCRIPTION_UNAVAILABLE.to_string())
        }
    }
}
