//! Sales insights for the admin dashboard.

use tracing::{info, instrument, warn};

use nexus_core::admin::AnalyticsPoint;
use nexus_core::types::CallState;

use crate::gemini::{GeminiClient, GenerateContentRequest};

use super::AiCallError;
use super::prompts::insights_prompt;

pub const NO_INSIGHTS: &str = "No insights generated.";
pub const INSIGHTS_UNAVAILABLE: &str =
    "Unable to generate insights. Please ensure your API key is configured.";

/// Summarizes the sales series into actionable bullet points.
pub struct InsightsService<'a> {
    gemini: &'a GeminiClient,
}

impl<'a> InsightsService<'a> {
    #[must_use]
    pub const fn new(gemini: &'a GeminiClient) -> Self {
        Self { gemini }
    }

    #[instrument(skip_all, fields(points = analytics.len()))]
    pub async fn generate(&self, analytics: &[AnalyticsPoint]) -> CallState<String> {
        let result = async {
            let prompt = insights_prompt(analytics)?;
            let text = self
                .gemini
                .generate(&GenerateContentRequest::prompt(prompt))
                .await?;
            Ok::<_, AiCallError>(text)
        }
        .await;
        settle_insights(result)
    }
}

/// Final slot state for an insights call.
#[must_use]
pub fn settle_insights(result: Result<String, AiCallError>) -> CallState<String> {
    match result {
        Ok(text) if text.trim().is_empty() => CallState::Succeeded(NO_INSIGHTS.to_string()),
        Ok(text) => {
            info!(chars = text.len(), "insights generated");
            CallState::Succeeded(text)
        }
        Err(e) => {
            warn!(error = %e, "insights generation failed");
            CallState::Failed(INSIGHTS_UNAVAILABLE.to_string())
        }
    }
}
