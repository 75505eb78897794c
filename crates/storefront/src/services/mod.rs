//! AI-backed services for the storefront and admin widgets.
//!
//! Each service renders a prompt, makes one Generative Language API call and
//! turns the outcome into what its widget shows. Failures never reach the
//! HTTP layer: they are logged and replaced by the widget's fallback.
//!
//! # Services
//!
//! - [`search`] - Product ranking with a substring fallback
//! - [`insights`] - Executive summary of the sales series
//! - [`description`] - Product description generator
//! - [`assistant`] - Shopping assistant chat replies

pub mod assistant;
pub mod description;
pub mod insights;
pub mod prompts;
pub mod search;

pub use assistant::AssistantService;
pub use description::DescriptionService;
pub use insights::InsightsService;
pub use search::{SearchOutcome, SearchService};

use crate::gemini::GeminiError;

/// Errors from a single AI call, before the fallback is applied.
#[derive(Debug, thiserror::Error)]
pub enum AiCallError {
    /// The prompt template failed to render.
    #[error("prompt error: {0}")]
    Prompt(#[from] askama::Error),

    /// The API call failed.
    #[error(transparent)]
    Gemini(#[from] GeminiError),
}
