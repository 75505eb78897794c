//! Semantic product search.

use tracing::{info, instrument, warn};

use nexus_core::catalog::Catalog;
use nexus_core::search::{ResultSource, parse_ranked_ids, substring_matches};
use nexus_core::types::ProductId;

use crate::gemini::{GeminiClient, GenerateContentRequest};

use super::AiCallError;
use super::prompts::search_prompt;

/// Ids to show for a query and how they were found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub ids: Vec<ProductId>,
    pub source: ResultSource,
}

/// Ranks catalog products against a free-text query.
pub struct SearchService<'a> {
    gemini: &'a GeminiClient,
    catalog: &'a Catalog,
}

impl<'a> SearchService<'a> {
    #[must_use]
    pub const fn new(gemini: &'a GeminiClient, catalog: &'a Catalog) -> Self {
        Self { gemini, catalog }
    }

    /// Ask the model for matching ids, falling back to a substring match.
    #[instrument(skip(self))]
    pub async fn rank(&self, query: &str) -> SearchOutcome {
        let result = self.call(query).await;
        settle_ranking(self.catalog, query, result)
    }

    async fn call(&self, query: &str) -> Result<String, AiCallError> {
        let prompt = search_prompt(self.catalog, query)?;
        let request = GenerateContentRequest::prompt(prompt).json_response();
        Ok(self.gemini.generate(&request).await?)
    }
}

/// Turn the ranking call's result into the ids to display.
///
/// Call errors, invalid JSON and non-array payloads all fall back to a local
/// substring match. Ranked ids are restricted to catalog products.
#[must_use]
pub fn settle_ranking(
    catalog: &Catalog,
    query: &str,
    result: Result<String, AiCallError>,
) -> SearchOutcome {
    let payload = match result {
        Ok(payload) => payload,
        Err(e) => {
            warn!(error = %e, "AI search failed, using substring fallback");
            return fallback(catalog, query);
        }
    };

    match parse_ranked_ids(catalog, &payload) {
        Ok(ids) => {
            info!(matches = ids.len(), "AI search ranked");
            SearchOutcome {
                ids,
                source: ResultSource::Ranked,
            }
        }
        Err(e) => {
            warn!(error = %e, "AI search returned an unusable payload, using substring fallback");
            fallback(catalog, query)
        }
    }
}

fn fallback(catalog: &Catalog, query: &str) -> SearchOutcome {
    SearchOutcome {
        ids: substring_matches(catalog, query),
        source: ResultSource::Fallback,
    }
}
