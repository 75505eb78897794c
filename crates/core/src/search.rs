//! Storefront filtering: a category filter ANDed with an optional set of
//! matching product ids.
//!
//! The id set comes from the AI ranking call or, when that call fails, from
//! [`substring_matches`]. `None` means "no search active" and shows every
//! product; an empty list means the search matched nothing.

use serde::Serialize;

use crate::catalog::{ALL_CATEGORIES, Catalog, Product};
use crate::types::ProductId;

/// Selected category chip.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Parse a category label; `"All"` (any case) selects everything.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        if label.eq_ignore_ascii_case(ALL_CATEGORIES) {
            Self::All
        } else {
            Self::Only(label.to_string())
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Only(category) => category,
        }
    }

    #[must_use]
    pub fn admits(&self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => &product.category == category,
        }
    }
}

/// How the current result ids were produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultSource {
    /// Ranked by the AI search call.
    Ranked,
    /// Local substring match after the AI call failed.
    Fallback,
}

/// Filter state of the storefront grid.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub query: String,
    pub category: CategoryFilter,
    pub results: Option<Vec<ProductId>>,
    pub source: Option<ResultSource>,
    /// Set while an AI search is in flight.
    pub pending: bool,
}

impl SearchState {
    /// Start a search for `query`.
    ///
    /// Returns `false` when the query is blank, in which case the id filter
    /// is cleared instead ("show all") and no call should be made. Otherwise
    /// the category resets to "All" and the state is marked pending.
    pub fn begin(&mut self, query: &str) -> bool {
        self.query = query.to_string();
        if query.trim().is_empty() {
            self.results = None;
            self.source = None;
            return false;
        }
        self.category = CategoryFilter::All;
        self.pending = true;
        true
    }

    /// Store the outcome of a search.
    pub fn finish(&mut self, ids: Vec<ProductId>, source: ResultSource) {
        self.results = Some(ids);
        self.source = Some(source);
        self.pending = false;
    }

    /// Reset query, result ids and category.
    pub fn clear(&mut self) {
        self.query.clear();
        self.results = None;
        self.source = None;
        self.category = CategoryFilter::All;
    }

    /// Whether any filter narrows the grid.
    #[must_use]
    pub fn is_filtered(&self) -> bool {
        self.results.is_some() || self.category != CategoryFilter::All
    }

    /// Products passing both filters, in catalog order.
    #[must_use]
    pub fn visible<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Product> {
        filter_products(catalog, &self.category, self.results.as_deref())
    }
}

/// Apply the category filter and the optional id membership list.
#[must_use]
pub fn filter_products<'a>(
    catalog: &'a Catalog,
    category: &CategoryFilter,
    results: Option<&[ProductId]>,
) -> Vec<&'a Product> {
    catalog
        .products()
        .iter()
        .filter(|p| category.admits(p))
        .filter(|p| results.is_none_or(|ids| ids.contains(&p.id)))
        .collect()
}

/// Ids of products whose name, description or category contain `query`,
/// ignoring case.
#[must_use]
pub fn substring_matches(catalog: &Catalog, query: &str) -> Vec<ProductId> {
    catalog
        .products()
        .iter()
        .filter(|p| p.mentions(query))
        .map(|p| p.id.clone())
        .collect()
}

/// Why a ranked-id payload was rejected.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RankingParseError {
    #[error("response is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("response is not a JSON array")]
    NotAnArray,
}

/// Parse the AI ranking payload into catalog ids.
///
/// The payload must be a JSON array. String entries naming a catalog product
/// are kept in the order given (duplicates dropped); anything else is
/// ignored. A blank payload counts as an empty array.
///
/// # Errors
///
/// Returns `RankingParseError` if the payload is not a JSON array.
pub fn parse_ranked_ids(
    catalog: &Catalog,
    payload: &str,
) -> Result<Vec<ProductId>, RankingParseError> {
    let payload = payload.trim();
    if payload.is_empty() {
        return Ok(Vec::new());
    }

    let value: serde_json::Value = serde_json::from_str(payload)
        .map_err(|e| RankingParseError::InvalidJson(e.to_string()))?;
    let serde_json::Value::Array(entries) = value else {
        return Err(RankingParseError::NotAnArray);
    };

    let mut ids: Vec<ProductId> = Vec::new();
    for entry in entries {
        let Some(raw) = entry.as_str() else {
            continue;
        };
        let id = ProductId::new(raw);
        if catalog.contains(&id) && !ids.contains(&id) {
            ids.push(id);
        }
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn test_category_only_filter() {
        let catalog = seed::catalog();
        let state = SearchState {
            category: CategoryFilter::from_label("Office"),
            ..SearchState::default()
        };
        let visible = state.visible(&catalog);
        assert_eq!(ids(&visible), vec!["2"]);
        assert!(visible.iter().all(|p| p.category == "Office"));
    }

    #[test]
    fn test_result_ids_intersect_category() {
        let catalog = seed::catalog();
        let results = vec![ProductId::new("1"), ProductId::new("3")];

        let all = filter_products(&catalog, &CategoryFilter::All, Some(results.as_slice()));
        assert_eq!(ids(&all), vec!["1", "3"]);

        let hardware = filter_products(
            &catalog,
            &CategoryFilter::from_label("Hardware"),
            Some(results.as_slice()),
        );
        assert_eq!(ids(&hardware), vec!["1"]);
    }

    #[test]
    fn test_blank_query_clears_results() {
        let catalog = seed::catalog();
        let mut state = SearchState::default();
        assert!(state.begin("chair"));
        state.finish(vec![ProductId::new("2")], ResultSource::Ranked);
        state.category = CategoryFilter::from_label("Hardware");

        assert!(!state.begin("   "));
        assert!(state.results.is_none());
        // Category-only filter remains, not an empty grid.
        assert_eq!(ids(&state.visible(&catalog)), vec!["1", "5"]);
    }

    #[test]
    fn test_begin_resets_category() {
        let mut state = SearchState {
            category: CategoryFilter::from_label("Office"),
            ..SearchState::default()
        };
        assert!(state.begin("monitor"));
        assert_eq!(state.category, CategoryFilter::All);
        assert!(state.pending);
    }

    #[test]
    fn test_clear_resets_everything() {
        let catalog = seed::catalog();
        let mut state = SearchState::default();
        state.begin("switch");
        state.finish(vec![ProductId::new("3")], ResultSource::Fallback);
        state.category = CategoryFilter::from_label("Networking");

        state.clear();
        assert!(!state.is_filtered());
        assert_eq!(state.visible(&catalog).len(), catalog.len());
    }

    #[test]
    fn test_empty_results_show_nothing() {
        let catalog = seed::catalog();
        let visible = filter_products(&catalog, &CategoryFilter::All, Some(&[][..]));
        assert!(visible.is_empty());
    }

    #[test]
    fn test_substring_fallback() {
        let catalog = seed::catalog();
        assert_eq!(substring_matches(&catalog, "HARDWARE"), vec![
            ProductId::new("1"),
            ProductId::new("5")
        ]);
        assert_eq!(substring_matches(&catalog, "lumbar"), vec![ProductId::new("2")]);
        assert!(substring_matches(&catalog, "espresso").is_empty());
    }

    #[test]
    fn test_parse_ranked_ids_filters_unknown_and_duplicates() {
        let catalog = seed::catalog();
        let parsed = parse_ranked_ids(&catalog, r#"["4", "99", 7, "4", "2"]"#).expect("parse");
        assert_eq!(parsed, vec![ProductId::new("4"), ProductId::new("2")]);
    }

    #[test]
    fn test_parse_ranked_ids_rejects_malformed_payloads() {
        let catalog = seed::catalog();
        assert!(matches!(
            parse_ranked_ids(&catalog, "chairs: 2"),
            Err(RankingParseError::InvalidJson(_))
        ));
        assert_eq!(
            parse_ranked_ids(&catalog, r#"{"ids": ["2"]}"#),
            Err(RankingParseError::NotAnArray)
        );
        assert_eq!(parse_ranked_ids(&catalog, "  "), Ok(Vec::new()));
    }
}
