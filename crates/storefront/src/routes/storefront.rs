//! Storefront listing, category chips and AI search.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use nexus_core::catalog::Product;
use nexus_core::search::{CategoryFilter, ResultSource};
use nexus_core::types::{Persona, Price, ProductId, Sku};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::routes::detached;
use crate::services::SearchService;
use crate::state::AppState;

/// Product tile as shown in the grid, priced for the current persona.
#[derive(Debug, Clone, Serialize)]
pub struct ProductCard {
    pub id: ProductId,
    pub sku: Sku,
    pub name: String,
    pub description: String,
    pub category: String,
    pub image: String,
    pub is_new: bool,
    pub stock: u32,
    pub price: Price,
    /// Retail price shown struck through when wholesale pricing applies.
    pub retail_price: Option<Price>,
}

impl ProductCard {
    #[must_use]
    pub fn new(product: &Product, persona: Persona) -> Self {
        Self {
            id: product.id.clone(),
            sku: product.sku.clone(),
            name: product.name.clone(),
            description: product.description.clone(),
            category: product.category.clone(),
            image: product.image.clone(),
            is_new: product.is_new,
            stock: product.stock,
            price: product.unit_price(persona),
            retail_price: persona.is_wholesale().then_some(product.price),
        }
    }
}

/// Storefront screen payload.
#[derive(Debug, Clone, Serialize)]
pub struct StorefrontView {
    pub persona: Persona,
    pub categories: Vec<String>,
    pub active_category: String,
    pub query: String,
    pub searching: bool,
    pub result_source: Option<ResultSource>,
    pub filtered: bool,
    pub products: Vec<ProductCard>,
}

/// Build the storefront payload from the current session.
#[must_use]
pub fn storefront_view(state: &AppState) -> StorefrontView {
    let catalog = state.catalog();
    let session = state.session();
    let persona = session.context.persona;

    StorefrontView {
        persona,
        categories: catalog.categories(),
        active_category: session.search.category.label().to_string(),
        query: session.search.query.clone(),
        searching: session.search.pending,
        result_source: session.search.source,
        filtered: session.search.is_filtered(),
        products: session
            .search
            .visible(catalog)
            .into_iter()
            .map(|p| ProductCard::new(p, persona))
            .collect(),
    }
}

/// GET /api/storefront
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<StorefrontView> {
    Json(storefront_view(&state))
}

#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    pub category: String,
}

/// PUT /api/storefront/category
#[instrument(skip(state))]
pub async fn select_category(
    State(state): State<AppState>,
    Json(body): Json<CategoryRequest>,
) -> Result<Json<StorefrontView>> {
    let filter = CategoryFilter::from_label(body.category.trim());
    if let CategoryFilter::Only(category) = &filter
        && !state.catalog().categories().contains(category)
    {
        return Err(AppError::NotFound(format!("category: {category}")));
    }

    state.session().search.category = filter;
    Ok(Json(storefront_view(&state)))
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

/// POST /api/storefront/search
///
/// A blank query clears the result filter without calling the model.
#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    Json(body): Json<SearchRequest>,
) -> Result<Json<StorefrontView>> {
    let started = state.session().search.begin(&body.query);

    if started {
        add_breadcrumb("search", "AI search", &[("query", &body.query)]);
        let task_state = state.clone();
        detached(async move {
            let outcome = SearchService::new(task_state.gemini(), task_state.catalog())
                .rank(&body.query)
                .await;
            task_state
                .session()
                .search
                .finish(outcome.ids, outcome.source);
        })
        .await?;
    }

    Ok(Json(storefront_view(&state)))
}

/// DELETE /api/storefront/search
#[instrument(skip(state))]
pub async fn clear_search(State(state): State<AppState>) -> Json<StorefrontView> {
    state.session().search.clear();
    Json(storefront_view(&state))
}
