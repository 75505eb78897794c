//! Application context: who is shopping, which screen is shown, and the cart.
//!
//! The context is passed explicitly to every operation that depends on the
//! persona, so pricing never reads ambient state.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::cart::{Cart, CartError};
use crate::catalog::{Catalog, CatalogError};
use crate::quick_order::{self, Banner};
use crate::types::{Persona, Price, ProductId, View};

/// Errors raised when adding a catalog product to the cart.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddToCartError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Single-user session state. Nothing here outlives the process.
#[derive(Debug, Clone, Default)]
pub struct AppContext {
    pub persona: Persona,
    pub view: View,
    pub cart: Cart,
}

impl AppContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Change persona. Cart quantities are kept; totals re-price on read.
    pub const fn switch_persona(&mut self, persona: Persona) {
        self.persona = persona;
    }

    pub const fn navigate(&mut self, view: View) {
        self.view = view;
    }

    /// Add a catalog product to the cart.
    ///
    /// Returns the quantity now on the product's line.
    ///
    /// # Errors
    ///
    /// Returns `AddToCartError::Catalog` for an unknown id and
    /// `AddToCartError::Cart` for a zero quantity.
    pub fn add_to_cart(
        &mut self,
        catalog: &Catalog,
        id: &ProductId,
        quantity: u32,
    ) -> Result<u32, AddToCartError> {
        let product = catalog.get(id)?;
        Ok(self.cart.add(product, quantity)?)
    }

    /// Run a quick order against this context's cart.
    pub fn quick_order(
        &mut self,
        catalog: &Catalog,
        sku: &str,
        quantity: i64,
        now: DateTime<Utc>,
    ) -> Banner {
        quick_order::quick_order(&mut self.cart, catalog, sku, quantity, now)
    }

    /// Cart total priced for the current persona.
    #[must_use]
    pub fn cart_total(&self) -> Price {
        self.cart.total(self.persona)
    }

    /// Units in the cart, shown on the header badge.
    #[must_use]
    pub fn cart_count(&self) -> u32 {
        self.cart.item_count()
    }
}
