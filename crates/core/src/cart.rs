//! Shopping cart.
//!
//! Lines hold a snapshot of the product they were created from. Because the
//! catalog never changes after start-up the snapshot always equals the
//! current catalog entry, and totals are computed on read with the caller's
//! persona, so switching persona re-prices every line.

use std::num::NonZeroU32;

use serde::Serialize;
use thiserror::Error;

use crate::catalog::Product;
use crate::types::{CurrencyCode, Persona, Price};

/// Errors raised by cart mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    #[error("quantity must be at least 1")]
    ZeroQuantity,
}

/// One product in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    #[must_use]
    pub const fn unit_price(&self, persona: Persona) -> Price {
        self.product.unit_price(persona)
    }

    #[must_use]
    pub fn line_total(&self, persona: Persona) -> Price {
        self.unit_price(persona).times(self.quantity)
    }
}

/// The single shopper's cart. Lines are unique by product id and keep
/// insertion order.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add `quantity` units of a product, merging with an existing line.
    ///
    /// Returns the quantity now on the product's line.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ZeroQuantity` if `quantity` is zero.
    pub fn add(&mut self, product: &Product, quantity: u32) -> Result<u32, CartError> {
        let quantity = NonZeroU32::new(quantity).ok_or(CartError::ZeroQuantity)?;
        Ok(self.add_units(product, quantity))
    }

    /// Add a quantity already known to be positive. Line quantities saturate.
    pub fn add_units(&mut self, product: &Product, quantity: NonZeroU32) -> u32 {
        let quantity = quantity.get();

        if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product.id) {
            line.quantity = line.quantity.saturating_add(quantity);
            return line.quantity;
        }

        self.lines.push(CartLine {
            product: product.clone(),
            quantity,
        });
        quantity
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total units across all lines (the badge count), saturating at
    /// `u32::MAX`.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0_u32, |count, line| count.saturating_add(line.quantity))
    }

    /// Sum of `quantity × unit price` for the persona.
    #[must_use]
    pub fn total(&self, persona: Persona) -> Price {
        self.lines.iter().fold(Price::zero(CurrencyCode::USD), |acc, line| {
            acc + line.line_total(persona)
        })
    }
}
