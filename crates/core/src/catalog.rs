//! Read-only product catalog.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Persona, Price, ProductId, Sku};

/// Label of the pseudo-category that matches everything.
pub const ALL_CATEGORIES: &str = "All";

/// A catalog entry with retail and wholesale pricing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub sku: Sku,
    pub name: String,
    pub description: String,
    pub category: String,
    /// Retail price.
    pub price: Price,
    /// Wholesale price. Lower than `price` by convention only.
    pub b2b_price: Price,
    pub stock: u32,
    pub image: String,
    #[serde(default)]
    pub is_new: bool,
}

impl Product {
    /// Unit price for the given persona.
    #[must_use]
    pub const fn unit_price(&self, persona: Persona) -> Price {
        if persona.is_wholesale() {
            self.b2b_price
        } else {
            self.price
        }
    }

    /// Case-insensitive substring match over name, description and category.
    #[must_use]
    pub fn mentions(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
            || self.category.to_lowercase().contains(&needle)
    }
}

/// Errors raised by catalog lookups.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("product not found: {0}")]
    ProductNotFound(ProductId),
}

/// The immutable product list, fixed at process start.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product by id.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ProductNotFound` if no product has the id.
    pub fn get(&self, id: &ProductId) -> Result<&Product, CatalogError> {
        self.products
            .iter()
            .find(|p| &p.id == id)
            .ok_or_else(|| CatalogError::ProductNotFound(id.clone()))
    }

    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.products.iter().any(|p| &p.id == id)
    }

    /// Find the product for a hand-typed SKU.
    ///
    /// An exact (case-insensitive) match or, failing that on the same entry,
    /// a partial one; the first product in catalog order wins. Blank input
    /// never matches.
    #[must_use]
    pub fn find_by_sku(&self, input: &str) -> Option<&Product> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }
        self.products
            .iter()
            .find(|p| p.sku.matches(input) || p.sku.contains(input))
    }

    /// `"All"` followed by each distinct category in catalog order.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        let mut categories = vec![ALL_CATEGORIES.to_string()];
        for product in &self.products {
            if !categories.contains(&product.category) {
                categories.push(product.category.clone());
            }
        }
        categories
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    #[test]
    fn test_categories_in_catalog_order() {
        let catalog = seed::catalog();
        assert_eq!(
            catalog.categories(),
            vec!["All", "Hardware", "Office", "Networking", "Peripherals", "Software"]
        );
    }

    #[test]
    fn test_get_unknown_product() {
        let catalog = seed::catalog();
        let missing = ProductId::new("99");
        assert_eq!(
            catalog.get(&missing),
            Err(CatalogError::ProductNotFound(missing))
        );
    }

    #[test]
    fn test_find_by_sku_exact_and_partial() {
        let catalog = seed::catalog();
        assert_eq!(
            catalog.find_by_sku("tech-001").map(|p| p.id.as_str()),
            Some("1")
        );
        assert_eq!(catalog.find_by_sku("CRM").map(|p| p.id.as_str()), Some("6"));
        assert!(catalog.find_by_sku("NOPE-404").is_none());
        assert!(catalog.find_by_sku("   ").is_none());
    }

    #[test]
    fn test_unit_price_by_persona() {
        let catalog = seed::catalog();
        let chair = catalog.get(&ProductId::new("2")).expect("chair");
        assert_eq!(chair.unit_price(Persona::B2c), Price::usd_cents(34_900));
        assert_eq!(chair.unit_price(Persona::Guest), Price::usd_cents(34_900));
        assert_eq!(chair.unit_price(Persona::B2b), Price::usd_cents(19_900));
    }

    #[test]
    fn test_mentions_is_case_insensitive() {
        let catalog = seed::catalog();
        let switch = catalog.get(&ProductId::new("3")).expect("switch");
        assert!(switch.mentions("VLAN"));
        assert!(switch.mentions("networking"));
        assert!(!switch.mentions("chair"));
    }
}
