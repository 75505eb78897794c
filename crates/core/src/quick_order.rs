//! B2B quick order: add a cart line from a hand-typed SKU.

use std::num::NonZeroU32;

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::types::Sku;

/// How long a quick-order banner stays visible.
pub const BANNER_TTL_SECS: i64 = 3;

/// Number of SKUs offered as "recently ordered" shortcuts.
pub const RECENT_SKU_COUNT: usize = 4;

pub const SKU_NOT_FOUND_MESSAGE: &str = "Error: SKU not found. Please check and try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BannerKind {
    Success,
    Error,
}

/// Transient feedback shown above the quick-order form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
    pub expires_at: DateTime<Utc>,
}

impl Banner {
    fn raise(kind: BannerKind, message: String, now: DateTime<Utc>) -> Self {
        Self {
            kind,
            message,
            expires_at: now + TimeDelta::seconds(BANNER_TTL_SECS),
        }
    }

    /// Whether the banner should still be shown at `now`.
    #[must_use]
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Quantity as entered in the form; anything below 1 counts as 1 and
/// anything above `u32::MAX` saturates.
#[must_use]
pub fn coerce_quantity(quantity: i64) -> NonZeroU32 {
    u32::try_from(quantity)
        .ok()
        .and_then(NonZeroU32::new)
        .unwrap_or(if quantity > 0 { NonZeroU32::MAX } else { NonZeroU32::MIN })
}

/// Look up `sku` and add `quantity` units of the product to the cart.
///
/// Never fails: an unknown or blank SKU produces an error banner and leaves
/// the cart as it was.
pub fn quick_order(
    cart: &mut Cart,
    catalog: &Catalog,
    sku: &str,
    quantity: i64,
    now: DateTime<Utc>,
) -> Banner {
    let quantity = coerce_quantity(quantity);

    let Some(product) = catalog.find_by_sku(sku) else {
        return Banner::raise(BannerKind::Error, SKU_NOT_FOUND_MESSAGE.to_string(), now);
    };

    cart.add_units(product, quantity);
    Banner::raise(
        BannerKind::Success,
        format!(
            "Successfully added {quantity} units of {} to cart.",
            product.name
        ),
        now,
    )
}

/// SKUs offered as one-click shortcuts: the first few catalog entries.
#[must_use]
pub fn recent_skus(catalog: &Catalog) -> Vec<Sku> {
    catalog
        .products()
        .iter()
        .take(RECENT_SKU_COUNT)
        .map(|p| p.sku.clone())
        .collect()
}
