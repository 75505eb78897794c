//! Core types for the Nexus storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod call_state;
pub mod id;
pub mod price;
pub mod status;

pub use call_state::CallState;
pub use id::*;
pub use price::{CurrencyCode, Price};
pub use status::*;
