//! Nexus Core - Domain library for the Nexus demo storefront.
//!
//! Everything the storefront and admin screens compute lives here, free of
//! I/O: the static catalog and mock data, the cart with persona-dependent
//! pricing, the storefront filters, the B2B quick order and approval queue,
//! and the assistant conversation. The `nexus-storefront` binary wraps these
//! in an HTTP service and adds the generative AI calls.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, persona/view enums, call result slots
//! - [`catalog`] / [`seed`] - Products and the fixed demo data
//! - [`cart`] / [`context`] - Cart lines and the single-user session
//! - [`search`] - Category and result-id filtering
//! - [`quick_order`] / [`admin`] - B2B portal and admin console data
//! - [`chat`] - Assistant message history

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod admin;
pub mod cart;
pub mod catalog;
pub mod chat;
pub mod context;
pub mod quick_order;
pub mod search;
pub mod seed;
pub mod types;

pub use types::*;
