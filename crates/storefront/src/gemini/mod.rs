//! Google Generative Language API integration.
//!
//! Every AI widget in the storefront and admin console goes through
//! [`GeminiClient::generate`]: one `generateContent` round trip, no
//! streaming, no retries. Callers decide what a failure looks like to the
//! shopper.

mod client;
mod error;
mod types;

pub use client::GeminiClient;
pub use error::{ApiErrorBody, ApiErrorResponse, GeminiError};
pub use types::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
    UsageMetadata,
};
