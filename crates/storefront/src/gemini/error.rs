//! Error types for the Generative Language API client.

use thiserror::Error;

/// Errors that can occur when calling the Generative Language API.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned an error body.
    #[error("API error {code} ({status}): {message}")]
    Api {
        /// HTTP status code reported in the body.
        code: u16,
        /// Status string from the API, e.g. `INVALID_ARGUMENT`.
        status: String,
        /// Error message.
        message: String,
    },

    /// Rate limited by the API.
    #[error("rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Authentication failed.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// No API key was configured.
    #[error("no API key configured")]
    MissingApiKey,

    /// Failed to parse response.
    #[error("parse error: {0}")]
    Parse(String),
}

/// Error envelope returned by the API.
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

/// Nested error details.
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorBody {
    /// HTTP status code.
    pub code: u16,
    /// Error message.
    pub message: String,
    /// Canonical status name.
    #[serde(default)]
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gemini_error_display() {
        let err = GeminiError::RateLimited(30);
        assert_eq!(err.to_string(), "rate limited, retry after 30 seconds");

        let err = GeminiError::Api {
            code: 400,
            status: "INVALID_ARGUMENT".to_string(),
            message: "API key not valid".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "API error 400 (INVALID_ARGUMENT): API key not valid"
        );

        assert_eq!(GeminiError::MissingApiKey.to_string(), "no API key configured");
    }

    #[test]
    fn test_api_error_deserialization() {
        let json = r#"{
            "error": {
                "code": 400,
                "message": "API key not valid. Please pass a valid API key.",
                "status": "INVALID_ARGUMENT"
            }
        }"#;

        let response: ApiErrorResponse = serde_json::from_str(json).expect("deserialize");
        assert_eq!(response.error.code, 400);
        assert_eq!(response.error.status, "INVALID_ARGUMENT");
        assert!(response.error.message.starts_with("API key not valid"));
    }
}
