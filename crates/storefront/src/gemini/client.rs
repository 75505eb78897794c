//! Generative Language API client.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};

use crate::config::GeminiConfig;

use super::error::{ApiErrorResponse, GeminiError};
use super::types::{GenerateContentRequest, GenerateContentResponse};

const API_KEY_HEADER: &str = "x-goog-api-key";
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Generative Language API client.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct GeminiClient {
    inner: Arc<GeminiClientInner>,
}

struct GeminiClientInner {
    client: reqwest::Client,
    api_key: Option<SecretString>,
    model: String,
    endpoint: String,
}

impl GeminiClient {
    /// Create a new client.
    ///
    /// A missing API key is accepted here and reported on each call.
    ///
    /// # Errors
    ///
    /// Returns `GeminiError::Http` if the HTTP client cannot be built.
    pub fn new(config: &GeminiConfig) -> Result<Self, GeminiError> {
        let client = reqwest::Client::builder().build()?;
        let endpoint = format!(
            "{}/v1beta/models/{}:generateContent",
            config.base_url.as_str().trim_end_matches('/'),
            config.model
        );

        Ok(Self {
            inner: Arc::new(GeminiClientInner {
                client,
                api_key: config.api_key.clone(),
                model: config.model.clone(),
                endpoint,
            }),
        })
    }

    /// Model id requests are sent to.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.inner.model
    }

    /// Send one `generateContent` request and return the response text.
    ///
    /// The text is the concatenation of the first candidate's text parts and
    /// may be empty.
    ///
    /// # Errors
    ///
    /// Returns an error if no key is configured, the request fails, or the
    /// API answers with an error status or an unparsable body.
    #[instrument(skip(self, request), fields(model = %self.inner.model, turns = request.contents.len()))]
    pub async fn generate(&self, request: &GenerateContentRequest) -> Result<String, GeminiError> {
        let api_key = self
            .inner
            .api_key
            .as_ref()
            .ok_or(GeminiError::MissingApiKey)?;

        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            .header(API_KEY_HEADER, api_key.expose_secret())
            .json(request)
            .send()
            .await?;

        let body = Self::handle_response(response).await?;
        debug!(
            finish_reason = ?body.finish_reason(),
            prompt_tokens = ?body.usage_metadata.and_then(|u| u.prompt_token_count),
            output_tokens = ?body.usage_metadata.and_then(|u| u.candidates_token_count),
            "generateContent usage"
        );
        Ok(body.text())
    }

    /// Handle a response, parsing the body on success.
    async fn handle_response(
        response: reqwest::Response,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            serde_json::from_str(&body)
                .map_err(|e| GeminiError::Parse(format!("Failed to parse response: {e}")))
        } else {
            Err(Self::handle_error_status(status, response).await)
        }
    }

    /// Handle an error status code.
    async fn handle_error_status(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> GeminiError {
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
            return GeminiError::RateLimited(retry_after);
        }

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return GeminiError::Unauthorized("API key rejected".to_string());
        }

        match response.text().await {
            Ok(body) => serde_json::from_str::<ApiErrorResponse>(&body).map_or_else(
                |_| GeminiError::Api {
                    code: status.as_u16(),
                    status: status.to_string(),
                    message: body.clone(),
                },
                |api_error| GeminiError::Api {
                    code: api_error.error.code,
                    status: api_error.error.status,
                    message: api_error.error.message,
                },
            ),
            Err(e) => GeminiError::Http(e),
        }
    }
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model", &self.inner.model)
            .field("endpoint", &self.inner.endpoint)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn config(base: &str, key: Option<&str>) -> GeminiConfig {
        GeminiConfig::for_endpoint(
            Url::parse(base).expect("url"),
            key.map(|k| SecretString::from(k.to_string())),
        )
    }

    #[test]
    fn test_endpoint_layout() {
        let client = GeminiClient::new(&config("http://127.0.0.1:9000/", Some("k"))).expect("client");
        assert_eq!(
            client.inner.endpoint,
            "http://127.0.0.1:9000/v1beta/models/gemini-2.5-flash:generateContent"
        );
        assert_eq!(client.model(), "gemini-2.5-flash");
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_request() {
        // Port 9 (discard) is never contacted: the key check comes first.
        let client = GeminiClient::new(&config("http://127.0.0.1:9", None)).expect("client");
        let result = client
            .generate(&GenerateContentRequest::prompt("hello"))
            .await;
        assert!(matches!(result, Err(GeminiError::MissingApiKey)));
    }

    #[test]
    fn test_debug_hides_key() {
        let client =
            GeminiClient::new(&config("http://127.0.0.1:9000", Some("AIza-secret"))).expect("client");
        let debug_output = format!("{client:?}");
        assert!(!debug_output.contains("AIza-secret"));
        assert!(debug_output.contains("gemini-2.5-flash"));
    }

    #[test]
    fn test_gemini_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + Clone>() {}
        assert_send_sync::<GeminiClient>();
    }
}
