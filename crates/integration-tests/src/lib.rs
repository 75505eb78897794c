//! Integration tests for the Nexus storefront.
//!
//! Each test boots the full router on an ephemeral port and, when it needs
//! the AI widgets, a stub Generative Language API that records every
//! `generateContent` call and answers with a canned reply. Replies can be
//! delayed or scripted per call to exercise overlapping requests.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p nexus-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::missing_panics_doc, clippy::expect_used)]

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
};
use secrecy::SecretString;
use serde_json::{Value, json};
use url::Url;

use nexus_storefront::config::{GeminiConfig, StorefrontConfig};
use nexus_storefront::state::AppState;

/// API key handed to the app when a stub is attached.
pub const TEST_API_KEY: &str = "test-key";

/// What the stub answers to every `generateContent` call.
#[derive(Debug, Clone)]
pub enum StubReply {
    /// 200 with a single candidate carrying this text.
    Text(String),
    /// 200 with no candidates at all.
    NoCandidates,
    /// An error status with a Google-style error body.
    Status(u16),
    /// The inner reply, sent after a pause.
    Delayed(Duration, Box<StubReply>),
}

impl StubReply {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Hold this reply back for `delay` before answering.
    #[must_use]
    pub fn delayed(self, delay: Duration) -> Self {
        Self::Delayed(delay, Box::new(self))
    }

    fn respond(&self) -> (StatusCode, Json<Value>) {
        match self {
            Self::Delayed(_, inner) => inner.respond(),
            Self::Text(text) => (
                StatusCode::OK,
                Json(json!({
                    "candidates": [{
                        "content": {"role": "model", "parts": [{"text": text}]},
                        "finishReason": "STOP"
                    }],
                    "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 5, "totalTokenCount": 15}
                })),
            ),
            Self::NoCandidates => (StatusCode::OK, Json(json!({"candidates": []}))),
            Self::Status(code) => {
                let status =
                    StatusCode::from_u16(*code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                (
                    status,
                    Json(json!({
                        "error": {"code": code, "message": "stubbed failure", "status": "INTERNAL"}
                    })),
                )
            }
        }
    }
}

/// A `generateContent` call as the stub saw it.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub path: String,
    pub api_key: Option<String>,
    pub body: Value,
}

impl RecordedCall {
    /// Texts of every part of every content turn, in order.
    #[must_use]
    pub fn content_texts(&self) -> Vec<String> {
        self.body["contents"]
            .as_array()
            .into_iter()
            .flatten()
            .flat_map(|content| content["parts"].as_array().cloned().unwrap_or_default())
            .filter_map(|part| part["text"].as_str().map(String::from))
            .collect()
    }

    /// Roles of the content turns, in order.
    #[must_use]
    pub fn roles(&self) -> Vec<String> {
        self.body["contents"]
            .as_array()
            .into_iter()
            .flatten()
            .filter_map(|content| content["role"].as_str().map(String::from))
            .collect()
    }

    /// Text of the system instruction, if one was sent.
    #[must_use]
    pub fn system_instruction(&self) -> Option<String> {
        self.body["systemInstruction"]["parts"][0]["text"]
            .as_str()
            .map(String::from)
    }
}

#[derive(Clone)]
struct StubState {
    reply: Arc<Mutex<StubReply>>,
    scripted: Arc<Mutex<VecDeque<StubReply>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl StubState {
    /// Next scripted reply, or the canned one once the script runs out.
    fn next_reply(&self) -> StubReply {
        self.scripted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| {
                self.reply
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .clone()
            })
    }
}

/// Stub Generative Language API server.
pub struct GeminiStub {
    base_url: Url,
    state: StubState,
}

impl GeminiStub {
    /// Start a stub on an ephemeral port.
    pub async fn start(reply: StubReply) -> Self {
        let state = StubState {
            reply: Arc::new(Mutex::new(reply)),
            scripted: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        };

        let router = Router::new()
            .route("/v1beta/models/{*action}", post(generate_content))
            .with_state(state.clone());
        let addr = serve(router).await;

        Self {
            base_url: Url::parse(&format!("http://{addr}/")).expect("stub url"),
            state,
        }
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Change the canned reply for subsequent calls.
    pub fn set_reply(&self, reply: StubReply) {
        *self
            .state
            .reply
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = reply;
    }

    /// Answer the next unanswered call with `reply`, ahead of the canned one.
    ///
    /// Scripted replies are used in the order calls arrive.
    pub fn push_reply(&self, reply: StubReply) {
        self.state
            .scripted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(reply);
    }

    /// Every call received so far.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state
            .calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent call.
    #[must_use]
    pub fn last_call(&self) -> RecordedCall {
        self.calls().pop().expect("no generateContent call recorded")
    }
}

async fn generate_content(
    State(state): State<StubState>,
    uri: axum::http::Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let call = RecordedCall {
        path: uri.path().to_string(),
        api_key: headers
            .get("x-goog-api-key")
            .and_then(|v| v.to_str().ok())
            .map(String::from),
        body,
    };
    state
        .calls
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(call);

    let reply = state.next_reply();
    if let StubReply::Delayed(delay, _) = &reply {
        tokio::time::sleep(*delay).await;
    }
    reply.respond()
}

async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });
    addr
}

/// A running storefront plus an HTTP client pointed at it.
pub struct TestApp {
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestApp {
    /// Start the app wired to `stub`.
    pub async fn with_stub(stub: &GeminiStub) -> Self {
        Self::start(GeminiConfig::for_endpoint(
            stub.base_url().clone(),
            Some(SecretString::from(TEST_API_KEY)),
        ))
        .await
    }

    /// Start the app with no API key; every AI call fails fast.
    pub async fn without_key() -> Self {
        Self::start(GeminiConfig::for_endpoint(
            Url::parse("http://127.0.0.1:9/").expect("url"),
            None,
        ))
        .await
    }

    async fn start(gemini: GeminiConfig) -> Self {
        let config = StorefrontConfig {
            host: [127, 0, 0, 1].into(),
            port: 0,
            gemini,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        };
        let state = AppState::new(config).expect("app state");
        let addr = serve(nexus_storefront::app(state)).await;

        Self {
            base_url: format!("http://{addr}"),
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request")
    }

    pub async fn get_json(&self, path: &str) -> Value {
        let response = self.get(path).await;
        assert!(response.status().is_success(), "GET {path}: {}", response.status());
        response.json().await.expect("JSON body")
    }

    pub async fn post(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("POST request")
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> Value {
        let response = self.post(path, body).await;
        assert!(response.status().is_success(), "POST {path}: {}", response.status());
        response.json().await.expect("JSON body")
    }

    /// POST that gives up after `timeout`, dropping the connection.
    pub async fn post_with_timeout(
        &self,
        path: &str,
        body: &Value,
        timeout: Duration,
    ) -> reqwest::Result<reqwest::Response> {
        self.client
            .post(self.url(path))
            .json(body)
            .timeout(timeout)
            .send()
            .await
    }

    pub async fn put(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .expect("PUT request")
    }

    pub async fn delete(&self, path: &str) -> reqwest::Response {
        self.client
            .delete(self.url(path))
            .send()
            .await
            .expect("DELETE request")
    }

    /// Switch the shopper persona.
    pub async fn switch_persona(&self, persona: &str) {
        let response = self.put("/api/session", &json!({"persona": persona})).await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);
    }
}

/// Ids of the product cards in a storefront view.
#[must_use]
pub fn product_ids(view: &Value) -> Vec<String> {
    view["products"]
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|p| p["id"].as_str().map(String::from))
        .collect()
}
