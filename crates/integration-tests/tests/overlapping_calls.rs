//! Integration tests for slow model calls: dropped requests and overlapping
//! requests against the same session.

use std::time::Duration;

use nexus_core::chat::WELCOME_MESSAGE;
use nexus_integration_tests::{GeminiStub, StubReply, TestApp, product_ids};
use serde_json::json;

const CLIENT_TIMEOUT: Duration = Duration::from_millis(150);
const SLOW: Duration = Duration::from_millis(800);
const SETTLE: Duration = Duration::from_millis(1500);

// =============================================================================
// Dropped Requests
// =============================================================================

#[tokio::test]
async fn test_chat_reply_lands_after_client_gives_up() {
    let stub = GeminiStub::start(StubReply::text("It has 24 ports.").delayed(SLOW)).await;
    let app = TestApp::with_stub(&stub).await;

    let result = app
        .post_with_timeout(
            "/api/assistant/messages",
            &json!({"text": "How many ports?"}),
            CLIENT_TIMEOUT,
        )
        .await;
    assert!(result.is_err_and(|e| e.is_timeout()));

    tokio::time::sleep(SETTLE).await;

    let conversation = app.get_json("/api/assistant/messages").await;
    assert_eq!(conversation["pending"], false);
    assert_eq!(conversation["messages"].as_array().map(Vec::len), Some(3));
    assert_eq!(conversation["messages"][2]["text"], "It has 24 ports.");

    // The conversation accepts the next message
    stub.set_reply(StubReply::text("Yes."));
    let response = app
        .post("/api/assistant/messages", &json!({"text": "Is it managed?"}))
        .await;
    assert_eq!(response.status(), reqwest::StatusCode::OK);
}

#[tokio::test]
async fn test_insights_settle_after_client_gives_up() {
    let stub = GeminiStub::start(StubReply::text("- Revenue is up.").delayed(SLOW)).await;
    let app = TestApp::with_stub(&stub).await;

    let result = app
        .post_with_timeout("/api/admin/insights", &json!({}), CLIENT_TIMEOUT)
        .await;
    assert!(result.is_err_and(|e| e.is_timeout()));
    assert_eq!(
        app.get_json("/api/admin/insights").await,
        json!({"state": "pending"})
    );

    tokio::time::sleep(SETTLE).await;

    assert_eq!(
        app.get_json("/api/admin/insights").await,
        json!({"state": "succeeded", "value": "- Revenue is up."})
    );
}

#[tokio::test]
async fn test_description_settles_after_client_gives_up() {
    let stub = GeminiStub::start(StubReply::text("Quiet and fast.").delayed(SLOW)).await;
    let app = TestApp::with_stub(&stub).await;

    let result = app
        .post_with_timeout(
            "/api/admin/description",
            &json!({"name": "Silent Fan", "keywords": "quiet, cooling"}),
            CLIENT_TIMEOUT,
        )
        .await;
    assert!(result.is_err_and(|e| e.is_timeout()));

    tokio::time::sleep(SETTLE).await;

    assert_eq!(
        app.get_json("/api/admin/description").await,
        json!({"state": "succeeded", "value": "Quiet and fast."})
    );
}

#[tokio::test]
async fn test_search_settles_after_client_gives_up() {
    let stub = GeminiStub::start(StubReply::text(r#"["3"]"#).delayed(SLOW)).await;
    let app = TestApp::with_stub(&stub).await;

    let result = app
        .post_with_timeout(
            "/api/storefront/search",
            &json!({"query": "router"}),
            CLIENT_TIMEOUT,
        )
        .await;
    assert!(result.is_err_and(|e| e.is_timeout()));

    tokio::time::sleep(SETTLE).await;

    let view = app.get_json("/api/storefront").await;
    assert_eq!(view["searching"], false);
    assert_eq!(view["result_source"], "ranked");
    assert_eq!(product_ids(&view), vec!["3"]);
}

// =============================================================================
// Overlapping Requests
// =============================================================================

#[tokio::test]
async fn test_chat_send_while_reply_pending_conflicts() {
    let stub = GeminiStub::start(StubReply::text("Checking stock.").delayed(SLOW)).await;
    let app = TestApp::with_stub(&stub).await;

    let first_body = json!({"text": "Is PER-555 in stock?"});
    let (first, second) = tokio::join!(
        app.post("/api/assistant/messages", &first_body),
        async {
            tokio::time::sleep(Duration::from_millis(150)).await;
            app.post("/api/assistant/messages", &json!({"text": "Hello?"}))
                .await
        }
    );

    assert_eq!(first.status(), reqwest::StatusCode::OK);
    assert_eq!(second.status(), reqwest::StatusCode::CONFLICT);
    assert_eq!(stub.calls().len(), 1);

    let conversation = app.get_json("/api/assistant/messages").await;
    let texts: Vec<_> = conversation["messages"]
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|m| m["text"].as_str())
        .collect();
    assert_eq!(
        texts,
        vec![WELCOME_MESSAGE, "Is PER-555 in stock?", "Checking stock."]
    );
}

#[tokio::test]
async fn test_chat_and_search_do_not_interfere() {
    let stub = GeminiStub::start(StubReply::NoCandidates).await;
    stub.push_reply(StubReply::text("Try the 4K monitor.").delayed(Duration::from_millis(500)));
    stub.push_reply(StubReply::text(r#"["5"]"#).delayed(Duration::from_millis(500)));
    let app = TestApp::with_stub(&stub).await;

    let chat_body = json!({"text": "Best screen?"});
    let (chat, search) = tokio::join!(
        app.post_json("/api/assistant/messages", &chat_body),
        async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            app.post_json("/api/storefront/search", &json!({"query": "screen"}))
                .await
        }
    );

    assert_eq!(chat["pending"], false);
    assert_eq!(chat["messages"][2]["text"], "Try the 4K monitor.");
    assert_eq!(search["searching"], false);
    assert_eq!(search["result_source"], "ranked");
    assert_eq!(product_ids(&search), vec!["5"]);
}

#[tokio::test]
async fn test_overlapping_insights_last_to_finish_wins() {
    let stub = GeminiStub::start(StubReply::NoCandidates).await;
    stub.push_reply(StubReply::text("first").delayed(Duration::from_millis(600)));
    stub.push_reply(StubReply::text("second").delayed(Duration::from_millis(50)));
    let app = TestApp::with_stub(&stub).await;

    let slow_body = json!({});
    let (slow, fast) = tokio::join!(
        app.post_json("/api/admin/insights", &slow_body),
        async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            app.post_json("/api/admin/insights", &json!({})).await
        }
    );

    assert_eq!(slow, json!({"state": "succeeded", "value": "first"}));
    assert_eq!(fast, json!({"state": "succeeded", "value": "second"}));
    assert_eq!(
        app.get_json("/api/admin/insights").await,
        json!({"state": "succeeded", "value": "first"})
    );
}
