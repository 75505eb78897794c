//! Integration tests for the storefront listing and AI search.

use nexus_integration_tests::{GeminiStub, StubReply, TEST_API_KEY, TestApp, product_ids};
use serde_json::json;

// =============================================================================
// Listing
// =============================================================================

#[tokio::test]
async fn test_health() {
    let app = TestApp::without_key().await;
    let response = app.get("/health").await;
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(response.text().await.expect("body"), "ok");
}

#[tokio::test]
async fn test_listing_shows_whole_catalog() {
    let app = TestApp::without_key().await;
    let view = app.get_json("/api/storefront").await;

    assert_eq!(product_ids(&view), vec!["1", "2", "3", "4", "5", "6"]);
    assert_eq!(view["active_category"], "All");
    assert_eq!(view["filtered"], false);
    assert_eq!(
        view["categories"],
        json!(["All", "Hardware", "Office", "Networking", "Peripherals", "Software"])
    );
}

#[tokio::test]
async fn test_category_chip_filters_listing() {
    let app = TestApp::without_key().await;
    let response = app
        .put("/api/storefront/category", &json!({"category": "Hardware"}))
        .await;
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let view: serde_json::Value = response.json().await.expect("body");
    assert_eq!(product_ids(&view), vec!["1", "5"]);
    assert_eq!(view["filtered"], true);
}

#[tokio::test]
async fn test_unknown_category_is_not_found() {
    let app = TestApp::without_key().await;
    let response = app
        .put("/api/storefront/category", &json!({"category": "Garden"}))
        .await;
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_request_id_echoed() {
    let app = TestApp::without_key().await;
    let response = app
        .client
        .get(format!("{}/api/storefront", app.base_url))
        .header("x-request-id", "trace-123")
        .send()
        .await
        .expect("request");

    assert_eq!(
        response
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok()),
        Some("trace-123")
    );
}

// =============================================================================
// AI Search
// =============================================================================

#[tokio::test]
async fn test_ranked_search_filters_listing() {
    let stub = GeminiStub::start(StubReply::text(r#"["5", "1"]"#)).await;
    let app = TestApp::with_stub(&stub).await;

    let view = app
        .post_json("/api/storefront/search", &json!({"query": "big screen"}))
        .await;

    // Matches are shown in catalog order
    assert_eq!(product_ids(&view), vec!["1", "5"]);
    assert_eq!(view["result_source"], "ranked");
    assert_eq!(view["query"], "big screen");
    assert_eq!(view["searching"], false);

    let call = stub.last_call();
    assert!(call.path.ends_with(":generateContent"), "{}", call.path);
    assert_eq!(call.api_key.as_deref(), Some(TEST_API_KEY));
    assert_eq!(
        call.body["generationConfig"]["responseMimeType"],
        "application/json"
    );
    let prompt = call.content_texts().join("\n");
    assert!(prompt.contains("big screen"));
    assert!(prompt.contains("Enterprise Server Blade"));
}

#[tokio::test]
async fn test_ranked_search_drops_unknown_ids() {
    let stub = GeminiStub::start(StubReply::text(r#"["99", "3", 4, "3"]"#)).await;
    let app = TestApp::with_stub(&stub).await;

    let view = app
        .post_json("/api/storefront/search", &json!({"query": "switch"}))
        .await;

    assert_eq!(product_ids(&view), vec!["3"]);
    assert_eq!(view["result_source"], "ranked");
}

#[tokio::test]
async fn test_empty_ranking_shows_no_products() {
    let stub = GeminiStub::start(StubReply::text("[]")).await;
    let app = TestApp::with_stub(&stub).await;

    let view = app
        .post_json("/api/storefront/search", &json!({"query": "submarine"}))
        .await;

    assert!(product_ids(&view).is_empty());
    assert_eq!(view["filtered"], true);
}

#[tokio::test]
async fn test_search_resets_category_then_chip_narrows() {
    let stub = GeminiStub::start(StubReply::text(r#"["2", "1", "5"]"#)).await;
    let app = TestApp::with_stub(&stub).await;

    app.put("/api/storefront/category", &json!({"category": "Office"}))
        .await;
    let view = app
        .post_json("/api/storefront/search", &json!({"query": "desk setup"}))
        .await;
    assert_eq!(view["active_category"], "All");
    assert_eq!(product_ids(&view), vec!["1", "2", "5"]);

    let response = app
        .put("/api/storefront/category", &json!({"category": "Hardware"}))
        .await;
    let view: serde_json::Value = response.json().await.expect("body");
    assert_eq!(product_ids(&view), vec!["1", "5"]);
}

#[tokio::test]
async fn test_api_error_falls_back_to_substring() {
    let stub = GeminiStub::start(StubReply::Status(500)).await;
    let app = TestApp::with_stub(&stub).await;

    let view = app
        .post_json("/api/storefront/search", &json!({"query": "Keyboard"}))
        .await;

    assert_eq!(product_ids(&view), vec!["4"]);
    assert_eq!(view["result_source"], "fallback");
}

#[tokio::test]
async fn test_invalid_json_falls_back_to_substring() {
    let stub = GeminiStub::start(StubReply::text("the monitor, probably")).await;
    let app = TestApp::with_stub(&stub).await;

    let view = app
        .post_json("/api/storefront/search", &json!({"query": "hardware"}))
        .await;

    assert_eq!(product_ids(&view), vec!["1", "5"]);
    assert_eq!(view["result_source"], "fallback");
}

#[tokio::test]
async fn test_missing_key_falls_back_without_calling() {
    let app = TestApp::without_key().await;

    let view = app
        .post_json("/api/storefront/search", &json!({"query": "crm"}))
        .await;

    assert_eq!(product_ids(&view), vec!["6"]);
    assert_eq!(view["result_source"], "fallback");
}

#[tokio::test]
async fn test_blank_query_clears_without_call() {
    let stub = GeminiStub::start(StubReply::text(r#"["1"]"#)).await;
    let app = TestApp::with_stub(&stub).await;

    app.post_json("/api/storefront/search", &json!({"query": "server"}))
        .await;
    assert_eq!(stub.calls().len(), 1);

    let view = app
        .post_json("/api/storefront/search", &json!({"query": "   "}))
        .await;

    assert_eq!(stub.calls().len(), 1);
    assert_eq!(product_ids(&view).len(), 6);
    assert_eq!(view["result_source"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_clear_search_restores_listing() {
    let stub = GeminiStub::start(StubReply::text(r#"["6"]"#)).await;
    let app = TestApp::with_stub(&stub).await;

    app.post_json("/api/storefront/search", &json!({"query": "software"}))
        .await;
    let response = app.delete("/api/storefront/search").await;
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let view: serde_json::Value = response.json().await.expect("body");
    assert_eq!(product_ids(&view).len(), 6);
    assert_eq!(view["query"], "");
}

#[tokio::test]
async fn test_b2b_cards_show_wholesale_and_retail() {
    let app = TestApp::without_key().await;
    app.switch_persona("B2B").await;

    let view = app.get_json("/api/storefront").await;
    let chair = &view["products"][1];

    assert_eq!(chair["id"], "2");
    assert_eq!(chair["price"]["amount"], "199.00");
    assert_eq!(chair["retail_price"]["amount"], "349.00");
}
