mod common;

use axum::http::{Method, StatusCode};
use common::{FakeAnalyzer, FakeDocumentStore, TestApp};
use serde_json::json;
use std::sync::atomic::Ordering;

#[tokio::test]
async fn valid_query_is_answered() {
    let app = TestApp::default_app();
    let (status, body) = app
        .post_json("/api/health-query", Some("user_1"), json!({ "query": "Is a 3mm nodule concerning?" }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["query"], "Is a 3mm nodule concerning?");
    assert_eq!(body["response"], "answer for user_1: 27 chars");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn invalid_queries_are_400() {
    let app = TestApp::default_app();
    let too_long = "x".repeat(1001);

    for payload in [
        json!({ "query": "" }),
        json!({ "query": "    " }),
        json!({ "query": too_long }),
        json!({}),
        json!({ "query": 42 }),
    ] {
        let (status, body) = app.post_json("/api/health-query", Some("user_1"), payload.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", payload);
        assert_eq!(body["success"], false);
    }
    assert_eq!(app.analyzer.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn malformed_json_is_400() {
    let app = TestApp::default_app();
    let (status, body) = app
        .send(Method::POST, "/api/health-query", Some("user_1"), Some("{not json".to_string()))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn boundary_lengths_are_accepted() {
    let app = TestApp::default_app();

    let (status, _) = app.post_json("/api/health-query", Some("user_1"), json!({ "query": "a" })).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .post_json("/api/health-query", Some("user_1"), json!({ "query": "a".repeat(1000) }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "answer for user_1: 1000 chars");
}

#[tokio::test]
async fn missing_identity_wins_over_bad_input() {
    let app = TestApp::default_app();
    let (status, _) = app.post_json("/api/health-query", None, json!({ "query": "" })).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn analyzer_failure_is_500() {
    let app = TestApp::new(
        FakeDocumentStore::default(),
        FakeAnalyzer {
            fail_with: Some("model overloaded".to_string()),
            ..Default::default()
        },
    );
    let (status, body) = app
        .post_json("/api/health-query", Some("user_1"), json!({ "query": "hello" }))
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to process health query");
    assert!(body["details"].as_str().unwrap().contains("model overloaded"));
    assert_eq!(app.analyzer.calls.load(Ordering::SeqCst), 1);
}
