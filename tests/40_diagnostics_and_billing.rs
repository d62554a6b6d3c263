mod common;

use axum::http::StatusCode;
use common::{FakeAnalyzer, FakeDocumentStore, TestApp};
use medimg_api::services::ConnectionStatus;
use serde_json::json;

#[tokio::test]
async fn test_mongo_reports_configured_uri_without_echoing_it() {
    let app = TestApp::with_state(FakeDocumentStore::default(), FakeAnalyzer::default(), |s| {
        s.with_mongo_uri_configured(true)
    });
    let (status, body) = app.get("/api/test-mongo", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Connected to MongoDB successfully");
    assert_eq!(body["mongoUri"], "Configured");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_mongo_reports_missing_uri() {
    let app = TestApp::default_app();
    let (_, body) = app.get("/api/test-mongo", None).await;
    assert_eq!(body["mongoUri"], "Not configured");
}

#[tokio::test]
async fn failed_connection_report_is_500() {
    let store = FakeDocumentStore {
        connection: Some(ConnectionStatus {
            success: false,
            message: "MONGODB_DATA_API_URL is not configured".to_string(),
        }),
        ..Default::default()
    };
    let app = TestApp::new(store, FakeAnalyzer::default());
    let (status, body) = app.get("/api/test-mongo", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["mongoUri"], "Not configured");
}

#[tokio::test]
async fn connection_error_is_500_with_details() {
    let app = TestApp::new(FakeDocumentStore::failing("connection refused"), FakeAnalyzer::default());
    let (status, body) = app.get("/api/test-mongo", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert!(body["details"].as_str().unwrap().contains("connection refused"));
}

#[tokio::test]
async fn billing_stubs_return_constants() {
    let app = TestApp::default_app();

    let (status, body) = app.get("/api/payments/history", Some("user_1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "payments": [] }));

    let (status, body) = app.get("/api/subscription/status", Some("user_1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "plan": null, "status": "inactive", "nextBillingDate": null }));

    assert_eq!(app.documents.total_calls(), 0);
}

#[tokio::test]
async fn billing_paths_challenge_with_error_only_envelope() {
    let app = TestApp::default_app();

    for path in ["/api/payments/history", "/api/subscription/status"] {
        let (status, body) = app.get(path, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{}", path);
        assert_eq!(body, json!({ "error": "Unauthorized" }), "{}", path);
    }

    let (status, body) = app.get("/api/analytics/mongo", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "success": false, "error": "Unauthorized" }));
}

#[tokio::test]
async fn billing_stubs_use_error_only_envelope_when_gate_is_open() {
    // With the gate letting everything through, the handler's own check answers
    let app = TestApp::with_state(FakeDocumentStore::default(), FakeAnalyzer::default(), |mut s| {
        s.access = std::sync::Arc::new(medimg_api::access::AccessTable::new(vec![]));
        s.with_unclassified_policy(medimg_api::access::UnclassifiedPolicy::Allow)
    });

    let (status, body) = app.get("/api/payments/history", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "Unauthorized" }));

    let (status, body) = app.get("/api/reports/mongo", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "success": false, "error": "Unauthorized" }));
}
