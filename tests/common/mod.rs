#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use medimg_api::identity::{issue_session_token, Identity, SessionTokenResolver};
use medimg_api::services::{
    AnalyticsSummary, ConnectionStatus, DocumentStore, HealthQueryAnalyzer, Report, ServiceError,
};
use medimg_api::AppState;

pub const SECRET: &str = "integration-test-session-secret";

/// In-memory document store with per-method call counters
#[derive(Default)]
pub struct FakeDocumentStore {
    pub reports: Vec<Report>,
    pub fail_with: Option<String>,
    pub connection: Option<ConnectionStatus>,
    pub analytics_calls: AtomicUsize,
    pub analyses_calls: AtomicUsize,
    pub connection_calls: AtomicUsize,
}

impl FakeDocumentStore {
    pub fn with_reports(reports: Vec<Report>) -> Self {
        Self {
            reports,
            ..Default::default()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Default::default()
        }
    }

    pub fn total_calls(&self) -> usize {
        self.analytics_calls.load(Ordering::SeqCst)
            + self.analyses_calls.load(Ordering::SeqCst)
            + self.connection_calls.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), ServiceError> {
        match &self.fail_with {
            Some(msg) => Err(ServiceError::Upstream {
                status: 503,
                body: msg.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DocumentStore for FakeDocumentStore {
    async fn get_user_analytics(&self, identity: &Identity) -> Result<AnalyticsSummary, ServiceError> {
        self.analytics_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let mine: Vec<Value> = self
            .reports
            .iter()
            .filter(|r| r["userId"] == identity.as_str())
            .cloned()
            .collect();
        Ok(medimg_api::services::document_store::summarize(&mine))
    }

    async fn get_user_analyses(&self, identity: &Identity) -> Result<Vec<Report>, ServiceError> {
        self.analyses_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self
            .reports
            .iter()
            .filter(|r| r["userId"] == identity.as_str())
            .cloned()
            .collect())
    }

    async fn test_connection(&self) -> Result<ConnectionStatus, ServiceError> {
        self.connection_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.connection.clone().unwrap_or(ConnectionStatus {
            success: true,
            message: "Connected to MongoDB successfully".to_string(),
        }))
    }
}

/// Echoing analyzer that records the last query it saw
#[derive(Default)]
pub struct FakeAnalyzer {
    pub fail_with: Option<String>,
    pub calls: AtomicUsize,
}

#[async_trait]
impl HealthQueryAnalyzer for FakeAnalyzer {
    async fn analyze_health_query(&self, query: &str, identity: &Identity) -> Result<String, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(msg) = &self.fail_with {
            return Err(ServiceError::Decode(msg.clone()));
        }
        Ok(format!("answer for {}: {} chars", identity, query.chars().count()))
    }
}

pub struct TestApp {
    pub router: Router,
    pub documents: Arc<FakeDocumentStore>,
    pub analyzer: Arc<FakeAnalyzer>,
}

impl TestApp {
    pub fn new(documents: FakeDocumentStore, analyzer: FakeAnalyzer) -> Self {
        Self::with_state(documents, analyzer, |s| s)
    }

    pub fn with_state(
        documents: FakeDocumentStore,
        analyzer: FakeAnalyzer,
        customize: impl FnOnce(AppState) -> AppState,
    ) -> Self {
        let documents = Arc::new(documents);
        let analyzer = Arc::new(analyzer);
        let state = AppState::new(
            documents.clone(),
            analyzer.clone(),
            Arc::new(SessionTokenResolver::new(SECRET)),
        );
        Self {
            router: medimg_api::app(customize(state)),
            documents,
            analyzer,
        }
    }

    pub fn default_app() -> Self {
        Self::new(FakeDocumentStore::with_reports(sample_reports()), FakeAnalyzer::default())
    }

    pub async fn get(&self, uri: &str, user: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::GET, uri, user, None).await
    }

    pub async fn post_json(&self, uri: &str, user: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, user, Some(body.to_string())).await
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        user: Option<&str>,
        body: Option<String>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(user) = user {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token_for(user)));
        }
        let body = match body {
            Some(raw) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(raw)
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }
}

pub fn token_for(user: &str) -> String {
    issue_session_token(SECRET, user, 1).expect("token")
}

pub fn sample_reports() -> Vec<Report> {
    vec![
        json!({
            "_id": "a1", "userId": "user_1", "scanType": "chest-xray",
            "anomalyDetected": true, "confidence": 0.91, "createdAt": "2026-09-02T10:00:00.000Z"
        }),
        json!({
            "_id": "a2", "userId": "user_1", "scanType": "brain-mri",
            "anomalyDetected": false, "confidence": 0.77, "createdAt": "2026-08-15T09:30:00.000Z"
        }),
        json!({
            "_id": "b1", "userId": "user_2", "scanType": "ct",
            "anomalyDetected": false, "confidence": 0.65, "createdAt": "2026-07-01T08:00:00.000Z"
        }),
    ]
}

/// Serve the router on a free local port for tests that go through a real socket
pub async fn spawn_server(router: Router) -> Result<String> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    Ok(format!("http://127.0.0.1:{}", port))
}
