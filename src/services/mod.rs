pub mod document_store;
pub mod groq;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::identity::Identity;

pub use document_store::{AtlasDocumentStore, AtlasSettings};
pub use groq::{GroqAnalyzer, GroqSettings};

/// A stored analysis document, returned to clients verbatim
pub type Report = Value;

/// Per-user scan counters computed by the document store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub total_scans: u64,
    pub anomalies_detected: u64,
    pub normal_scans: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_scan_at: Option<String>,
}

/// Result of a document store reachability probe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionStatus {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0} is not configured")]
    NotConfigured(&'static str),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Upstream returned {status}: {body}")]
    Upstream { status: u16, body: String },
    #[error("Unexpected response: {0}")]
    Decode(String),
}

/// Read access to the analyses collection
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get_user_analytics(&self, identity: &Identity) -> Result<AnalyticsSummary, ServiceError>;

    async fn get_user_analyses(&self, identity: &Identity) -> Result<Vec<Report>, ServiceError>;

    async fn test_connection(&self) -> Result<ConnectionStatus, ServiceError>;
}

/// AI integration answering free-text health questions
#[async_trait]
pub trait HealthQueryAnalyzer: Send + Sync {
    async fn analyze_health_query(&self, query: &str, identity: &Identity) -> Result<String, ServiceError>;
}
