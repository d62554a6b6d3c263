use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use super::{AnalyticsSummary, ConnectionStatus, DocumentStore, Report, ServiceError};
use crate::identity::Identity;

/// Connection settings for the MongoDB Atlas Data API
#[derive(Debug, Clone)]
pub struct AtlasSettings {
    pub endpoint: Option<url::Url>,
    pub api_key: Option<String>,
    pub data_source: String,
    pub database: String,
    pub collection: String,
}

#[derive(Debug, Deserialize)]
struct FindResponse {
    #[serde(default)]
    documents: Vec<Value>,
}

/// Document store backed by the Atlas Data API over HTTPS
pub struct AtlasDocumentStore {
    client: Client,
    settings: AtlasSettings,
}

impl AtlasDocumentStore {
    pub fn new(client: Client, settings: AtlasSettings) -> Self {
        Self { client, settings }
    }

    /// POST {endpoint}/action/{action} with the collection coordinates merged in
    async fn action(&self, action: &str, mut body: Value) -> Result<Value, ServiceError> {
        let endpoint = self
            .settings
            .endpoint
            .as_ref()
            .ok_or(ServiceError::NotConfigured("MONGODB_DATA_API_URL"))?;
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .ok_or(ServiceError::NotConfigured("MONGODB_DATA_API_KEY"))?;

        body["dataSource"] = json!(self.settings.data_source);
        body["database"] = json!(self.settings.database);
        body["collection"] = json!(self.settings.collection);

        let url = format!("{}/action/{}", endpoint.as_str().trim_end_matches('/'), action);
        debug!("Data API {} on {}.{}", action, self.settings.database, self.settings.collection);

        let response = self
            .client
            .post(&url)
            .header("api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<Value>().await?)
    }

    async fn find_for_user(&self, identity: &Identity) -> Result<Vec<Value>, ServiceError> {
        let raw = self
            .action(
                "find",
                json!({
                    "filter": { "userId": identity.as_str() },
                    "sort": { "createdAt": -1 },
                }),
            )
            .await?;

        let found: FindResponse =
            serde_json::from_value(raw).map_err(|e| ServiceError::Decode(e.to_string()))?;
        Ok(found.documents)
    }
}

#[async_trait]
impl DocumentStore for AtlasDocumentStore {
    async fn get_user_analytics(&self, identity: &Identity) -> Result<AnalyticsSummary, ServiceError> {
        let documents = self.find_for_user(identity).await?;
        Ok(summarize(&documents))
    }

    async fn get_user_analyses(&self, identity: &Identity) -> Result<Vec<Report>, ServiceError> {
        self.find_for_user(identity).await
    }

    async fn test_connection(&self) -> Result<ConnectionStatus, ServiceError> {
        match self.action("findOne", json!({ "filter": {} })).await {
            Ok(_) => {
                info!("Document store connection test succeeded");
                Ok(ConnectionStatus {
                    success: true,
                    message: "Connected to MongoDB successfully".to_string(),
                })
            }
            Err(ServiceError::NotConfigured(what)) => Ok(ConnectionStatus {
                success: false,
                message: format!("{} is not configured", what),
            }),
            Err(e) => Err(e),
        }
    }
}

/// Fold analysis documents into scan counters.
///
/// `anomalyDetected: true` counts as an anomaly; everything else is normal.
pub fn summarize(documents: &[Value]) -> AnalyticsSummary {
    let total_scans = documents.len() as u64;
    let anomalies_detected = documents
        .iter()
        .filter(|d| d.get("anomalyDetected").and_then(Value::as_bool) == Some(true))
        .count() as u64;

    let confidences: Vec<f64> = documents
        .iter()
        .filter_map(|d| d.get("confidence").and_then(Value::as_f64))
        .collect();
    let average_confidence = if confidences.is_empty() {
        None
    } else {
        Some(confidences.iter().sum::<f64>() / confidences.len() as f64)
    };

    // ISO-8601 strings sort chronologically
    let last_scan_at = documents
        .iter()
        .filter_map(|d| d.get("createdAt").and_then(Value::as_str))
        .max()
        .map(str::to_string);

    AnalyticsSummary {
        total_scans,
        anomalies_detected,
        normal_scans: total_scans - anomalies_detected,
        average_confidence,
        last_scan_at,
    }
}
