use std::sync::Arc;

use crate::access::{AccessTable, UnclassifiedPolicy};
use crate::config::AppConfig;
use crate::identity::{IdentityResolver, SessionTokenResolver};
use crate::services::{
    AtlasDocumentStore, AtlasSettings, DocumentStore, GroqAnalyzer, GroqSettings, HealthQueryAnalyzer,
};

/// Shared handles injected into every handler and the access gate
#[derive(Clone)]
pub struct AppState {
    pub documents: Arc<dyn DocumentStore>,
    pub analyzer: Arc<dyn HealthQueryAnalyzer>,
    pub identity: Arc<dyn IdentityResolver>,
    pub access: Arc<AccessTable>,
    pub unclassified_policy: UnclassifiedPolicy,
    pub mongo_uri_configured: bool,
}

impl AppState {
    pub fn new(
        documents: Arc<dyn DocumentStore>,
        analyzer: Arc<dyn HealthQueryAnalyzer>,
        identity: Arc<dyn IdentityResolver>,
    ) -> Self {
        Self {
            documents,
            analyzer,
            identity,
            access: Arc::new(AccessTable::default()),
            unclassified_policy: UnclassifiedPolicy::Deny,
            mongo_uri_configured: false,
        }
    }

    pub fn with_unclassified_policy(mut self, policy: UnclassifiedPolicy) -> Self {
        self.unclassified_policy = policy;
        self
    }

    pub fn with_mongo_uri_configured(mut self, configured: bool) -> Self {
        self.mongo_uri_configured = configured;
        self
    }

    /// Wire the HTTP collaborators described by the configuration
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("medimg-api/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let endpoint = config
            .document_store
            .data_api_url
            .as_deref()
            .map(url::Url::parse)
            .transpose()?;
        let documents = AtlasDocumentStore::new(
            client.clone(),
            AtlasSettings {
                endpoint,
                api_key: config.document_store.data_api_key.clone(),
                data_source: config.document_store.data_source.clone(),
                database: config.document_store.database.clone(),
                collection: config.document_store.collection.clone(),
            },
        );

        let analyzer = GroqAnalyzer::new(
            client,
            GroqSettings {
                api_key: config.ai.groq_api_key.clone(),
                model: config.ai.groq_model.clone(),
                base_url: url::Url::parse(&config.ai.groq_base_url)?,
            },
        );

        if config.security.session_secret.is_empty() {
            tracing::warn!("SESSION_SECRET is not set; every session token will be rejected");
        }
        let identity = SessionTokenResolver::new(config.security.session_secret.clone());

        Ok(Self::new(Arc::new(documents), Arc::new(analyzer), Arc::new(identity))
            .with_unclassified_policy(config.security.unclassified_policy)
            .with_mongo_uri_configured(config.document_store.mongo_uri_configured()))
    }
}
