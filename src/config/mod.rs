use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

use crate::access::UnclassifiedPolicy;

pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.1-8b-instant";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub security: SecurityConfig,
    pub document_store: DocumentStoreConfig,
    pub ai: AiConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(skip_serializing)]
    pub session_secret: String,
    pub session_ttl_hours: u64,
    pub unclassified_policy: UnclassifiedPolicy,
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentStoreConfig {
    /// Only presence is ever reported
    #[serde(skip_serializing)]
    pub mongo_uri: Option<String>,
    pub data_api_url: Option<String>,
    #[serde(skip_serializing)]
    pub data_api_key: Option<String>,
    pub data_source: String,
    pub database: String,
    pub collection: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    #[serde(skip_serializing)]
    pub groq_api_key: Option<String>,
    pub groq_model: String,
    pub groq_base_url: String,
}

impl DocumentStoreConfig {
    pub fn mongo_uri_configured(&self) -> bool {
        self.mongo_uri.as_deref().is_some_and(|s| !s.trim().is_empty())
    }
}

fn non_empty(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Security overrides
        if let Some(v) = non_empty("SESSION_SECRET") {
            self.security.session_secret = v;
        }
        if let Ok(v) = env::var("SESSION_TTL_HOURS") {
            self.security.session_ttl_hours = v.parse().unwrap_or(self.security.session_ttl_hours);
        }
        if let Ok(v) = env::var("ACCESS_UNCLASSIFIED_POLICY") {
            match UnclassifiedPolicy::parse(&v) {
                Some(policy) => self.security.unclassified_policy = policy,
                None => tracing::warn!("Ignoring ACCESS_UNCLASSIFIED_POLICY={:?}; expected deny or allow", v),
            }
        }
        if let Ok(v) = env::var("CORS_ORIGINS") {
            self.security.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        // Document store overrides
        self.document_store.mongo_uri = non_empty("MONGODB_URI");
        self.document_store.data_api_url = non_empty("MONGODB_DATA_API_URL");
        self.document_store.data_api_key = non_empty("MONGODB_DATA_API_KEY");
        if let Some(v) = non_empty("MONGODB_DATA_SOURCE") {
            self.document_store.data_source = v;
        }
        if let Some(v) = non_empty("MONGODB_DATABASE") {
            self.document_store.database = v;
        }
        if let Some(v) = non_empty("MONGODB_COLLECTION") {
            self.document_store.collection = v;
        }

        // AI overrides
        self.ai.groq_api_key = non_empty("GROQ_API_KEY");
        if let Some(v) = non_empty("GROQ_MODEL") {
            self.ai.groq_model = v;
        }
        if let Some(v) = non_empty("GROQ_BASE_URL") {
            self.ai.groq_base_url = v;
        }

        self
    }

    fn base(environment: Environment, ttl_hours: u64, cors_origins: Vec<String>) -> Self {
        Self {
            environment,
            security: SecurityConfig {
                session_secret: String::new(),
                session_ttl_hours: ttl_hours,
                unclassified_policy: UnclassifiedPolicy::Deny,
                cors_origins,
            },
            document_store: DocumentStoreConfig {
                mongo_uri: None,
                data_api_url: None,
                data_api_key: None,
                data_source: "Cluster0".to_string(),
                database: "medimg".to_string(),
                collection: "analyses".to_string(),
            },
            ai: AiConfig {
                groq_api_key: None,
                groq_model: DEFAULT_GROQ_MODEL.to_string(),
                groq_base_url: DEFAULT_GROQ_BASE_URL.to_string(),
            },
        }
    }

    pub fn development() -> Self {
        Self::base(
            Environment::Development,
            24,
            vec!["http://localhost:3000".to_string(), "http://localhost:5173".to_string()],
        )
    }

    pub fn staging() -> Self {
        Self::base(
            Environment::Staging,
            8,
            vec!["https://staging.example.com".to_string()],
        )
    }

    pub fn production() -> Self {
        Self::base(
            Environment::Production,
            4,
            vec!["https://app.example.com".to_string()],
        )
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
