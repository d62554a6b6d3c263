use serde_json::json;

use crate::cli::utils::output_fields;
use crate::cli::OutputFormat;
use crate::config::AppConfig;

fn presence(configured: bool) -> &'static str {
    if configured {
        "Configured"
    } else {
        "Not configured"
    }
}

pub fn handle(config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let store = &config.document_store;

    output_fields(
        &output_format,
        &[
            ("environment", json!(format!("{:?}", config.environment))),
            ("session_secret", json!(presence(!config.security.session_secret.is_empty()))),
            ("unclassified_policy", json!(config.security.unclassified_policy)),
            ("mongodb_uri", json!(presence(store.mongo_uri_configured()))),
            ("data_api_url", json!(store.data_api_url.as_deref().unwrap_or("Not configured"))),
            ("data_api_key", json!(presence(store.data_api_key.is_some()))),
            ("collection", json!(format!("{}.{}", store.database, store.collection))),
            ("groq_api_key", json!(presence(config.ai.groq_api_key.is_some()))),
            ("groq_model", json!(config.ai.groq_model)),
        ],
    )
}
