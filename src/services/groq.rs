use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{HealthQueryAnalyzer, ServiceError};
use crate::identity::Identity;

const SYSTEM_PROMPT: &str = "You are a medical imaging assistant for a diagnostic platform. \
Answer health and imaging questions clearly and concisely for a general audience. \
You do not diagnose; recommend consulting a qualified clinician for medical decisions.";

#[derive(Debug, Clone)]
pub struct GroqSettings {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: url::Url,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

/// Groq chat-completions client (OpenAI-compatible API)
pub struct GroqAnalyzer {
    client: Client,
    settings: GroqSettings,
}

impl GroqAnalyzer {
    pub fn new(client: Client, settings: GroqSettings) -> Self {
        Self { client, settings }
    }
}

#[async_trait]
impl HealthQueryAnalyzer for GroqAnalyzer {
    async fn analyze_health_query(&self, query: &str, identity: &Identity) -> Result<String, ServiceError> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .ok_or(ServiceError::NotConfigured("GROQ_API_KEY"))?;

        let url = format!(
            "{}/chat/completions",
            self.settings.base_url.as_str().trim_end_matches('/')
        );
        let request = ChatRequest {
            model: &self.settings.model,
            messages: vec![
                ChatMessage { role: "system", content: SYSTEM_PROMPT },
                ChatMessage { role: "user", content: query },
            ],
            temperature: 0.3,
        };

        tracing::debug!("Sending health query to {} for {}", self.settings.model, identity);

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
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

        let reply: ChatResponse = response.json().await?;
        reply
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| ServiceError::Decode("completion contained no message content".to_string()))
    }
}
