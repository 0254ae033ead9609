// narrative/bedrock.rs

use crate::config::LlmConfig;
use crate::model::GenerateError;
use crate::narrative::traits::TextGenerator;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{info, warn};

#[derive(Debug, Serialize)]
struct InvokeRequest<'a> {
    anthropic_version: &'a str,
    max_tokens: u32,
    messages: [Message<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct InvokeResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    text: Option<String>,
}

/// Messages-style model invocation over HTTP (Bedrock `invoke_model` body shape).
pub struct BedrockStyleGenerator {
    client: Client,
    endpoint: String,
    model_id: String,
    anthropic_version: String,
    max_tokens: u32,
    api_key: Option<String>,
    timeout: Duration,
}

impl BedrockStyleGenerator {
    pub fn new(cfg: &LlmConfig) -> Result<Self, GenerateError> {
        let client = Client::builder()
            .build()
            .map_err(|e| GenerateError::Http(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: cfg.endpoint.clone(),
            model_id: cfg.model_id.clone(),
            anthropic_version: cfg.anthropic_version.clone(),
            max_tokens: cfg.max_tokens,
            api_key: cfg.api_key.clone(),
            timeout: Duration::from_secs(cfg.timeout_seconds),
        })
    }
}

impl BedrockStyleGenerator {
    /// send, status check and body read; bounded as a whole by `generate`.
    async fn invoke(&self, prompt: &str) -> Result<String, GenerateError> {
        let body = InvokeRequest {
            anthropic_version: &self.anthropic_version,
            max_tokens: self.max_tokens,
            messages: [Message { role: "user", content: prompt }],
        };

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.header("x-api-key", key);
        }

        let response = request.send().await.map_err(|e| {
            warn!("❌ Model invoke failed: {:?}", e);
            GenerateError::Http(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "unknown".into());
            return Err(GenerateError::Status(status.as_u16(), body));
        }

        let parsed: InvokeResponse = response
            .json()
            .await
            .map_err(|e| GenerateError::MalformedResponse(e.to_string()))?;
        extract_text(parsed)
    }
}

#[async_trait::async_trait]
impl TextGenerator for BedrockStyleGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        info!("📤 Invoking model {} ({} prompt chars)", self.model_id, prompt.len());
        match timeout(self.timeout, self.invoke(prompt)).await {
            Ok(result) => result,
            Err(_) => {
                warn!("⏳ Model invoke timed out");
                Err(GenerateError::Timeout)
            }
        }
    }
}

fn extract_text(response: InvokeResponse) -> Result<String, GenerateError> {
    response
        .content
        .into_iter()
        .next()
        .and_then(|block| block.text)
        .ok_or_else(|| GenerateError::MalformedResponse("no text content".into()))
}
