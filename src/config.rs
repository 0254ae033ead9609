use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

pub const API_KEY_ENV: &str = "LIVETRADER_LLM_API_KEY";

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StoreConfig {
    /// S3-compatible bucket reachable over plain HTTP(S).
    Http { base_url: String },
    /// Directory laid out with the same object keys as the bucket.
    Local { root: PathBuf },
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub endpoint: String,
    pub model_id: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_anthropic_version")]
    pub anthropic_version: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub llm: LlmConfig,
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_anthropic_version() -> String {
    "bedrock-2023-05-31".into()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_bind_addr() -> String {
    "0.0.0.0:8080".into()
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let mut config = parse_config(&content)?;
    if let Ok(key) = std::env::var(API_KEY_ENV) {
        if !key.trim().is_empty() {
            config.llm.api_key = Some(key);
        }
    }
    Ok(config)
}

pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    Ok(serde_json::from_str(content)?)
}
