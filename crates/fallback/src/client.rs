use crate::error::{FallbackError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::env;

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful VIT college assistant. You provide information about Vellore Institute of Technology.\nAnswer questions clearly and concisely based on accurate information about VIT.\nIf you don't know the answer, say so politely.";

/// Produces a free-text reply for a user message.
#[async_trait]
pub trait Completion: Send + Sync {
    async fn complete(&self, system_prompt: &str, user_text: &str) -> Result<String>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackConfig {
    pub enabled: bool,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
    /// Name of the environment variable that holds the API key.
    pub api_key_env: String,
    pub system_prompt: String,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            max_tokens: 200,
            temperature: 0.6,
            api_key_env: "OPENAI_API_KEY".to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }
}

impl FallbackConfig {
    /// Apply `QA_FALLBACK_MODEL` on top of file settings.
    pub fn apply_env(&mut self) {
        if let Ok(model) = env::var("QA_FALLBACK_MODEL") {
            if !model.trim().is_empty() {
                self.model = model;
            }
        }
    }
}

/// Chat-completions client for OpenAI-compatible providers.
pub struct OpenAiCompatibleClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f64,
}

impl OpenAiCompatibleClient {
    /// Resolve the API key from the configured environment variable.
    pub fn from_config(cfg: &FallbackConfig) -> Result<Self> {
        let api_key = env::var(&cfg.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| FallbackError::ApiKeyMissing(cfg.api_key_env.clone()))?;
        Ok(Self::new(cfg, api_key))
    }

    pub fn new(cfg: &FallbackConfig, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/chat/completions", cfg.base_url.trim_end_matches('/')),
            api_key: api_key.into(),
            model: cfg.model.clone(),
            max_tokens: cfg.max_tokens,
            temperature: cfg.temperature,
        }
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl Completion for OpenAiCompatibleClient {
    async fn complete(&self, system_prompt: &str, user_text: &str) -> Result<String> {
        let body = build_request_body(
            &self.model,
            system_prompt,
            user_text,
            self.max_tokens,
            self.temperature,
        );

        log::debug!("Requesting fallback completion from {}", self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(FallbackError::Provider(format!("{status}: {text}")));
        }

        let payload: Value = serde_json::from_str(&text)
            .map_err(|e| FallbackError::Provider(format!("Malformed response body: {e}")))?;
        parse_completion(&payload)
    }
}

#[must_use]
pub fn build_request_body(
    model: &str,
    system_prompt: &str,
    user_text: &str,
    max_tokens: u32,
    temperature: f64,
) -> Value {
    json!({
        "model": model,
        "messages": [
            {"role": "system", "content": system_prompt},
            {"role": "user", "content": user_text},
        ],
        "max_tokens": max_tokens,
        "temperature": temperature,
    })
}

/// Trimmed `choices[0].message.content`.
pub fn parse_completion(payload: &Value) -> Result<String> {
    if let Some(message) = payload.pointer("/error/message").and_then(Value::as_str) {
        return Err(FallbackError::Provider(message.to_string()));
    }

    payload
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .map(|content| content.trim().to_string())
        .ok_or_else(|| {
            FallbackError::Provider("Response has no choices[0].message.content".to_string())
        })
}
