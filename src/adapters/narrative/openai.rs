//! OpenAI-compatible chat completions provider for narrative text.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAINarrativeConfig::new(api_key)
//!     .with_model("gpt-4o-mini")
//!     .with_base_url("https://api.openai.com/v1");
//!
//! let provider = OpenAINarrativeProvider::new(config);
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;

use super::prompt::{user_prompt, SYSTEM_PROMPT};
use crate::ports::{NarrativeError, NarrativeProvider, NarrativeRequest};

const MAX_TOKENS: u32 = 600;
const TEMPERATURE: f32 = 0.4;

/// Configuration for the OpenAI narrative provider.
#[derive(Debug, Clone)]
pub struct OpenAINarrativeConfig {
    api_key: Secret<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    /// Maximum retries on transient failures.
    pub max_retries: u32,
}

impl OpenAINarrativeConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 2,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Narrative provider backed by the chat completions endpoint.
pub struct OpenAINarrativeProvider {
    config: OpenAINarrativeConfig,
    client: Client,
}

impl OpenAINarrativeProvider {
    pub fn new(config: OpenAINarrativeConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    fn to_chat_request(&self, request: &NarrativeRequest) -> ChatRequest {
        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user_prompt(request),
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        }
    }

    async fn send_request(&self, request: &NarrativeRequest) -> Result<Response, NarrativeError> {
        self.client
            .post(self.completions_url())
            .bearer_auth(self.config.api_key())
            .json(&self.to_chat_request(request))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    NarrativeError::Timeout
                } else if e.is_connect() {
                    NarrativeError::Network(format!("Connection failed: {}", e))
                } else {
                    NarrativeError::Network(e.to_string())
                }
            })
    }

    async fn handle_response_status(&self, response: Response) -> Result<Response, NarrativeError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        Err(map_status(status.as_u16(), &error_body))
    }

    async fn parse_response(&self, response: Response) -> Result<String, NarrativeError> {
        let response = self.handle_response_status(response).await?;

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| NarrativeError::Parse(format!("Failed to parse response: {}", e)))?;

        chat.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| NarrativeError::Parse("No content in response".to_string()))
    }
}

fn map_status(status: u16, error_body: &str) -> NarrativeError {
    match status {
        401 | 403 => NarrativeError::AuthenticationFailed,
        429 => NarrativeError::RateLimited {
            retry_after_secs: parse_retry_after(error_body),
        },
        500..=599 => {
            NarrativeError::unavailable(format!("Server error {}: {}", status, error_body))
        }
        _ => NarrativeError::Parse(format!("Unexpected status {}: {}", status, error_body)),
    }
}

/// Reads "try again in Ns" from an error body; 30 seconds when absent.
fn parse_retry_after(error_body: &str) -> u32 {
    let message = serde_json::from_str::<serde_json::Value>(error_body)
        .ok()
        .and_then(|v| v.pointer("/error/message")?.as_str().map(str::to_string));

    message
        .as_deref()
        .and_then(|s| {
            let rest = &s[s.find("try again in ")? + 13..];
            let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
            digits.parse().ok()
        })
        .unwrap_or(30)
}

#[async_trait]
impl NarrativeProvider for OpenAINarrativeProvider {
    async fn generate(&self, request: &NarrativeRequest) -> Result<String, NarrativeError> {
        let mut retry_count = 0;

        loop {
            let result = match self.send_request(request).await {
                Ok(response) => self.parse_response(response).await,
                Err(err) => Err(err),
            };

            match result {
                Ok(text) => return Ok(text),
                Err(err) if err.is_retryable() && retry_count < self.config.max_retries => {
                    tracing::debug!(provider = "openai", retry_count, error = %err, "Retrying narrative request");
                    // Exponential backoff: 1s, 2s, 4s, ...
                    sleep(Duration::from_secs(1 << retry_count)).await;
                    retry_count += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn name(&self) -> &str {
        "openai"
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Wire types
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}
