//! OpenAI-compatible generation backend implementation.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, info};

use knowmap_core::{defaults, Error, GenerationBackend, GenerationOptions, Result};

use super::types::*;
use crate::config::ProviderConfig;

/// Configuration for OpenAI-compatible backend.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// Base URL for the API endpoint.
    pub base_url: String,
    /// API key for authentication (optional for local endpoints).
    pub api_key: Option<String>,
    /// Model to use for generation.
    pub gen_model: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::OPENAI_URL.to_string(),
            api_key: None,
            gen_model: defaults::OPENAI_GEN_MODEL.to_string(),
            timeout_seconds: defaults::PROVIDER_TIMEOUT_SECS,
        }
    }
}

impl From<&ProviderConfig> for OpenAIConfig {
    fn from(config: &ProviderConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            api_key: Some(config.api_key.clone()),
            gen_model: config.model.clone(),
            timeout_seconds: config.timeout.as_secs(),
        }
    }
}

/// OpenAI-compatible generation backend.
pub struct OpenAIBackend {
    client: Client,
    config: OpenAIConfig,
}

impl OpenAIBackend {
    /// Create a new OpenAI backend with the given configuration.
    pub fn new(config: OpenAIConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| Error::Inference(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            "Initializing OpenAI backend: url={}, gen={}",
            config.base_url, config.gen_model
        );

        Ok(Self { client, config })
    }

    /// Get the current configuration.
    pub fn config(&self) -> &OpenAIConfig {
        &self.config
    }

    /// Build a request with authentication if configured.
    fn build_request(&self, endpoint: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), endpoint);
        let mut req = self.client.post(&url);

        if let Some(ref api_key) = self.config.api_key {
            req = req.header("Authorization", format!("Bearer {}", api_key));
        }

        req.header("Content-Type", "application/json")
    }
}

/// Map a non-success chat completions response to a knowmap error.
///
/// Credential and model problems are configuration errors; everything else
/// is reported as a failed inference.
fn to_knowmap_error(status: StatusCode, error_type: &str, message: &str) -> Error {
    let message = format!("OpenAI returned {}: {}", status, message);
    match (status.as_u16(), error_type) {
        (401, _) => Error::Config(format!("Authentication failed: {}", message)),
        (404, _) | (_, "model_not_found") => Error::Config(format!("Model not found: {}", message)),
        (429, _) => Error::Inference(format!("Rate limit exceeded: {}", message)),
        (400, t) if t.contains("context_length") => {
            Error::Inference(format!("Context too long: {}", message))
        }
        (500..=599, _) => Error::Inference(format!("Server error: {}", message)),
        _ => Error::Inference(message),
    }
}

#[async_trait]
impl GenerationBackend for OpenAIBackend {
    async fn generate_with_options(
        &self,
        system: &str,
        prompt: &str,
        options: GenerationOptions,
    ) -> Result<String> {
        debug!(
            model = %self.config.gen_model,
            prompt_len = prompt.len(),
            "Generating with OpenAI"
        );

        let mut messages = Vec::new();
        if !system.is_empty() {
            messages.push(ChatMessage::system(system));
        }
        messages.push(ChatMessage::user(prompt));

        let request = ChatCompletionRequest {
            model: self.config.gen_model.clone(),
            messages,
            temperature: options.temperature,
            max_tokens: options.max_tokens,
        };

        let response = self
            .build_request("/chat/completions")
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Inference(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body: OpenAIErrorResponse = response.json().await.unwrap_or(OpenAIErrorResponse {
                error: OpenAIError {
                    message: "Unknown error".to_string(),
                    error_type: "unknown".to_string(),
                    code: None,
                },
            });
            return Err(to_knowmap_error(
                status,
                &body.error.error_type,
                &body.error.message,
            ));
        }

        let result: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| Error::Inference(format!("Failed to parse response: {}", e)))?;

        let content = result
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_string())
            .unwrap_or_default();

        if content.is_empty() {
            return Err(Error::Inference("OpenAI returned an empty response".to_string()));
        }

        debug!(response_len = content.len(), "OpenAI generation complete");
        Ok(content)
    }

    fn model_name(&self) -> &str {
        &self.config.gen_model
    }
}
