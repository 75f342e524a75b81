//! Gemini generation backend implementation.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, info};

use knowmap_core::{defaults, Error, GenerationBackend, GenerationOptions, Result};

use super::types::*;
use crate::config::ProviderConfig;

/// Configuration for the Gemini backend.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Base URL including the API version, e.g. `.../v1beta`.
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::GEMINI_URL.to_string(),
            api_key: String::new(),
            model: defaults::GEMINI_MODEL.to_string(),
            timeout_seconds: defaults::PROVIDER_TIMEOUT_SECS,
        }
    }
}

impl From<&ProviderConfig> for GeminiConfig {
    fn from(config: &ProviderConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            timeout_seconds: config.timeout.as_secs(),
        }
    }
}

/// Google Gemini generation backend.
pub struct GeminiBackend {
    client: Client,
    config: GeminiConfig,
}

impl GeminiBackend {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| Error::Inference(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            "Initializing Gemini backend: url={}, model={}",
            config.base_url, config.model
        );

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

/// Map a non-success Gemini response to a knowmap error.
fn to_knowmap_error(status: StatusCode, message: &str) -> Error {
    let message = format!("Gemini returned {}: {}", status, message);
    match status.as_u16() {
        401 | 403 => Error::Config(format!("Authentication failed: {}", message)),
        400 if message.contains("API key") => {
            Error::Config(format!("Authentication failed: {}", message))
        }
        404 => Error::Config(format!("Model not found: {}", message)),
        429 => Error::Inference(format!("Rate limit exceeded: {}", message)),
        500..=599 => Error::Inference(format!("Server error: {}", message)),
        _ => Error::Inference(message),
    }
}

#[async_trait]
impl GenerationBackend for GeminiBackend {
    async fn generate_with_options(
        &self,
        system: &str,
        prompt: &str,
        options: GenerationOptions,
    ) -> Result<String> {
        debug!(
            model = %self.config.model,
            prompt_len = prompt.len(),
            "Generating with Gemini"
        );

        let generation_config = if options == GenerationOptions::default() {
            None
        } else {
            Some(GenerationConfig {
                temperature: options.temperature,
                max_output_tokens: options.max_tokens,
            })
        };

        let request = GenerateContentRequest {
            contents: vec![Content::user(prompt)],
            system_instruction: (!system.is_empty()).then(|| Content::system(system)),
            generation_config,
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Inference(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response
                .json::<GeminiErrorResponse>()
                .await
                .map(|body| body.error.message)
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(to_knowmap_error(status, &message));
        }

        let result: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| Error::Inference(format!("Failed to parse response: {}", e)))?;

        if let Some(reason) = result
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
        {
            return Err(Error::Inference(format!("Gemini blocked the prompt: {}", reason)));
        }

        let content = result
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| c.text().trim().to_string())
            .unwrap_or_default();

        if content.is_empty() {
            return Err(Error::Inference("Gemini returned an empty response".to_string()));
        }

        debug!(response_len = content.len(), "Gemini generation complete");
        Ok(content)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
