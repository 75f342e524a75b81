//! Core traits for knowmap abstractions.
//!
//! These traits define the seams between the note operations and the
//! services that back them, enabling pluggable providers and testability.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::Document;

// =============================================================================
// GENERATION TRAITS
// =============================================================================

/// Sampling options for a single generation request.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GenerationOptions {
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl GenerationOptions {
    pub fn new(temperature: f32, max_tokens: u32) -> Self {
        Self {
            temperature: Some(temperature),
            max_tokens: Some(max_tokens),
        }
    }
}

/// Backend for text generation (LLM).
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Generate text given a prompt.
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.generate_with_system("", prompt).await
    }

    /// Generate text with system context.
    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String> {
        self.generate_with_options(system, prompt, GenerationOptions::default())
            .await
    }

    /// Generate text with system context and sampling options.
    async fn generate_with_options(
        &self,
        system: &str,
        prompt: &str,
        options: GenerationOptions,
    ) -> Result<String>;

    /// Get the model name being used.
    fn model_name(&self) -> &str;
}

// =============================================================================
// RELEVANCE TRAITS
// =============================================================================

/// A service that can summarize text, extract keywords and relate notes.
///
/// External providers may fail; the local provider never does. Callers
/// normally go through a chain that tries providers in order.
#[async_trait]
pub trait RelevanceProvider: Send + Sync {
    /// Short identifier used in logs and availability reports.
    fn name(&self) -> &str;

    /// Summarize `text` in at most `max_length` characters.
    async fn summarize(&self, text: &str, max_length: usize) -> Result<String>;

    /// Extract up to `max_keywords` key terms from `text`.
    async fn extract_keywords(&self, text: &str, max_keywords: usize) -> Result<Vec<String>>;

    /// Return up to `limit` candidates most related to `source`, best first.
    async fn find_relationships(
        &self,
        source: &Document,
        candidates: &[Document],
        limit: usize,
    ) -> Result<Vec<Document>>;
}
