//! Relevance provider backed by a hosted language model.

use async_trait::async_trait;
use tracing::debug;

use knowmap_core::{Document, Error, GenerationBackend, RelevanceProvider, Result};

use crate::prompts;

/// Adapts any [`GenerationBackend`] into a [`RelevanceProvider`].
///
/// Every operation is a single prompt. Responses that cannot be turned into
/// a usable answer are reported as errors so the chain moves on.
pub struct LlmRelevanceProvider<B> {
    name: String,
    backend: B,
}

impl<B: GenerationBackend> LlmRelevanceProvider<B> {
    pub fn new(name: impl Into<String>, backend: B) -> Self {
        Self {
            name: name.into(),
            backend,
        }
    }
}

#[async_trait]
impl<B: GenerationBackend> RelevanceProvider for LlmRelevanceProvider<B> {
    fn name(&self) -> &str {
        &self.name
    }

    async fn summarize(&self, text: &str, max_length: usize) -> Result<String> {
        let summary = self
            .backend
            .generate_with_options(
                prompts::SUMMARY_SYSTEM,
                &prompts::summary_prompt(text, max_length),
                prompts::summary_options(max_length),
            )
            .await?;

        debug!(
            provider = %self.name,
            model = self.backend.model_name(),
            summary_len = summary.chars().count(),
            "Summary generated"
        );
        Ok(summary)
    }

    async fn extract_keywords(&self, text: &str, max_keywords: usize) -> Result<Vec<String>> {
        let response = self
            .backend
            .generate_with_options(
                prompts::KEYWORD_SYSTEM,
                &prompts::keyword_prompt(text, max_keywords),
                prompts::extraction_options(),
            )
            .await?;

        let keywords = prompts::parse_keyword_list(&response, max_keywords);
        if keywords.is_empty() && max_keywords > 0 {
            return Err(Error::Inference(format!(
                "{} returned no usable keywords",
                self.name
            )));
        }
        Ok(keywords)
    }

    async fn find_relationships(
        &self,
        source: &Document,
        candidates: &[Document],
        limit: usize,
    ) -> Result<Vec<Document>> {
        if candidates.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        let response = self
            .backend
            .generate_with_options(
                prompts::RELATIONSHIP_SYSTEM,
                &prompts::relationship_prompt(source, candidates, limit),
                prompts::extraction_options(),
            )
            .await?;

        let related = prompts::resolve_related(&response, candidates, limit);
        if related.is_empty() {
            return Err(Error::Inference(format!(
                "{} returned no known note ids",
                self.name
            )));
        }

        debug!(provider = %self.name, related = related.len(), "Relationships resolved");
        Ok(related)
    }
}
