//! Deterministic local provider.
//!
//! Wraps the text heuristics from `knowmap_core::text`. It needs no network
//! access or credentials and never fails, which makes it the last link of
//! every provider chain.

use async_trait::async_trait;

use knowmap_core::{text, Document, RelevanceProvider, Result};

/// Name reported for the local provider.
pub const LOCAL_PROVIDER_NAME: &str = "basic";

/// Local keyword, summary and ranking heuristics.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalProvider;

impl LocalProvider {
    pub fn new() -> Self {
        Self
    }

    pub fn summarize(&self, text: &str, max_length: usize) -> String {
        text::generate_summary(text, max_length)
    }

    pub fn extract_keywords(&self, text: &str, max_keywords: usize) -> Vec<String> {
        text::extract_keywords(text, max_keywords)
    }

    pub fn find_relationships(
        &self,
        source: &Document,
        candidates: &[Document],
        limit: usize,
    ) -> Vec<Document> {
        text::find_relationships(source, candidates, limit)
    }
}

#[async_trait]
impl RelevanceProvider for LocalProvider {
    fn name(&self) -> &str {
        LOCAL_PROVIDER_NAME
    }

    async fn summarize(&self, text: &str, max_length: usize) -> Result<String> {
        Ok(LocalProvider::summarize(self, text, max_length))
    }

    async fn extract_keywords(&self, text: &str, max_keywords: usize) -> Result<Vec<String>> {
        Ok(LocalProvider::extract_keywords(self, text, max_keywords))
    }

    async fn find_relationships(
        &self,
        source: &Document,
        candidates: &[Document],
        limit: usize,
    ) -> Result<Vec<Document>> {
        Ok(LocalProvider::find_relationships(
            self, source, candidates, limit,
        ))
    }
}
