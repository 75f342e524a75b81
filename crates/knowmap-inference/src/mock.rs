//! Scripted backends and providers for deterministic testing.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let backend = ScriptedBackend::new()
//!     .with_response("rust, async")
//!     .with_error("rate limited");
//!
//! let provider = LlmRelevanceProvider::new("openai", backend.clone());
//! provider.extract_keywords("text", 5).await?;   // Ok(["rust", "async"])
//! provider.extract_keywords("text", 5).await?;   // Err(Inference)
//! assert_eq!(backend.calls().len(), 2);
//! ```

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use knowmap_core::{
    Document, Error, GenerationBackend, GenerationOptions, RelevanceProvider, Result,
};

/// One recorded generation request.
#[derive(Debug, Clone)]
pub struct MockCall {
    pub system: String,
    pub prompt: String,
    pub options: GenerationOptions,
}

/// Generation backend that replays queued responses in order.
///
/// Once the queue is exhausted every call returns the default response.
#[derive(Clone)]
pub struct ScriptedBackend {
    script: Arc<Mutex<VecDeque<std::result::Result<String, String>>>>,
    call_log: Arc<Mutex<Vec<MockCall>>>,
    default_response: String,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self {
            script: Arc::new(Mutex::new(VecDeque::new())),
            call_log: Arc::new(Mutex::new(Vec::new())),
            default_response: "Mock response".to_string(),
        }
    }

    /// Queue a successful response.
    pub fn with_response(self, response: impl Into<String>) -> Self {
        self.script.lock().unwrap().push_back(Ok(response.into()));
        self
    }

    /// Queue a failure.
    pub fn with_error(self, message: impl Into<String>) -> Self {
        self.script.lock().unwrap().push_back(Err(message.into()));
        self
    }

    /// Get all logged calls for assertion.
    pub fn calls(&self) -> Vec<MockCall> {
        self.call_log.lock().unwrap().clone()
    }
}

impl Default for ScriptedBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerationBackend for ScriptedBackend {
    async fn generate_with_options(
        &self,
        system: &str,
        prompt: &str,
        options: GenerationOptions,
    ) -> Result<String> {
        self.call_log.lock().unwrap().push(MockCall {
            system: system.to_string(),
            prompt: prompt.to_string(),
            options,
        });

        match self.script.lock().unwrap().pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(Error::Inference(message)),
            None => Ok(self.default_response.clone()),
        }
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

/// Provider whose every operation fails.
#[derive(Clone)]
pub struct FailingProvider {
    name: String,
    calls: Arc<AtomicUsize>,
}

impl FailingProvider {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn fail<T>(&self) -> Result<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(Error::Inference(format!("{} is unavailable", self.name)))
    }
}

#[async_trait]
impl RelevanceProvider for FailingProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn summarize(&self, _text: &str, _max_length: usize) -> Result<String> {
        self.fail()
    }

    async fn extract_keywords(&self, _text: &str, _max_keywords: usize) -> Result<Vec<String>> {
        self.fail()
    }

    async fn find_relationships(
        &self,
        _source: &Document,
        _candidates: &[Document],
        _limit: usize,
    ) -> Result<Vec<Document>> {
        self.fail()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_backend_replays_in_order() {
        let backend = ScriptedBackend::new().with_response("first").with_error("second");

        assert_eq!(backend.generate("a").await.unwrap(), "first");
        assert!(backend.generate("b").await.is_err());
        assert_eq!(backend.generate("c").await.unwrap(), "Mock response");
        assert_eq!(backend.calls().len(), 3);
        assert_eq!(backend.calls()[2].prompt, "c");
    }

    #[tokio::test]
    async fn failing_provider_counts_calls() {
        let provider = FailingProvider::new("down");
        assert!(provider.summarize("x", 10).await.is_err());
        assert!(provider.extract_keywords("x", 10).await.is_err());
        assert_eq!(provider.call_count(), 2);
    }
}
