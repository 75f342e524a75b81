//! Ordered provider chain with a guaranteed local fallback.
//!
//! The chain is built once at startup. Each call walks the external
//! providers in order, logs any failure at WARN and moves on; the local
//! provider answers when every external provider has failed or none is
//! configured. Chain operations therefore return plain values.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use knowmap_core::{Document, Error, RelevanceProvider, Result};

use crate::config::{IntelligenceConfig, ProviderConfig, ProviderKind};
use crate::local::LocalProvider;

/// External providers followed by the local fallback.
#[derive(Clone)]
pub struct ProviderChain {
    providers: Vec<Arc<dyn RelevanceProvider>>,
    fallback: LocalProvider,
}

impl ProviderChain {
    /// Chain over the given external providers, tried in order.
    pub fn new(providers: Vec<Arc<dyn RelevanceProvider>>) -> Self {
        Self {
            providers,
            fallback: LocalProvider::new(),
        }
    }

    /// Chain that only uses the local heuristics.
    pub fn local_only() -> Self {
        Self::new(Vec::new())
    }

    /// Build the chain from configuration.
    ///
    /// Fails if a configured provider's backend was not compiled in or its
    /// HTTP client cannot be created.
    pub fn from_config(config: &IntelligenceConfig) -> Result<Self> {
        let providers = config
            .providers
            .iter()
            .map(build_provider)
            .collect::<Result<Vec<_>>>()?;

        let chain = Self::new(providers);
        info!(
            providers = ?chain.external_names(),
            fallback = chain.fallback.name(),
            "Provider chain built"
        );
        Ok(chain)
    }

    /// Names of the external providers, in call order.
    pub fn external_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub fn has_external(&self) -> bool {
        !self.providers.is_empty()
    }

    pub async fn summarize(&self, text: &str, max_length: usize) -> String {
        for provider in &self.providers {
            let started = Instant::now();
            match provider.summarize(text, max_length).await {
                Ok(summary) => {
                    log_success(provider.as_ref(), "summarize", started);
                    return summary;
                }
                Err(e) => log_failure(provider.as_ref(), "summarize", started, &e),
            }
        }
        self.fallback.summarize(text, max_length)
    }

    pub async fn extract_keywords(&self, text: &str, max_keywords: usize) -> Vec<String> {
        for provider in &self.providers {
            let started = Instant::now();
            match provider.extract_keywords(text, max_keywords).await {
                Ok(keywords) => {
                    log_success(provider.as_ref(), "extract_keywords", started);
                    return keywords;
                }
                Err(e) => log_failure(provider.as_ref(), "extract_keywords", started, &e),
            }
        }
        self.fallback.extract_keywords(text, max_keywords)
    }

    pub async fn find_relationships(
        &self,
        source: &Document,
        candidates: &[Document],
        limit: usize,
    ) -> Vec<Document> {
        for provider in &self.providers {
            let started = Instant::now();
            match provider.find_relationships(source, candidates, limit).await {
                Ok(related) => {
                    log_success(provider.as_ref(), "find_relationships", started);
                    return related;
                }
                Err(e) => log_failure(provider.as_ref(), "find_relationships", started, &e),
            }
        }
        self.fallback.find_relationships(source, candidates, limit)
    }
}

impl Default for ProviderChain {
    fn default() -> Self {
        Self::local_only()
    }
}

fn build_provider(config: &ProviderConfig) -> Result<Arc<dyn RelevanceProvider>> {
    let name = config.kind.display_name();

    match config.kind {
        #[cfg(feature = "openai")]
        ProviderKind::OpenAI => {
            let backend = crate::openai::OpenAIBackend::new(config.into())?;
            Ok(Arc::new(crate::llm::LlmRelevanceProvider::new(name, backend)))
        }
        #[cfg(feature = "gemini")]
        ProviderKind::Gemini => {
            let backend = crate::gemini::GeminiBackend::new(config.into())?;
            Ok(Arc::new(crate::llm::LlmRelevanceProvider::new(name, backend)))
        }
        #[allow(unreachable_patterns)]
        kind => Err(Error::Config(format!(
            "Provider '{}' ({}) not compiled in (check feature flags)",
            kind, name
        ))),
    }
}

fn log_success(provider: &dyn RelevanceProvider, op: &'static str, started: Instant) {
    debug!(
        provider = provider.name(),
        op,
        duration_ms = started.elapsed().as_millis() as u64,
        "Provider answered"
    );
}

fn log_failure(provider: &dyn RelevanceProvider, op: &'static str, started: Instant, error: &Error) {
    warn!(
        provider = provider.name(),
        op,
        duration_ms = started.elapsed().as_millis() as u64,
        error = %error,
        "Provider failed, falling back to next provider"
    );
}
