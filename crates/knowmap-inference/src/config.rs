//! Provider configuration.
//!
//! The provider order is decided once, at startup, from environment
//! variables. External providers are only included when their API key is
//! set; the local fallback is never configured here because the chain always
//! appends it.
//!
//! ```text
//! KNOWMAP_PROVIDERS=gemini,openai   → try Gemini, then OpenAI, then local
//! KNOWMAP_PROVIDERS=basic           → local only
//! (unset)                           → openai,gemini
//! ```

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use knowmap_core::defaults;

// ---------------------------------------------------------------------------
// Provider kind
// ---------------------------------------------------------------------------

/// External providers knowmap knows how to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    OpenAI,
    Gemini,
}

impl ProviderKind {
    /// Identifier used in configuration and logs.
    pub fn id(&self) -> &'static str {
        match self {
            Self::OpenAI => "openai",
            Self::Gemini => "gemini",
        }
    }

    /// Human-facing service name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::OpenAI => "OpenAI",
            Self::Gemini => "Gemini",
        }
    }

    /// Parse a configuration identifier.
    pub fn parse(id: &str) -> Option<Self> {
        match id.trim().to_ascii_lowercase().as_str() {
            "openai" => Some(Self::OpenAI),
            "gemini" | "google" => Some(Self::Gemini),
            _ => None,
        }
    }

    fn env_prefix(&self) -> &'static str {
        match self {
            Self::OpenAI => "OPENAI",
            Self::Gemini => "GEMINI",
        }
    }

    fn default_base_url(&self) -> &'static str {
        match self {
            Self::OpenAI => defaults::OPENAI_URL,
            Self::Gemini => defaults::GEMINI_URL,
        }
    }

    fn default_model(&self) -> &'static str {
        match self {
            Self::OpenAI => defaults::OPENAI_GEN_MODEL,
            Self::Gemini => defaults::GEMINI_MODEL,
        }
    }

    /// Environment variable holding the model name.
    fn model_var(&self) -> &'static str {
        match self {
            Self::OpenAI => "OPENAI_GEN_MODEL",
            Self::Gemini => "GEMINI_MODEL",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

// ---------------------------------------------------------------------------
// Provider configuration
// ---------------------------------------------------------------------------

/// Configuration for one external provider.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    /// Base URL for the provider's API.
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl ProviderConfig {
    /// Config with default URL, model and timeout for `kind`.
    pub fn new(kind: ProviderKind, api_key: impl Into<String>) -> Self {
        Self {
            kind,
            base_url: kind.default_base_url().to_string(),
            api_key: api_key.into(),
            model: kind.default_model().to_string(),
            timeout: Duration::from_secs(defaults::PROVIDER_TIMEOUT_SECS),
        }
    }
}

/// Ordered external providers to try before the local fallback.
#[derive(Debug, Clone, Default)]
pub struct IntelligenceConfig {
    pub providers: Vec<ProviderConfig>,
}

impl IntelligenceConfig {
    /// Configuration with no external providers.
    pub fn local_only() -> Self {
        Self::default()
    }

    /// Build configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let order = lookup("KNOWMAP_PROVIDERS").unwrap_or_else(|| defaults::PROVIDER_ORDER.into());
        let mut providers = Vec::new();

        for kind in parse_order(&order) {
            let prefix = kind.env_prefix();
            let api_key = match lookup(&format!("{}_API_KEY", prefix)) {
                Some(key) if !key.trim().is_empty() => key,
                _ => {
                    debug!(provider = %kind, "No API key configured, skipping provider");
                    continue;
                }
            };

            let base_url = lookup(&format!("{}_BASE_URL", prefix))
                .unwrap_or_else(|| kind.default_base_url().to_string());
            let model = lookup(kind.model_var()).unwrap_or_else(|| kind.default_model().to_string());
            let timeout = lookup(&format!("{}_TIMEOUT", prefix))
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(defaults::PROVIDER_TIMEOUT_SECS);

            providers.push(ProviderConfig {
                kind,
                base_url,
                api_key,
                model,
                timeout: Duration::from_secs(timeout),
            });
        }

        info!(
            providers = ?providers.iter().map(|p| p.kind.id()).collect::<Vec<_>>(),
            "Provider configuration loaded"
        );

        Self { providers }
    }

    /// Whether any external provider is configured.
    pub fn has_external(&self) -> bool {
        !self.providers.is_empty()
    }
}

/// Parse a comma-separated provider order.
///
/// `basic`, `local` and `none` end the list: anything after them is
/// unreachable because the local provider never fails. Unknown names are
/// skipped with a warning, duplicates are ignored.
pub fn parse_order(order: &str) -> Vec<ProviderKind> {
    let mut kinds = Vec::new();

    for name in order.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if matches!(
            name.to_ascii_lowercase().as_str(),
            "basic" | "local" | "none"
        ) {
            break;
        }
        match ProviderKind::parse(name) {
            Some(kind) if !kinds.contains(&kind) => kinds.push(kind),
            Some(_) => {}
            None => warn!(provider = name, "Unknown provider in KNOWMAP_PROVIDERS, ignoring"),
        }
    }

    kinds
}
