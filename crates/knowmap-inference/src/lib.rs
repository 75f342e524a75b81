//! # knowmap-inference
//!
//! Provider chain and note operations for knowmap.
//!
//! This crate provides:
//! - Environment-driven provider configuration
//! - OpenAI chat completions backend (feature `openai`)
//! - Google Gemini backend (feature `gemini`)
//! - An LLM-backed [`RelevanceProvider`] using fixed prompts
//! - A [`ProviderChain`] that tries providers in order and always ends in
//!   the deterministic local heuristics
//! - [`NoteIntelligence`], the note-level operations built on the chain
//!
//! # Feature Flags
//!
//! - `openai` (default): Enable OpenAI-compatible backend
//! - `gemini` (default): Enable Gemini backend
//!
//! # Logging
//!
//! Provider failures are logged at WARN with `provider`, `op`,
//! `duration_ms` and `error` fields before the chain moves on. Chain
//! construction is logged at INFO; per-call decisions at DEBUG.
//!
//! # Example
//!
//! ```rust,no_run
//! use knowmap_inference::{IntelligenceConfig, NoteIntelligence, ProviderChain};
//!
//! #[tokio::main]
//! async fn main() -> knowmap_inference::Result<()> {
//!     let chain = ProviderChain::from_config(&IntelligenceConfig::from_env())?;
//!     let intel = NoteIntelligence::new(chain);
//!
//!     let note = intel.process_note(None, "Notes on async Rust and tokio").await?;
//!     println!("{}", note.suggested_title);
//!     Ok(())
//! }
//! ```

pub mod chain;
pub mod config;
pub mod llm;
pub mod local;
pub mod operations;
pub mod prompts;

#[cfg(feature = "openai")]
pub mod openai;

#[cfg(feature = "gemini")]
pub mod gemini;

// Scripted backends for testing
#[cfg(test)]
pub mod mock;

// Re-export core types
pub use knowmap_core::*;

pub use chain::ProviderChain;
pub use config::{parse_order, IntelligenceConfig, ProviderConfig, ProviderKind};
pub use llm::LlmRelevanceProvider;
pub use local::{LocalProvider, LOCAL_PROVIDER_NAME};
pub use operations::{NoteIntelligence, NO_SERVICE};

#[cfg(feature = "openai")]
pub use openai::{OpenAIBackend, OpenAIConfig};

#[cfg(feature = "gemini")]
pub use gemini::{GeminiBackend, GeminiConfig};
