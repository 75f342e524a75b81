//! OpenAI-compatible generation backend.
//!
//! Works with any endpoint that speaks the chat completions API (OpenAI,
//! Azure OpenAI, OpenRouter, vLLM, LM Studio).
//!
//! # Example
//!
//! ```rust,no_run
//! use knowmap_core::GenerationBackend;
//! use knowmap_inference::openai::{OpenAIBackend, OpenAIConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = OpenAIConfig {
//!         api_key: Some("sk-...".to_string()),
//!         ..Default::default()
//!     };
//!     let backend = OpenAIBackend::new(config).unwrap();
//!     let reply = backend.generate("Say hello").await.unwrap();
//!     println!("{}", reply);
//! }
//! ```

mod backend;
mod types;

pub use backend::{OpenAIBackend, OpenAIConfig};
pub use types::*;
