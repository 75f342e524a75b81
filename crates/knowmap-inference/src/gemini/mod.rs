//! Google Gemini generation backend.
//!
//! Calls the `generateContent` REST endpoint with the API key passed in the
//! `x-goog-api-key` header.

mod backend;
mod types;

pub use backend::{GeminiBackend, GeminiConfig};
pub use types::*;
