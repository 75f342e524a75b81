//! # knowmap-core
//!
//! Core types, traits, and the local text intelligence for knowmap.
//!
//! This crate provides:
//! - The narrow [`Document`] value type the intelligence layer reads
//! - The [`RelevanceProvider`] and [`GenerationBackend`] traits
//! - The deterministic local fallback in [`text`]: keyword extraction,
//!   summary truncation and relationship ranking
//!
//! # Example
//!
//! ```rust
//! use knowmap_core::{find_relationships, Document};
//!
//! let source = Document::new("Rust ownership", "Borrowing rules and lifetimes")
//!     .with_tags(["rust"]);
//! let candidates = vec![
//!     Document::new("Gardening", "Tomatoes need sun"),
//!     Document::new("Lifetimes", "Rust borrowing in depth").with_tags(["rust"]),
//! ];
//!
//! let related = find_relationships(&source, &candidates, 1);
//! assert_eq!(related[0].title, "Lifetimes");
//! ```

pub mod defaults;
pub mod error;
pub mod models;
pub mod text;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::*;
pub use text::{
    content_preview, extract_keywords, find_relationships, generate_summary, rank_candidates,
    score_candidate, ELLIPSIS,
};
pub use traits::*;
