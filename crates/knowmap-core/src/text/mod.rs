//! Local text intelligence.
//!
//! Deterministic, dependency-free fallbacks for the three operations the
//! external providers offer. Every function here is pure and total: empty
//! inputs and zero limits produce empty output rather than errors.

mod keywords;
mod relationships;
mod summary;

pub use keywords::extract_keywords;
pub use relationships::{find_relationships, rank_candidates, score_candidate};
pub use summary::{content_preview, generate_summary, ELLIPSIS};

/// Whether a token is long enough to carry meaning on its own.
fn is_significant(token: &str) -> bool {
    token.chars().count() > crate::defaults::MIN_TOKEN_CHARS
}
