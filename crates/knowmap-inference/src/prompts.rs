//! Prompt construction and response parsing for LLM-backed providers.
//!
//! Models are asked for plain comma-separated lists. Responses are cleaned
//! of the decoration models tend to add anyway: numbering, bullets, quotes
//! and brackets.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use knowmap_core::{defaults, Document, GenerationOptions};

pub const SUMMARY_SYSTEM: &str = "You are a helpful assistant that creates concise summaries.";

pub const KEYWORD_SYSTEM: &str = "You are a helpful assistant that extracts key terms from text.";

pub const RELATIONSHIP_SYSTEM: &str =
    "You are a helpful assistant that finds relationships between notes.";

/// Leading list markers: `-`, `*`, `•`, `1. `, `2) `.
///
/// Numbered markers need trailing whitespace so `3.5 turbo` stays intact.
static LIST_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[-*•]+\s*|\d+[.)]\s+)").unwrap());

// =============================================================================
// SUMMARY
// =============================================================================

pub fn summary_prompt(content: &str, max_length: usize) -> String {
    format!(
        "Summarize the following content in {} characters or less:\n\n{}",
        max_length, content
    )
}

/// Roughly four characters per token.
pub fn summary_options(max_length: usize) -> GenerationOptions {
    let max_tokens = max_length.div_ceil(4).clamp(1, u32::MAX as usize) as u32;
    GenerationOptions::new(defaults::SUMMARY_TEMPERATURE, max_tokens)
}

// =============================================================================
// KEYWORDS
// =============================================================================

pub fn keyword_prompt(content: &str, max_keywords: usize) -> String {
    format!(
        "Extract {} key terms or concepts from the following content. \
         Return only the keywords separated by commas:\n\n{}",
        max_keywords, content
    )
}

pub fn extraction_options() -> GenerationOptions {
    GenerationOptions::new(
        defaults::EXTRACTION_TEMPERATURE,
        defaults::EXTRACTION_MAX_TOKENS,
    )
}

/// Split a comma-separated model answer into at most `max_keywords` terms.
pub fn parse_keyword_list(response: &str, max_keywords: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    split_list(response)
        .filter(|k| seen.insert(k.to_lowercase()))
        .take(max_keywords)
        .collect()
}

// =============================================================================
// RELATIONSHIPS
// =============================================================================

/// Identifiers the candidates are listed under in the prompt, by position.
///
/// Candidates without an id are referred to by their 1-based position. When
/// that number is already another candidate's id the key becomes `#N`.
pub fn candidate_keys(candidates: &[Document]) -> Vec<String> {
    let ids: HashSet<&str> = candidates
        .iter()
        .filter_map(|c| c.id.as_deref())
        .filter(|id| !id.is_empty())
        .collect();

    candidates
        .iter()
        .enumerate()
        .map(|(i, c)| match c.id.as_deref() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => {
                let position = (i + 1).to_string();
                if ids.contains(position.as_str()) {
                    format!("#{}", position)
                } else {
                    position
                }
            }
        })
        .collect()
}

/// Summary if present, otherwise the first characters of the content.
fn candidate_excerpt(candidate: &Document) -> String {
    match candidate.summary.as_deref() {
        Some(summary) if !summary.is_empty() => summary.to_string(),
        _ => candidate
            .content
            .chars()
            .take(defaults::PROMPT_EXCERPT_LENGTH)
            .collect(),
    }
}

pub fn relationship_prompt(source: &Document, candidates: &[Document], limit: usize) -> String {
    let notes = candidates
        .iter()
        .zip(candidate_keys(candidates))
        .map(|(c, key)| format!("[{}] {} - {}", key, c.title, candidate_excerpt(c)))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Given this source note: \"{}\"\n\n\
         And these other notes:\n{}\n\n\
         Return the IDs (the values in square brackets) of the {} most related notes, \
         ranked by relevance. Format as: id1,id2,id3",
        source.searchable_text(),
        notes,
        limit
    )
}

/// Map a model's id list back to candidates.
///
/// Matches come back in candidate order, not the order the model listed
/// them; unknown ids are ignored. At most `limit` documents are returned.
pub fn resolve_related(response: &str, candidates: &[Document], limit: usize) -> Vec<Document> {
    let returned: HashSet<String> = split_list(response).collect();

    candidates
        .iter()
        .zip(candidate_keys(candidates))
        .filter(|(_, key)| returned.contains(key))
        .map(|(c, _)| c.clone())
        .take(limit)
        .collect()
}

// =============================================================================
// PARSING HELPERS
// =============================================================================

/// Split on commas and newlines and strip list decoration from each item.
fn split_list(response: &str) -> impl Iterator<Item = String> + '_ {
    response
        .split([',', '\n'])
        .map(clean_item)
        .filter(|item| !item.is_empty())
}

fn clean_item(item: &str) -> String {
    let item = item.trim();
    let item = LIST_MARKER.replace(item, "");
    item.trim_matches(|c: char| {
        c.is_whitespace() || matches!(c, '"' | '\'' | '`' | '[' | ']' | '.' | '*')
    })
    .to_string()
}
