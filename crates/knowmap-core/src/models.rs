//! Value types shared by the ranker, the providers and the CLI.

use serde::{Deserialize, Serialize};

// =============================================================================
// DOCUMENT
// =============================================================================

/// A note as seen by the intelligence layer.
///
/// Only the fields the ranker and the prompt builders read are carried here;
/// the persisted note record is mapped into this type by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Opaque identifier, used to map LLM answers back to candidates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// Previously generated summary, preferred over a content excerpt in prompts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Document {
    /// Create a document with a title and content and no metadata.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Title and content joined by a single space.
    pub fn searchable_text(&self) -> String {
        format!("{} {}", self.title, self.content)
    }

    /// Category if present and non-empty.
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }
}

// =============================================================================
// RANKING
// =============================================================================

/// A candidate paired with its relevance score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredCandidate<'a> {
    pub document: &'a Document,
    pub score: usize,
    /// Position of the candidate in the input list.
    pub index: usize,
}

/// A source document, its candidates, and the number of results wanted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RankingRequest {
    pub source: Document,
    #[serde(default)]
    pub candidates: Vec<Document>,
    #[serde(default = "default_relationship_limit")]
    pub limit: usize,
}

fn default_relationship_limit() -> usize {
    crate::defaults::RELATIONSHIP_LIMIT
}

// =============================================================================
// NOTE OPERATIONS
// =============================================================================

/// Result of processing a note's content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedNote {
    pub summary: String,
    pub keywords: Vec<String>,
    pub suggested_title: String,
}

/// Category and tag suggestions for a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySuggestion {
    pub suggested_category: String,
    pub suggested_tags: Vec<String>,
    pub existing_categories: Vec<String>,
}
