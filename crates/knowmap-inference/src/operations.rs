//! Note-level operations built on the provider chain.
//!
//! These are the tasks a note app asks of its intelligence layer: process a
//! freshly written note, propose a category and tags, suggest connections to
//! other notes. Each operation picks its own defaults and delegates the
//! actual text work to the chain.

use std::collections::{BTreeSet, HashSet};

use tracing::debug;

use knowmap_core::{
    defaults, text, CategorySuggestion, Document, Error, ProcessedNote, Result,
};

use crate::chain::ProviderChain;

/// Service name reported when no external provider is configured.
pub const NO_SERVICE: &str = "None";

/// Entry point for note intelligence.
#[derive(Clone, Default)]
pub struct NoteIntelligence {
    chain: ProviderChain,
}

impl NoteIntelligence {
    pub fn new(chain: ProviderChain) -> Self {
        Self { chain }
    }

    pub fn chain(&self) -> &ProviderChain {
        &self.chain
    }

    /// Summarize non-empty content in at most `max_length` characters.
    pub async fn summarize(&self, content: &str, max_length: usize) -> Result<String> {
        require_content(content)?;
        Ok(self.chain.summarize(content, max_length).await)
    }

    /// Extract up to `max_keywords` key terms from non-empty content.
    pub async fn extract_keywords(&self, content: &str, max_keywords: usize) -> Result<Vec<String>> {
        require_content(content)?;
        Ok(self.chain.extract_keywords(content, max_keywords).await)
    }

    /// Summary, keywords and a title suggestion for a note.
    ///
    /// Summary and keywords are requested concurrently. A non-empty `title`
    /// is kept as the suggested title; otherwise a short summary of the
    /// content is proposed.
    pub async fn process_note(&self, title: Option<&str>, content: &str) -> Result<ProcessedNote> {
        require_content(content)?;

        let (summary, keywords) = futures::join!(
            self.chain.summarize(content, defaults::SUMMARY_LENGTH),
            self.chain
                .extract_keywords(content, defaults::PROCESS_NOTE_KEYWORD_COUNT),
        );

        let suggested_title = match title.map(str::trim) {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => {
                self.chain
                    .summarize(content, defaults::SUGGESTED_TITLE_LENGTH)
                    .await
            }
        };

        Ok(ProcessedNote {
            summary,
            keywords,
            suggested_title,
        })
    }

    /// Propose a category and tags for a note.
    pub async fn suggest_category(
        &self,
        note: &Document,
        existing_categories: &[String],
    ) -> CategorySuggestion {
        let text = note.searchable_text();

        let (suggested_category, suggested_tags) = futures::join!(
            self.chain.summarize(&text, defaults::CATEGORY_SUMMARY_LENGTH),
            self.chain.extract_keywords(&text, defaults::CATEGORY_TAG_COUNT),
        );

        let existing_categories = existing_categories
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        CategorySuggestion {
            suggested_category,
            suggested_tags,
            existing_categories,
        }
    }

    /// Up to `limit` candidates most related to `source`.
    ///
    /// Candidates sharing the source's id are never returned.
    pub async fn relate(
        &self,
        source: &Document,
        candidates: &[Document],
        limit: usize,
    ) -> Vec<Document> {
        let candidates: Vec<Document> = match source.id.as_deref() {
            Some(id) => candidates
                .iter()
                .filter(|c| c.id.as_deref() != Some(id))
                .cloned()
                .collect(),
            None => candidates.to_vec(),
        };

        if candidates.is_empty() || limit == 0 {
            debug!("No candidates to relate");
            return Vec::new();
        }

        self.chain
            .find_relationships(source, &candidates, limit)
            .await
    }

    /// Suggest new connections for `note`, skipping notes it already links to.
    pub async fn suggest_connections(
        &self,
        note: &Document,
        candidates: &[Document],
        already_related_ids: &[String],
    ) -> Vec<Document> {
        let excluded: HashSet<&str> = already_related_ids.iter().map(String::as_str).collect();

        let unrelated: Vec<Document> = candidates
            .iter()
            .filter(|c| match c.id.as_deref() {
                Some(id) => !excluded.contains(id),
                None => true,
            })
            .cloned()
            .collect();

        debug!(
            candidate_count = candidates.len(),
            excluded = candidates.len() - unrelated.len(),
            "Suggesting connections"
        );

        self.relate(note, &unrelated, defaults::CONNECTION_SUGGESTION_LIMIT)
            .await
    }

    /// Short preview of note content for listings.
    pub fn content_preview(&self, content: &str) -> String {
        text::content_preview(content)
    }

    /// Whether any external AI service is configured.
    pub fn is_ai_service_available(&self) -> bool {
        self.chain.has_external()
    }

    /// Name of the first external service, or `"None"`.
    pub fn available_service(&self) -> &str {
        self.chain
            .external_names()
            .first()
            .copied()
            .unwrap_or(NO_SERVICE)
    }
}

fn require_content(content: &str) -> Result<()> {
    if content.trim().is_empty() {
        return Err(Error::InvalidInput("content is required".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::LlmRelevanceProvider;
    use crate::mock::{FailingProvider, ScriptedBackend};
    use knowmap_core::RelevanceProvider;
    use std::sync::Arc;

    fn local() -> NoteIntelligence {
        NoteIntelligence::default()
    }

    fn with_backend(backend: &ScriptedBackend) -> NoteIntelligence {
        let provider: Arc<dyn RelevanceProvider> =
            Arc::new(LlmRelevanceProvider::new("OpenAI", backend.clone()));
        NoteIntelligence::new(ProviderChain::new(vec![provider]))
    }

    #[tokio::test]
    async fn empty_content_is_rejected() {
        let intel = local();
        assert!(matches!(
            intel.summarize("   ", 10).await,
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            intel.extract_keywords("", 10).await,
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            intel.process_note(Some("Title"), "").await,
            Err(Error::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn process_note_keeps_given_title() {
        let intel = local();
        let note = intel
            .process_note(Some("My Title"), "Tokio tasks tasks schedule work")
            .await
            .unwrap();

        assert_eq!(note.suggested_title, "My Title");
        assert_eq!(note.summary, "Tokio tasks tasks schedule work");
        assert_eq!(note.keywords[0], "tasks");
        assert!(note.keywords.len() <= defaults::PROCESS_NOTE_KEYWORD_COUNT);
    }

    #[tokio::test]
    async fn process_note_suggests_title_from_content() {
        let intel = local();
        let content = "word ".repeat(40);
        let note = intel.process_note(None, &content).await.unwrap();

        assert!(note.suggested_title.ends_with("..."));
        assert!(note.suggested_title.chars().count() <= defaults::SUGGESTED_TITLE_LENGTH + 3);

        let blank_title = intel.process_note(Some("  "), &content).await.unwrap();
        assert_eq!(blank_title.suggested_title, note.suggested_title);
    }

    #[tokio::test]
    async fn process_note_with_model_uses_three_calls() {
        let backend = ScriptedBackend::new()
            .with_response("Summary text.")
            .with_response("alpha, beta")
            .with_response("Title text");
        let intel = with_backend(&backend);

        let note = intel.process_note(None, "Some content").await.unwrap();
        assert_eq!(backend.calls().len(), 3);
        assert!(!note.summary.is_empty());
        assert!(!note.suggested_title.is_empty());
    }

    #[tokio::test]
    async fn suggest_category_dedupes_existing() {
        let intel = local();
        let note = Document::new("Weekly groceries", "Milk eggs bread bread");
        let existing = vec![
            "work".to_string(),
            "home".to_string(),
            " ".to_string(),
            "work".to_string(),
        ];

        let suggestion = intel.suggest_category(&note, &existing).await;
        assert_eq!(suggestion.existing_categories, vec!["home", "work"]);
        assert_eq!(suggestion.suggested_category, "Weekly groceries...");
        assert_eq!(suggestion.suggested_tags[0], "bread");
        assert!(suggestion.suggested_tags.len() <= defaults::CATEGORY_TAG_COUNT);
    }

    #[tokio::test]
    async fn relate_excludes_source_and_short_circuits() {
        let backend = ScriptedBackend::new();
        let intel = with_backend(&backend);
        let source = Document::new("Self", "content").with_id("n1");

        let only_self = vec![source.clone()];
        assert!(intel.relate(&source, &only_self, 5).await.is_empty());
        assert!(intel.relate(&source, &[], 5).await.is_empty());
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn suggest_connections_skips_existing_links() {
        let intel = local();
        let note = Document::new("Rust", "Ownership").with_id("n0").with_tags(["rust"]);
        let candidates = vec![
            note.clone(),
            Document::new("Lifetimes", "Borrowing").with_id("n1").with_tags(["rust"]),
            Document::new("Traits", "Generics").with_id("n2").with_tags(["rust"]),
            Document::new("Cooking", "Pasta").with_id("n3"),
        ];

        let suggestions = intel
            .suggest_connections(&note, &candidates, &["n1".to_string()])
            .await;
        let ids: Vec<_> = suggestions.iter().filter_map(|d| d.id.as_deref()).collect();
        assert_eq!(ids, vec!["n2", "n3"]);
    }

    #[tokio::test]
    async fn suggest_connections_falls_back_on_failure() {
        let provider: Arc<dyn RelevanceProvider> = Arc::new(FailingProvider::new("OpenAI"));
        let intel = NoteIntelligence::new(ProviderChain::new(vec![provider]));
        let note = Document::new("Rust", "Ownership").with_id("n0");
        let candidates = vec![Document::new("Ownership deep dive", "").with_id("n1")];

        let suggestions = intel.suggest_connections(&note, &candidates, &[]).await;
        assert_eq!(suggestions.len(), 1);
    }

    #[test]
    fn availability_reports() {
        assert!(!local().is_ai_service_available());
        assert_eq!(local().available_service(), "None");

        let intel = with_backend(&ScriptedBackend::new());
        assert!(intel.is_ai_service_available());
        assert_eq!(intel.available_service(), "OpenAI");
    }

    #[test]
    fn content_preview_cuts_hard() {
        let intel = local();
        assert_eq!(intel.content_preview("short"), "short");
        let long = "a ".repeat(100);
        let preview = intel.content_preview(&long);
        assert_eq!(preview.chars().count(), defaults::CONTENT_PREVIEW_LENGTH + 3);
    }
}
