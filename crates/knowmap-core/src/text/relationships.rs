//! Local relationship ranking.
//!
//! Scores each candidate against the source with three signals:
//!
//! | Signal | Contribution |
//! |--------|--------------|
//! | Shared keyword or tag | 2 per shared value |
//! | Source token (> 3 chars) found in candidate text | 1 per distinct token |
//! | Same non-empty category | 3 |
//!
//! Scores are not normalized across candidates. Lexical matching is
//! substring containment, so a source token also hits inside longer
//! candidate words.

use std::collections::HashSet;

use tracing::{debug, trace};

use super::is_significant;
use crate::defaults::{CATEGORY_MATCH_BOOST, KEYWORD_OVERLAP_WEIGHT, LEXICAL_OVERLAP_WEIGHT};
use crate::models::{Document, ScoredCandidate};

/// Source-side data computed once per ranking call.
struct SourceProfile<'a> {
    labels: HashSet<&'a str>,
    tokens: Vec<String>,
    category: Option<&'a str>,
}

impl<'a> SourceProfile<'a> {
    fn new(source: &'a Document) -> Self {
        let text = source.searchable_text().to_lowercase();

        let mut seen = HashSet::new();
        let tokens = text
            .split_whitespace()
            .filter(|t| is_significant(t))
            .filter(|t| seen.insert(*t))
            .map(str::to_string)
            .collect();

        Self {
            labels: labels(source),
            tokens,
            category: source.category(),
        }
    }

    fn score(&self, candidate: &Document) -> usize {
        let candidate_labels = labels(candidate);
        let shared = self
            .labels
            .iter()
            .filter(|l| candidate_labels.contains(*l))
            .count();

        let candidate_text = candidate.searchable_text().to_lowercase();
        let lexical = self
            .tokens
            .iter()
            .filter(|t| candidate_text.contains(t.as_str()))
            .count();

        let category = match (self.category, candidate.category()) {
            (Some(a), Some(b)) if a == b => CATEGORY_MATCH_BOOST,
            _ => 0,
        };

        shared * KEYWORD_OVERLAP_WEIGHT + lexical * LEXICAL_OVERLAP_WEIGHT + category
    }
}

/// Union of a document's keywords and tags.
fn labels(doc: &Document) -> HashSet<&str> {
    doc.keywords
        .iter()
        .chain(doc.tags.iter())
        .map(String::as_str)
        .collect()
}

/// Relevance score of a single candidate against `source`.
pub fn score_candidate(source: &Document, candidate: &Document) -> usize {
    SourceProfile::new(source).score(candidate)
}

/// Score every candidate and return them sorted by descending score.
///
/// Candidates with equal scores keep their input order.
pub fn rank_candidates<'a>(
    source: &Document,
    candidates: &'a [Document],
) -> Vec<ScoredCandidate<'a>> {
    let profile = SourceProfile::new(source);

    let mut scored: Vec<ScoredCandidate<'a>> = candidates
        .iter()
        .enumerate()
        .map(|(index, document)| {
            let score = profile.score(document);
            trace!(index, score, title = %document.title, "Scored candidate");
            ScoredCandidate {
                document,
                score,
                index,
            }
        })
        .collect();

    // sort_by is stable: ties keep input order
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored
}

/// Return the `limit` candidates most related to `source`.
///
/// Always returns exactly `min(limit, candidates.len())` documents; there is
/// no minimum score.
pub fn find_relationships(source: &Document, candidates: &[Document], limit: usize) -> Vec<Document> {
    if limit == 0 || candidates.is_empty() {
        return Vec::new();
    }

    let related: Vec<Document> = rank_candidates(source, candidates)
        .into_iter()
        .take(limit)
        .map(|c| c.document.clone())
        .collect();

    debug!(
        candidate_count = candidates.len(),
        result_count = related.len(),
        "Ranked relationships locally"
    );
    related
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(docs: &[Document]) -> Vec<&str> {
        docs.iter().map(|d| d.title.as_str()).collect()
    }

    #[test]
    fn test_result_length_is_min_of_limit_and_candidates() {
        let source = Document::new("source", "nothing shared");
        let candidates: Vec<Document> = (0..4)
            .map(|i| Document::new(format!("c{}", i), "zzz"))
            .collect();

        assert_eq!(find_relationships(&source, &candidates, 2).len(), 2);
        assert_eq!(find_relationships(&source, &candidates, 4).len(), 4);
        assert_eq!(find_relationships(&source, &candidates, 10).len(), 4);
        assert!(find_relationships(&source, &candidates, 0).is_empty());
        assert!(find_relationships(&source, &[], 5).is_empty());
    }

    #[test]
    fn test_zero_scores_still_returned() {
        let source = Document::new("alpha", "");
        let candidates = vec![Document::new("x", "y"), Document::new("p", "q")];
        let related = find_relationships(&source, &candidates, 5);
        assert_eq!(titles(&related), vec!["x", "p"]);
    }

    #[test]
    fn test_category_only_match_scores_three() {
        let source = Document::new("aaaa", "bbbb").with_category("AI/ML");
        let same = Document::new("cccc", "dddd").with_category("AI/ML");
        let other = Document::new("eeee", "ffff").with_category("Cooking");

        assert_eq!(score_candidate(&source, &same), 3);
        assert_eq!(score_candidate(&source, &other), 0);

        let candidates = vec![other, same];
        let related = find_relationships(&source, &candidates, 2);
        assert_eq!(titles(&related), vec!["cccc", "eeee"]);
    }

    #[test]
    fn test_category_match_is_case_sensitive() {
        let source = Document::new("s", "").with_category("AI/ML");
        let candidate = Document::new("c", "").with_category("ai/ml");
        assert_eq!(score_candidate(&source, &candidate), 0);
    }

    #[test]
    fn test_empty_categories_do_not_match() {
        let source = Document::new("s", "").with_category("");
        let candidate = Document::new("c", "").with_category("");
        assert_eq!(score_candidate(&source, &candidate), 0);
    }

    #[test]
    fn test_tag_overlap_outranks_lexical_overlap() {
        let source = Document::new("", "graph nodes edges").with_tags(["rust", "async"]);
        let lexical = Document::new("", "graph nodes edges");
        let tagged = Document::new("", "unrelated").with_tags(["async", "rust"]);

        assert_eq!(score_candidate(&source, &lexical), 3);
        assert_eq!(score_candidate(&source, &tagged), 4);

        let candidates = vec![lexical, tagged];
        let related = find_relationships(&source, &candidates, 2);
        assert_eq!(related[0].content, "unrelated");
        assert_eq!(related[1].content, "graph nodes edges");
    }

    #[test]
    fn test_keywords_and_tags_are_unioned() {
        let source = Document::new("", "")
            .with_keywords(["rust"])
            .with_tags(["rust", "wasm"]);
        let candidate = Document::new("", "").with_keywords(["wasm"]).with_tags(["rust"]);
        // "rust" counted once, "wasm" once
        assert_eq!(score_candidate(&source, &candidate), 4);
    }

    #[test]
    fn test_lexical_counts_distinct_source_tokens() {
        let source = Document::new("rust", "rust rust rust");
        let candidate = Document::new("", "rust");
        assert_eq!(score_candidate(&source, &candidate), 1);
    }

    #[test]
    fn test_lexical_is_substring_containment() {
        let source = Document::new("", "cats");
        let candidate = Document::new("", "bobcatsanctuary");
        assert_eq!(score_candidate(&source, &candidate), 1);
    }

    #[test]
    fn test_lexical_is_case_insensitive() {
        let source = Document::new("Ownership", "");
        let candidate = Document::new("", "OWNERSHIP model");
        assert_eq!(score_candidate(&source, &candidate), 1);
    }

    #[test]
    fn test_short_source_tokens_ignored() {
        let source = Document::new("the", "and for cat");
        let candidate = Document::new("the", "and for cat");
        assert_eq!(score_candidate(&source, &candidate), 0);
    }

    #[test]
    fn test_source_punctuation_is_kept() {
        // Source tokens are split on whitespace only
        let source = Document::new("", "graph,");
        assert_eq!(score_candidate(&source, &Document::new("", "graph")), 0);
        assert_eq!(score_candidate(&source, &Document::new("", "graph, edges")), 1);
    }

    #[test]
    fn test_title_and_content_join_can_match_across_boundary() {
        // Candidate text is "data base", so the token "data" hits but "database" does not
        let source = Document::new("", "database data");
        let candidate = Document::new("data", "base");
        assert_eq!(score_candidate(&source, &candidate), 1);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let source = Document::new("", "").with_tags(["shared"]);
        let candidates = vec![
            Document::new("first", "").with_tags(["shared"]),
            Document::new("none", ""),
            Document::new("second", "").with_tags(["shared"]),
            Document::new("third", "").with_tags(["shared"]),
        ];
        let related = find_relationships(&source, &candidates, 4);
        assert_eq!(titles(&related), vec!["first", "second", "third", "none"]);
    }

    #[test]
    fn test_rank_candidates_exposes_scores_and_indices() {
        let source = Document::new("", "").with_category("notes");
        let candidates = vec![
            Document::new("a", ""),
            Document::new("b", "").with_category("notes"),
        ];
        let ranked = rank_candidates(&source, &candidates);
        assert_eq!(ranked[0].index, 1);
        assert_eq!(ranked[0].score, 3);
        assert_eq!(ranked[1].index, 0);
        assert_eq!(ranked[1].score, 0);
    }

    #[test]
    fn test_combined_score() {
        let source = Document::new("Neural networks", "Training deep models")
            .with_keywords(["ml"])
            .with_tags(["ai"])
            .with_category("AI/ML");
        let candidate = Document::new("Deep learning", "Neural training tricks")
            .with_keywords(["ai", "ml"])
            .with_category("AI/ML");
        // shared: ml, ai -> 4; tokens: neural, networks, training, deep, models -> neural, training, deep hit -> 3; category -> 3
        assert_eq!(score_candidate(&source, &candidate), 10);
    }

    #[test]
    fn test_deterministic() {
        let source = Document::new("Canvas layout", "Nodes and edges on a canvas").with_tags(["ui"]);
        let candidates: Vec<Document> = (0..20)
            .map(|i| {
                Document::new(format!("Note {}", i), "edges nodes layout")
                    .with_tags(if i % 3 == 0 { vec!["ui"] } else { vec![] })
            })
            .collect();

        let first = find_relationships(&source, &candidates, 7);
        let second = find_relationships(&source, &candidates, 7);
        assert_eq!(first, second);
    }

    #[test]
    fn test_inputs_not_mutated() {
        let source = Document::new("s", "text").with_tags(["t"]);
        let candidates = vec![Document::new("c", "text").with_tags(["t"])];
        let before = candidates.clone();
        let _ = find_relationships(&source, &candidates, 1);
        assert_eq!(candidates, before);
    }
}
