//! Frequency-based keyword extraction.

use std::collections::HashMap;

use super::is_significant;

/// Extract up to `max_keywords` keywords from `text`.
///
/// The text is lowercased and stripped of everything except letters, digits
/// and whitespace. Tokens of three characters or fewer are dropped, the rest
/// are counted, and the most frequent come first. Ties keep the order in
/// which the tokens first appeared.
///
/// ```
/// use knowmap_core::extract_keywords;
///
/// let keywords = extract_keywords("apple apple banana banana banana cherry", 2);
/// assert_eq!(keywords, vec!["banana", "apple"]);
/// ```
pub fn extract_keywords(text: &str, max_keywords: usize) -> Vec<String> {
    if max_keywords == 0 || text.is_empty() {
        return Vec::new();
    }

    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();

    // (token, count) in first-occurrence order
    let mut counts: Vec<(&str, usize)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for token in cleaned.split_whitespace().filter(|t| is_significant(t)) {
        let pos = *positions.entry(token).or_insert_with(|| {
            counts.push((token, 0));
            counts.len() - 1
        });
        counts[pos].1 += 1;
    }

    // Stable sort keeps first-occurrence order for equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    counts
        .into_iter()
        .take(max_keywords)
        .map(|(token, _)| token.to_string())
        .collect()
}
