//! Centralized default constants for knowmap.
//!
//! All crates and the CLI reference these constants instead of defining
//! their own magic numbers. Operation defaults mirror what the note routes
//! have always used.

// =============================================================================
// SUMMARIES
// =============================================================================

/// Default maximum summary length in characters.
pub const SUMMARY_LENGTH: usize = 150;

/// Summary length used when a note has no title and one is suggested.
pub const SUGGESTED_TITLE_LENGTH: usize = 50;

/// Summary length used as a short category suggestion.
pub const CATEGORY_SUMMARY_LENGTH: usize = 20;

/// Preview length for note lists (hard cut, no word boundary).
pub const CONTENT_PREVIEW_LENGTH: usize = 150;

/// Excerpt length used for candidates without a summary in LLM prompts.
pub const PROMPT_EXCERPT_LENGTH: usize = 100;

// =============================================================================
// KEYWORDS
// =============================================================================

/// Default number of keywords to extract.
pub const KEYWORD_COUNT: usize = 10;

/// Keyword count used when processing a whole note.
pub const PROCESS_NOTE_KEYWORD_COUNT: usize = 8;

/// Tag count suggested alongside a category.
pub const CATEGORY_TAG_COUNT: usize = 5;

/// Tokens of this many characters or fewer are ignored by the local
/// keyword extractor and lexical overlap scoring.
pub const MIN_TOKEN_CHARS: usize = 3;

// =============================================================================
// RELATIONSHIPS
// =============================================================================

/// Default number of related notes returned.
pub const RELATIONSHIP_LIMIT: usize = 5;

/// Number of connection suggestions returned for a note.
pub const CONNECTION_SUGGESTION_LIMIT: usize = 10;

/// Score contributed per shared keyword or tag.
pub const KEYWORD_OVERLAP_WEIGHT: usize = 2;

/// Score contributed per source token found in the candidate text.
pub const LEXICAL_OVERLAP_WEIGHT: usize = 1;

/// Score contributed when source and candidate share a category.
pub const CATEGORY_MATCH_BOOST: usize = 3;

// =============================================================================
// PROVIDERS
// =============================================================================

/// Default OpenAI API base URL.
pub const OPENAI_URL: &str = "https://api.openai.com/v1";

/// Default OpenAI chat model.
pub const OPENAI_GEN_MODEL: &str = "gpt-4o-mini";

/// Default Gemini API base URL.
pub const GEMINI_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default Gemini model.
pub const GEMINI_MODEL: &str = "gemini-1.5-flash";

/// Timeout for provider requests (seconds).
pub const PROVIDER_TIMEOUT_SECS: u64 = 60;

/// Provider order used when `KNOWMAP_PROVIDERS` is not set.
pub const PROVIDER_ORDER: &str = "openai,gemini";

/// Sampling temperature for summaries.
pub const SUMMARY_TEMPERATURE: f32 = 0.3;

/// Sampling temperature for keyword and relationship prompts.
pub const EXTRACTION_TEMPERATURE: f32 = 0.1;

/// Token cap for keyword and relationship responses.
pub const EXTRACTION_MAX_TOKENS: u32 = 100;
