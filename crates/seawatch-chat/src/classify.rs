//! Keyword/regex intent classification.
//!
//! Maps a raw text query to an [`Intent`] plus extracted parameters.
//! Two named policies share the keyword rules and differ only in their
//! no-match fallback; each front end selects its policy explicitly.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ClassifyError;
use crate::types::{Intent, DEFAULT_SEARCH_LIMIT, FALLBACK_SEARCH_LIMIT};

// =============================================================================
// Compiled patterns and lookup tables
// =============================================================================

/// Keyword-to-slug table for well-known collections. First match wins.
static SLUG_TABLE: &[(&[&str], &str)] = &[
    (&["bored", "bayc"], "boredapeyachtclub"),
    (&["cryptopunks", "punks"], "cryptopunks"),
    (&["doodles"], "doodles-official"),
    (&["azuki"], "azuki"),
    (&["clonex"], "clonex"),
];

/// Words stripped from search queries before the remainder becomes the terms.
/// Removal is naive substring replacement, not word-boundary aware, matching
/// the legacy extractor (stop words inside longer words are stripped too).
static SEARCH_STOP_WORDS: &[&str] = &["search", "find", "for", "nfts", "in", "the"];

static FLOOR_PRICE_OF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"floor price of ([a-zA-Z0-9\s]+)").expect("Invalid slug regex"));

static WALLET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"0x[a-fA-F0-9]{40}").expect("Invalid wallet regex"));

// =============================================================================
// Parameter extraction
// =============================================================================

/// Resolve a collection slug from the query text.
///
/// Checks the fixed keyword table first, then falls back to free text
/// following "floor price of" (whitespace trimmed, inner spaces removed).
pub fn extract_collection_slug(text: &str) -> Option<String> {
    let lower = text.to_lowercase();

    for (keywords, slug) in SLUG_TABLE {
        if keywords.iter().any(|k| lower.contains(k)) {
            return Some((*slug).to_string());
        }
    }

    if let Some(caps) = FLOOR_PRICE_OF_RE.captures(&lower) {
        let slug: String = caps[1].trim().replace(' ', "");
        if !slug.is_empty() {
            return Some(slug);
        }
    }

    None
}

/// Strip stop words from the query and return the remainder as search terms.
pub fn extract_search_terms(text: &str) -> Option<String> {
    let mut terms = text.to_lowercase();
    for word in SEARCH_STOP_WORDS {
        terms = terms.replace(word, "");
    }
    let terms = terms.trim();
    if terms.is_empty() {
        None
    } else {
        Some(terms.to_string())
    }
}

/// Extract a 0x-prefixed 40-hex-digit wallet address, case preserved.
pub fn extract_wallet_address(text: &str) -> Option<String> {
    WALLET_RE.find(text).map(|m| m.as_str().to_string())
}

// =============================================================================
// Policies
// =============================================================================

/// A named intent-classification strategy.
pub trait IntentPolicy: Send + Sync {
    /// Classify a raw query into an [`Intent`].
    ///
    /// `Err(MissingParameter)` means a keyword matched but a required
    /// parameter could not be extracted; the error carries the prompting
    /// message to show the user.
    fn classify(&self, text: &str) -> Result<Intent, ClassifyError>;
}

/// Keyword rules shared by both policies. Returns `None` when no keyword
/// matched, so the caller applies its own fallback.
fn keyword_intent(text: &str) -> Option<Result<Intent, ClassifyError>> {
    let lower = text.to_lowercase();

    if lower.contains("floor price") || lower.contains("collection") {
        return Some(match extract_collection_slug(text) {
            Some(slug) => Ok(Intent::CollectionInfo { slug }),
            None => Err(ClassifyError::missing_collection()),
        });
    }

    if lower.contains("search") || lower.contains("find") {
        return Some(match extract_search_terms(text) {
            Some(terms) => Ok(Intent::search(terms, DEFAULT_SEARCH_LIMIT)),
            None => Err(ClassifyError::missing_search_terms()),
        });
    }

    if lower.contains("wallet") || lower.contains("address") {
        return Some(match extract_wallet_address(text) {
            Some(address) => Ok(Intent::WalletLookup { address }),
            None => Err(ClassifyError::missing_wallet_address()),
        });
    }

    if lower.contains("trending") || lower.contains("top") {
        return Some(Ok(Intent::Trending));
    }

    None
}

/// Policy used by the chat-agent front end: unmatched queries resolve to
/// [`Intent::Unknown`] and render the canned help message.
pub struct ChatPolicy;

impl IntentPolicy for ChatPolicy {
    fn classify(&self, text: &str) -> Result<Intent, ClassifyError> {
        keyword_intent(text).unwrap_or(Ok(Intent::Unknown))
    }
}

/// Policy used by the REST front end: when no keyword matches but the text
/// still looks NFT-related, search with the entire original query as terms.
pub struct RestPolicy;

impl IntentPolicy for RestPolicy {
    fn classify(&self, text: &str) -> Result<Intent, ClassifyError> {
        if let Some(result) = keyword_intent(text) {
            return result;
        }
        let lower = text.to_lowercase();
        if lower.contains("nft") || lower.contains("token") || lower.contains("asset") {
            return Ok(Intent::search(text, FALLBACK_SEARCH_LIMIT));
        }
        Ok(Intent::Unknown)
    }
}

// =============================================================================
// Tests
// =============================================================================
