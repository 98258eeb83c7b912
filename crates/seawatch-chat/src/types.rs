use serde::{Deserialize, Serialize};

/// Default chain used when a search query does not specify one.
pub const DEFAULT_CHAIN: &str = "ethereum";

/// Default result limit for an explicit search intent.
pub const DEFAULT_SEARCH_LIMIT: u32 = 20;

/// Result limit for the REST policy's whole-query fallback search.
pub const FALLBACK_SEARCH_LIMIT: u32 = 5;

/// The classified purpose of a user query, with extracted parameters.
///
/// Produced by an [`IntentPolicy`](crate::classify::IntentPolicy) and
/// consumed once by the marketplace client and formatter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent {
    /// Look up stats for a single collection, identified by its slug.
    CollectionInfo { slug: String },
    /// Free-text asset search.
    Search {
        terms: String,
        collection_slug: Option<String>,
        chain: String,
        limit: u32,
    },
    /// Holdings lookup for a 0x-prefixed wallet address.
    WalletLookup { address: String },
    /// Trending collections, no parameters.
    Trending,
    /// No keyword matched; renders the canned help message.
    Unknown,
}

impl Intent {
    /// Build a search intent with default chain and limit.
    pub fn search(terms: impl Into<String>, limit: u32) -> Self {
        Intent::Search {
            terms: terms.into(),
            collection_slug: None,
            chain: DEFAULT_CHAIN.to_string(),
            limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_serializes_with_tag() {
        let intent = Intent::CollectionInfo {
            slug: "azuki".to_string(),
        };
        let json = serde_json::to_value(&intent).unwrap();
        assert_eq!(json["intent"], "collection_info");
        assert_eq!(json["slug"], "azuki");
    }

    #[test]
    fn test_search_helper_defaults() {
        let intent = Intent::search("cool cats", DEFAULT_SEARCH_LIMIT);
        match intent {
            Intent::Search {
                terms,
                collection_slug,
                chain,
                limit,
            } => {
                assert_eq!(terms, "cool cats");
                assert!(collection_slug.is_none());
                assert_eq!(chain, "ethereum");
                assert_eq!(limit, 20);
            }
            _ => panic!("expected search intent"),
        }
    }

    #[test]
    fn test_unknown_roundtrip() {
        let json = serde_json::to_string(&Intent::Unknown).unwrap();
        let back: Intent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Intent::Unknown);
    }
}
