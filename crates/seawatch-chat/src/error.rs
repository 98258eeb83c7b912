//! Error types for the classification stage.

use thiserror::Error;

/// Errors from intent classification.
///
/// `MissingParameter` is not a hard failure: the prompt is sent back to the
/// user verbatim so they can rephrase the query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    #[error("{prompt}")]
    MissingParameter { prompt: String },
}

impl ClassifyError {
    /// A collection keyword matched but no collection could be resolved.
    pub fn missing_collection() -> Self {
        ClassifyError::MissingParameter {
            prompt: "Please specify which collection you'd like to know about \
                     (e.g., 'What's the floor price of Bored Ape Yacht Club?')"
                .to_string(),
        }
    }

    /// A search keyword matched but no terms survived stop-word removal.
    pub fn missing_search_terms() -> Self {
        ClassifyError::MissingParameter {
            prompt: "Please specify what you'd like to search for \
                     (e.g., 'Search for Bored Ape NFTs')"
                .to_string(),
        }
    }

    /// A wallet keyword matched but no 0x address was found.
    pub fn missing_wallet_address() -> Self {
        ClassifyError::MissingParameter {
            prompt: "Please provide a wallet address to analyze \
                     (e.g., 'Show me wallet 0x1234...')"
                .to_string(),
        }
    }

    /// The user-facing prompting message.
    pub fn prompt(&self) -> &str {
        match self {
            ClassifyError::MissingParameter { prompt } => prompt,
        }
    }
}
