use thiserror::Error;

/// Top-level error type for the Seawatch system.
///
/// Each variant wraps a subsystem-specific error. Subsystem crates define
/// their own error types and implement `From<SubsystemError> for
/// SeawatchError` so that the `?` operator works across crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SeawatchError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Classifier error: {0}")]
    Classify(String),

    #[error("Marketplace error: {0}")]
    Market(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for SeawatchError {
    fn from(err: toml::de::Error) -> Self {
        SeawatchError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for SeawatchError {
    fn from(err: toml::ser::Error) -> Self {
        SeawatchError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for SeawatchError {
    fn from(err: serde_json::Error) -> Self {
        SeawatchError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Seawatch operations.
pub type Result<T> = std::result::Result<T, SeawatchError>;
