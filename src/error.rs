use thiserror::Error;

use crate::storage::StorageError;

#[derive(Error, Debug, Clone)]
pub enum ScrapeError {
    /// The session tokens were rejected while a network fetch was required.
    /// Recoverable by refreshing credentials and retrying, or skipping the race.
    #[error("authentication failed: {0}")]
    Authentication(String),
    /// Network failure or a non-success HTTP status. No snapshot is written.
    #[error("transport error: {0}")]
    Transport(String),
    /// Payload was structurally unparsable (missing keys or DOM anchors).
    #[error("extraction error: {0}")]
    Extraction(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("{0}")]
    Other(String),
}

impl From<StorageError> for ScrapeError {
    fn from(err: StorageError) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for ScrapeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Extraction(err.to_string())
    }
}

impl From<reqwest::Error> for ScrapeError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

impl From<std::io::Error> for ScrapeError {
    fn from(err: std::io::Error) -> Self {
        Self::Other(err.to_string())
    }
}

impl From<String> for ScrapeError {
    fn from(err: String) -> Self {
        Self::Other(err)
    }
}

impl From<&str> for ScrapeError {
    fn from(err: &str) -> Self {
        Self::Other(err.to_string())
    }
}
