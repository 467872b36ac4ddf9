use thiserror::Error;

/// Per-URL failure. Never aborts a batch; the message ends up in the page's section.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// Network error, timeout, or non-success HTTP status
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// Empty or unusable document
    #[error("parse failed: {0}")]
    Parse(String),

    /// No element could serve as the content root
    #[error("content not found")]
    ContentNotFound,
}

impl From<reqwest::Error> for ExtractError {
    fn from(err: reqwest::Error) -> Self {
        ExtractError::Fetch(err.to_string())
    }
}
