use serde::{Deserialize, Serialize};

/// Prefix of the TOC title given to a URL that could not be converted
pub const FAILED_TITLE_PREFIX: &str = "(Failed)";

/// The converted form of one input URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// URL exactly as given in the input list
    pub url: String,

    /// Display title (page title, or the failure marker)
    pub title: String,

    /// In-document anchor slug
    pub anchor: String,

    /// Rendered Markdown body, or the error text on failure
    pub body: String,

    /// Whether fetching and conversion succeeded
    pub ok: bool,

    /// Captured error message on failure
    pub error: Option<String>,
}

impl ExtractionResult {
    /// Create a successful result
    pub fn success(url: String, title: String, anchor: String, body: String) -> Self {
        Self {
            url,
            title,
            anchor,
            body,
            ok: true,
            error: None,
        }
    }

    /// Create a failed result; the title becomes the failure marker plus the URL
    pub fn failure(url: String, anchor: String, error: String) -> Self {
        Self {
            title: failed_title(&url),
            url,
            anchor,
            body: error.clone(),
            ok: false,
            error: Some(error),
        }
    }

    /// Return a copy with a different anchor
    pub fn with_anchor(mut self, anchor: String) -> Self {
        self.anchor = anchor;
        self
    }
}

/// Title used for a URL that failed
pub fn failed_title(url: &str) -> String {
    format!("{} {}", FAILED_TITLE_PREFIX, url)
}

/// A table of contents line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    pub title: String,
    pub anchor: String,
}

impl From<&ExtractionResult> for TocEntry {
    fn from(result: &ExtractionResult) -> Self {
        Self {
            title: result.title.clone(),
            anchor: result.anchor.clone(),
        }
    }
}
