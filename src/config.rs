use crate::filter::NoiseFilterConfig;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

/// Document title used when the configured one is blank
pub const FALLBACK_DOC_TITLE: &str = "Sources";

/// Settings for one document build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyConfig {
    /// Title of the generated document
    #[serde(default = "default_doc_title")]
    pub doc_title: String,

    /// Emit the generation timestamp and per-section source lines
    #[serde(default = "default_true")]
    pub include_metadata: bool,

    /// Emit a table of contents
    #[serde(default = "default_true")]
    pub include_toc: bool,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Timeout for each fetch, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of pages fetched at the same time
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Elements dropped before conversion
    #[serde(default)]
    pub noise: NoiseFilterConfig,
}

/// Default value for doc_title
fn default_doc_title() -> String {
    "Sources for the Assistant".to_string()
}

fn default_true() -> bool {
    true
}

/// Default value for user_agent
fn default_user_agent() -> String {
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 Chrome/124 Safari/537.36".to_string()
}

/// Default value for timeout_secs
fn default_timeout_secs() -> u64 {
    20
}

/// Default value for max_concurrency
fn default_max_concurrency() -> usize {
    4
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            doc_title: default_doc_title(),
            include_metadata: true,
            include_toc: true,
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            max_concurrency: default_max_concurrency(),
            noise: NoiseFilterConfig::default(),
        }
    }
}

impl AssemblyConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, Box<dyn Error>> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Trimmed document title, or [`FALLBACK_DOC_TITLE`] when blank
    pub fn effective_title(&self) -> &str {
        let title = self.doc_title.trim();
        if title.is_empty() {
            FALLBACK_DOC_TITLE
        } else {
            title
        }
    }

    /// Per-fetch timeout, never shorter than one second
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}
