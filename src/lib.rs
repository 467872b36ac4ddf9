pub mod anchor;
pub mod assembler;
pub mod config;
pub mod error;
pub mod fetchers;
pub mod filter;
pub mod parsers;
pub mod results;
pub mod utils;

// Re-export commonly used types for convenience
pub use assembler::{DocumentAssembler, MarkdownDocument};
pub use config::AssemblyConfig;
pub use error::ExtractError;
pub use fetchers::{Fetcher, HttpFetcher};
pub use results::{ExtractionResult, TocEntry};

use filter::NoiseFilter;
use parsers::Parser;
use std::sync::Arc;

/// Error type of [`Digest::generate`]; `Send` so the build can run as a spawned task
pub type DigestError = Box<dyn std::error::Error + Send + Sync>;

/// Main builder: turns a list of URLs into one Markdown document
pub struct Digest {
    urls: Vec<String>,
    config: AssemblyConfig,
    fetcher: Option<Arc<dyn Fetcher>>,
}

impl Digest {
    /// Create a new builder for the given URLs (kept in order, duplicates included)
    pub fn new(urls: Vec<String>) -> Self {
        Self {
            urls,
            config: AssemblyConfig::default(),
            fetcher: None,
        }
    }

    /// Create a builder from pasted text, one URL per line
    pub fn from_text(text: &str) -> Self {
        Self::new(utils::parse_url_list(text))
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn config(&self) -> &AssemblyConfig {
        &self.config
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: AssemblyConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a JSON file
    pub fn with_config_file(
        self,
        path: impl AsRef<std::path::Path>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let config = AssemblyConfig::from_file(path)?;
        Ok(self.with_config(config))
    }

    /// Load configuration from a JSON string
    pub fn with_config_str(self, config_str: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config = AssemblyConfig::from_json(config_str)?;
        Ok(self.with_config(config))
    }

    /// Set the document title
    pub fn with_doc_title(mut self, title: &str) -> Self {
        self.config.doc_title = title.to_string();
        self
    }

    /// Enable or disable the table of contents
    pub fn with_toc(mut self, include_toc: bool) -> Self {
        self.config.include_toc = include_toc;
        self
    }

    /// Enable or disable the timestamp and source lines
    pub fn with_metadata(mut self, include_metadata: bool) -> Self {
        self.config.include_metadata = include_metadata;
        self
    }

    /// Set the User-Agent sent by the default HTTP fetcher
    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.config.user_agent = user_agent.to_string();
        self
    }

    /// Set the per-request timeout of the default HTTP fetcher
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.config.timeout_secs = timeout_seconds;
        self
    }

    /// Set the maximum number of pages fetched at once
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.config.max_concurrency = max_concurrency;
        self
    }

    /// Use a custom fetcher instead of HTTP
    pub fn with_fetcher(mut self, fetcher: Arc<dyn Fetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Fetch and convert every URL and assemble the document.
    /// Per-URL failures become failure sections; errors here are setup errors only.
    pub async fn generate(self) -> Result<MarkdownDocument, DigestError> {
        let filter = NoiseFilter::new(&self.config.noise).map_err(|e| e.to_string())?;

        let fetcher: Arc<dyn Fetcher> = match self.fetcher {
            Some(fetcher) => fetcher,
            None => Arc::new(HttpFetcher::from_config(&self.config)?),
        };

        let assembler = DocumentAssembler::new(self.config, fetcher, Parser::new(filter));
        Ok(assembler.assemble(&self.urls).await)
    }
}
