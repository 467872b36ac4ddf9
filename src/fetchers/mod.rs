pub mod http;

use crate::error::ExtractError;
use async_trait::async_trait;

pub use http::HttpFetcher;

/// Source of page HTML. Transport settings (user agent, timeout, redirects)
/// belong to the implementation; each call is a single attempt.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch the HTML of `url`
    async fn fetch(&self, url: &str) -> Result<String, ExtractError>;
}
