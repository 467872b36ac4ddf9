use crate::config::AssemblyConfig;
use crate::error::ExtractError;
use crate::fetchers::Fetcher;
use async_trait::async_trait;
use reqwest::redirect::Policy;
use std::time::Duration;
use url::Url;

/// Maximum redirects followed for one request
const MAX_REDIRECTS: usize = 10;

/// Fetches pages over HTTP(S) with one shared client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .build()?;

        Ok(Self { client })
    }

    pub fn from_config(config: &AssemblyConfig) -> Result<Self, reqwest::Error> {
        Self::new(&config.user_agent, config.timeout())
    }
}

/// Reject anything that is not an absolute http(s) URL before touching the network
fn validate_url(url: &str) -> Result<Url, ExtractError> {
    let parsed = Url::parse(url).map_err(|e| ExtractError::Fetch(format!("invalid URL: {}", e)))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(ExtractError::Fetch(format!("unsupported scheme '{}'", other))),
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, ExtractError> {
        let target = validate_url(url)?;
        let start = std::time::Instant::now();
        ::log::debug!("GET {}", target);

        let response = self.client.get(target).send().await?.error_for_status()?;
        let status = response.status();
        let body = response.text().await?;

        ::log::debug!(
            "Fetched {} ({}, {} bytes) in {:.2} seconds",
            url,
            status,
            body.len(),
            start.elapsed().as_secs_f64()
        );

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("https://example.com/page").is_ok());
        assert!(validate_url("http://example.com").is_ok());
        assert!(matches!(
            validate_url("example.com/page"),
            Err(ExtractError::Fetch(_))
        ));
        assert!(matches!(
            validate_url("ftp://example.com/file"),
            Err(ExtractError::Fetch(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_url_fails_without_network() {
        let fetcher = HttpFetcher::from_config(&AssemblyConfig::default()).unwrap();
        let err = fetcher.fetch("not a url").await.unwrap_err();
        assert!(err.to_string().starts_with("fetch failed: invalid URL"));
    }
}
