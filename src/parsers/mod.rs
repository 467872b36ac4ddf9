pub mod block;
pub mod escape;
pub mod inline;
pub mod node;
pub mod select;

#[cfg(test)]
mod tests;

use crate::anchor;
use crate::error::ExtractError;
use crate::filter::NoiseFilter;
use node::PageNode;
use scraper::Html;
use url::Url;

/// Body used when a page has no element to take content from
pub const CONTENT_NOT_FOUND: &str = "(content not found)";

/// What the converters need to know about the page being rendered
#[derive(Debug, Clone)]
pub struct ConvertContext {
    base: Option<Url>,
}

impl ConvertContext {
    pub fn new(page_url: &str) -> Self {
        Self {
            base: Url::parse(page_url).ok(),
        }
    }

    /// Resolve a link target against the page URL
    pub fn resolve(&self, href: &str) -> Option<String> {
        let href = href.trim();
        if href.is_empty() {
            return None;
        }
        let resolved = match &self.base {
            Some(base) => base.join(href),
            None => Url::parse(href),
        };
        resolved.ok().map(|u| u.to_string())
    }
}

/// Result of converting one HTML page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResult {
    /// Page title (from metadata, or the default)
    pub title: String,
    /// Markdown of the page's main content
    pub content: String,
}

/// Converts fetched HTML into a title and Markdown body
#[derive(Debug, Default)]
pub struct Parser {
    filter: NoiseFilter,
}

impl Parser {
    pub fn new(filter: NoiseFilter) -> Self {
        Self { filter }
    }

    /// Parse `html` fetched from `url`. Output depends only on the inputs.
    pub fn parse(&self, html: &str, url: &str) -> Result<ParseResult, ExtractError> {
        if html.trim().is_empty() {
            return Err(ExtractError::Parse("empty document".to_string()));
        }

        let doc = Html::parse_document(html);
        let title = anchor::page_title(&doc);

        let content = match self.main_content(&doc, url) {
            Ok(content) => content,
            Err(ExtractError::ContentNotFound) => CONTENT_NOT_FOUND.to_string(),
            Err(e) => return Err(e),
        };

        Ok(ParseResult { title, content })
    }

    fn main_content(&self, doc: &Html, url: &str) -> Result<String, ExtractError> {
        let root = select::select_content_root(doc, &self.filter)
            .ok_or(ExtractError::ContentNotFound)?;
        let view = PageNode::from_element(root, &self.filter);
        Ok(block::convert(&view, &ConvertContext::new(url)))
    }
}
