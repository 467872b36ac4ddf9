use regex::Regex;
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::sync::LazyLock;

/// Title given to pages without any title metadata
pub const DEFAULT_PAGE_TITLE: &str = "Untitled";

static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("Title selector should be valid"));

static SOCIAL_TITLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"meta[property="og:title"], meta[name="twitter:title"]"#)
        .expect("Social title selector should be valid")
});

static NOT_SLUG_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9 ]").expect("Slug pattern should be valid"));

static SPACE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" +").expect("Space pattern should be valid"));

/// Best display title for a page: `<title>`, then the first social preview
/// title, then [`DEFAULT_PAGE_TITLE`]
pub fn page_title(doc: &Html) -> String {
    let title = doc
        .select(&TITLE_SELECTOR)
        .next()
        .map(|el| el.text().collect::<Vec<_>>().join(" "))
        .map(|text| text.split_whitespace().collect::<Vec<_>>().join(" "))
        .unwrap_or_default();
    if !title.trim().is_empty() {
        return title.trim().to_string();
    }

    let social = doc
        .select(&SOCIAL_TITLE_SELECTOR)
        .next()
        .and_then(|el| el.value().attr("content"))
        .unwrap_or("");
    if !social.trim().is_empty() {
        return social.trim().to_string();
    }

    DEFAULT_PAGE_TITLE.to_string()
}

/// Slug for an in-document link. `index` is the 1-based position of the page
/// and only matters when the title has no usable characters.
pub fn derive_anchor(title: &str, index: usize) -> String {
    let lower = title.to_lowercase();
    let kept = NOT_SLUG_CHARS.replace_all(&lower, "");
    let slug = SPACE_RUNS.replace_all(kept.trim(), "-").to_string();

    if slug.is_empty() {
        format!("section-{}", index)
    } else {
        slug
    }
}

/// Hands out anchors that are unique within one document.
/// A repeated slug gets `-2`, `-3`, ... in the order it is requested.
#[derive(Debug, Default)]
pub struct AnchorRegistry {
    used: HashSet<String>,
}

impl AnchorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn claim(&mut self, anchor: &str) -> String {
        if self.used.insert(anchor.to_string()) {
            return anchor.to_string();
        }

        let mut n = 2;
        loop {
            let candidate = format!("{}-{}", anchor, n);
            if self.used.insert(candidate.clone()) {
                ::log::debug!("Anchor '{}' already used, assigned '{}'", anchor, candidate);
                return candidate;
            }
            n += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_anchor() {
        assert_eq!(derive_anchor("Hello, World!", 1), "hello-world");
        assert_eq!(derive_anchor("Rust  --  Getting   Started", 1), "rust-getting-started");
        assert_eq!(derive_anchor("Version 2.0 (beta)", 1), "version-20-beta");
    }

    #[test]
    fn test_derive_anchor_fallback() {
        assert_eq!(derive_anchor("", 3), "section-3");
        assert_eq!(derive_anchor("!!! ???", 7), "section-7");
        assert_eq!(derive_anchor("日本語", 2), "section-2");
    }

    #[test]
    fn test_page_title_sources() {
        let doc = Html::parse_document(
            "<html><head><title>\n  Docs \n Home </title>\
             <meta property=\"og:title\" content=\"OG\"></head></html>",
        );
        assert_eq!(page_title(&doc), "Docs Home");

        let doc = Html::parse_document(
            "<html><head><title> </title>\
             <meta name=\"twitter:title\" content=\" Tweet Title \">\
             <meta property=\"og:title\" content=\"Later\"></head></html>",
        );
        assert_eq!(page_title(&doc), "Tweet Title");

        let doc = Html::parse_document("<p>no title</p>");
        assert_eq!(page_title(&doc), DEFAULT_PAGE_TITLE);
    }

    #[test]
    fn test_registry_makes_anchors_unique() {
        let mut registry = AnchorRegistry::new();
        assert_eq!(registry.claim("overview"), "overview");
        assert_eq!(registry.claim("overview"), "overview-2");
        assert_eq!(registry.claim("overview-3"), "overview-3");
        assert_eq!(registry.claim("overview"), "overview-4");
        assert_eq!(registry.claim("intro"), "intro");
    }
}
