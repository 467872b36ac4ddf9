use crate::filter::NoiseFilter;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

/// Content-root candidates, most specific first
pub const CONTENT_ROOT_CANDIDATES: &[&str] = &[
    "main .theme-doc-markdown",
    ".theme-doc-markdown",
    "article.markdown",
    ".markdown",
    ".md-content",
    ".md-typeset",
    "[role=main]",
    "main",
    "body",
];

static CANDIDATE_SELECTORS: LazyLock<Vec<(&'static str, Selector)>> = LazyLock::new(|| {
    CONTENT_ROOT_CANDIDATES
        .iter()
        .map(|css| (*css, Selector::parse(css).expect("Candidate selectors should be valid")))
        .collect()
});

/// Pick the main-content element of a page: the first candidate, in list
/// order, that is neither noise nor inside noise.
pub fn select_content_root<'a>(doc: &'a Html, filter: &NoiseFilter) -> Option<ElementRef<'a>> {
    for (css, selector) in CANDIDATE_SELECTORS.iter() {
        if let Some(found) = doc.select(selector).find(|el| !filter.is_within_noise(el)) {
            ::log::debug!("Content root matched '{}'", css);
            return Some(found);
        }
    }
    ::log::debug!("No content root found");
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root_id(html: &str) -> Option<String> {
        let doc = Html::parse_document(html);
        select_content_root(&doc, &NoiseFilter::default())
            .map(|el| el.value().attr("id").unwrap_or(el.value().name()).to_string())
    }

    #[test]
    fn test_priority_order() {
        let html = r#"<body>
            <main id="main"><div class="markdown" id="md"><p>x</p></div></main>
            <div class="theme-doc-markdown" id="docusaurus"><p>y</p></div>
        </body>"#;
        assert_eq!(root_id(html).as_deref(), Some("docusaurus"));
    }

    #[test]
    fn test_scoped_candidate_wins_over_unscoped() {
        let html = r#"<body>
            <div class="theme-doc-markdown" id="outside"></div>
            <main><div class="theme-doc-markdown" id="inside"></div></main>
        </body>"#;
        assert_eq!(root_id(html).as_deref(), Some("inside"));
    }

    #[test]
    fn test_role_main_before_main() {
        let html = r#"<body><main id="plain"></main><div role="main" id="landmark"></div></body>"#;
        assert_eq!(root_id(html).as_deref(), Some("landmark"));
    }

    #[test]
    fn test_candidate_inside_noise_is_skipped() {
        let html = r#"<body>
            <aside><div class="markdown" id="in-aside"></div></aside>
            <div class="markdown" id="real"></div>
        </body>"#;
        assert_eq!(root_id(html).as_deref(), Some("real"));
    }

    #[test]
    fn test_falls_back_to_body() {
        assert_eq!(root_id("<p>Just text</p>").as_deref(), Some("body"));
    }
}
