use crate::parsers::ConvertContext;
use crate::parsers::escape::{escape_code_span, escape_markdown};
use crate::parsers::node::{ElementNode, PageNode};
use crate::utils::collapse_whitespace;

/// Renders one inline element, given the context of the page it came from
pub type InlineRenderer = fn(&ElementNode, &ConvertContext) -> String;

/// Tags with their own inline markup. Tags not listed are transparent.
pub static INLINE_RULES: &[(&str, InlineRenderer)] = &[
    ("a", render_link),
    ("strong", render_bold),
    ("b", render_bold),
    ("em", render_italic),
    ("i", render_italic),
    ("code", render_code),
    ("br", render_line_break),
];

/// Look up the inline renderer for a tag
pub fn inline_renderer(tag: &str) -> Option<InlineRenderer> {
    INLINE_RULES
        .iter()
        .find(|(name, _)| *name == tag)
        .map(|(_, renderer)| *renderer)
}

/// Convert the children of `element` to inline Markdown, trimmed
pub fn convert(element: &ElementNode, ctx: &ConvertContext) -> String {
    let mut out = String::new();
    for child in &element.children {
        match child {
            PageNode::Text(text) => out.push_str(&escape_markdown(&collapse_whitespace(text))),
            PageNode::Element(el) => match inline_renderer(&el.tag) {
                Some(renderer) => out.push_str(&renderer(el, ctx)),
                None => out.push_str(&convert(el, ctx)),
            },
        }
    }
    out.trim().to_string()
}

fn render_link(element: &ElementNode, ctx: &ConvertContext) -> String {
    let raw_href = element.attr("href").unwrap_or("");
    let href = ctx
        .resolve(raw_href)
        .unwrap_or_else(|| raw_href.to_string());

    let text = element.normalized_text();
    let display = if text.is_empty() { href.as_str() } else { text.as_str() };

    format!("[{}]({})", escape_markdown(display), href)
}

fn render_bold(element: &ElementNode, ctx: &ConvertContext) -> String {
    format!("**{}**", convert(element, ctx))
}

fn render_italic(element: &ElementNode, ctx: &ConvertContext) -> String {
    format!("_{}_", convert(element, ctx))
}

fn render_code(element: &ElementNode, _ctx: &ConvertContext) -> String {
    format!("`{}`", escape_code_span(&element.normalized_text()))
}

fn render_line_break(_element: &ElementNode, _ctx: &ConvertContext) -> String {
    "<br>".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> ConvertContext {
        ConvertContext::new("https://x.com/docs/page")
    }

    #[test]
    fn test_link_with_text() {
        let p = ElementNode::new("p")
            .with_text("See ")
            .with_child(ElementNode::new("a").with_attr("href", "https://x.com/a").with_text("Click"));
        assert_eq!(convert(&p, &ctx()), "See [Click](https://x.com/a)");
    }

    #[test]
    fn test_link_without_text_uses_url() {
        let p = ElementNode::new("p")
            .with_child(ElementNode::new("a").with_attr("href", "https://x.com/a").with_text("  "));
        assert_eq!(convert(&p, &ctx()), "[https://x.com/a](https://x.com/a)");
    }

    #[test]
    fn test_relative_link_is_resolved() {
        let p = ElementNode::new("p")
            .with_child(ElementNode::new("a").with_attr("href", "../api").with_text("API"));
        assert_eq!(convert(&p, &ctx()), "[API](https://x.com/api)");
    }

    #[test]
    fn test_unresolvable_link_keeps_raw_href() {
        let ctx = ConvertContext::new("not a url");
        let p = ElementNode::new("p")
            .with_child(ElementNode::new("a").with_attr("href", "relative/path").with_text("Rel"));
        assert_eq!(convert(&p, &ctx), "[Rel](relative/path)");
    }

    #[test]
    fn test_emphasis_nesting() {
        let p = ElementNode::new("p")
            .with_child(
                ElementNode::new("strong")
                    .with_text("bold ")
                    .with_child(ElementNode::new("em").with_text("both")),
            )
            .with_text(" and ")
            .with_child(ElementNode::new("i").with_text("italic"));
        assert_eq!(convert(&p, &ctx()), "**bold _both_** and _italic_");
    }

    #[test]
    fn test_text_is_escaped_and_collapsed() {
        let p = ElementNode::new("p").with_text("  snake_case   and\n*stars*  ");
        assert_eq!(convert(&p, &ctx()), r"snake\_case and \*stars\*");
    }

    #[test]
    fn test_code_span_escapes_only_backticks() {
        // Other markup characters stay raw inside code spans
        let p = ElementNode::new("p")
            .with_child(ElementNode::new("code").with_text("let `x` = a_b * 2;"));
        assert_eq!(convert(&p, &ctx()), r"`let \`x\` = a_b * 2;`");
    }

    #[test]
    fn test_line_break_and_transparent_wrappers() {
        let p = ElementNode::new("p")
            .with_text("one")
            .with_child(ElementNode::new("br"))
            .with_child(ElementNode::new("span").with_text("two"));
        assert_eq!(convert(&p, &ctx()), "one<br>two");
    }

    #[test]
    fn test_rule_table_lookup() {
        assert!(inline_renderer("a").is_some());
        assert!(inline_renderer("b").is_some());
        assert!(inline_renderer("span").is_none());
    }
}
