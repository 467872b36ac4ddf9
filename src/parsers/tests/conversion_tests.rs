use crate::filter::NoiseFilter;
use crate::parsers::node::{ElementNode, PageNode};
use crate::parsers::{ConvertContext, block, select};
use scraper::Html;

/// Run selection and block conversion over an HTML snippet
fn convert_html(html: &str, url: &str) -> String {
    let filter = NoiseFilter::default();
    let doc = Html::parse_document(html);
    let root = select::select_content_root(&doc, &filter).unwrap();
    let view: ElementNode = PageNode::from_element(root, &filter);
    block::convert(&view, &ConvertContext::new(url))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_in_paragraph() {
        let out = convert_html(
            r#"<body><p>Go <a href="https://x.com/a">Click</a> now</p></body>"#,
            "https://x.com/",
        );
        assert!(out.contains("[Click](https://x.com/a)"));
    }

    #[test]
    fn test_link_without_text() {
        let out = convert_html(
            r#"<body><p><a href="https://x.com/a"></a></p></body>"#,
            "https://x.com/",
        );
        assert_eq!(out, "[https://x.com/a](https://x.com/a)");
    }

    #[test]
    fn test_unordered_list_in_order() {
        let out = convert_html("<body><ul><li>One</li><li>Two</li></ul></body>", "https://x.com/");
        assert_eq!(out, "- One\n- Two");
    }

    #[test]
    fn test_nested_list_items_are_not_flattened_into_parent_list() {
        let out = convert_html(
            "<body><ul><li>Outer<ul><li>Inner</li></ul></li><li>Next</li></ul></body>",
            "https://x.com/",
        );
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("- Outer"));
        assert_eq!(lines[1], "- Next");
    }

    #[test]
    fn test_only_direct_children_are_blocks() {
        // The h2 sits inside a wrapper, so only its paragraphs are kept
        let out = convert_html(
            "<body><h1>Top</h1><div><h2>Hidden</h2><p>Shown</p></div><p>Last</p></body>",
            "https://x.com/",
        );
        assert_eq!(out, "# Top\n\nShown\n\nLast");
    }

    #[test]
    fn test_line_breaks_stay_inline() {
        let out = convert_html("<body><p>a<br>b</p></body>", "https://x.com/");
        assert_eq!(out, "a<br>b");
    }

    #[test]
    fn test_heading_text_is_escaped() {
        let out = convert_html("<body><h3>C# [draft]</h3></body>", "https://x.com/");
        assert_eq!(out, r"### C\# \[draft\]");
    }

    #[test]
    fn test_preformatted_keeps_whitespace_and_specials() {
        let out = convert_html(
            "<body><pre>  a_b  *c*\n    d</pre></body>",
            "https://x.com/",
        );
        assert_eq!(out, "````\n  a_b  *c*\n    d\n````");
    }

    #[test]
    fn test_table_is_replaced() {
        let out = convert_html(
            "<body><p>Before</p><table><tr><td>1</td></tr></table><p>After</p></body>",
            "https://x.com/",
        );
        assert_eq!(
            out,
            format!("Before\n\n{}\n\nAfter", block::TABLE_PLACEHOLDER)
        );
    }
}
