use crate::parsers::ConvertContext;
use crate::parsers::escape::escape_markdown;
use crate::parsers::inline;
use crate::parsers::node::ElementNode;

/// Renders one block element. `None` means the block produced no output.
pub type BlockRenderer = fn(&ElementNode, &ConvertContext) -> Option<String>;

/// Note emitted in place of a table
pub const TABLE_PLACEHOLDER: &str = "> [Table omitted in simple conversion]";

/// Fence used around preformatted blocks
const CODE_FENCE: &str = "````";

/// Block-level tags and how each is rendered
pub static BLOCK_RULES: &[(&str, BlockRenderer)] = &[
    ("h1", render_heading),
    ("h2", render_heading),
    ("h3", render_heading),
    ("h4", render_heading),
    ("h5", render_heading),
    ("h6", render_heading),
    ("p", render_paragraph),
    ("ul", render_unordered_list),
    ("ol", render_ordered_list),
    ("pre", render_preformatted),
    ("table", render_table),
];

/// Look up the block renderer for a tag
pub fn block_renderer(tag: &str) -> Option<BlockRenderer> {
    BLOCK_RULES
        .iter()
        .find(|(name, _)| *name == tag)
        .map(|(_, renderer)| *renderer)
}

/// Convert the direct children of `root` into Markdown blocks separated by blank lines
pub fn convert(root: &ElementNode, ctx: &ConvertContext) -> String {
    let blocks: Vec<String> = root
        .element_children()
        .filter_map(|child| match block_renderer(&child.tag) {
            Some(renderer) => renderer(child, ctx),
            None => render_nested_paragraphs(child, ctx),
        })
        .filter(|block| !block.trim().is_empty())
        .collect();

    ::log::debug!("Converted {} blocks from <{}>", blocks.len(), root.tag);

    blocks.join("\n\n").trim().to_string()
}

fn render_heading(element: &ElementNode, _ctx: &ConvertContext) -> Option<String> {
    let level = element.tag.strip_prefix('h')?.parse::<usize>().ok()?;
    let text = element.normalized_text();
    if text.is_empty() {
        return None;
    }
    Some(format!("{} {}", "#".repeat(level), escape_markdown(&text)))
}

fn render_paragraph(element: &ElementNode, ctx: &ConvertContext) -> Option<String> {
    Some(inline::convert(element, ctx))
}

fn render_unordered_list(element: &ElementNode, ctx: &ConvertContext) -> Option<String> {
    render_list(element, ctx, |_| "- ".to_string())
}

fn render_ordered_list(element: &ElementNode, ctx: &ConvertContext) -> Option<String> {
    render_list(element, ctx, |n| format!("{}. ", n))
}

fn render_list(
    element: &ElementNode,
    ctx: &ConvertContext,
    marker: impl Fn(usize) -> String,
) -> Option<String> {
    let lines: Vec<String> = element
        .element_children()
        .filter(|child| child.tag == "li")
        .enumerate()
        .map(|(i, item)| format!("{}{}", marker(i + 1), inline::convert(item, ctx)))
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

fn render_preformatted(element: &ElementNode, _ctx: &ConvertContext) -> Option<String> {
    let raw = element.raw_text();
    let code = raw.trim_matches('\n');
    Some(format!("{}\n{}\n{}", CODE_FENCE, code, CODE_FENCE))
}

fn render_table(_element: &ElementNode, _ctx: &ConvertContext) -> Option<String> {
    Some(TABLE_PLACEHOLDER.to_string())
}

/// Fallback for unknown containers: emit their descendant paragraphs only
fn render_nested_paragraphs(element: &ElementNode, ctx: &ConvertContext) -> Option<String> {
    let paragraphs: Vec<String> = element
        .descendants_by_tag("p")
        .into_iter()
        .map(|p| inline::convert(p, ctx))
        .filter(|p| !p.is_empty())
        .collect();

    if paragraphs.is_empty() {
        None
    } else {
        Some(paragraphs.join("\n\n"))
    }
}
