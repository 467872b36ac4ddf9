use crate::filter::NoiseFilter;
use crate::utils::collapse_whitespace;
use ego_tree::iter::Edge;
use scraper::{ElementRef, Node};
use std::collections::BTreeMap;

/// Deepest element level kept in the view. Subtrees below it are flattened
/// into a single text node so every walk over the view stays shallow.
pub const MAX_DEPTH: usize = 128;

/// Owned, noise-free copy of a DOM subtree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageNode {
    Text(String),
    Element(ElementNode),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementNode {
    /// Lowercase tag name
    pub tag: String,
    pub attrs: BTreeMap<String, String>,
    pub children: Vec<PageNode>,
}

impl PageNode {
    pub fn text(text: &str) -> Self {
        PageNode::Text(text.to_string())
    }

    /// Build the filtered view of `element`. Noise children are skipped
    /// together with their subtrees; comments and other node kinds are dropped.
    /// Elements nested deeper than [`MAX_DEPTH`] keep only their text.
    pub fn from_element(element: ElementRef, filter: &NoiseFilter) -> ElementNode {
        Self::build_element(element, filter, 0)
    }

    fn build_element(element: ElementRef, filter: &NoiseFilter, depth: usize) -> ElementNode {
        let value = element.value();
        let attrs = value
            .attrs()
            .map(|(name, val)| (name.to_string(), val.to_string()))
            .collect();

        let mut children = Vec::new();
        for child in element.children() {
            match child.value() {
                Node::Text(text) => children.push(PageNode::Text(text.to_string())),
                Node::Element(_) => {
                    if let Some(child_el) = ElementRef::wrap(child) {
                        if filter.is_noise(&child_el) {
                            continue;
                        }
                        if depth + 1 >= MAX_DEPTH {
                            let text = flattened_text(child_el, filter);
                            if !text.is_empty() {
                                children.push(PageNode::Text(text));
                            }
                        } else {
                            children.push(PageNode::Element(Self::build_element(
                                child_el,
                                filter,
                                depth + 1,
                            )));
                        }
                    }
                }
                _ => {}
            }
        }

        ElementNode {
            tag: value.name().to_ascii_lowercase(),
            attrs,
            children,
        }
    }

    fn push_raw_text(&self, out: &mut String) {
        match self {
            PageNode::Text(text) => out.push_str(text),
            PageNode::Element(el) => {
                for child in &el.children {
                    child.push_raw_text(out);
                }
            }
        }
    }
}

/// Text of a subtree without noise, collected without recursion
fn flattened_text(element: ElementRef, filter: &NoiseFilter) -> String {
    ::log::debug!("Flattening <{}> nested past depth {}", element.value().name(), MAX_DEPTH);

    let mut out = String::new();
    let mut noise_depth = 0usize;
    for edge in element.traverse() {
        match edge {
            Edge::Open(node) => match ElementRef::wrap(node) {
                Some(el) => {
                    if noise_depth > 0 || filter.is_noise(&el) {
                        noise_depth += 1;
                    }
                }
                None => {
                    if let (0, Node::Text(text)) = (noise_depth, node.value()) {
                        out.push_str(text);
                    }
                }
            },
            Edge::Close(node) => {
                if noise_depth > 0 && node.value().is_element() {
                    noise_depth -= 1;
                }
            }
        }
    }
    out
}

impl ElementNode {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.children.push(PageNode::text(text));
        self
    }

    pub fn with_child(mut self, child: ElementNode) -> Self {
        self.children.push(PageNode::Element(child));
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// All descendant text, untouched
    pub fn raw_text(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.push_raw_text(&mut out);
        }
        out
    }

    /// Descendant text with whitespace collapsed and trimmed
    pub fn normalized_text(&self) -> String {
        collapse_whitespace(&self.raw_text()).trim().to_string()
    }

    /// Direct element children, in document order
    pub fn element_children(&self) -> impl Iterator<Item = &ElementNode> {
        self.children.iter().filter_map(|child| match child {
            PageNode::Element(el) => Some(el),
            PageNode::Text(_) => None,
        })
    }

    /// Every descendant element with the given tag, pre-order
    pub fn descendants_by_tag<'a>(&'a self, tag: &str) -> Vec<&'a ElementNode> {
        let mut found = Vec::new();
        self.collect_by_tag(tag, &mut found);
        found
    }

    fn collect_by_tag<'a>(&'a self, tag: &str, found: &mut Vec<&'a ElementNode>) {
        for child in self.element_children() {
            if child.tag == tag {
                found.push(child);
            }
            child.collect_by_tag(tag, found);
        }
    }
}
