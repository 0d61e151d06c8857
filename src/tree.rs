//! Immutable tree model.
//!
//! The pipeline never operates on the live parser document. Instead, the
//! parsed `dom_query::Document` is snapshotted once into an owned
//! [`TreeNode`] value tree, and every later stage reads that snapshot.
//! Noise filtering produces a pruned clone; nothing mutates in place.

use dom_query::Document;

use crate::error::{Error, Result};

/// Maximum nesting accepted while snapshotting the parsed document.
/// Subtrees below this depth are dropped rather than risking a stack
/// overflow on pathological input.
const MAX_BUILD_DEPTH: usize = 512;

/// An element node: tag, attributes, and ordered children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementNode {
    /// Lowercase tag name.
    pub tag: String,

    /// Attributes in document order, names lowercased.
    pub attributes: Vec<(String, String)>,

    /// Child nodes in document order, owned exclusively by this element.
    pub children: Vec<TreeNode>,
}

/// A single node of the snapshot tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    /// An element with tag, attributes, and children.
    Element(ElementNode),

    /// A text node with its verbatim character data.
    Text(String),
}

impl ElementNode {
    /// Look up an attribute value by (lowercase) name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Combined lowercase `class` + `id` string for pattern matching.
    #[must_use]
    pub fn class_id(&self) -> String {
        let class = self.attr("class").unwrap_or_default();
        let id = self.attr("id").unwrap_or_default();
        format!("{class} {id}").to_lowercase()
    }
}

impl TreeNode {
    /// Parse an HTML string and snapshot it into a tree.
    ///
    /// Returns [`Error::EmptyDocument`] only when the parser yields no
    /// `html` element at all; the parser normally synthesizes one even
    /// for fragments.
    pub fn from_html(html: &str) -> Result<TreeNode> {
        let document = Document::from(html);
        Self::from_document(&document)
    }

    /// Snapshot an already-parsed document into a tree.
    pub fn from_document(document: &Document) -> Result<TreeNode> {
        let root_sel = document.select("html");
        let root = root_sel.nodes().first().ok_or(Error::EmptyDocument)?;
        build_node(root, 0).ok_or(Error::EmptyDocument)
    }

    /// The element behind this node, if it is one.
    #[must_use]
    pub fn as_element(&self) -> Option<&ElementNode> {
        match self {
            TreeNode::Element(el) => Some(el),
            TreeNode::Text(_) => None,
        }
    }

    /// Lowercase tag name, empty for text nodes.
    #[must_use]
    pub fn tag(&self) -> &str {
        self.as_element().map_or("", |el| el.tag.as_str())
    }

    /// Concatenated text of this node and all descendants, document order.
    ///
    /// Raw character data; callers normalize whitespace where needed.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                TreeNode::Text(text) => out.push_str(text),
                TreeNode::Element(el) => {
                    for child in el.children.iter().rev() {
                        stack.push(child);
                    }
                }
            }
        }
        out
    }

    /// Iterate this node and all descendants in document order.
    ///
    /// Explicit-stack traversal; safe on arbitrarily deep trees.
    #[must_use]
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Count descendant elements whose tag is in `tags`.
    #[must_use]
    pub fn count_tags(&self, tags: &[&str]) -> usize {
        self.descendants()
            .filter(|n| {
                n.as_element()
                    .is_some_and(|el| tags.contains(&el.tag.as_str()))
            })
            .count()
    }

    /// First descendant element (document order) matching the predicate.
    #[must_use]
    pub fn find_element<F>(&self, mut pred: F) -> Option<&TreeNode>
    where
        F: FnMut(&ElementNode) -> bool,
    {
        self.descendants()
            .find(|n| n.as_element().is_some_and(|el| pred(el)))
    }
}

/// Document-order iterator over a subtree. See [`TreeNode::descendants`].
pub struct Descendants<'a> {
    stack: Vec<&'a TreeNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let TreeNode::Element(el) = node {
            for child in el.children.iter().rev() {
                self.stack.push(child);
            }
        }
        Some(node)
    }
}

fn build_node(node: &dom_query::NodeRef, depth: usize) -> Option<TreeNode> {
    if depth > MAX_BUILD_DEPTH {
        return None;
    }

    if node.is_text() {
        return Some(TreeNode::Text(node.text().to_string()));
    }

    if !node.is_element() {
        return None;
    }

    let tag = node.node_name()?.to_lowercase();
    let attributes = node
        .attrs()
        .iter()
        .map(|attr| {
            (
                attr.name.local.to_string().to_lowercase(),
                attr.value.to_string(),
            )
        })
        .collect();

    let mut children = Vec::new();
    for child in node.children() {
        if let Some(built) = build_node(&child, depth + 1) {
            children.push(built);
        }
    }

    Some(TreeNode::Element(ElementNode {
        tag,
        attributes,
        children,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_html_builds_element_tree() {
        let tree = TreeNode::from_html("<div id='a'><p>Hello <b>world</b></p></div>")
            .unwrap_or_else(|e| panic!("parse failed: {e}"));

        let div = tree
            .find_element(|el| el.tag == "div")
            .and_then(TreeNode::as_element)
            .unwrap_or_else(|| panic!("no div"));
        assert_eq!(div.attr("id"), Some("a"));
    }

    #[test]
    fn text_content_concatenates_in_order() {
        let tree = TreeNode::from_html("<p>Hello <b>bold</b> world</p>")
            .unwrap_or_else(|e| panic!("parse failed: {e}"));
        let p = tree
            .find_element(|el| el.tag == "p")
            .unwrap_or_else(|| panic!("no p"));
        assert_eq!(p.text_content(), "Hello bold world");
    }

    #[test]
    fn count_tags_tallies_descendants() {
        let tree = TreeNode::from_html("<div><p>a</p><p>b</p><h2>t</h2></div>")
            .unwrap_or_else(|e| panic!("parse failed: {e}"));
        assert_eq!(tree.count_tags(&["p"]), 2);
        assert_eq!(tree.count_tags(&["h1", "h2"]), 1);
    }

    #[test]
    fn descendants_preserve_document_order() {
        let tree = TreeNode::from_html("<div><h1>one</h1><p>two</p><ul><li>three</li></ul></div>")
            .unwrap_or_else(|e| panic!("parse failed: {e}"));
        let tags: Vec<&str> = tree
            .descendants()
            .filter_map(TreeNode::as_element)
            .map(|el| el.tag.as_str())
            .filter(|t| matches!(*t, "h1" | "p" | "ul" | "li"))
            .collect();
        assert_eq!(tags, vec!["h1", "p", "ul", "li"]);
    }

    #[test]
    fn class_id_combines_lowercased() {
        let tree = TreeNode::from_html("<div class='Post-Content' id='Main'>x</div>")
            .unwrap_or_else(|e| panic!("parse failed: {e}"));
        let div = tree
            .find_element(|el| el.tag == "div")
            .and_then(TreeNode::as_element)
            .unwrap_or_else(|| panic!("no div"));
        assert!(div.class_id().contains("post-content"));
        assert!(div.class_id().contains("main"));
    }
}
