//! Structural noise filter.
//!
//! Produces a pruned clone of the located content root with navigation,
//! ads, sidebars, widgets, comments, and script/style subtrees removed.
//! Purely structural: the filter matches tags and class/id patterns, never
//! text relevance, and runs exactly once before segmentation.

use crate::patterns::{NOISE_CLASS, NOISE_TAGS, VIDEO_EMBED_HOSTS};
use crate::tree::{ElementNode, TreeNode};

/// Clone `node` with all noise subtrees removed.
///
/// The input tree is untouched; exclusion happens in the clone.
#[must_use]
pub fn filter(node: &TreeNode) -> TreeNode {
    match node {
        TreeNode::Text(text) => TreeNode::Text(text.clone()),
        TreeNode::Element(el) => TreeNode::Element(filter_element(el)),
    }
}

fn filter_element(el: &ElementNode) -> ElementNode {
    let children = el
        .children
        .iter()
        .filter(|child| !is_noise(child))
        .map(filter_child)
        .collect();

    ElementNode {
        tag: el.tag.clone(),
        attributes: el.attributes.clone(),
        children,
    }
}

fn filter_child(child: &TreeNode) -> TreeNode {
    match child {
        TreeNode::Text(text) => TreeNode::Text(text.clone()),
        TreeNode::Element(el) => TreeNode::Element(filter_element(el)),
    }
}

/// Whether a node is excluded outright.
fn is_noise(node: &TreeNode) -> bool {
    let Some(el) = node.as_element() else {
        return false;
    };

    if NOISE_TAGS.contains(&el.tag.as_str()) {
        return true;
    }

    // Iframes are noise unless they embed a recognized video host.
    if el.tag == "iframe" {
        return !is_video_embed(el);
    }

    NOISE_CLASS.is_match(&el.class_id())
}

/// Whether an iframe points at a recognized video host.
pub(crate) fn is_video_embed(el: &ElementNode) -> bool {
    el.attr("src")
        .is_some_and(|src| VIDEO_EMBED_HOSTS.iter().any(|host| src.contains(host)))
}
