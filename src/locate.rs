//! Main content locator.
//!
//! Finds the subtree most likely to hold the article body. Three tiers,
//! tried in order: a prioritized selector chain, a heuristic scan over
//! `div`/`section`/`article` candidates, and finally the document body.
//! The body fallback is terminal, so locating never fails.

use tracing::debug;

use crate::options::Options;
use crate::patterns::{CHROME_CLASS, CONTENT_CLASS, CONTENT_SELECTORS};
use crate::text::clean_text;
use crate::tree::{ElementNode, TreeNode};

/// How the content root was found. Drives the scorer's base confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    /// A selector-chain predicate matched.
    Selector,

    /// The heuristic candidate scan picked the root.
    Heuristic,

    /// Terminal fallback to the document body.
    Body,
}

impl MatchTier {
    /// Base confidence fed into the confidence score.
    #[must_use]
    pub fn base_confidence(self) -> f64 {
        match self {
            MatchTier::Selector => 0.7,
            MatchTier::Heuristic => 0.5,
            MatchTier::Body => 0.3,
        }
    }
}

/// A located content root and how it was found.
#[derive(Debug)]
pub struct Located<'a> {
    pub node: &'a TreeNode,
    pub tier: MatchTier,
}

/// Select the subtree most likely to hold the main content.
#[must_use]
pub fn locate<'a>(root: &'a TreeNode, options: &Options) -> Located<'a> {
    for (tag, attr_match) in CONTENT_SELECTORS {
        let found = root.find_element(|el| selector_matches(el, tag, *attr_match));
        if let Some(node) = found {
            if is_acceptable(node, options) {
                debug!(tag, "content root matched selector chain");
                return Located {
                    node,
                    tier: MatchTier::Selector,
                };
            }
        }
    }

    if let Some(node) = best_heuristic_candidate(root) {
        debug!("content root picked by heuristic scan");
        return Located {
            node,
            tier: MatchTier::Heuristic,
        };
    }

    let body = root
        .find_element(|el| el.tag == "body")
        .unwrap_or(root);
    debug!("content root fell back to body");
    Located {
        node: body,
        tier: MatchTier::Body,
    }
}

fn selector_matches(el: &ElementNode, tag: &str, attr_match: Option<(&str, &str)>) -> bool {
    if tag != "*" && el.tag != tag {
        return false;
    }
    match attr_match {
        None => true,
        Some((name, needle)) => el
            .attr(name)
            .is_some_and(|v| v.to_lowercase().contains(needle)),
    }
}

/// Whether an element carries any content at all: non-empty text, child
/// nodes, or an interactive tag.
fn has_content(el: &ElementNode) -> bool {
    const INTERACTIVE_TAGS: &[&str] = &["a", "button", "input", "select", "textarea"];

    !el.children.is_empty()
        || INTERACTIVE_TAGS.contains(&el.tag.as_str())
}

/// Selector-chain acceptance: enough visible text plus at least one
/// paragraph or heading descendant.
fn is_acceptable(node: &TreeNode, options: &Options) -> bool {
    let Some(el) = node.as_element() else {
        return false;
    };
    if !has_content(el) {
        return false;
    }

    let text_len = clean_text(&node.text_content()).chars().count();
    if text_len < options.min_candidate_len {
        return false;
    }

    node.count_tags(&["p", "h1", "h2", "h3", "h4", "h5", "h6"]) > 0
}

/// Candidate filter for the heuristic scan: substantial text plus some
/// paragraph or heading structure.
fn has_article_structure(node: &TreeNode) -> bool {
    let text_len = clean_text(&node.text_content()).chars().count();
    if text_len < 200 {
        return false;
    }
    node.count_tags(&["p", "h1", "h2", "h3", "h4", "h5", "h6"]) > 0
}

fn best_heuristic_candidate(root: &TreeNode) -> Option<&TreeNode> {
    let mut best: Option<(&TreeNode, f64)> = None;

    for node in root.descendants() {
        let Some(el) = node.as_element() else {
            continue;
        };
        if !matches!(el.tag.as_str(), "div" | "section" | "article") {
            continue;
        }
        if !has_article_structure(node) {
            continue;
        }

        let score = score_candidate(node, el);
        // Strictly greater keeps the first candidate on ties, preserving
        // document order as the tie-break.
        if best.is_none_or(|(_, s)| score > s) {
            best = Some((node, score));
        }
    }

    best.map(|(node, _)| node)
}

/// Deterministic candidate score.
///
/// Weights, in order of dominance: text volume (capped), paragraph and
/// heading structure, lists and quotes, penalties for chrome and
/// script/style descendants, and a class/id bonus or penalty.
fn score_candidate(node: &TreeNode, el: &ElementNode) -> f64 {
    let text_len = clean_text(&node.text_content()).chars().count();
    let mut score = (text_len as f64 / 100.0).min(50.0);

    score += 2.0 * node.count_tags(&["p"]) as f64;
    score += 3.0 * node.count_tags(&["h1", "h2"]) as f64;
    score += 1.0 * node.count_tags(&["h3", "h4", "h5", "h6"]) as f64;
    score += 0.5 * node.count_tags(&["li"]) as f64;
    score += 2.0 * node.count_tags(&["blockquote"]) as f64;

    let chrome_descendants = node.count_tags(&["nav", "footer", "aside"])
        + node
            .descendants()
            .skip(1) // the candidate itself is scored via the class penalty
            .filter_map(TreeNode::as_element)
            .filter(|d| d.class_id().contains("sidebar"))
            .count();
    score -= 5.0 * chrome_descendants as f64;
    score -= 10.0 * node.count_tags(&["script", "style"]) as f64;

    let class_id = el.class_id();
    if CONTENT_CLASS.is_match(&class_id) {
        score += 10.0;
    }
    if CHROME_CLASS.is_match(&class_id) {
        score -= 10.0;
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(html: &str) -> TreeNode {
        TreeNode::from_html(html).unwrap_or_else(|e| panic!("parse failed: {e}"))
    }

    fn para(n: usize) -> String {
        "This sentence pads the paragraph with readable words. "
            .repeat(n)
    }

    #[test]
    fn locate_prefers_main_selector() {
        let html = format!(
            "<html><body><main><h1>Title</h1><p>{}</p></main>\
             <div><p>{}</p></div></body></html>",
            para(5),
            para(5)
        );
        let root = tree(&html);
        let located = locate(&root, &Options::default());
        assert_eq!(located.tier, MatchTier::Selector);
        assert_eq!(located.node.tag(), "main");
    }

    #[test]
    fn locate_skips_thin_selector_match() {
        // <main> exists but holds almost nothing, so the selector chain
        // must fall through instead of accepting it.
        let html = format!(
            "<html><body><main><p>tiny</p></main>\
             <div class='post-body'><h2>Title</h2><p>{}</p><p>{}</p></div></body></html>",
            para(5),
            para(5)
        );
        let root = tree(&html);
        let located = locate(&root, &Options::default());
        assert_ne!(located.node.tag(), "main");
    }

    #[test]
    fn selector_chain_prefers_post_content_over_sidebar() {
        let html = format!(
            "<html><body>\
             <div class='sidebar'><p>{}</p><p>{}</p><h4>More</h4></div>\
             <div class='post-content'><h2>Title</h2><p>{}</p><p>{}</p></div>\
             </body></html>",
            para(12),
            para(12),
            para(3),
            para(3)
        );
        let root = tree(&html);
        let located = locate(&root, &Options::default());
        let el = located
            .node
            .as_element()
            .unwrap_or_else(|| panic!("element expected"));
        assert!(el.class_id().contains("post-content"));
    }

    #[test]
    fn heuristic_scoring_beats_sidebar_with_more_text() {
        // Neither class is in the selector chain. The sidebar holds more
        // raw text, but the article-wrapper wins through the class bonus
        // and the sidebar penalties.
        let html = format!(
            "<html><body>\
             <div class='sidebar'><p>{}</p><p>{}</p><h4>More</h4></div>\
             <div class='article-wrapper'><h2>Title</h2><p>{}</p><p>{}</p></div>\
             </body></html>",
            para(12),
            para(12),
            para(3),
            para(3)
        );
        let root = tree(&html);
        let located = locate(&root, &Options::default());
        assert_eq!(located.tier, MatchTier::Heuristic);
        let el = located
            .node
            .as_element()
            .unwrap_or_else(|| panic!("element expected"));
        assert!(el.class_id().contains("article-wrapper"));
    }

    #[test]
    fn locate_falls_back_to_body() {
        let root = tree("<html><body><span>just a few words</span></body></html>");
        let located = locate(&root, &Options::default());
        assert_eq!(located.tier, MatchTier::Body);
        assert_eq!(located.node.tag(), "body");
    }

    #[test]
    fn tier_confidence_is_ordered() {
        assert!(MatchTier::Selector.base_confidence() > MatchTier::Heuristic.base_confidence());
        assert!(MatchTier::Heuristic.base_confidence() > MatchTier::Body.base_confidence());
    }
}
