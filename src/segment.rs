//! Block segmenter.
//!
//! Walks the noise-filtered subtree and emits an ordered sequence of typed
//! blocks. The walk is an explicit work-stack traversal with a
//! maximum-depth guard, so malformed or pathologically nested markup
//! degrades to a warning instead of unbounded recursion.
//!
//! Classified elements (headings, paragraphs, lists, quotes, code, images,
//! links, rules) consume their whole subtree; every other element is
//! transparent and only contributes its children, preserving document
//! order throughout.

use tracing::warn;
use url::Url;

use crate::block::{Block, BlockContent};
use crate::noise::is_video_embed;
use crate::options::Options;
use crate::patterns::{CODE_LANGUAGE_CLASS, DIVIDER_LINE};
use crate::text::clean_text;
use crate::tree::{ElementNode, TreeNode};

/// Data-URI images shorter than this are treated as tracking pixels.
const DATA_URI_MIN_LEN: usize = 100;

/// Segmentation output: ordered blocks plus non-fatal warnings.
#[derive(Debug, Default)]
pub struct Segmented {
    pub blocks: Vec<Block>,
    pub warnings: Vec<String>,
}

/// Segment a filtered subtree into an ordered block sequence.
#[must_use]
pub fn segment(root: &TreeNode, base_url: Option<&Url>, options: &Options) -> Segmented {
    let mut out = Segmented::default();
    let mut skipped_deep = 0usize;

    let mut stack: Vec<(&TreeNode, usize)> = vec![(root, 0)];
    while let Some((node, depth)) = stack.pop() {
        if depth > options.max_tree_depth {
            skipped_deep += 1;
            continue;
        }

        match node {
            TreeNode::Text(text) => visit_text(text, options, &mut out.blocks),
            TreeNode::Element(el) => {
                if let Some(block) = classify_element(node, el, base_url, options) {
                    out.blocks.push(block);
                } else if is_transparent(el) {
                    for child in el.children.iter().rev() {
                        stack.push((child, depth + 1));
                    }
                }
            }
        }
    }

    if skipped_deep > 0 {
        let msg = format!(
            "segmentation skipped {skipped_deep} node(s) nested deeper than {}",
            options.max_tree_depth
        );
        warn!("{msg}");
        out.warnings.push(msg);
    }

    out
}

/// Classify a single element into a block, or `None` for transparent and
/// discarded elements.
fn classify_element(
    node: &TreeNode,
    el: &ElementNode,
    base_url: Option<&Url>,
    options: &Options,
) -> Option<Block> {
    let content = match el.tag.as_str() {
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
            let text = clean_text(&node.text_content());
            if text.is_empty() {
                return None;
            }
            let level = heading_level(&el.tag);
            BlockContent::Heading { level, text }
        }

        "p" => {
            let text = clean_text(&node.text_content());
            // Near-empty paragraphs carry no content worth keeping.
            if text.chars().count() <= options.min_paragraph_len {
                return None;
            }
            BlockContent::Text { text }
        }

        "ul" | "ol" => {
            let mut items = Vec::new();
            collect_list_items(el, 0, &mut items);
            if items.is_empty() {
                return None;
            }
            BlockContent::List {
                ordered: el.tag == "ol",
                items,
            }
        }

        "blockquote" => {
            let text = clean_text(&node.text_content());
            if text.is_empty() {
                return None;
            }
            BlockContent::Quote { text }
        }

        "pre" | "code" => code_block(node, el)?,

        "img" => image_block(el, base_url)?,

        // Standalone link: the stack only reaches an <a> when its parent
        // was transparent, so links inside paragraphs never arrive here.
        "a" => link_block(node, el, base_url)?,

        "hr" => BlockContent::Divider,

        // Video embeds survive the noise filter; reference them as links.
        "iframe" if is_video_embed(el) => {
            let href = resolve_url(el.attr("src").unwrap_or_default(), base_url);
            let text = el
                .attr("title")
                .map(clean_text)
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| "Embedded video".to_string());
            BlockContent::Link { text, href }
        }

        // A list item with a parent that is not a list: malformed markup,
        // downgraded to plain text.
        "li" => {
            let text = clean_text(&node.text_content());
            if text.is_empty() {
                return None;
            }
            BlockContent::Text { text }
        }

        _ => return None,
    };

    Some(Block::new(content))
}

/// Elements with no block mapping of their own that still contribute
/// their children.
fn is_transparent(el: &ElementNode) -> bool {
    !matches!(
        el.tag.as_str(),
        // Classified tags are consumed whole by `classify_element`.
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "p" | "ul" | "ol" | "blockquote" | "pre"
            | "code" | "img" | "a" | "hr" | "li" | "iframe"
            // Non-content tags contribute nothing.
            | "br" | "meta" | "link" | "title" | "head" | "button" | "input" | "select"
            | "textarea" | "form" | "svg" | "canvas" | "video" | "audio" | "picture"
            | "source" | "template" | "object" | "embed"
    )
}

fn visit_text(text: &str, options: &Options, blocks: &mut Vec<Block>) {
    let cleaned = clean_text(text);
    if cleaned.is_empty() {
        return;
    }
    // A bare line of rule markers is a divider in text form.
    if DIVIDER_LINE.is_match(&cleaned) {
        blocks.push(Block::new(BlockContent::Divider));
        return;
    }
    // Stray text under transparent containers follows the paragraph rule.
    if cleaned.chars().count() > options.min_paragraph_len {
        blocks.push(Block::new(BlockContent::Text { text: cleaned }));
    }
}

fn heading_level(tag: &str) -> u8 {
    match tag {
        "h1" => 1,
        "h2" => 2,
        "h3" => 3,
        "h4" => 4,
        "h5" => 5,
        _ => 6,
    }
}

/// Collect `li` texts from a list, flattening nested lists into marked
/// items rather than separate blocks.
fn collect_list_items(list: &ElementNode, depth: usize, items: &mut Vec<String>) {
    for child in &list.children {
        let Some(li) = child.as_element() else {
            continue;
        };
        if li.tag != "li" {
            continue;
        }

        let text = clean_text(&own_item_text(li));
        if !text.is_empty() {
            if depth == 0 {
                items.push(text);
            } else {
                items.push(format!("- {text}"));
            }
        }

        for grandchild in &li.children {
            if let Some(sub) = grandchild.as_element() {
                if sub.tag == "ul" || sub.tag == "ol" {
                    collect_list_items(sub, depth + 1, items);
                }
            }
        }
    }
}

/// Text of a list item excluding its nested sub-lists.
fn own_item_text(li: &ElementNode) -> String {
    let mut out = String::new();
    for child in &li.children {
        match child {
            TreeNode::Text(text) => out.push_str(text),
            TreeNode::Element(el) => {
                if el.tag != "ul" && el.tag != "ol" {
                    out.push_str(&child.text_content());
                }
            }
        }
    }
    out
}

fn code_block(node: &TreeNode, el: &ElementNode) -> Option<BlockContent> {
    // Code keeps original whitespace; only outer blank lines are shed.
    let raw = node.text_content();
    let text = raw.trim_matches('\n');
    if text.trim().is_empty() {
        return None;
    }

    let mut language = infer_code_language(node, el);
    let mut body = text.to_string();

    // Fenced text inside the element: strip the fence, keep its language.
    if let Some(rest) = body.strip_prefix("```") {
        if let Some((first_line, fenced)) = rest.split_once('\n') {
            let marker = first_line.trim();
            if !marker.is_empty() {
                language = Some(marker.to_string());
            }
            body = fenced.trim_end_matches('`').trim_matches('\n').to_string();
        }
    }

    Some(BlockContent::Code {
        text: body,
        language,
    })
}

/// Language from a `language-*`/`lang-*` class on the element or a
/// descendant `code` element.
fn infer_code_language(node: &TreeNode, el: &ElementNode) -> Option<String> {
    let from_class = |element: &ElementNode| {
        element
            .attr("class")
            .and_then(|c| CODE_LANGUAGE_CLASS.captures(c))
            .map(|caps| caps[1].to_lowercase())
    };

    from_class(el).or_else(|| {
        node.descendants()
            .filter_map(TreeNode::as_element)
            .filter(|d| d.tag == "code")
            .find_map(from_class)
    })
}

fn image_block(el: &ElementNode, base_url: Option<&Url>) -> Option<BlockContent> {
    let src = el.attr("src").unwrap_or_default();
    if src.is_empty() {
        return None;
    }
    // Short data URIs are almost always tracking pixels or placeholders.
    if src.starts_with("data:") && src.chars().count() < DATA_URI_MIN_LEN {
        return None;
    }

    Some(BlockContent::Image {
        alt: clean_text(el.attr("alt").unwrap_or_default()),
        src: resolve_url(src, base_url),
    })
}

fn link_block(node: &TreeNode, el: &ElementNode, base_url: Option<&Url>) -> Option<BlockContent> {
    let href = el.attr("href").unwrap_or_default();
    if href.is_empty() || href == "#" {
        return None;
    }
    let text = clean_text(&node.text_content());
    if text.is_empty() {
        return None;
    }

    Some(BlockContent::Link {
        text,
        href: resolve_url(href, base_url),
    })
}

/// Resolve a possibly relative URL against the page URL.
fn resolve_url(raw: &str, base_url: Option<&Url>) -> String {
    if raw.starts_with("http://")
        || raw.starts_with("https://")
        || raw.starts_with("data:")
        || raw.starts_with("mailto:")
    {
        return raw.to_string();
    }
    match base_url.and_then(|base| base.join(raw).ok()) {
        Some(resolved) => resolved.to_string(),
        None => raw.to_string(),
    }
}
