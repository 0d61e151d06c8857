//! Typed content blocks.
//!
//! A [`Block`] is an immutable value: the classified content plus derived
//! metadata attached by the normalizer. Document order is preserved from
//! segmentation through adaptation; blocks are never reordered.

use serde::Serialize;

/// Classified block content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockContent {
    /// Section heading, level 1-6.
    Heading { level: u8, text: String },

    /// Paragraph text.
    Text { text: String },

    /// Bulleted or numbered list; items are flattened strings.
    List { ordered: bool, items: Vec<String> },

    /// Block quotation.
    Quote { text: String },

    /// Code with original whitespace preserved and an optional language.
    Code {
        text: String,
        language: Option<String>,
    },

    /// Image reference with alt text and a resolved absolute URL.
    Image { alt: String, src: String },

    /// Standalone link (not nested inside another classified block).
    Link { text: String, href: String },

    /// Horizontal rule.
    Divider,
}

/// Metadata derived from a block's content by the normalizer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BlockMeta {
    /// Whitespace-separated word count of the block's text.
    pub word_count: usize,

    /// Character count of the block's text.
    pub char_count: usize,

    /// Anchor slug, headings only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor_id: Option<String>,

    /// Line count, code blocks only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_count: Option<usize>,

    /// Item count, lists only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_count: Option<usize>,
}

/// A single typed content block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    /// The classified content.
    #[serde(flatten)]
    pub content: BlockContent,

    /// Derived metadata; zeroed until normalization attaches it.
    pub meta: BlockMeta,
}

impl Block {
    /// Wrap freshly segmented content with empty metadata.
    #[must_use]
    pub fn new(content: BlockContent) -> Self {
        Self {
            content,
            meta: BlockMeta::default(),
        }
    }

    /// The block's primary text: joined items for lists, empty for dividers.
    #[must_use]
    pub fn text(&self) -> String {
        match &self.content {
            BlockContent::Heading { text, .. }
            | BlockContent::Text { text }
            | BlockContent::Quote { text }
            | BlockContent::Code { text, .. }
            | BlockContent::Link { text, .. } => text.clone(),
            BlockContent::Image { alt, .. } => alt.clone(),
            BlockContent::List { items, .. } => items.join("\n"),
            BlockContent::Divider => String::new(),
        }
    }

    /// Whether the block carries no content at all.
    ///
    /// Dividers are never empty; they carry structure, not text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match &self.content {
            BlockContent::Divider => false,
            BlockContent::List { items, .. } => items.iter().all(|i| i.trim().is_empty()),
            BlockContent::Image { src, .. } => src.trim().is_empty(),
            _ => self.text().trim().is_empty(),
        }
    }

    /// Stable name of the block kind, used for variety scoring.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match &self.content {
            BlockContent::Heading { .. } => "heading",
            BlockContent::Text { .. } => "text",
            BlockContent::List { .. } => "list",
            BlockContent::Quote { .. } => "quote",
            BlockContent::Code { .. } => "code",
            BlockContent::Image { .. } => "image",
            BlockContent::Link { .. } => "link",
            BlockContent::Divider => "divider",
        }
    }
}
