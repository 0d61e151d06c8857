//! Block normalizer.
//!
//! Runs after segmentation: drops empty blocks, merges runs of
//! consecutive text blocks, and attaches derived metadata to every
//! surviving block. Normalization is idempotent; running it twice
//! yields the same sequence.

use crate::block::{Block, BlockContent, BlockMeta};
use crate::options::Options;
use crate::text::{slugify, word_count};

/// Separator inserted between merged text blocks.
const MERGE_SEPARATOR: &str = "\n\n";

/// Normalize a segmented block sequence in document order.
#[must_use]
pub fn normalize(blocks: Vec<Block>, options: &Options) -> Vec<Block> {
    let mut out: Vec<Block> = Vec::with_capacity(blocks.len());

    for block in blocks {
        if block.is_empty() {
            continue;
        }

        if options.merge_consecutive_text {
            if let (Some(prev), BlockContent::Text { text }) =
                (out.last_mut(), &block.content)
            {
                if let BlockContent::Text { text: prev_text } = &mut prev.content {
                    // Merged runs keep a paragraph break between parts.
                    if !prev_text.ends_with(MERGE_SEPARATOR) {
                        prev_text.push_str(MERGE_SEPARATOR);
                    }
                    prev_text.push_str(text);
                    prev.meta = derive_meta(prev);
                    continue;
                }
            }
        }

        let mut block = block;
        block.meta = derive_meta(&block);
        out.push(block);
    }

    out
}

/// Metadata derived purely from a block's own content.
fn derive_meta(block: &Block) -> BlockMeta {
    let text = block.text();

    let mut meta = BlockMeta {
        word_count: word_count(&text),
        char_count: text.chars().count(),
        ..BlockMeta::default()
    };

    match &block.content {
        BlockContent::Heading { text, .. } => {
            let slug = slugify(text);
            if !slug.is_empty() {
                meta.anchor_id = Some(slug);
            }
        }
        BlockContent::Code { text, .. } => {
            meta.line_count = Some(text.lines().count());
        }
        BlockContent::List { items, .. } => {
            meta.item_count = Some(items.len());
        }
        _ => {}
    }

    meta
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Block {
        Block::new(BlockContent::Text {
            text: s.to_string(),
        })
    }

    #[test]
    fn empty_blocks_are_dropped_except_dividers() {
        let blocks = vec![
            text(""),
            Block::new(BlockContent::Divider),
            Block::new(BlockContent::Quote {
                text: "  ".to_string(),
            }),
        ];
        let out = normalize(blocks, &Options::default());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].content, BlockContent::Divider);
    }

    #[test]
    fn consecutive_text_blocks_merge_with_paragraph_break() {
        let blocks = vec![text("First paragraph."), text("Second paragraph.")];
        let out = normalize(blocks, &Options::default());
        assert_eq!(out.len(), 1);
        assert_eq!(
            out[0].content,
            BlockContent::Text {
                text: "First paragraph.\n\nSecond paragraph.".to_string()
            }
        );
        assert_eq!(out[0].meta.word_count, 4);
    }

    #[test]
    fn merging_stops_at_non_text_blocks() {
        let blocks = vec![
            text("Before."),
            Block::new(BlockContent::Divider),
            text("After."),
        ];
        let out = normalize(blocks, &Options::default());
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn merge_can_be_disabled() {
        let options = Options {
            merge_consecutive_text: false,
            ..Options::default()
        };
        let out = normalize(vec![text("One."), text("Two.")], &options);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn heading_gets_anchor_slug() {
        let blocks = vec![Block::new(BlockContent::Heading {
            level: 2,
            text: "Hello World!".to_string(),
        })];
        let out = normalize(blocks, &Options::default());
        assert_eq!(out[0].meta.anchor_id.as_deref(), Some("hello-world"));
    }

    #[test]
    fn code_and_list_counters_attach() {
        let blocks = vec![
            Block::new(BlockContent::Code {
                text: "a\nb\nc".to_string(),
                language: None,
            }),
            Block::new(BlockContent::List {
                ordered: false,
                items: vec!["x".to_string(), "y".to_string()],
            }),
        ];
        let out = normalize(blocks, &Options::default());
        assert_eq!(out[0].meta.line_count, Some(3));
        assert_eq!(out[1].meta.item_count, Some(2));
    }

    #[test]
    fn normalization_is_idempotent() {
        let blocks = vec![
            text("First paragraph."),
            text("Second paragraph."),
            Block::new(BlockContent::Heading {
                level: 1,
                text: "Title".to_string(),
            }),
        ];
        let once = normalize(blocks, &Options::default());
        let twice = normalize(once.clone(), &Options::default());
        assert_eq!(once, twice);
    }
}
