//! Short summary generation.
//!
//! The summary is the leading prose of the extracted content, truncated
//! at a sentence boundary where one exists within the limit.

use crate::block::{Block, BlockContent};
use crate::text::truncate_at_sentence;

/// Build a short summary from the first prose blocks.
///
/// Headings and non-prose blocks are skipped; the first text or quote
/// blocks supply the material, truncated to `max_length` characters.
#[must_use]
pub fn summarize(blocks: &[Block], max_length: usize) -> String {
    let mut material = String::new();

    for block in blocks {
        let text = match &block.content {
            BlockContent::Text { text } | BlockContent::Quote { text } => text,
            _ => continue,
        };
        if !material.is_empty() {
            material.push(' ');
        }
        material.push_str(text);
        if material.chars().count() >= max_length {
            break;
        }
    }

    truncate_at_sentence(&material, max_length)
}
