//! # blockify
//!
//! Turns web pages into typed content blocks ready for a rich-block API.
//!
//! The pipeline locates the main content of an HTML document, strips
//! navigation and other boilerplate, segments what remains into blocks
//! (headings, paragraphs, lists, quotes, code, images, links, dividers),
//! derives page metadata and statistics, scores the result, and can
//! adapt the block sequence to a Notion-style page body under that
//! API's size limits.
//!
//! ## Quick Start
//!
//! ```rust
//! use blockify::{process, Options};
//!
//! let html = r#"<html><head><title>My Article</title></head>
//! <body><article><h1>My Article</h1>
//! <p>The opening paragraph carries the main idea of the page.</p>
//! </article></body></html>"#;
//!
//! let content = process(html, "https://example.com/article")?;
//! println!("Title: {}", content.title);
//! println!("Blocks: {}", content.blocks.len());
//! # let _ = Options::default();
//! # Ok::<(), blockify::Error>(())
//! ```
//!
//! ## Features
//!
//! - **Content localization**: selector chain, heuristic scoring, body fallback
//! - **Typed blocks**: structure-preserving segmentation in document order
//! - **Metadata & statistics**: title, language, keywords, reading time
//! - **Quality scores**: richness and confidence, both in [0, 1]
//! - **Schema adaptation**: chunked, capped external block output
//! - **Caching**: injectable LRU keyed by (URL, content) fingerprint

mod error;
mod options;
mod patterns;
mod pipeline;
mod result;
mod text;

/// Typed content blocks and their derived metadata.
pub mod block;

/// Immutable tree snapshot of the parsed document.
pub mod tree;

/// Main content locator (selector chain, heuristic scan, body fallback).
pub mod locate;

/// Structural noise filter.
pub mod noise;

/// Tree-to-block segmentation.
pub mod segment;

/// Block merging, pruning, and metadata attachment.
pub mod normalize;

/// Page metadata and content statistics.
pub mod meta;

/// Richness and confidence scoring.
pub mod score;

/// Short summary generation.
pub mod summary;

/// External block schema adapter.
pub mod adapter;

/// Result memoization keyed by (URL, content) fingerprint.
pub mod cache;

/// Character encoding detection and decoding.
pub mod encoding;

// Public API - re-exports
pub use block::{Block, BlockContent, BlockMeta};
pub use cache::ExtractionCache;
pub use error::{Error, Result};
pub use meta::{ContentStatistics, Difficulty, PageMetadata};
pub use options::Options;
pub use pipeline::process_cached;
pub use result::ProcessedContent;

/// Process an HTML document with default options.
///
/// Runs the full pipeline: locate the main content, strip noise,
/// segment into blocks, normalize, derive metadata and statistics,
/// score, and summarize. `url` is the page URL; it anchors relative
/// link and image resolution and supplies the domain.
#[allow(clippy::missing_errors_doc)]
pub fn process(html: &str, url: &str) -> Result<ProcessedContent> {
    pipeline::process(html, url, &Options::default())
}

/// Process an HTML document with custom options.
#[allow(clippy::missing_errors_doc)]
pub fn process_with_options(html: &str, url: &str, options: &Options) -> Result<ProcessedContent> {
    pipeline::process(html, url, options)
}

/// Process raw page bytes with default options, decoding them first.
#[allow(clippy::missing_errors_doc)]
pub fn process_bytes(raw: &[u8], url: &str) -> Result<ProcessedContent> {
    pipeline::process_bytes(raw, url, &Options::default())
}

/// Process raw page bytes with custom options.
#[allow(clippy::missing_errors_doc)]
pub fn process_bytes_with_options(
    raw: &[u8],
    url: &str,
    options: &Options,
) -> Result<ProcessedContent> {
    pipeline::process_bytes(raw, url, options)
}
