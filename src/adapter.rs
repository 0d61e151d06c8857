//! External block schema adapter.
//!
//! Maps the internal block sequence onto a Notion-style page body:
//! every block becomes a typed record with `rich_text` segments, each
//! segment capped at a maximum character length, and the whole request
//! capped at a maximum block count. Over-long text is chunked, never
//! dropped; over-long pages are truncated with a flag.

use serde::Serialize;
use tracing::warn;

use crate::block::{Block, BlockContent};
use crate::options::Options;
use crate::text::chunk_text;

/// A rich-text segment, optionally carrying a link.
#[derive(Debug, Serialize)]
pub struct RichText {
    #[serde(rename = "type")]
    kind: &'static str,
    text: TextPayload,
}

#[derive(Debug, Serialize)]
struct TextPayload {
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    link: Option<LinkPayload>,
}

#[derive(Debug, Serialize)]
struct LinkPayload {
    url: String,
}

impl RichText {
    fn plain(content: String) -> Self {
        Self {
            kind: "text",
            text: TextPayload {
                content,
                link: None,
            },
        }
    }

    fn linked(content: String, url: String) -> Self {
        Self {
            kind: "text",
            text: TextPayload {
                content,
                link: Some(LinkPayload { url }),
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct RichTextBody {
    rich_text: Vec<RichText>,
}

#[derive(Debug, Serialize)]
struct CodeBody {
    rich_text: Vec<RichText>,
    language: String,
}

#[derive(Debug, Serialize)]
struct ImageBody {
    #[serde(rename = "type")]
    kind: &'static str,
    external: ExternalUrl,
    caption: Vec<RichText>,
}

#[derive(Debug, Serialize)]
struct ExternalUrl {
    url: String,
}

#[derive(Debug, Serialize)]
struct Empty {}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
enum BlockPayload {
    #[serde(rename = "paragraph")]
    Paragraph { paragraph: RichTextBody },
    #[serde(rename = "heading_1")]
    Heading1 { heading_1: RichTextBody },
    #[serde(rename = "heading_2")]
    Heading2 { heading_2: RichTextBody },
    #[serde(rename = "heading_3")]
    Heading3 { heading_3: RichTextBody },
    #[serde(rename = "quote")]
    Quote { quote: RichTextBody },
    #[serde(rename = "code")]
    Code { code: CodeBody },
    #[serde(rename = "bulleted_list_item")]
    BulletedListItem { bulleted_list_item: RichTextBody },
    #[serde(rename = "numbered_list_item")]
    NumberedListItem { numbered_list_item: RichTextBody },
    #[serde(rename = "image")]
    Image { image: ImageBody },
    #[serde(rename = "divider")]
    Divider { divider: Empty },
}

/// One adapted block in the external schema.
#[derive(Debug, Serialize)]
pub struct ExternalBlock {
    object: &'static str,
    #[serde(flatten)]
    payload: BlockPayload,
}

impl ExternalBlock {
    fn new(payload: BlockPayload) -> Self {
        Self {
            object: "block",
            payload,
        }
    }

    /// Concatenated rich-text content, links and captions included.
    #[must_use]
    pub fn rich_text_content(&self) -> String {
        let segments: &[RichText] = match &self.payload {
            BlockPayload::Paragraph { paragraph: body }
            | BlockPayload::Heading1 { heading_1: body }
            | BlockPayload::Heading2 { heading_2: body }
            | BlockPayload::Heading3 { heading_3: body }
            | BlockPayload::Quote { quote: body }
            | BlockPayload::BulletedListItem {
                bulleted_list_item: body,
            }
            | BlockPayload::NumberedListItem {
                numbered_list_item: body,
            } => &body.rich_text,
            BlockPayload::Code { code } => &code.rich_text,
            BlockPayload::Image { image } => &image.caption,
            BlockPayload::Divider { .. } => &[],
        };
        segments
            .iter()
            .map(|s| s.text.content.as_str())
            .collect()
    }

    /// Schema type tag of this block.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match &self.payload {
            BlockPayload::Paragraph { .. } => "paragraph",
            BlockPayload::Heading1 { .. } => "heading_1",
            BlockPayload::Heading2 { .. } => "heading_2",
            BlockPayload::Heading3 { .. } => "heading_3",
            BlockPayload::Quote { .. } => "quote",
            BlockPayload::Code { .. } => "code",
            BlockPayload::BulletedListItem { .. } => "bulleted_list_item",
            BlockPayload::NumberedListItem { .. } => "numbered_list_item",
            BlockPayload::Image { .. } => "image",
            BlockPayload::Divider { .. } => "divider",
        }
    }
}

/// Adapter output: the capped block list plus the truncation flag.
#[derive(Debug, Default)]
pub struct Adapted {
    pub blocks: Vec<ExternalBlock>,
    pub truncated: bool,
    pub warnings: Vec<String>,
}

/// Adapt the internal block sequence to the external schema.
#[must_use]
pub fn adapt(blocks: &[Block], options: &Options) -> Adapted {
    let mut out = Adapted::default();

    for block in blocks {
        adapt_block(block, options, &mut out);
    }

    if out.blocks.len() > options.max_blocks_per_request {
        out.blocks.truncate(options.max_blocks_per_request);
        out.truncated = true;
        let msg = format!(
            "page body truncated to {} blocks",
            options.max_blocks_per_request
        );
        warn!("{msg}");
        out.warnings.push(msg);
    }

    out
}

fn adapt_block(block: &Block, options: &Options, out: &mut Adapted) {
    let max = options.max_rich_text_chars;

    match &block.content {
        BlockContent::Heading { level, text } => {
            let body = rich_body(text, max);
            // The external schema only supports three heading tiers.
            let payload = match (*level).min(3) {
                1 => BlockPayload::Heading1 { heading_1: body },
                2 => BlockPayload::Heading2 { heading_2: body },
                _ => BlockPayload::Heading3 { heading_3: body },
            };
            out.blocks.push(ExternalBlock::new(payload));
        }

        BlockContent::Text { text } => {
            // Over-long prose becomes several paragraph blocks, split at
            // whitespace, rather than one block with many segments.
            for chunk in chunk_text(text, max) {
                out.blocks.push(ExternalBlock::new(BlockPayload::Paragraph {
                    paragraph: RichTextBody {
                        rich_text: vec![RichText::plain(chunk)],
                    },
                }));
            }
        }

        BlockContent::Quote { text } => {
            out.blocks.push(ExternalBlock::new(BlockPayload::Quote {
                quote: rich_body(text, max),
            }));
        }

        BlockContent::Code { text, language } => {
            out.blocks.push(ExternalBlock::new(BlockPayload::Code {
                code: CodeBody {
                    rich_text: rich_segments(text, max),
                    language: language.clone().unwrap_or_else(|| "plain text".to_string()),
                },
            }));
        }

        BlockContent::List { ordered, items } => {
            for item in items {
                let body = rich_body(item, max);
                let payload = if *ordered {
                    BlockPayload::NumberedListItem {
                        numbered_list_item: body,
                    }
                } else {
                    BlockPayload::BulletedListItem {
                        bulleted_list_item: body,
                    }
                };
                out.blocks.push(ExternalBlock::new(payload));
            }
        }

        BlockContent::Image { alt, src } => {
            // External image references must be fetchable URLs.
            if !src.starts_with("http://") && !src.starts_with("https://") {
                let msg = format!("dropped image with non-fetchable source: {src}");
                warn!("{msg}");
                out.warnings.push(msg);
                return;
            }
            let caption = if alt.is_empty() {
                Vec::new()
            } else {
                rich_segments(alt, max)
            };
            out.blocks.push(ExternalBlock::new(BlockPayload::Image {
                image: ImageBody {
                    kind: "external",
                    external: ExternalUrl { url: src.clone() },
                    caption,
                },
            }));
        }

        BlockContent::Link { text, href } => {
            let rich_text = chunk_text(text, max)
                .into_iter()
                .map(|chunk| RichText::linked(chunk, href.clone()))
                .collect();
            out.blocks.push(ExternalBlock::new(BlockPayload::Paragraph {
                paragraph: RichTextBody { rich_text },
            }));
        }

        BlockContent::Divider => {
            out.blocks.push(ExternalBlock::new(BlockPayload::Divider {
                divider: Empty {},
            }));
        }
    }
}

fn rich_body(text: &str, max_chars: usize) -> RichTextBody {
    RichTextBody {
        rich_text: rich_segments(text, max_chars),
    }
}

fn rich_segments(text: &str, max_chars: usize) -> Vec<RichText> {
    chunk_text(text, max_chars)
        .into_iter()
        .map(RichText::plain)
        .collect()
}
