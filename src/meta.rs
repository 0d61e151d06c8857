//! Page metadata and content statistics.
//!
//! Metadata comes from the document head and the page URL; statistics
//! are aggregated from the normalized block sequence. Both are derived
//! once per extraction and never updated afterwards.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::block::{Block, BlockContent};
use crate::patterns::{NON_WORD, VIETNAMESE_CHARS};
use crate::text::{clean_text, word_count};
use crate::tree::TreeNode;

/// Words per minute assumed for reading-time estimates.
const READING_WPM: usize = 200;

/// Maximum number of keywords kept after deduplication.
const MAX_KEYWORDS: usize = 20;

/// Number of frequency-derived keywords considered.
const FREQUENT_WORD_KEYWORDS: usize = 10;

/// Characters of extracted text scanned for language detection.
const LANGUAGE_SCAN_CHARS: usize = 1000;

/// Page-level metadata from the document head and URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    pub keywords: Vec<String>,
    pub domain: String,
    /// ISO language code, heuristically detected.
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favicon_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical_url: Option<String>,
}

/// Reading difficulty, estimated from sentence length and technical blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Aggregate statistics over the normalized block sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentStatistics {
    pub word_count: usize,
    pub char_count: usize,
    pub heading_count: usize,
    pub image_count: usize,
    pub link_count: usize,
    pub code_block_count: usize,
    pub table_count: usize,
    pub estimated_reading_minutes: usize,
    pub difficulty: Difficulty,
}

/// Derive metadata and statistics for one extraction.
///
/// `root` is the full document (for head metadata), `content` the
/// noise-filtered content subtree (for the table tally). A language
/// detection fallback appends to `warnings`.
#[must_use]
pub fn extract(
    root: &TreeNode,
    content: &TreeNode,
    blocks: &[Block],
    url: Option<&Url>,
    warnings: &mut Vec<String>,
) -> (PageMetadata, ContentStatistics) {
    let statistics = derive_statistics(blocks, content);

    let metadata = PageMetadata {
        title: resolve_title(root),
        description: resolve_description(root),
        author: resolve_author(root),
        published_at: resolve_published_at(root),
        keywords: resolve_keywords(root, blocks),
        domain: url.and_then(Url::host_str).unwrap_or_default().to_string(),
        language: detect_language(root, blocks, warnings),
        favicon_url: resolve_favicon(root, url),
        canonical_url: resolve_canonical(root, url),
    };

    (metadata, statistics)
}

/// Number of populated optional-ish metadata fields, used by the
/// confidence score.
#[must_use]
pub fn populated_field_count(metadata: &PageMetadata) -> usize {
    [
        !metadata.title.is_empty() && metadata.title != "Untitled Page",
        !metadata.description.is_empty(),
        metadata.author.is_some(),
        metadata.published_at.is_some(),
        !metadata.keywords.is_empty(),
        !metadata.domain.is_empty(),
        metadata.favicon_url.is_some(),
        metadata.canonical_url.is_some(),
    ]
    .iter()
    .filter(|populated| **populated)
    .count()
}

fn meta_content<'a>(root: &'a TreeNode, attr: &str, value: &str) -> Option<&'a str> {
    root.find_element(|el| {
        el.tag == "meta" && el.attr(attr).is_some_and(|v| v.eq_ignore_ascii_case(value))
    })
    .and_then(TreeNode::as_element)
    .and_then(|el| el.attr("content"))
    .filter(|c| !c.trim().is_empty())
}

fn link_href<'a>(root: &'a TreeNode, rel_needle: &str) -> Option<&'a str> {
    root.find_element(|el| {
        el.tag == "link"
            && el
                .attr("rel")
                .is_some_and(|rel| rel.to_lowercase().contains(rel_needle))
    })
    .and_then(TreeNode::as_element)
    .and_then(|el| el.attr("href"))
    .filter(|h| !h.trim().is_empty())
}

fn resolve_title(root: &TreeNode) -> String {
    let candidate = meta_content(root, "property", "og:title")
        .or_else(|| meta_content(root, "name", "twitter:title"))
        .map(clean_text)
        .or_else(|| {
            root.find_element(|el| el.tag == "h1")
                .map(|h1| clean_text(&h1.text_content()))
                .filter(|t| !t.is_empty())
        })
        .or_else(|| {
            root.find_element(|el| el.tag == "title")
                .map(|t| clean_text(&t.text_content()))
                .filter(|t| !t.is_empty())
        });

    match candidate {
        Some(title) if !title.is_empty() => title,
        _ => "Untitled Page".to_string(),
    }
}

fn resolve_description(root: &TreeNode) -> String {
    meta_content(root, "name", "description")
        .or_else(|| meta_content(root, "property", "og:description"))
        .map(clean_text)
        .unwrap_or_default()
}

fn resolve_author(root: &TreeNode) -> Option<String> {
    meta_content(root, "name", "author")
        .or_else(|| meta_content(root, "property", "article:author"))
        .map(clean_text)
        .filter(|a| !a.is_empty())
}

fn resolve_published_at(root: &TreeNode) -> Option<DateTime<Utc>> {
    let raw = meta_content(root, "property", "article:published_time").or_else(|| {
        root.find_element(|el| el.tag == "time" && el.attr("datetime").is_some())
            .and_then(TreeNode::as_element)
            .and_then(|el| el.attr("datetime"))
    })?;

    DateTime::parse_from_rfc3339(raw.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

fn resolve_favicon(root: &TreeNode, url: Option<&Url>) -> Option<String> {
    if let Some(href) = link_href(root, "icon") {
        return Some(resolve_against(href, url));
    }
    // Every origin serves /favicon.ico by convention.
    url.and_then(|u| u.join("/favicon.ico").ok())
        .map(|u| u.to_string())
}

fn resolve_canonical(root: &TreeNode, url: Option<&Url>) -> Option<String> {
    link_href(root, "canonical").map(|href| resolve_against(href, url))
}

fn resolve_against(href: &str, url: Option<&Url>) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }
    match url.and_then(|base| base.join(href).ok()) {
        Some(resolved) => resolved.to_string(),
        None => href.to_string(),
    }
}

/// Declared keywords plus the most frequent content words, deduplicated.
fn resolve_keywords(root: &TreeNode, blocks: &[Block]) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    let push_unique = |word: String, keywords: &mut Vec<String>| {
        if !word.is_empty() && !keywords.contains(&word) && keywords.len() < MAX_KEYWORDS {
            keywords.push(word);
        }
    };

    if let Some(declared) = meta_content(root, "name", "keywords") {
        for raw in declared.split(',') {
            push_unique(clean_text(raw).to_lowercase(), &mut keywords);
        }
    }

    for word in frequent_words(blocks) {
        push_unique(word, &mut keywords);
    }

    keywords
}

/// Top content words by frequency: longer than 3 chars, lowercased,
/// punctuation stripped. Ties break by first occurrence.
fn frequent_words(blocks: &[Block]) -> Vec<String> {
    let mut counts: Vec<(String, usize)> = Vec::new();

    for block in blocks {
        for raw in block.text().split_whitespace() {
            let word = NON_WORD.replace_all(&raw.to_lowercase(), "").to_string();
            if word.chars().count() <= 3 {
                continue;
            }
            match counts.iter_mut().find(|(w, _)| *w == word) {
                Some((_, n)) => *n += 1,
                None => counts.push((word, 1)),
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(FREQUENT_WORD_KEYWORDS)
        .map(|(word, _)| word)
        .collect()
}

/// Language detection: `html[lang]`, then `Content-Language`, then a
/// diacritic scan over the leading extracted text.
fn detect_language(root: &TreeNode, blocks: &[Block], warnings: &mut Vec<String>) -> String {
    if let Some(lang) = root
        .find_element(|el| el.tag == "html")
        .and_then(TreeNode::as_element)
        .and_then(|el| el.attr("lang"))
        .filter(|l| !l.trim().is_empty())
    {
        return normalize_language(lang);
    }

    if let Some(lang) = root
        .find_element(|el| {
            el.tag == "meta"
                && el
                    .attr("http-equiv")
                    .is_some_and(|v| v.eq_ignore_ascii_case("content-language"))
        })
        .and_then(TreeNode::as_element)
        .and_then(|el| el.attr("content"))
        .filter(|l| !l.trim().is_empty())
    {
        return normalize_language(lang);
    }

    let sample: String = blocks
        .iter()
        .map(Block::text)
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(LANGUAGE_SCAN_CHARS)
        .collect();

    if VIETNAMESE_CHARS.is_match(&sample) {
        debug!("language detected from character scan");
        return "vi".to_string();
    }

    warnings.push("language detection fell back to default".to_string());
    "en".to_string()
}

/// Primary subtag of a language declaration, lowercased.
fn normalize_language(raw: &str) -> String {
    raw.trim()
        .split(['-', '_', ','])
        .next()
        .unwrap_or(raw)
        .to_lowercase()
}

fn derive_statistics(blocks: &[Block], content: &TreeNode) -> ContentStatistics {
    let mut words = 0usize;
    let mut chars = 0usize;
    let mut sentences = 0usize;
    let mut headings = 0usize;
    let mut images = 0usize;
    let mut links = 0usize;
    let mut code_blocks = 0usize;

    for block in blocks {
        match &block.content {
            BlockContent::Text { text } | BlockContent::Quote { text } => {
                words += word_count(text);
                chars += text.chars().count();
                sentences += text.matches(['.', '!', '?']).count();
            }
            BlockContent::Heading { .. } => headings += 1,
            BlockContent::Image { .. } => images += 1,
            BlockContent::Link { .. } => links += 1,
            BlockContent::Code { .. } => code_blocks += 1,
            _ => {}
        }
    }

    let tables = content.count_tags(&["table"]);
    let technical = code_blocks + tables;
    let avg_sentence_len = if sentences == 0 {
        words as f64
    } else {
        words as f64 / sentences as f64
    };

    let difficulty = if avg_sentence_len > 20.0 || technical > 3 {
        Difficulty::Hard
    } else if avg_sentence_len < 12.0 && technical == 0 {
        Difficulty::Easy
    } else {
        Difficulty::Medium
    };

    ContentStatistics {
        word_count: words,
        char_count: chars,
        heading_count: headings,
        image_count: images,
        link_count: links,
        code_block_count: code_blocks,
        table_count: tables,
        estimated_reading_minutes: words.div_ceil(READING_WPM),
        difficulty,
    }
}
