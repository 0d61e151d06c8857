//! Text utilities: whitespace normalization, slugs, word counts, chunking.
//!
//! Everything here is pure and deterministic; these helpers back the
//! segmenter, normalizer, summary generation, and the output adapter.

use crate::patterns::{SLUG_STRIP, WHITESPACE_NORMALIZE};

/// Collapse runs of whitespace to single spaces and trim.
///
/// Inline formatting is not interpreted; this is the normalization applied
/// to every block kind except code, which keeps its raw text.
#[must_use]
pub fn clean_text(text: &str) -> String {
    WHITESPACE_NORMALIZE.replace_all(text, " ").trim().to_string()
}

/// Count whitespace-separated words.
#[inline]
#[must_use]
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Diacritic folding table for slug generation.
///
/// Covers the Vietnamese alphabet plus common Latin-1 accents; anything
/// not listed passes through unchanged.
const FOLD_PAIRS: &[(&str, char)] = &[
    ("àáạảãâầấậẩẫăằắặẳẵäå", 'a'),
    ("èéẹẻẽêềếệểễë", 'e'),
    ("ìíịỉĩï", 'i'),
    ("òóọỏõôồốộổỗơờớợởỡö", 'o'),
    ("ùúụủũưừứựửữü", 'u'),
    ("ỳýỵỷỹÿ", 'y'),
    ("đ", 'd'),
    ("ç", 'c'),
    ("ñ", 'n'),
];

fn fold_char(c: char) -> char {
    for (accented, plain) in FOLD_PAIRS {
        if accented.contains(c) {
            return *plain;
        }
    }
    c
}

/// Build an anchor slug from heading text.
///
/// Lowercased, diacritics folded, non-alphanumerics dropped, whitespace
/// collapsed to single dashes, trimmed, and capped at 50 characters.
#[must_use]
pub fn slugify(text: &str) -> String {
    let lowered: String = text.chars().flat_map(char::to_lowercase).map(fold_char).collect();
    let stripped = SLUG_STRIP.replace_all(&lowered, "");

    let mut slug = String::new();
    let mut prev_dash = true; // suppress a leading dash
    for c in stripped.chars() {
        if c.is_whitespace() || c == '-' {
            if !prev_dash {
                slug.push('-');
                prev_dash = true;
            }
        } else {
            slug.push(c);
            prev_dash = false;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug.chars().take(50).collect()
}

/// Split text into chunks of at most `max_chars` characters.
///
/// Splits at the last whitespace at or before the limit so words stay
/// intact when possible; a single over-long word is split hard at the
/// limit. Concatenating the chunks reproduces the input exactly.
#[must_use]
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    if max_chars == 0 || text.chars().count() <= max_chars {
        return vec![text.to_string()];
    }

    let chars: Vec<char> = text.chars().collect();
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < chars.len() {
        let remaining = chars.len() - start;
        if remaining <= max_chars {
            chunks.push(chars[start..].iter().collect());
            break;
        }

        let window_end = start + max_chars;
        // Split just after the last whitespace in the window, so the
        // separator stays in the leading chunk and concatenation is lossless.
        let split = chars[start..window_end]
            .iter()
            .rposition(|c| c.is_whitespace())
            .map_or(window_end, |i| start + i + 1);

        chunks.push(chars[start..split].iter().collect());
        start = split;
    }

    chunks
}

/// Truncate text at a sentence boundary within `max_chars`.
///
/// Falls back to a hard cut with an ellipsis when not even the first
/// sentence fits.
#[must_use]
pub fn truncate_at_sentence(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let mut summary = String::new();
    let mut used = 0;
    for sentence in text.split_inclusive(['.', '!', '?']) {
        let len = sentence.chars().count();
        if used + len > max_chars {
            break;
        }
        summary.push_str(sentence);
        used += len;
    }

    let summary = summary.trim();
    if summary.is_empty() {
        let cut: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", cut.trim_end())
    } else {
        summary.to_string()
    }
}
