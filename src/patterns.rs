//! Compiled regex patterns and selector lists for content processing.
//!
//! All patterns are compiled once at startup using `LazyLock` for efficiency.
//! Patterns are organized by their purpose in the pipeline.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Noise Detection Patterns
// =============================================================================

/// Matches class/id names of structural noise: navigation, sidebars, ads,
/// widgets, comments, social sharing, cookie notices.
///
/// Word boundaries keep compound content classes like "article-header" or
/// "content-nav" safe: bare `nav`/`menu`/`ad` only match as whole tokens,
/// while unambiguous names (`navbar`, `advertisement`, `cookie-notice`)
/// match anywhere.
pub static NOISE_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(\bnav\b|navbar|navigation|\bmenu\b|sidebar|side[-_]?bar|widget|\bad\b|\bads\b|advert(?:isement)?|sponsor(?:ed)?|promo\b|comment(?:s)?\b|disqus|social[-_]?share|share[-_]?(?:bar|btn|buttons)|cookie[-_]?(?:notice|banner|consent)|newsletter[-_]?signup|subscribe[-_]?box)",
    )
    .expect("NOISE_CLASS regex")
});

/// Tags always removed by the noise filter, regardless of class.
pub const NOISE_TAGS: &[&str] = &[
    "script", "style", "noscript", "nav", "header", "footer", "aside",
];

/// Hosts whose embedded iframes are kept as video references instead of
/// being stripped with the rest of the iframes.
pub const VIDEO_EMBED_HOSTS: &[&str] = &[
    "youtube.com",
    "youtu.be",
    "vimeo.com",
    "dailymotion.com",
];

// =============================================================================
// Content Identification Patterns
// =============================================================================

/// Matches class/id names likely to contain main content (locator bonus).
pub static CONTENT_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(content|main|article)").expect("CONTENT_CLASS regex"));

/// Matches class/id names penalized by the locator.
pub static CHROME_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(sidebar|nav|footer)").expect("CHROME_CLASS regex"));

/// Selector-equivalent predicates tried by the locator, in priority order.
///
/// Entries are `(tag, attribute, substring)` triples: a `None` attribute
/// matches on tag alone; `class`/`id`/`role` entries match when the
/// attribute value contains the substring.
pub const CONTENT_SELECTORS: &[(&str, Option<(&str, &str)>)] = &[
    ("main", None),
    ("*", Some(("role", "main"))),
    ("article", None),
    ("*", Some(("class", "main-content"))),
    ("*", Some(("class", "post-content"))),
    ("*", Some(("class", "entry-content"))),
    ("*", Some(("class", "article-content"))),
    ("*", Some(("id", "main-content"))),
    ("*", Some(("id", "content"))),
    ("*", Some(("class", "content"))),
];

// =============================================================================
// Text Patterns
// =============================================================================

/// Matches multiple whitespace characters for normalization.
pub static WHITESPACE_NORMALIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE_NORMALIZE regex"));

/// Matches a text-form horizontal rule: a line of 3+ repeated `-`, `*`, or `_`.
pub static DIVIDER_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:-{3,}|\*{3,}|_{3,})$").expect("DIVIDER_LINE regex"));

/// Matches a `language-*` token in a code element's class attribute.
pub static CODE_LANGUAGE_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|\s)lang(?:uage)?-([A-Za-z0-9_+#-]+)").expect("CODE_LANGUAGE_CLASS regex")
});

/// Matches characters stripped when slugifying heading anchors.
pub static SLUG_STRIP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\s-]").expect("SLUG_STRIP regex"));

/// Matches word characters for keyword frequency analysis.
pub static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("NON_WORD regex"));

/// Vietnamese diacritic characters, used by the language heuristic.
pub static VIETNAMESE_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)[àáạảãâầấậẩẫăằắặẳẵèéẹẻẽêềếệểễìíịỉĩòóọỏõôồốộổỗơờớợởỡùúụủũưừứựửữỳýỵỷỹđ]",
    )
    .expect("VIETNAMESE_CHARS regex")
});
