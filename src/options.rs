//! Configuration options for content processing.
//!
//! The `Options` struct controls pipeline behavior and the size limits
//! enforced by the output adapter.

/// Configuration options for content processing.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use blockify::Options;
///
/// // Use defaults
/// let options = Options::default();
///
/// // Customize specific fields
/// let options = Options {
///     merge_consecutive_text: false,
///     max_summary_length: 120,
///     ..Options::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Maximum characters per rich-text segment in adapter output.
    ///
    /// Notion caps every rich-text segment at 2000 characters; longer text
    /// is chunked at whitespace boundaries.
    ///
    /// Default: `2000`
    pub max_rich_text_chars: usize,

    /// Maximum number of blocks in a single adapter result.
    ///
    /// Notion accepts at most 100 children per page write. Results that
    /// would exceed this are truncated and flagged.
    ///
    /// Default: `100`
    pub max_blocks_per_request: usize,

    /// Merge consecutive text blocks during normalization.
    ///
    /// Merged blocks are joined with a blank-line separator.
    ///
    /// Default: `true`
    pub merge_consecutive_text: bool,

    /// Maximum length of the generated short summary (characters).
    ///
    /// Default: `200`
    pub max_summary_length: usize,

    /// Bypass the extraction cache and recompute.
    ///
    /// Default: `false`
    pub force_reprocess: bool,

    /// Minimum text length for a paragraph to become a block (characters).
    ///
    /// Near-empty paragraphs below this threshold are discarded.
    ///
    /// Default: `10`
    pub min_paragraph_len: usize,

    /// Minimum visible text length for a selector-chain candidate (characters).
    ///
    /// Candidates shorter than this fall through to heuristic scanning.
    ///
    /// Default: `100`
    pub min_candidate_len: usize,

    /// Maximum tree depth during segmentation.
    ///
    /// Deeper subtrees are skipped with a warning instead of overflowing
    /// the traversal stack.
    ///
    /// Default: `100`
    pub max_tree_depth: usize,

    /// Maximum number of entries retained by an `ExtractionCache`.
    ///
    /// Least-recently-used entries are evicted beyond this.
    ///
    /// Default: `64`
    pub cache_capacity: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_rich_text_chars: 2000,
            max_blocks_per_request: 100,
            merge_consecutive_text: true,
            max_summary_length: 200,
            force_reprocess: false,
            min_paragraph_len: 10,
            min_candidate_len: 100,
            max_tree_depth: 100,
            cache_capacity: 64,
        }
    }
}
