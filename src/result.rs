//! Extraction result.

use serde::Serialize;

use crate::block::Block;
use crate::meta::{ContentStatistics, PageMetadata};

/// The complete result of one extraction invocation.
///
/// Created once per invocation and immutable afterwards; the cache hands
/// out shared references to the same value. Deterministic for a given
/// input, which keeps cached and fresh results indistinguishable.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedContent {
    /// Resolved page title.
    pub title: String,

    /// Leading prose, truncated at a sentence boundary.
    pub short_summary: String,

    /// Normalized blocks in document order.
    pub blocks: Vec<Block>,

    pub metadata: PageMetadata,

    pub statistics: ContentStatistics,

    /// Structural and media variety, in [0, 1].
    pub richness_score: f64,

    /// Extraction reliability, in [0, 1].
    pub confidence_score: f64,

    /// Non-fatal notes accumulated across the pipeline.
    pub warnings: Vec<String>,
}
