//! Quality scoring.
//!
//! Two independent scores, both pure functions of the extraction result
//! and both clamped to [0, 1]. Richness measures structural and media
//! variety; confidence measures how trustworthy the extraction is,
//! seeded by the locator's match tier.

use crate::block::Block;
use crate::locate::MatchTier;
use crate::meta::{populated_field_count, ContentStatistics, PageMetadata};

/// Structural and media variety of the extracted blocks.
#[must_use]
pub fn richness(blocks: &[Block], statistics: &ContentStatistics) -> f64 {
    let mut score = 0.5;

    score += 0.05 * distinct_kinds(blocks) as f64;

    if statistics.heading_count > 0 {
        score += 0.1;
    }
    if statistics.image_count > 0 {
        score += 0.1;
    }
    if statistics.link_count > 0 {
        score += 0.05;
    }
    if statistics.code_block_count > 0 {
        score += 0.1;
    }
    if statistics.word_count > 100 {
        score += 0.1;
    }
    if statistics.word_count > 500 {
        score += 0.1;
    }

    score.clamp(0.0, 1.0)
}

/// Reliability of the extraction, seeded by how the content root was
/// located.
#[must_use]
pub fn confidence(
    tier: MatchTier,
    statistics: &ContentStatistics,
    metadata: &PageMetadata,
) -> f64 {
    let mut score = tier.base_confidence();

    if statistics.word_count > 50 {
        score += 0.1;
    }
    if statistics.heading_count > 0 {
        score += 0.1;
    }
    if !metadata.title.is_empty() && metadata.title != "Untitled Page" {
        score += 0.1;
    }

    let field_bonus = 0.02 * populated_field_count(metadata) as f64;
    score += field_bonus.min(0.2);

    score.clamp(0.0, 1.0)
}

fn distinct_kinds(blocks: &[Block]) -> usize {
    let mut seen: Vec<&str> = Vec::new();
    for block in blocks {
        let kind = block.kind_name();
        if !seen.contains(&kind) {
            seen.push(kind);
        }
    }
    seen.len()
}
