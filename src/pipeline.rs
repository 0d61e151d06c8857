//! Extraction pipeline.
//!
//! One synchronous pass per document: snapshot, locate, filter, segment,
//! normalize, derive metadata, score, summarize. Pure aside from the
//! optional cache wrapper; the same input always yields the same
//! [`ProcessedContent`].

use std::sync::Arc;

use tracing::debug;
use url::Url;

use crate::cache::{fingerprint, ExtractionCache};
use crate::encoding;
use crate::error::{Error, Result};
use crate::locate::locate;
use crate::meta;
use crate::noise;
use crate::normalize::normalize;
use crate::options::Options;
use crate::result::ProcessedContent;
use crate::score;
use crate::segment::segment;
use crate::summary::summarize;
use crate::tree::TreeNode;

/// Run the full pipeline over an HTML string.
pub fn process(html: &str, url: &str, options: &Options) -> Result<ProcessedContent> {
    let page_url = parse_url(url)?;
    let root = TreeNode::from_html(html)?;

    let located = locate(&root, options);
    let tier = located.tier;
    let content = noise::filter(located.node);

    let segmented = segment(&content, Some(&page_url), options);
    let mut warnings = segmented.warnings;
    let blocks = normalize(segmented.blocks, options);
    debug!(blocks = blocks.len(), "segmentation complete");

    let (metadata, statistics) =
        meta::extract(&root, &content, &blocks, Some(&page_url), &mut warnings);

    let richness_score = score::richness(&blocks, &statistics);
    let confidence_score = score::confidence(tier, &statistics, &metadata);
    let short_summary = summarize(&blocks, options.max_summary_length);

    Ok(ProcessedContent {
        title: metadata.title.clone(),
        short_summary,
        blocks,
        metadata,
        statistics,
        richness_score,
        confidence_score,
        warnings,
    })
}

/// Run the pipeline over raw page bytes, decoding them first.
pub fn process_bytes(raw: &[u8], url: &str, options: &Options) -> Result<ProcessedContent> {
    let html = encoding::decode(raw);
    process(&html, url, options)
}

/// Run the pipeline through a cache keyed by (URL, content).
///
/// `force_reprocess` bypasses the lookup but still stores the fresh
/// result. Errors are never cached.
pub fn process_cached(
    cache: &ExtractionCache,
    html: &str,
    url: &str,
    options: &Options,
) -> Result<Arc<ProcessedContent>> {
    let key = fingerprint(url, html);

    if !options.force_reprocess {
        if let Some(hit) = cache.get(&key) {
            return Ok(hit);
        }
    }

    let computed = process(html, url, options)?;
    if options.force_reprocess {
        let fresh = Arc::new(computed);
        cache.insert(&key, Arc::clone(&fresh));
        return Ok(fresh);
    }
    Ok(cache.get_or_compute(&key, || computed))
}

fn parse_url(url: &str) -> Result<Url> {
    Url::parse(url).map_err(|_| Error::InvalidUrl(url.to_string()))
}
