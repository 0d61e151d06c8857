//! Error types for blockify.
//!
//! This module defines the error types returned by processing operations.

/// Error type for content processing operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The document has no usable root (no `html`/`body` element at all).
    ///
    /// The locator's body fallback makes this practically unreachable for
    /// any parseable input; it surfaces only for an absent document.
    #[error("document has no usable root")]
    EmptyDocument,

    /// A node had an unexpected shape during segmentation.
    ///
    /// Segmentation itself degrades and records a warning instead of
    /// returning this; the variant exists for callers that validate a
    /// tree up front.
    #[error("malformed node: {0}")]
    MalformedNode(String),

    /// The page URL could not be parsed.
    #[error("invalid page URL: {0}")]
    InvalidUrl(String),
}

/// Result type alias for processing operations.
pub type Result<T> = std::result::Result<T, Error>;
