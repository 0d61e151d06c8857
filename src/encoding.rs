//! Byte-level input handling.
//!
//! Raw page bytes are decoded to UTF-8 before parsing. Detection order:
//! byte-order mark, then a charset declaration in the leading bytes,
//! then UTF-8. Decoding is lossy; undecodable sequences become
//! replacement characters instead of errors.

use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use tracing::debug;

/// Bytes examined when searching for a charset declaration.
const SNIFF_WINDOW: usize = 1024;

#[allow(clippy::expect_used)]
static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s;>]+)"#).expect("valid regex")
});

/// Decode raw page bytes to a UTF-8 string.
#[must_use]
pub fn decode(raw: &[u8]) -> String {
    if let Some((encoding, bom_len)) = Encoding::for_bom(raw) {
        debug!(encoding = encoding.name(), "encoding from byte-order mark");
        let (decoded, _) = encoding.decode_without_bom_handling(&raw[bom_len..]);
        return decoded.into_owned();
    }

    let encoding = declared_encoding(raw).unwrap_or(UTF_8);
    if encoding == UTF_8 {
        return String::from_utf8_lossy(raw).into_owned();
    }

    debug!(encoding = encoding.name(), "encoding from meta declaration");
    let (decoded, _, _) = encoding.decode(raw);
    decoded.into_owned()
}

/// Charset declared in the document head, if the label is recognized.
fn declared_encoding(raw: &[u8]) -> Option<&'static Encoding> {
    let head = &raw[..raw.len().min(SNIFF_WINDOW)];
    let head = String::from_utf8_lossy(head);
    let label = META_CHARSET.captures(&head)?.get(1)?.as_str();
    Encoding::for_label(label.as_bytes())
}
