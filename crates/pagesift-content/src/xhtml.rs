//! XHTML to plain text normalization.
//!
//! Rich text fields hold XHTML fragments. Before indexing they are reduced to
//! readable prose: closing block, row, cell, and paragraph tags and line
//! breaks become sentence terminators, every other tag is dropped, runs of
//! whitespace collapse to one space, and character entities are decoded.
//!
//! # Example
//!
//! ```rust
//! use pagesift_content::xhtml_to_text;
//!
//! assert_eq!(xhtml_to_text("<p>Hello</p><div>World</div>"), "Hello. World.");
//! assert_eq!(xhtml_to_text("Fish &amp; <em>chips</em>"), "Fish & chips");
//! ```

use std::sync::LazyLock;

use html_escape::decode_html_entities;
use regex::Regex;

/// The terminator appended between sentences of indexed text.
pub const SENTENCE_TERMINATOR: &str = ". ";

static BLOCK_END_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</(?:p|div|tr|td|th|li|h[1-6]|blockquote)\s*>|<br\s*/?>")
        .expect("Invalid block end regex")
});

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("Invalid tag regex"));

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// Convert an XHTML fragment to plain text.
///
/// The conversion is pure: the same input always yields the same output.
/// Text that contains no markup passes through with only whitespace
/// normalization and entity decoding applied.
pub fn xhtml_to_text(xhtml: &str) -> String {
    let text = BLOCK_END_RE.replace_all(xhtml, SENTENCE_TERMINATOR);
    let text = TAG_RE.replace_all(&text, "");
    let text = WHITESPACE_RE.replace_all(&text, " ");
    decode_html_entities(text.trim()).into_owned()
}

// ============================================================================
// Tests
// ============================================================================
