//! Index-data directives in rendered output.
//!
//! A serialized search document travels to the storage side inside the
//! rendered page or presentation, wrapped in a comment:
//!
//! ```text
//! <!-- INDEX-DATA-START:<indexdata>...</indexdata>:INDEX-DATA-END -->
//! ```
//!
//! The storage side extracts the payload and strips the comment before the
//! output is persisted.
//!
//! # Example
//!
//! ```rust
//! use pagesift_content::directive::{embed_index_data, extract_index_data, strip_index_data};
//!
//! let output = embed_index_data("<html></html>", "<indexdata/>");
//! assert_eq!(extract_index_data(&output), Some("<indexdata/>"));
//! assert_eq!(strip_index_data(&output), "<html></html>");
//! ```

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// Marker preceding the payload.
pub const DIRECTIVE_START: &str = "INDEX-DATA-START:";

/// Marker following the payload.
pub const DIRECTIVE_END: &str = ":INDEX-DATA-END";

static DIRECTIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<!--\s*INDEX-DATA-START:(.*?):INDEX-DATA-END\s*-->")
        .expect("Invalid index data directive regex")
});

/// Wrap a payload in a directive comment.
pub fn format_directive(payload: &str) -> String {
    format!("<!-- {DIRECTIVE_START}{payload}{DIRECTIVE_END} -->")
}

/// Insert a directive at the start of rendered output.
///
/// An XML declaration, if present, stays first so the output remains
/// well-formed.
pub fn embed_index_data(output: &str, payload: &str) -> String {
    let directive = format_directive(payload);
    let trimmed = output.trim_start();
    if trimmed.starts_with("<?xml") {
        if let Some(end) = trimmed.find("?>") {
            let (declaration, rest) = trimmed.split_at(end + 2);
            return format!("{declaration}{directive}{rest}");
        }
    }
    format!("{directive}{output}")
}

/// Return the first non-empty directive payload in the output.
pub fn extract_index_data(output: &str) -> Option<&str> {
    DIRECTIVE_RE
        .captures_iter(output)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .find(|payload| !payload.trim().is_empty())
}

/// Remove every directive from the output.
pub fn strip_index_data(output: &str) -> Cow<'_, str> {
    DIRECTIVE_RE.replace_all(output, "")
}

// ============================================================================
// Tests
// ============================================================================
