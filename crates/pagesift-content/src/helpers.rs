//! Configuration string helpers.
//!
//! Indexing settings arrive as loosely formatted strings typed by editors
//! into template metadata. These helpers parse them tolerantly: they never
//! fail, they only skip what they cannot use.

/// Split a delimited list into trimmed, de-duplicated, non-empty items.
///
/// Order of first appearance is preserved.
///
/// # Example
///
/// ```rust
/// use pagesift_content::helpers::parse_delimited_list;
///
/// let items = parse_delimited_list(" summary, body ,summary,,", ',');
/// assert_eq!(items, vec!["summary", "body"]);
/// ```
pub fn parse_delimited_list(input: &str, separator: char) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();
    for token in input.split(separator) {
        let token = token.trim();
        if !token.is_empty() && !items.iter().any(|existing| existing == token) {
            items.push(token.to_string());
        }
    }
    items
}

/// Parse an integer, falling back to zero for anything malformed.
///
/// # Example
///
/// ```rust
/// use pagesift_content::helpers::parse_lenient_int;
///
/// assert_eq!(parse_lenient_int(" 200 "), 200);
/// assert_eq!(parse_lenient_int("medium"), 0);
/// ```
pub fn parse_lenient_int(input: &str) -> i32 {
    match input.trim().parse::<i32>() {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Ignoring malformed integer {input:?}: {e}");
            0
        }
    }
}

/// Returns `true` if `name` can be written as an XML element name.
///
/// Accepts a letter or `_` followed by letters, digits, `_`, `-` or `.`.
/// Namespace prefixes are not accepted.
///
/// # Example
///
/// ```rust
/// use pagesift_content::helpers::is_xml_name;
///
/// assert!(is_xml_name("publishDate"));
/// assert!(!is_xml_name("my tag"));
/// ```
pub fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
        }
        _ => false,
    }
}

/// Case-insensitive containment check.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

// ============================================================================
// Tests
// ============================================================================
