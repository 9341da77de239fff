//! Text normalization and output utilities for Pagesift.
//!
//! This crate holds the string-level processing used by the indexer. It has
//! no knowledge of the content model: callers pass strings in and get
//! strings back.
//!
//! # Modules
//!
//! - [`xhtml`]: Rich text (XHTML) to plain text conversion
//! - [`helpers`]: Tolerant parsing of settings strings
//! - [`directive`]: Embedding and extracting index data in rendered output

pub mod directive;
pub mod helpers;
pub mod xhtml;

mod proptests;

// Re-export commonly used functions
pub use directive::{embed_index_data, extract_index_data, strip_index_data};
pub use helpers::{contains_ignore_case, is_xml_name, parse_delimited_list, parse_lenient_int};
pub use xhtml::{xhtml_to_text, SENTENCE_TERMINATOR};
