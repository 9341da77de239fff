//! Pagesift search indexing: umbrella crate.
//!
//! This crate re-exports all Pagesift components for convenience.
//!
//! - [`core`]: identifiers, field model, host content model, repository trait
//! - [`content`]: rich text normalization and index-data directives
//! - [`index`]: settings, field processing and document assembly

pub use pagesift_content as content;
pub use pagesift_core as core;
pub use pagesift_index as index;

pub use pagesift_core::{Error, Result};
pub use pagesift_index::{
    DocumentAssembler, PagesiftConfig, PublishTransaction, SearchDocument, SuppressionRegistry,
};
