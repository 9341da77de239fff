//! Pagesift Core: shared types, errors, and the host repository seam.
//!
//! This crate provides the foundational types used across all Pagesift
//! crates. It has no internal Pagesift dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`ids`]: Repository item and presentation identifiers
//! - [`fields`]: Typed, recursively nested content fields
//! - [`model`]: Pages, components, templates, and containers
//! - [`repository`]: The [`ContentRepository`] trait and an in-memory implementation

pub mod error;
pub mod fields;
pub mod ids;
pub mod model;
pub mod repository;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use fields::{ContentField, FieldSet, FieldValues, KeywordRef};
pub use ids::{ItemId, ItemKind, PresentationId};
pub use model::{Component, ComponentPresentation, Container, Page, Template};
pub use repository::{ContentRepository, InMemoryRepository};
