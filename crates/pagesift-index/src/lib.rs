//! Search document assembly for Pagesift.
//!
//! This crate turns the structured content of pages and component
//! presentations into flat search documents: a catch-all body plus named
//! custom fields, with the structural data a search front end filters on.
//!
//! # Modules
//!
//! - [`settings`]: Indexing settings, parsed from template metadata
//! - [`classifier`]: Field inclusion and routing
//! - [`processor`]: Field tree processing
//! - [`state`]: Per-document processing state
//! - [`eligibility`]: `NoIndex` and template priority gating
//! - [`document`]: The search document and its encodings
//! - [`assembler`]: Page and presentation document builds
//! - [`transaction`]: Duplicate suppression across one publish
//! - [`config`]: Configuration file
//!
//! # Example
//!
//! ```rust
//! use pagesift_core::{
//!     Component, ComponentPresentation, ContentField, FieldSet, InMemoryRepository, ItemId,
//!     ItemKind, Template,
//! };
//! use pagesift_index::{DocumentAssembler, IndexingSettings, SuppressionRegistry};
//!
//! let component = ItemId::component(5, 20);
//! let template = ItemId::new(5, 30, ItemKind::ComponentTemplate);
//!
//! let mut repo = InMemoryRepository::new();
//! repo.add_template(Template::new(template, "Article"));
//! repo.add_component(
//!     Component::new(component, "Hello", ItemId::new(5, 1, ItemKind::Schema))
//!         .with_content(FieldSet::new().with(ContentField::text("body", ["Hello world"]))),
//! );
//!
//! let assembler = DocumentAssembler::new(&repo, IndexingSettings::process_default());
//! let doc = assembler
//!     .build_from_presentation(
//!         &ComponentPresentation::new(component, template),
//!         &SuppressionRegistry::new(),
//!     )?
//!     .expect("indexable");
//!
//! assert_eq!(doc.body, "Hello world. ");
//! # Ok::<(), pagesift_core::Error>(())
//! ```

pub mod assembler;
pub mod classifier;
pub mod config;
pub mod document;
pub mod eligibility;
pub mod processor;
pub mod settings;
pub mod state;
pub mod transaction;

mod proptests;

// Re-exports
pub use assembler::{DocumentAssembler, PageBuild};
pub use classifier::{DefaultClassifier, FieldClassifier, Route};
pub use config::PagesiftConfig;
pub use document::{ItemType, SearchDocument, SearchDocumentBuilder};
pub use eligibility::{
    is_container_indexed, is_item_indexed, is_template_indexed, ContainerInheritance,
};
pub use processor::{DefaultFieldProcessor, FieldProcessor, ProcessContext, UnresolvedLinks};
pub use settings::{FieldMap, IndexField, IndexingSettings, RawSettings, ResolvedSettings};
pub use state::ProcessingState;
pub use transaction::{PublishTransaction, SuppressionRegistry};
