//! Field processing.
//!
//! A [`FieldProcessor`] walks a field tree and writes what it finds into a
//! [`ProcessingState`]:
//!
//! - embedded groups are recursed into, with the same settings
//! - excluded fields are skipped
//! - mapped fields write typed values to their custom target
//! - other text fields are appended to the catch-all body
//! - link fields listed for embedding pull in the linked component's own
//!   content and metadata, once per component per document
//!
//! [`DefaultFieldProcessor`] implements these rules on top of a pluggable
//! [`FieldClassifier`].

use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};

use pagesift_content::{xhtml_to_text, SENTENCE_TERMINATOR};
use pagesift_core::{
    Component, ContentField, ContentRepository, FieldSet, FieldValues, ItemId, Result,
};

use crate::classifier::{DefaultClassifier, FieldClassifier, Route};
use crate::settings::{IndexingSettings, ResolvedSettings};
use crate::state::ProcessingState;

/// What to do when a followed link points at a component the repository
/// cannot resolve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnresolvedLinks {
    /// Abort the document build with the repository error.
    #[default]
    Fail,
    /// Log a warning and carry on without the linked component.
    Skip,
}

/// Collaborators available while processing one document.
#[derive(Clone, Copy)]
pub struct ProcessContext<'a> {
    /// Host content repository.
    pub repository: &'a dyn ContentRepository,
    /// Process-level default settings, for resolving linked templates.
    pub defaults: &'a IndexingSettings,
    /// Policy for links that do not resolve.
    pub unresolved_links: UnresolvedLinks,
}

impl<'a> ProcessContext<'a> {
    /// Creates a context that fails on unresolved links.
    pub fn new(repository: &'a dyn ContentRepository, defaults: &'a IndexingSettings) -> Self {
        Self {
            repository,
            defaults,
            unresolved_links: UnresolvedLinks::Fail,
        }
    }

    /// Sets the unresolved link policy.
    pub fn with_unresolved_links(mut self, policy: UnresolvedLinks) -> Self {
        self.unresolved_links = policy;
        self
    }
}

impl std::fmt::Debug for ProcessContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessContext")
            .field("defaults", self.defaults)
            .field("unresolved_links", &self.unresolved_links)
            .finish_non_exhaustive()
    }
}

/// Strategy turning field trees into index data.
pub trait FieldProcessor {
    /// Processes a field tree.
    fn process(
        &self,
        fields: &FieldSet,
        settings: &ResolvedSettings,
        state: &mut ProcessingState,
        ctx: &ProcessContext<'_>,
    ) -> Result<()>;

    /// Processes a component's content, then its metadata.
    fn process_component(
        &self,
        component: &Component,
        settings: &ResolvedSettings,
        state: &mut ProcessingState,
        ctx: &ProcessContext<'_>,
    ) -> Result<()> {
        if let Some(content) = &component.content {
            self.process(content, settings, state, ctx)?;
        }
        if let Some(metadata) = &component.metadata {
            self.process(metadata, settings, state, ctx)?;
        }
        Ok(())
    }
}

/// Standard field processor.
#[derive(Clone, Debug, Default)]
pub struct DefaultFieldProcessor<C = DefaultClassifier> {
    classifier: C,
}

impl DefaultFieldProcessor {
    /// Creates a processor using the standard inclusion gate.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: FieldClassifier> DefaultFieldProcessor<C> {
    /// Creates a processor with a custom classifier.
    pub fn with_classifier(classifier: C) -> Self {
        Self { classifier }
    }

    fn process_field(
        &self,
        field: &ContentField,
        settings: &ResolvedSettings,
        state: &mut ProcessingState,
        ctx: &ProcessContext<'_>,
    ) -> Result<()> {
        let route = self.classifier.route(field, settings);
        match route {
            Route::Excluded => {
                log::debug!("Field '{}' excluded from index", field.name);
                return Ok(());
            }
            Route::Custom(target) => {
                for value in custom_values(field) {
                    state.write_custom(target, value);
                }
            }
            Route::CatchAll => append_catch_all(field, state),
        }

        if let FieldValues::ComponentLink(links) = &field.values
            && self.classifier.follows_links(field, settings)
        {
            self.follow_links(links, settings, state, ctx)?;
        }
        Ok(())
    }

    fn follow_links(
        &self,
        links: &[ItemId],
        settings: &ResolvedSettings,
        state: &mut ProcessingState,
        ctx: &ProcessContext<'_>,
    ) -> Result<()> {
        for &id in links {
            if !state.mark_traversed(id) {
                log::debug!("Component {id} already processed, not embedding again");
                continue;
            }

            let component = match ctx.repository.component(id) {
                Ok(component) => component,
                Err(e) if e.is_missing() && ctx.unresolved_links == UnresolvedLinks::Skip => {
                    log::warn!("Skipping unresolved link to {id}: {e}");
                    continue;
                }
                Err(e) => return Err(e),
            };

            match ctx.repository.linked_template(id)? {
                Some(template_id) => {
                    let template = ctx.repository.template(template_id)?;
                    let linked = IndexingSettings::from_metadata(template.metadata.as_ref())
                        .resolve(ctx.defaults);
                    self.process_component(&component, &linked, state, ctx)?;
                }
                None => self.process_component(&component, settings, state, ctx)?,
            }
        }
        Ok(())
    }
}

impl<C: FieldClassifier> FieldProcessor for DefaultFieldProcessor<C> {
    fn process(
        &self,
        fields: &FieldSet,
        settings: &ResolvedSettings,
        state: &mut ProcessingState,
        ctx: &ProcessContext<'_>,
    ) -> Result<()> {
        for field in fields {
            match &field.values {
                FieldValues::Embedded(groups) => {
                    for group in groups {
                        self.process(group, settings, state, ctx)?;
                    }
                }
                _ => self.process_field(field, settings, state, ctx)?,
            }
        }
        Ok(())
    }
}

/// String values written to a custom target for a field.
///
/// Keywords and links yield the referenced item's stable id, dates an
/// RFC 3339 UTC timestamp, numbers their decimal form, and rich text its
/// plain-text normalization.
pub fn custom_values(field: &ContentField) -> Vec<String> {
    match &field.values {
        FieldValues::Text(values) => values.clone(),
        FieldValues::RichText(values) => values.iter().map(|v| xhtml_to_text(v)).collect(),
        FieldValues::Keyword(keywords) => keywords.iter().map(|k| k.id.stable_id()).collect(),
        FieldValues::ComponentLink(links) => links.iter().map(ItemId::stable_id).collect(),
        FieldValues::Date(dates) => dates
            .iter()
            .map(|d| d.to_rfc3339_opts(SecondsFormat::Secs, true))
            .collect(),
        FieldValues::Number(numbers) => numbers.iter().map(|n| n.to_string()).collect(),
        FieldValues::Embedded(_) => Vec::new(),
        FieldValues::Unsupported(kind) => {
            log::debug!("Field '{}' of kind '{kind}' cannot be indexed", field.name);
            Vec::new()
        }
    }
}

/// Appends a field's text to the catch-all body.
///
/// Only text and rich text contribute. Each value ends with a sentence
/// terminator; normalized rich text that already ends a sentence gets a
/// separating space instead.
pub fn append_catch_all(field: &ContentField, state: &mut ProcessingState) {
    match &field.values {
        FieldValues::Text(values) => {
            for value in values.iter().filter(|v| !v.trim().is_empty()) {
                state.push_body(value);
                state.push_body(SENTENCE_TERMINATOR);
            }
        }
        FieldValues::RichText(values) => {
            for value in values {
                let text = xhtml_to_text(value);
                if text.is_empty() {
                    continue;
                }
                state.push_body(&text);
                state.push_body(if text.ends_with('.') { " " } else { SENTENCE_TERMINATOR });
            }
        }
        other => {
            log::debug!(
                "Field '{}' of kind '{}' not added to body",
                field.name,
                other.kind_name()
            );
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
