//! Publish transactions and duplicate suppression.
//!
//! When a page embeds a presentation that is also published on its own,
//! the presentation's text is already in the page document. The
//! [`SuppressionRegistry`] records such presentations so their standalone
//! documents are skipped.
//!
//! A [`PublishTransaction`] owns one registry for the duration of a publish
//! operation. Pages must be indexed before the standalone presentations of
//! the same transaction; `&mut self` on [`PublishTransaction::index_page`]
//! keeps registry updates serialized.

use std::collections::HashSet;

use pagesift_core::{ComponentPresentation, Page, PresentationId, Result};

use crate::assembler::DocumentAssembler;
use crate::config::PagesiftConfig;
use crate::document::SearchDocument;
use crate::processor::FieldProcessor;

/// Presentations already indexed as part of a page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuppressionRegistry {
    ids: HashSet<PresentationId>,
}

impl SuppressionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a presentation. Returns `false` if it was already present.
    pub fn insert(&mut self, id: PresentationId) -> bool {
        self.ids.insert(id)
    }

    /// Returns `true` if the presentation has been recorded.
    pub fn contains(&self, id: &PresentationId) -> bool {
        self.ids.contains(id)
    }

    /// Number of recorded presentations.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterates over recorded presentations in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &PresentationId> {
        self.ids.iter()
    }
}

impl Extend<PresentationId> for SuppressionRegistry {
    fn extend<I: IntoIterator<Item = PresentationId>>(&mut self, iter: I) {
        self.ids.extend(iter);
    }
}

impl FromIterator<PresentationId> for SuppressionRegistry {
    fn from_iter<I: IntoIterator<Item = PresentationId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

/// Context for one publish operation.
#[derive(Debug, Clone, Default)]
pub struct PublishTransaction {
    registry: SuppressionRegistry,
    session_preview: bool,
    index_session_preview: bool,
}

impl PublishTransaction {
    /// Starts a regular publish transaction.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a transaction honouring the configured preview policy.
    pub fn from_config(config: &PagesiftConfig) -> Self {
        Self::new().with_index_session_preview(config.eligibility.index_session_preview)
    }

    /// Marks the transaction as a session preview.
    pub fn with_session_preview(mut self, session_preview: bool) -> Self {
        self.session_preview = session_preview;
        self
    }

    /// Allows documents to be built during session previews.
    pub fn with_index_session_preview(mut self, enabled: bool) -> Self {
        self.index_session_preview = enabled;
        self
    }

    /// Seeds the registry with presentations suppressed earlier.
    pub fn with_suppressed(mut self, ids: impl IntoIterator<Item = PresentationId>) -> Self {
        self.registry.extend(ids);
        self
    }

    /// The suppression registry so far.
    pub fn registry(&self) -> &SuppressionRegistry {
        &self.registry
    }

    /// Ends the transaction, returning its registry.
    pub fn into_registry(self) -> SuppressionRegistry {
        self.registry
    }

    fn skips_indexing(&self) -> bool {
        if self.session_preview && !self.index_session_preview {
            log::debug!("Session preview publish, not indexing");
            return true;
        }
        false
    }

    /// Builds a page document and records its embedded presentations.
    pub fn index_page<P: FieldProcessor>(
        &mut self,
        assembler: &DocumentAssembler<'_, P>,
        page: &Page,
    ) -> Result<Option<SearchDocument>> {
        if self.skips_indexing() {
            return Ok(None);
        }
        let build = assembler.build_from_page(page)?;
        self.registry.extend(build.embedded);
        Ok(build.document)
    }

    /// Builds a standalone presentation document unless it was suppressed.
    pub fn index_presentation<P: FieldProcessor>(
        &self,
        assembler: &DocumentAssembler<'_, P>,
        presentation: &ComponentPresentation,
    ) -> Result<Option<SearchDocument>> {
        if self.skips_indexing() {
            return Ok(None);
        }
        assembler.build_from_presentation(presentation, &self.registry)
    }
}

// ============================================================================
// Tests
// ============================================================================
