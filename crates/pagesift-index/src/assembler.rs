//! Search document assembly.
//!
//! The [`DocumentAssembler`] turns a page or a standalone component
//! presentation into at most one [`SearchDocument`]. It checks
//! eligibility, resolves the governing template's settings, runs the
//! [`FieldProcessor`] over the relevant field trees and fills in the
//! structural fields.
//!
//! Ineligible units and units without indexable content yield `Ok(None)`.
//! Unresolvable structural data (a missing template, component or
//! container) is an error.

use pagesift_core::{
    Component, ComponentPresentation, ContentRepository, FieldSet, ItemId, Page, PresentationId,
    Result,
};

use crate::config::PagesiftConfig;
use crate::document::{ItemType, SearchDocument};
use crate::eligibility::{
    container_ancestry, is_container_indexed, is_item_indexed, is_template_indexed,
    ContainerInheritance,
};
use crate::processor::{DefaultFieldProcessor, FieldProcessor, ProcessContext, UnresolvedLinks};
use crate::settings::{IndexingSettings, ResolvedSettings};
use crate::state::ProcessingState;
use crate::transaction::SuppressionRegistry;

/// Result of building a page document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageBuild {
    /// The page document, if the page is eligible and has index data.
    pub document: Option<SearchDocument>,
    /// Presentations indexed as part of the page that are also published
    /// standalone; their standalone documents should be suppressed.
    pub embedded: Vec<PresentationId>,
}

impl PageBuild {
    fn skipped() -> Self {
        Self::default()
    }
}

/// Builds search documents from pages and component presentations.
pub struct DocumentAssembler<'r, P = DefaultFieldProcessor> {
    repository: &'r dyn ContentRepository,
    processor: P,
    defaults: IndexingSettings,
    container_inheritance: ContainerInheritance,
    unresolved_links: UnresolvedLinks,
}

impl<'r> DocumentAssembler<'r> {
    /// Creates an assembler using the standard field processor.
    pub fn new(repository: &'r dyn ContentRepository, defaults: IndexingSettings) -> Self {
        Self {
            repository,
            processor: DefaultFieldProcessor::new(),
            defaults,
            container_inheritance: ContainerInheritance::default(),
            unresolved_links: UnresolvedLinks::default(),
        }
    }

    /// Creates an assembler from a configuration file's settings.
    pub fn from_config(repository: &'r dyn ContentRepository, config: &PagesiftConfig) -> Self {
        Self::new(repository, config.default_settings())
            .with_container_inheritance(config.eligibility.container_inheritance)
            .with_unresolved_links(config.links.on_unresolved)
    }
}

impl<'r, P: FieldProcessor> DocumentAssembler<'r, P> {
    /// Replaces the field processor.
    pub fn with_processor<Q: FieldProcessor>(self, processor: Q) -> DocumentAssembler<'r, Q> {
        DocumentAssembler {
            repository: self.repository,
            processor,
            defaults: self.defaults,
            container_inheritance: self.container_inheritance,
            unresolved_links: self.unresolved_links,
        }
    }

    /// Sets how container `NoIndex` markers are inherited.
    pub fn with_container_inheritance(mut self, inheritance: ContainerInheritance) -> Self {
        self.container_inheritance = inheritance;
        self
    }

    /// Sets the policy for followed links that do not resolve.
    pub fn with_unresolved_links(mut self, policy: UnresolvedLinks) -> Self {
        self.unresolved_links = policy;
        self
    }

    /// Process-level default settings.
    pub fn defaults(&self) -> &IndexingSettings {
        &self.defaults
    }

    fn context(&self) -> ProcessContext<'_> {
        ProcessContext::new(self.repository, &self.defaults)
            .with_unresolved_links(self.unresolved_links)
    }

    fn min_template_priority(&self) -> i32 {
        self.defaults.min_template_priority.unwrap_or(0)
    }

    fn settings_for(&self, metadata: Option<&FieldSet>) -> ResolvedSettings {
        IndexingSettings::from_metadata(metadata).resolve(&self.defaults)
    }

    /// Marks the component visited and processes its fields unless the
    /// component itself is marked `NoIndex`.
    fn process_component(
        &self,
        component: &Component,
        settings: &ResolvedSettings,
        state: &mut ProcessingState,
        ctx: &ProcessContext<'_>,
    ) -> Result<()> {
        state.mark_traversed(component.id);
        if !is_item_indexed(component.metadata.as_ref()) {
            log::debug!("Component {} is marked NoIndex", component.id);
            return Ok(());
        }
        self.processor.process_component(component, settings, state, ctx)
    }

    /// Builds the document for a page.
    ///
    /// Page metadata is processed with the page template's settings, then
    /// every presentation with an eligible template is processed with that
    /// template's settings, in page order.
    pub fn build_from_page(&self, page: &Page) -> Result<PageBuild> {
        let page_template = self.repository.template(page.template)?;
        if !is_item_indexed(page.metadata.as_ref()) || !is_item_indexed(page_template.metadata.as_ref()) {
            log::debug!("Page {} or its template is marked NoIndex", page.id);
            return Ok(PageBuild::skipped());
        }
        if !is_container_indexed(self.repository, page.container, self.container_inheritance)? {
            log::debug!("Page {} lives in a container marked NoIndex", page.id);
            return Ok(PageBuild::skipped());
        }

        let ctx = self.context();
        let mut state = ProcessingState::new();
        let mut embedded: Vec<PresentationId> = Vec::new();
        let mut schema: Option<ItemId> = None;

        if let Some(metadata) = &page.metadata {
            let settings = self.settings_for(page_template.metadata.as_ref());
            self.processor.process(metadata, &settings, &mut state, &ctx)?;
        }

        for presentation in &page.presentations {
            let component = self.repository.component(presentation.component)?;
            let template = self.repository.template(presentation.template)?;
            schema.get_or_insert(component.schema);

            if !is_template_indexed(&template, self.min_template_priority()) {
                continue;
            }
            let settings = self.settings_for(template.metadata.as_ref());
            self.process_component(&component, &settings, &mut state, &ctx)?;

            let id = PresentationId::new(component.id, template.id);
            if !embedded.contains(&id) {
                embedded.push(id);
            }
        }

        if !state.has_index_data() {
            log::debug!("Page {} has no index data", page.id);
            return Ok(PageBuild {
                document: None,
                embedded,
            });
        }

        let ancestry = container_ancestry(self.repository, page.container)?;
        let (body, custom_fields, title) = state.into_parts();
        let document = SearchDocument::builder()
            .url(&page.url)
            .title(title.unwrap_or_else(|| page.title.clone()))
            .publication_id(page.id.publication)
            .schema_id(schema.map(|s| s.item).unwrap_or(0))
            .item_type(ItemType::Page)
            .parent_container_id(page.container.item)
            .container_ancestry(ancestry)
            .body(body)
            .custom_fields(custom_fields)
            .build();

        log::info!(
            "Built index document for page {} ({} embedded presentations)",
            page.id,
            embedded.len()
        );
        Ok(PageBuild {
            document: Some(document),
            embedded,
        })
    }

    /// Builds the standalone document for a component presentation.
    ///
    /// Presentations in `suppressed` were already indexed as part of a page
    /// and yield no document.
    pub fn build_from_presentation(
        &self,
        presentation: &ComponentPresentation,
        suppressed: &SuppressionRegistry,
    ) -> Result<Option<SearchDocument>> {
        let id = PresentationId::new(presentation.component, presentation.template);
        if suppressed.contains(&id) {
            log::debug!("Presentation {id} already indexed on a page");
            return Ok(None);
        }

        let template = self.repository.template(presentation.template)?;
        if !is_template_indexed(&template, self.min_template_priority()) {
            return Ok(None);
        }

        let component = self.repository.component(presentation.component)?;
        if !is_item_indexed(component.metadata.as_ref()) {
            log::debug!("Component {} is marked NoIndex", component.id);
            return Ok(None);
        }
        if let Some(folder) = component.container
            && !is_container_indexed(self.repository, folder, self.container_inheritance)?
        {
            log::debug!("Component {} lives in a container marked NoIndex", component.id);
            return Ok(None);
        }

        let ctx = self.context();
        let mut state = ProcessingState::new();
        let settings = self.settings_for(template.metadata.as_ref());
        self.process_component(&component, &settings, &mut state, &ctx)?;

        if !state.has_index_data() {
            log::debug!("Presentation {id} has no index data");
            return Ok(None);
        }

        let (body, custom_fields, title) = state.into_parts();
        let document = SearchDocument::builder()
            .url(component.id.to_string())
            .title(title.unwrap_or(component.title))
            .publication_id(component.id.publication)
            .schema_id(component.schema.item)
            .item_type(ItemType::Component)
            .body(body)
            .custom_fields(custom_fields)
            .build();

        log::info!("Built index document for presentation {id}");
        Ok(Some(document))
    }
}

impl<P: std::fmt::Debug> std::fmt::Debug for DocumentAssembler<'_, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentAssembler")
            .field("processor", &self.processor)
            .field("defaults", &self.defaults)
            .field("container_inheritance", &self.container_inheritance)
            .field("unresolved_links", &self.unresolved_links)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
