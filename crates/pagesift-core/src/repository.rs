//! Content repository abstraction.
//!
//! The indexer never fetches content on its own: everything it reads comes
//! through a [`ContentRepository`] supplied by the host. Lookups return
//! [`Error::MissingItem`] when an id does not resolve; other host failures
//! are reported as [`Error::Repository`] and propagated unchanged.
//!
//! [`InMemoryRepository`] is a hash-map backed implementation for hosts that
//! have already materialized their content, and for tests.

use std::collections::HashMap;

use crate::ids::ItemId;
use crate::model::{Component, Container, Template};
use crate::{Error, Result};

/// Read access to the host content model.
pub trait ContentRepository {
    /// Resolves a component by id.
    fn component(&self, id: ItemId) -> Result<Component>;

    /// Resolves a template by id.
    fn template(&self, id: ItemId) -> Result<Template>;

    /// Resolves an organizational container by id.
    fn container(&self, id: ItemId) -> Result<Container>;

    /// Template whose indexing settings govern a component reached through
    /// a followed link.
    ///
    /// `Ok(None)` means no dedicated template; the linking scope's settings
    /// apply.
    fn linked_template(&self, component: ItemId) -> Result<Option<ItemId>> {
        let _ = component;
        Ok(None)
    }
}

impl<R: ContentRepository + ?Sized> ContentRepository for &R {
    fn component(&self, id: ItemId) -> Result<Component> {
        (**self).component(id)
    }

    fn template(&self, id: ItemId) -> Result<Template> {
        (**self).template(id)
    }

    fn container(&self, id: ItemId) -> Result<Container> {
        (**self).container(id)
    }

    fn linked_template(&self, component: ItemId) -> Result<Option<ItemId>> {
        (**self).linked_template(component)
    }
}

/// Hash-map backed repository.
#[derive(Debug, Default, Clone)]
pub struct InMemoryRepository {
    components: HashMap<ItemId, Component>,
    templates: HashMap<ItemId, Template>,
    containers: HashMap<ItemId, Container>,
    link_templates: HashMap<ItemId, ItemId>,
}

impl InMemoryRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a component.
    pub fn add_component(&mut self, component: Component) -> &mut Self {
        self.components.insert(component.id, component);
        self
    }

    /// Adds or replaces a template.
    pub fn add_template(&mut self, template: Template) -> &mut Self {
        self.templates.insert(template.id, template);
        self
    }

    /// Adds or replaces a container.
    pub fn add_container(&mut self, container: Container) -> &mut Self {
        self.containers.insert(container.id, container);
        self
    }

    /// Declares the template governing a component when it is reached
    /// through a followed link.
    pub fn set_linked_template(&mut self, component: ItemId, template: ItemId) -> &mut Self {
        self.link_templates.insert(component, template);
        self
    }

    /// Number of stored components.
    pub fn component_count(&self) -> usize {
        self.components.len()
    }
}

impl ContentRepository for InMemoryRepository {
    fn component(&self, id: ItemId) -> Result<Component> {
        self.components
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::missing("component", id))
    }

    fn template(&self, id: ItemId) -> Result<Template> {
        self.templates
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::missing("template", id))
    }

    fn container(&self, id: ItemId) -> Result<Container> {
        self.containers
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::missing("container", id))
    }

    fn linked_template(&self, component: ItemId) -> Result<Option<ItemId>> {
        Ok(self.link_templates.get(&component).copied())
    }
}
