//! Host content model.
//!
//! These are the publishable units and their surroundings as supplied by
//! the content-management host: components with their field trees,
//! templates with their metadata, pages aggregating component
//! presentations, and the organizational containers (folders and
//! structure groups) items live in.

use serde::{Deserialize, Serialize};

use crate::fields::FieldSet;
use crate::ids::ItemId;

/// A structured content item governed by a schema.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Component id.
    pub id: ItemId,
    /// Component title.
    pub title: String,
    /// Schema the content conforms to.
    pub schema: ItemId,
    /// Content fields, if the schema has any.
    pub content: Option<FieldSet>,
    /// Metadata fields, if any.
    pub metadata: Option<FieldSet>,
    /// Owning folder.
    pub container: Option<ItemId>,
}

impl Component {
    /// Creates a component with no fields.
    pub fn new(id: ItemId, title: impl Into<String>, schema: ItemId) -> Self {
        Self {
            id,
            title: title.into(),
            schema,
            content: None,
            metadata: None,
            container: None,
        }
    }

    /// Sets the content fields.
    pub fn with_content(mut self, content: FieldSet) -> Self {
        self.content = Some(content);
        self
    }

    /// Sets the metadata fields.
    pub fn with_metadata(mut self, metadata: FieldSet) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Sets the owning folder.
    pub fn in_container(mut self, container: ItemId) -> Self {
        self.container = Some(container);
        self
    }
}

/// A presentation template (page template or component template).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Template {
    /// Template id.
    pub id: ItemId,
    /// Template title.
    pub title: String,
    /// Template metadata, carrying indexing settings.
    pub metadata: Option<FieldSet>,
    /// Rendering priority.
    #[serde(default)]
    pub priority: i32,
    /// Whether output of this template may be placed on a page.
    #[serde(default = "default_true")]
    pub allow_on_page: bool,
    /// Whether output is published to the repository (dynamic presentation)
    /// rather than only embedded in pages.
    #[serde(default)]
    pub repository_publishable: bool,
}

fn default_true() -> bool {
    true
}

impl Template {
    /// Creates a template with default flags: page-embeddable, not
    /// repository-publishable, priority 0.
    pub fn new(id: ItemId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            metadata: None,
            priority: 0,
            allow_on_page: true,
            repository_publishable: false,
        }
    }

    /// Sets the metadata fields.
    pub fn with_metadata(mut self, metadata: FieldSet) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Sets whether the template may be used on a page.
    pub fn with_allow_on_page(mut self, allow: bool) -> Self {
        self.allow_on_page = allow;
        self
    }

    /// Sets whether the template is repository-publishable.
    pub fn with_repository_publishable(mut self, publishable: bool) -> Self {
        self.repository_publishable = publishable;
        self
    }
}

/// Pairing of a component with a template, by reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentPresentation {
    /// The component.
    pub component: ItemId,
    /// The component template.
    pub template: ItemId,
}

impl ComponentPresentation {
    /// Creates a presentation reference.
    pub fn new(component: ItemId, template: ItemId) -> Self {
        Self {
            component,
            template,
        }
    }
}

/// A renderable page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page id.
    pub id: ItemId,
    /// Page title.
    pub title: String,
    /// Published location of the page.
    pub url: String,
    /// Owning structure group.
    pub container: ItemId,
    /// Page template.
    pub template: ItemId,
    /// Page metadata.
    pub metadata: Option<FieldSet>,
    /// Component presentations in page order.
    pub presentations: Vec<ComponentPresentation>,
}

impl Page {
    /// Creates an empty page.
    pub fn new(
        id: ItemId,
        title: impl Into<String>,
        url: impl Into<String>,
        container: ItemId,
        template: ItemId,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            url: url.into(),
            container,
            template,
            metadata: None,
            presentations: Vec::new(),
        }
    }

    /// Sets the metadata fields.
    pub fn with_metadata(mut self, metadata: FieldSet) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Appends a component presentation.
    pub fn with_presentation(mut self, component: ItemId, template: ItemId) -> Self {
        self.presentations
            .push(ComponentPresentation::new(component, template));
        self
    }
}

/// An organizational container (folder or structure group).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Container {
    /// Container id.
    pub id: ItemId,
    /// Container title.
    pub title: String,
    /// Container metadata.
    pub metadata: Option<FieldSet>,
    /// Parent container; `None` at the root.
    pub parent: Option<ItemId>,
}

impl Container {
    /// Creates a root container.
    pub fn new(id: ItemId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            metadata: None,
            parent: None,
        }
    }

    /// Sets the parent container.
    pub fn with_parent(mut self, parent: ItemId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Sets the metadata fields.
    pub fn with_metadata(mut self, metadata: FieldSet) -> Self {
        self.metadata = Some(metadata);
        self
    }
}
