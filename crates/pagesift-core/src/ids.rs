//! Repository identifiers.
//!
//! Items are addressed by a publication-scoped numeric id plus an item kind,
//! rendered in the repository URI form `tcm:{publication}-{item}[-{kind}]`.
//! Components omit the kind suffix.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Kind of a repository item, with its numeric type code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// Folder (organizational container for components).
    Folder,
    /// Structure group (organizational container for pages).
    StructureGroup,
    /// Schema.
    Schema,
    /// Component.
    Component,
    /// Component template.
    ComponentTemplate,
    /// Page.
    Page,
    /// Page template.
    PageTemplate,
    /// Keyword.
    Keyword,
}

impl ItemKind {
    /// Numeric type code used in repository URIs and index documents.
    pub fn code(self) -> u32 {
        match self {
            Self::Folder => 2,
            Self::StructureGroup => 4,
            Self::Schema => 8,
            Self::Component => 16,
            Self::ComponentTemplate => 32,
            Self::Page => 64,
            Self::PageTemplate => 128,
            Self::Keyword => 1024,
        }
    }

    /// Looks up a kind by its type code.
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            2 => Some(Self::Folder),
            4 => Some(Self::StructureGroup),
            8 => Some(Self::Schema),
            16 => Some(Self::Component),
            32 => Some(Self::ComponentTemplate),
            64 => Some(Self::Page),
            128 => Some(Self::PageTemplate),
            1024 => Some(Self::Keyword),
            _ => None,
        }
    }

    /// Returns `true` for folders and structure groups.
    pub fn is_container(self) -> bool {
        matches!(self, Self::Folder | Self::StructureGroup)
    }
}

/// Identifier of a repository item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId {
    /// Publication (repository) id.
    pub publication: u32,
    /// Item id within the publication.
    pub item: u32,
    /// Item kind.
    pub kind: ItemKind,
}

impl ItemId {
    /// Creates a new identifier.
    pub fn new(publication: u32, item: u32, kind: ItemKind) -> Self {
        Self {
            publication,
            item,
            kind,
        }
    }

    /// Shorthand for a component id.
    pub fn component(publication: u32, item: u32) -> Self {
        Self::new(publication, item, ItemKind::Component)
    }

    /// The stable identifier indexed for references to this item: the
    /// item id in decimal form.
    pub fn stable_id(&self) -> String {
        self.item.to_string()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ItemKind::Component => write!(f, "tcm:{}-{}", self.publication, self.item),
            kind => write!(f, "tcm:{}-{}-{}", self.publication, self.item, kind.code()),
        }
    }
}

impl FromStr for ItemId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::invalid_id(s);
        let rest = s.strip_prefix("tcm:").ok_or_else(invalid)?;
        let parts: Vec<&str> = rest.split('-').collect();
        let number = |p: &str| p.parse::<u32>().map_err(|_| invalid());

        match parts.as_slice() {
            [publication, item] => Ok(Self::component(number(publication)?, number(item)?)),
            [publication, item, code] => {
                let kind = ItemKind::from_code(number(code)?).ok_or_else(invalid)?;
                Ok(Self::new(number(publication)?, number(item)?, kind))
            }
            _ => Err(invalid()),
        }
    }
}

/// Identifier of a component presentation (component + template pairing).
///
/// Rendered as `dcp:{publication}-{component}-{template}`; this is the key
/// stored in the suppression registry.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PresentationId {
    /// Publication of the component.
    pub publication: u32,
    /// Component item id.
    pub component: u32,
    /// Template item id.
    pub template: u32,
}

impl PresentationId {
    /// Builds the presentation id for a component/template pair.
    pub fn new(component: ItemId, template: ItemId) -> Self {
        Self {
            publication: component.publication,
            component: component.item,
            template: template.item,
        }
    }
}

impl fmt::Display for PresentationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "dcp:{}-{}-{}",
            self.publication, self.component, self.template
        )
    }
}
