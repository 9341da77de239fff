//! Search document representation.
//!
//! A [`SearchDocument`] is the single artifact produced for a page or a
//! standalone component presentation. Structural fields come from the
//! assembler; `body` and `custom_fields` come from field processing.
//!
//! # Creating Documents
//!
//! ```rust
//! use pagesift_index::{ItemType, SearchDocument};
//!
//! let doc = SearchDocument::builder()
//!     .url("/products/widget.html")
//!     .title("Widget")
//!     .publication_id(5)
//!     .item_type(ItemType::Page)
//!     .body("A very useful widget. ")
//!     .build();
//!
//! assert!(doc.has_index_data());
//! assert!(doc.to_xml().contains("<title>Widget</title>"));
//! ```

use std::collections::BTreeMap;
use std::fmt;

use html_escape::encode_text;
use serde::{Deserialize, Serialize};

use pagesift_content::directive::format_directive;
use pagesift_content::is_xml_name;
use pagesift_core::{ItemKind, Result};

/// Kind of unit a document was built from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    /// A page.
    #[default]
    Page,
    /// A standalone component presentation.
    Component,
}

impl ItemType {
    /// Numeric item type code (page 64, component 16).
    pub fn code(self) -> u32 {
        match self {
            Self::Page => ItemKind::Page.code(),
            Self::Component => ItemKind::Component.code(),
        }
    }
}

/// A document to be handed to the search index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchDocument {
    // Identity
    /// Page URL, or the component URI for presentations.
    pub url: String,
    /// Display title.
    pub title: String,

    // Structure
    /// Publication the unit belongs to.
    pub publication_id: u32,
    /// Schema of the (first) component.
    pub schema_id: u32,
    /// Page or component.
    pub item_type: ItemType,
    /// Immediate structure group, for pages.
    pub parent_container_id: Option<u32>,
    /// Structure groups from the parent up to the root.
    pub container_ancestry: Vec<u32>,
    /// Category used to restrict searches to areas of a site.
    #[serde(rename = "type")]
    pub doc_type: i32,

    // Index data
    /// Catch-all text.
    pub body: String,
    /// Custom field values by target name.
    pub custom_fields: BTreeMap<String, Vec<String>>,
}

impl SearchDocument {
    /// Create a new document builder.
    pub fn builder() -> SearchDocumentBuilder {
        SearchDocumentBuilder::default()
    }

    /// Returns `true` if the document carries any body text or custom value.
    pub fn has_index_data(&self) -> bool {
        !self.body.trim().is_empty() || self.custom_fields.values().any(|v| !v.is_empty())
    }

    /// Appends one value to a custom field.
    pub fn set_custom_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.custom_fields
            .entry(name.into())
            .or_default()
            .push(value.into());
    }

    /// Appends several values to a custom field.
    pub fn set_custom_fields<I, S>(&mut self, name: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.custom_fields
            .entry(name.into())
            .or_default()
            .extend(values.into_iter().map(Into::into));
    }

    /// Serializes to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserializes from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes to the `<indexdata>` XML record.
    ///
    /// Custom fields whose names are not valid element names are left out.
    pub fn to_xml(&self) -> String {
        IndexDataXml(self).to_string()
    }

    /// The XML record wrapped in an index-data directive comment.
    pub fn to_directive(&self) -> String {
        format_directive(&self.to_xml())
    }
}

/// Display adapter writing a document as its `<indexdata>` record.
struct IndexDataXml<'a>(&'a SearchDocument);

impl fmt::Display for IndexDataXml<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let doc = self.0;
        f.write_str("<indexdata>")?;
        write_text_element(f, "url", &doc.url)?;
        write_text_element(f, "title", &doc.title)?;
        write!(f, "<publicationid>{}</publicationid>", doc.publication_id)?;
        write!(f, "<schemaid>{}</schemaid>", doc.schema_id)?;
        write!(f, "<itemtype>{}</itemtype>", doc.item_type.code())?;
        if let Some(parent) = doc.parent_container_id {
            write!(f, "<parentsgid>{parent}</parentsgid>")?;
        }
        for sg in &doc.container_ancestry {
            write!(f, "<sgid>{sg}</sgid>")?;
        }
        write!(f, "<type>{}</type>", doc.doc_type)?;
        write_text_element(f, "body", &doc.body)?;
        f.write_str("<custom>")?;
        for (name, values) in &doc.custom_fields {
            if !is_xml_name(name) {
                log::warn!("Leaving out custom field {name:?}: not a valid element name");
                continue;
            }
            for value in values {
                write_text_element(f, name, value)?;
            }
        }
        f.write_str("</custom></indexdata>")
    }
}

fn write_text_element(f: &mut fmt::Formatter<'_>, name: &str, text: &str) -> fmt::Result {
    write!(f, "<{name}>{}</{name}>", encode_text(text))
}

/// Builder for SearchDocument.
#[derive(Debug, Default)]
pub struct SearchDocumentBuilder {
    doc: SearchDocument,
}

impl SearchDocumentBuilder {
    /// Set the URL.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.doc.url = url.into();
        self
    }

    /// Set the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.doc.title = title.into();
        self
    }

    /// Set the publication id.
    pub fn publication_id(mut self, id: u32) -> Self {
        self.doc.publication_id = id;
        self
    }

    /// Set the schema id.
    pub fn schema_id(mut self, id: u32) -> Self {
        self.doc.schema_id = id;
        self
    }

    /// Set the item type.
    pub fn item_type(mut self, item_type: ItemType) -> Self {
        self.doc.item_type = item_type;
        self
    }

    /// Set the immediate parent container.
    pub fn parent_container_id(mut self, id: u32) -> Self {
        self.doc.parent_container_id = Some(id);
        self
    }

    /// Set the container ancestry.
    pub fn container_ancestry(mut self, ancestry: Vec<u32>) -> Self {
        self.doc.container_ancestry = ancestry;
        self
    }

    /// Set the document type.
    pub fn doc_type(mut self, doc_type: i32) -> Self {
        self.doc.doc_type = doc_type;
        self
    }

    /// Set the catch-all body.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.doc.body = body.into();
        self
    }

    /// Set all custom fields.
    pub fn custom_fields(mut self, fields: BTreeMap<String, Vec<String>>) -> Self {
        self.doc.custom_fields = fields;
        self
    }

    /// Build the document.
    pub fn build(self) -> SearchDocument {
        self.doc
    }
}

// ============================================================================
// Tests
// ============================================================================
