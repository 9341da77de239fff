//! Typed content field model.
//!
//! A [`FieldSet`] is an ordered list of [`ContentField`]s as produced by the
//! host content model for one schema (content or metadata). Embedded groups
//! nest further field sets, so a field set is a tree. Field names are only
//! unique within their immediate parent set.
//!
//! # Example
//!
//! ```rust
//! use pagesift_core::fields::{ContentField, FieldSet};
//!
//! let fields = FieldSet::new()
//!     .with(ContentField::text("heading", ["Welcome"]))
//!     .with(ContentField::embedded(
//!         "section",
//!         [FieldSet::new().with(ContentField::text("NoIndex", ["yes"]))],
//!     ));
//!
//! assert_eq!(fields.len(), 2);
//! assert_eq!(fields.find_text("NoIndex"), Some("yes"));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::ItemId;

/// Reference to a keyword in a taxonomy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KeywordRef {
    /// Keyword identifier.
    pub id: ItemId,
    /// Keyword title.
    pub title: String,
}

impl KeywordRef {
    /// Creates a keyword reference.
    pub fn new(id: ItemId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}

/// The values of a field, discriminated by field kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "values", rename_all = "snake_case")]
pub enum FieldValues {
    /// Plain text.
    Text(Vec<String>),
    /// XHTML markup.
    RichText(Vec<String>),
    /// Keyword references.
    Keyword(Vec<KeywordRef>),
    /// Links to other components.
    ComponentLink(Vec<ItemId>),
    /// Dates.
    Date(Vec<DateTime<Utc>>),
    /// Numbers.
    Number(Vec<f64>),
    /// Nested field sets.
    Embedded(Vec<FieldSet>),
    /// A field kind the indexer does not understand (multimedia, external
    /// links, ...). Never indexed.
    Unsupported(String),
}

impl FieldValues {
    /// Short name of the field kind, for logging.
    pub fn kind_name(&self) -> &str {
        match self {
            Self::Text(_) => "text",
            Self::RichText(_) => "rich_text",
            Self::Keyword(_) => "keyword",
            Self::ComponentLink(_) => "component_link",
            Self::Date(_) => "date",
            Self::Number(_) => "number",
            Self::Embedded(_) => "embedded",
            Self::Unsupported(kind) => kind,
        }
    }

    /// Number of values held.
    pub fn len(&self) -> usize {
        match self {
            Self::Text(v) | Self::RichText(v) => v.len(),
            Self::Keyword(v) => v.len(),
            Self::ComponentLink(v) => v.len(),
            Self::Date(v) => v.len(),
            Self::Number(v) => v.len(),
            Self::Embedded(v) => v.len(),
            Self::Unsupported(_) => 0,
        }
    }

    /// Returns `true` if no values are held.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A named field with its values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContentField {
    /// XML name of the field in its schema.
    pub name: String,
    /// Whether the schema allows multiple values.
    #[serde(default)]
    pub multi_value: bool,
    /// The field's values.
    #[serde(flatten)]
    pub values: FieldValues,
}

impl ContentField {
    /// Creates a field; cardinality is inferred from the number of values.
    pub fn new(name: impl Into<String>, values: FieldValues) -> Self {
        Self {
            name: name.into(),
            multi_value: values.len() > 1,
            values,
        }
    }

    /// Text field.
    pub fn text<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(name, FieldValues::Text(values.into_iter().map(Into::into).collect()))
    }

    /// Rich text (XHTML) field.
    pub fn rich_text<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            name,
            FieldValues::RichText(values.into_iter().map(Into::into).collect()),
        )
    }

    /// Keyword field.
    pub fn keyword(name: impl Into<String>, values: impl IntoIterator<Item = KeywordRef>) -> Self {
        Self::new(name, FieldValues::Keyword(values.into_iter().collect()))
    }

    /// Component link field.
    pub fn component_link(name: impl Into<String>, values: impl IntoIterator<Item = ItemId>) -> Self {
        Self::new(name, FieldValues::ComponentLink(values.into_iter().collect()))
    }

    /// Date field.
    pub fn date(name: impl Into<String>, values: impl IntoIterator<Item = DateTime<Utc>>) -> Self {
        Self::new(name, FieldValues::Date(values.into_iter().collect()))
    }

    /// Number field.
    pub fn number(name: impl Into<String>, values: impl IntoIterator<Item = f64>) -> Self {
        Self::new(name, FieldValues::Number(values.into_iter().collect()))
    }

    /// Embedded field group.
    pub fn embedded(name: impl Into<String>, values: impl IntoIterator<Item = FieldSet>) -> Self {
        Self::new(name, FieldValues::Embedded(values.into_iter().collect()))
    }

    /// Field of a kind the indexer skips.
    pub fn unsupported(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self::new(name, FieldValues::Unsupported(kind.into()))
    }

    /// Overrides the inferred cardinality.
    pub fn with_multi_value(mut self, multi_value: bool) -> Self {
        self.multi_value = multi_value;
        self
    }

    /// First text value of a text or rich text field.
    pub fn first_text(&self) -> Option<&str> {
        match &self.values {
            FieldValues::Text(v) | FieldValues::RichText(v) => v.first().map(String::as_str),
            _ => None,
        }
    }
}

/// An ordered set of fields for one schema.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldSet {
    fields: Vec<ContentField>,
}

impl FieldSet {
    /// Creates an empty field set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field (builder style).
    pub fn with(mut self, field: ContentField) -> Self {
        self.fields.push(field);
        self
    }

    /// Appends a field.
    pub fn push(&mut self, field: ContentField) {
        self.fields.push(field);
    }

    /// Iterates the fields in order.
    pub fn iter(&self) -> std::slice::Iter<'_, ContentField> {
        self.fields.iter()
    }

    /// Number of top-level fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if there are no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the top-level field with the given name.
    pub fn get(&self, name: &str) -> Option<&ContentField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Finds the first text value of a field with the given name anywhere in
    /// the tree, depth-first in document order.
    ///
    /// Metadata markers (`NoIndex`, `SearchIndex*`) are looked up this way so
    /// they may sit inside embedded groups.
    pub fn find_text(&self, name: &str) -> Option<&str> {
        for field in &self.fields {
            if field.name == name {
                if let Some(text) = field.first_text() {
                    return Some(text);
                }
            }
            if let FieldValues::Embedded(groups) = &field.values {
                if let Some(text) = groups.iter().find_map(|g| g.find_text(name)) {
                    return Some(text);
                }
            }
        }
        None
    }
}

impl FromIterator<ContentField> for FieldSet {
    fn from_iter<T: IntoIterator<Item = ContentField>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a FieldSet {
    type Item = &'a ContentField;
    type IntoIter = std::slice::Iter<'a, ContentField>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
