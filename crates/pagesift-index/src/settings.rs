//! Indexing settings.
//!
//! Settings decide which fields of a field tree are indexed and where their
//! values go. They are read from template metadata (or from the process
//! configuration for the defaults) as loosely formatted strings:
//!
//! | Metadata field | Grammar | Setting |
//! |----------------|---------|---------|
//! | `SearchIndexInclude` | contains `[include]` or `[exclude]` | default inclusion policy |
//! | `SearchIndexManagedFields` | `a,b,c` | fields that flip the default policy |
//! | `SearchIndexCustomFieldMap` | `target[+]:src1,src2\|target2:src3` | custom field targets |
//! | `SearchIndexLinkFieldsToEmbed` | `a,b` | component link fields to follow |
//! | `SearchIndexMinTemplatePrio` | integer | minimum template priority |
//!
//! Parsing never fails. Absent strings leave a setting unset; unset settings
//! are filled from a single process-level default instance when the
//! settings are [resolved](IndexingSettings::resolve).
//!
//! # Example
//!
//! ```rust
//! use pagesift_index::settings::{IndexingSettings, RawSettings};
//!
//! let settings = IndexingSettings::from_raw(&RawSettings {
//!     custom_field_map: Some("tags+:keywords,topics|title:heading"),
//!     ..Default::default()
//! });
//! let resolved = settings.resolve(&IndexingSettings::process_default());
//!
//! let target = resolved.custom_target("topics").unwrap();
//! assert_eq!(target.name, "tags");
//! assert!(target.multi_value);
//! assert!(!resolved.exclude_by_default());
//! ```

use std::collections::{HashMap, HashSet};

use pagesift_content::{contains_ignore_case, is_xml_name, parse_delimited_list, parse_lenient_int};
use pagesift_core::FieldSet;

/// Metadata field holding the include/exclude marker.
pub const FIELD_INCLUDE_EXCLUDE: &str = "SearchIndexInclude";
/// Metadata field holding the managed field list.
pub const FIELD_MANAGED_FIELDS: &str = "SearchIndexManagedFields";
/// Metadata field holding the custom field map.
pub const FIELD_CUSTOM_FIELD_MAP: &str = "SearchIndexCustomFieldMap";
/// Metadata field holding the link fields to embed.
pub const FIELD_LINK_FIELDS_TO_EMBED: &str = "SearchIndexLinkFieldsToEmbed";
/// Metadata field holding the minimum template priority.
pub const FIELD_MIN_TEMPLATE_PRIORITY: &str = "SearchIndexMinTemplatePrio";

/// Marker selecting include-by-default.
pub const MARKER_INCLUDE: &str = "[include]";
/// Marker selecting exclude-by-default.
pub const MARKER_EXCLUDE: &str = "[exclude]";

/// Reserved custom field target that captures the document title.
pub const TITLE_TARGET: &str = "title";

// ============================================================================
// IndexField / FieldMap
// ============================================================================

/// A named target field in the search document.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IndexField {
    /// Target field name.
    pub name: String,
    /// Whether every value is kept (`true`) or only the first (`false`).
    pub multi_value: bool,
}

impl IndexField {
    /// Creates a target field.
    pub fn new(name: impl Into<String>, multi_value: bool) -> Self {
        Self {
            name: name.into(),
            multi_value,
        }
    }

    /// Returns `true` for the reserved title target.
    pub fn is_title(&self) -> bool {
        self.name == TITLE_TARGET
    }
}

/// Mapping from source field names to custom target fields.
///
/// The first mapping registered for a source field wins; later ones are
/// ignored.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldMap {
    targets: HashMap<String, IndexField>,
}

impl FieldMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `target[+]:src1,src2|target2:src3`.
    ///
    /// A trailing `+` on the target marks it multi-valued. A token without
    /// `:` maps the field of that name to a single-valued target of the
    /// same name.
    pub fn parse(input: &str) -> Self {
        let mut map = Self::new();
        for token in input.split('|') {
            let (target, sources) = match token.split_once(':') {
                Some((target, sources)) => (target.trim(), Some(sources)),
                None => (token.trim(), None),
            };
            let (target, multi_value) = match target.strip_suffix('+') {
                Some(stripped) => (stripped.trim(), true),
                None => (target, false),
            };
            if target.is_empty() {
                continue;
            }
            if !is_xml_name(target) {
                log::warn!("Ignoring custom field target {target:?}: not a valid element name");
                continue;
            }
            match sources {
                Some(sources) => {
                    for source in parse_delimited_list(sources, ',') {
                        map.insert(source, IndexField::new(target, multi_value));
                    }
                }
                None => {
                    map.insert(target.to_string(), IndexField::new(target, false));
                }
            }
        }
        map
    }

    /// Registers a mapping unless the source already has one.
    ///
    /// Returns `true` if the mapping was added.
    pub fn insert(&mut self, source: impl Into<String>, target: IndexField) -> bool {
        let source = source.into();
        if self.targets.contains_key(&source) {
            log::debug!("Ignoring duplicate custom field mapping for '{source}'");
            return false;
        }
        self.targets.insert(source, target);
        true
    }

    /// Target for a source field.
    pub fn get(&self, source: &str) -> Option<&IndexField> {
        self.targets.get(source)
    }

    /// Returns `true` if the source field is mapped.
    pub fn contains(&self, source: &str) -> bool {
        self.targets.contains_key(source)
    }

    /// Number of mapped source fields.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Returns `true` if nothing is mapped.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

// ============================================================================
// Raw settings
// ============================================================================

/// Unparsed settings strings, as found in metadata or configuration.
///
/// `None` means the setting is absent.
#[derive(Clone, Copy, Debug, Default)]
pub struct RawSettings<'a> {
    /// Include/exclude marker string.
    pub include: Option<&'a str>,
    /// Comma-separated managed field names.
    pub managed_fields: Option<&'a str>,
    /// Custom field map.
    pub custom_field_map: Option<&'a str>,
    /// Comma-separated link field names.
    pub link_fields_to_embed: Option<&'a str>,
    /// Minimum template priority.
    pub min_template_priority: Option<&'a str>,
}

impl<'a> RawSettings<'a> {
    /// Reads the settings fields from a metadata field tree.
    pub fn from_metadata(metadata: &'a FieldSet) -> Self {
        Self {
            include: metadata.find_text(FIELD_INCLUDE_EXCLUDE),
            managed_fields: metadata.find_text(FIELD_MANAGED_FIELDS),
            custom_field_map: metadata.find_text(FIELD_CUSTOM_FIELD_MAP),
            link_fields_to_embed: metadata.find_text(FIELD_LINK_FIELDS_TO_EMBED),
            min_template_priority: metadata.find_text(FIELD_MIN_TEMPLATE_PRIORITY),
        }
    }
}

/// Interprets an include/exclude marker string.
///
/// `[include]` wins over `[exclude]` when both are present; a string with
/// neither marker leaves the policy unset.
pub fn parse_include_marker(value: &str) -> Option<bool> {
    if contains_ignore_case(value, MARKER_INCLUDE) {
        Some(false)
    } else if contains_ignore_case(value, MARKER_EXCLUDE) {
        Some(true)
    } else {
        None
    }
}

// ============================================================================
// IndexingSettings
// ============================================================================

/// Indexing settings for one scope, possibly partial.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IndexingSettings {
    /// Whether fields are excluded unless managed.
    pub exclude_by_default: Option<bool>,
    /// Fields that flip the default policy.
    pub managed_fields: Option<Vec<String>>,
    /// Custom field targets.
    pub field_map: Option<FieldMap>,
    /// Component link fields whose targets are embedded.
    pub link_fields_to_embed: Option<Vec<String>>,
    /// Minimum priority for a repository-publishable, page-embeddable
    /// template to be indexed.
    pub min_template_priority: Option<i32>,
}

impl IndexingSettings {
    /// Settings with everything unset.
    pub fn unset() -> Self {
        Self::default()
    }

    /// The built-in process-level default: include everything, no
    /// mappings, no links followed, priority threshold 0.
    pub fn process_default() -> Self {
        Self {
            exclude_by_default: Some(false),
            managed_fields: Some(Vec::new()),
            field_map: Some(FieldMap::new()),
            link_fields_to_embed: Some(Vec::new()),
            min_template_priority: Some(0),
        }
    }

    /// Parses raw settings strings.
    pub fn from_raw(raw: &RawSettings<'_>) -> Self {
        Self {
            exclude_by_default: raw.include.and_then(parse_include_marker),
            managed_fields: raw.managed_fields.map(|s| parse_delimited_list(s, ',')),
            field_map: raw.custom_field_map.map(FieldMap::parse),
            link_fields_to_embed: raw.link_fields_to_embed.map(|s| parse_delimited_list(s, ',')),
            min_template_priority: raw.min_template_priority.map(parse_lenient_int),
        }
    }

    /// Reads settings from template metadata; no metadata means all unset.
    pub fn from_metadata(metadata: Option<&FieldSet>) -> Self {
        match metadata {
            Some(metadata) => Self::from_raw(&RawSettings::from_metadata(metadata)),
            None => Self::unset(),
        }
    }

    /// Fills unset values from `defaults`.
    ///
    /// The managed field list is only inherited together with the policy:
    /// a scope that sets its own policy but no list manages no fields.
    pub fn resolve(&self, defaults: &IndexingSettings) -> ResolvedSettings {
        let managed = match self.exclude_by_default {
            None => self
                .managed_fields
                .as_ref()
                .or(defaults.managed_fields.as_ref()),
            Some(_) => self.managed_fields.as_ref(),
        };

        ResolvedSettings {
            exclude_by_default: self
                .exclude_by_default
                .or(defaults.exclude_by_default)
                .unwrap_or(false),
            managed_fields: managed.into_iter().flatten().cloned().collect(),
            field_map: self
                .field_map
                .as_ref()
                .or(defaults.field_map.as_ref())
                .cloned()
                .unwrap_or_default(),
            link_fields_to_embed: self
                .link_fields_to_embed
                .as_ref()
                .or(defaults.link_fields_to_embed.as_ref())
                .into_iter()
                .flatten()
                .cloned()
                .collect(),
            min_template_priority: self
                .min_template_priority
                .or(defaults.min_template_priority)
                .unwrap_or(0),
        }
    }
}

/// Fully resolved settings, ready for field processing.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedSettings {
    exclude_by_default: bool,
    managed_fields: HashSet<String>,
    field_map: FieldMap,
    link_fields_to_embed: HashSet<String>,
    min_template_priority: i32,
}

impl Default for ResolvedSettings {
    fn default() -> Self {
        IndexingSettings::unset().resolve(&IndexingSettings::process_default())
    }
}

impl ResolvedSettings {
    /// Whether fields are excluded unless managed.
    pub fn exclude_by_default(&self) -> bool {
        self.exclude_by_default
    }

    /// Returns `true` if the field is in the managed set.
    pub fn is_managed(&self, field: &str) -> bool {
        self.managed_fields.contains(field)
    }

    /// Custom target for a source field, if mapped.
    pub fn custom_target(&self, field: &str) -> Option<&IndexField> {
        self.field_map.get(field)
    }

    /// Returns `true` if links in this field are followed and embedded.
    pub fn follows_link(&self, field: &str) -> bool {
        self.link_fields_to_embed.contains(field)
    }

    /// Minimum template priority threshold.
    pub fn min_template_priority(&self) -> i32 {
        self.min_template_priority
    }
}

// ============================================================================
// Tests
// ============================================================================
