//! Per-document processing state.
//!
//! One [`ProcessingState`] accumulates everything a single search document
//! collects while its field trees are walked: the catch-all body, custom
//! field values, the captured title, and the components already visited.
//! It is created fresh for each document and discarded afterwards.

use std::collections::{BTreeMap, HashSet};

use pagesift_core::ItemId;

use crate::settings::IndexField;

/// Mutable accumulator for one document build.
#[derive(Clone, Debug, Default)]
pub struct ProcessingState {
    body: String,
    custom_fields: BTreeMap<String, Vec<String>>,
    title: Option<String>,
    traversed: HashSet<ItemId>,
}

impl ProcessingState {
    /// Creates an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a component as visited.
    ///
    /// Returns `false` if it had already been visited.
    pub fn mark_traversed(&mut self, id: ItemId) -> bool {
        self.traversed.insert(id)
    }

    /// Returns `true` if the component has been visited.
    pub fn is_traversed(&self, id: &ItemId) -> bool {
        self.traversed.contains(id)
    }

    /// Appends text to the catch-all body.
    pub fn push_body(&mut self, text: &str) {
        self.body.push_str(text);
    }

    /// Writes a value to a custom target.
    ///
    /// The title target and single-valued targets keep their first value;
    /// multi-valued targets keep every value in arrival order. Empty values
    /// are ignored. Returns `true` if the value was stored.
    pub fn write_custom(&mut self, target: &IndexField, value: String) -> bool {
        if value.is_empty() {
            return false;
        }
        if target.is_title() {
            return self.capture_title(value);
        }
        if !target.multi_value && self.custom_fields.contains_key(&target.name) {
            log::debug!("Dropping additional value for single-valued field '{}'", target.name);
            return false;
        }
        self.custom_fields
            .entry(target.name.clone())
            .or_default()
            .push(value);
        true
    }

    /// Captures the title unless one has already been captured.
    pub fn capture_title(&mut self, value: String) -> bool {
        if self.title.is_some() || value.is_empty() {
            return false;
        }
        self.title = Some(value);
        true
    }

    /// Catch-all body collected so far.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Custom field values collected so far.
    pub fn custom_fields(&self) -> &BTreeMap<String, Vec<String>> {
        &self.custom_fields
    }

    /// Captured title, if any.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns `true` if anything worth indexing was collected.
    pub fn has_index_data(&self) -> bool {
        !self.body.trim().is_empty() || !self.custom_fields.is_empty()
    }

    /// Consumes the state, returning body, custom fields and title.
    pub fn into_parts(self) -> (String, BTreeMap<String, Vec<String>>, Option<String>) {
        (self.body, self.custom_fields, self.title)
    }
}

// ============================================================================
// Tests
// ============================================================================
