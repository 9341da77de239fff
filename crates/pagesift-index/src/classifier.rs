//! Field routing.
//!
//! A [`FieldClassifier`] decides, for one field under a given set of
//! resolved settings, whether the field is indexed and where its values
//! go. The default rule is an exclusive-or gate:
//!
//! ```text
//! included = (exclude_by_default == managed.contains(name)) || field_map.contains(name)
//! ```
//!
//! With include-by-default the managed list names fields to leave out;
//! with exclude-by-default it names the only fields to keep. A custom
//! mapping always includes the field.

use pagesift_core::ContentField;

use crate::settings::{IndexField, ResolvedSettings};

/// Where a field's values go.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route<'s> {
    /// Not indexed.
    Excluded,
    /// Appended to the catch-all body.
    CatchAll,
    /// Written to a custom target.
    Custom(&'s IndexField),
}

impl Route<'_> {
    /// Returns `true` unless the route is [`Route::Excluded`].
    pub fn is_included(&self) -> bool {
        !matches!(self, Route::Excluded)
    }
}

/// Strategy deciding inclusion and routing of fields.
pub trait FieldClassifier {
    /// Routes a field.
    fn route<'s>(&self, field: &ContentField, settings: &'s ResolvedSettings) -> Route<'s>;

    /// Returns `true` if the linked components of an included link field
    /// are embedded.
    fn follows_links(&self, field: &ContentField, settings: &ResolvedSettings) -> bool {
        settings.follows_link(&field.name)
    }
}

/// The standard inclusion gate.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultClassifier;

impl DefaultClassifier {
    /// Applies the inclusion gate to a field name.
    pub fn is_included(name: &str, settings: &ResolvedSettings) -> bool {
        settings.exclude_by_default() == settings.is_managed(name)
            || settings.custom_target(name).is_some()
    }
}

impl FieldClassifier for DefaultClassifier {
    fn route<'s>(&self, field: &ContentField, settings: &'s ResolvedSettings) -> Route<'s> {
        if !Self::is_included(&field.name, settings) {
            return Route::Excluded;
        }
        match settings.custom_target(&field.name) {
            Some(target) => Route::Custom(target),
            None => Route::CatchAll,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
