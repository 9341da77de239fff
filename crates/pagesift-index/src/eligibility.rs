//! Indexing eligibility.
//!
//! Items opt out of indexing with a `NoIndex` metadata field set to `yes`
//! (any case). Organizational containers pass their opt-out down to
//! everything below them. Component presentations additionally depend on
//! the template rendering them.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use pagesift_core::{ContentRepository, FieldSet, ItemId, ItemKind, Result, Template};

/// Metadata field marking an item as not indexed.
pub const FIELD_NO_INDEX: &str = "NoIndex";

/// How far up the container hierarchy a `NoIndex` marker is looked for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerInheritance {
    /// Any ancestor container can opt its descendants out.
    #[default]
    Recursive,
    /// Only the immediate container is checked.
    Direct,
}

/// Returns `true` unless the metadata carries `NoIndex = yes`.
pub fn is_item_indexed(metadata: Option<&FieldSet>) -> bool {
    let no_index = metadata
        .and_then(|m| m.find_text(FIELD_NO_INDEX))
        .is_some_and(|v| v.trim().eq_ignore_ascii_case("yes"));
    !no_index
}

/// Checks a container, and depending on `inheritance` its ancestors.
///
/// Walking stops at the root, at a container that is its own parent, or on
/// a parent cycle.
pub fn is_container_indexed(
    repository: &dyn ContentRepository,
    container: ItemId,
    inheritance: ContainerInheritance,
) -> Result<bool> {
    let mut visited = HashSet::new();
    let mut current = Some(container);

    while let Some(id) = current {
        if !visited.insert(id) {
            log::warn!("Container hierarchy cycle at {id}");
            break;
        }
        let container = repository.container(id)?;
        if !is_item_indexed(container.metadata.as_ref()) {
            log::debug!("Container {id} is marked NoIndex");
            return Ok(false);
        }
        if inheritance == ContainerInheritance::Direct {
            break;
        }
        current = container.parent.filter(|parent| parent.item != id.item);
    }
    Ok(true)
}

/// Returns `true` if presentations rendered with this template are indexed.
///
/// A template that is repository-publishable and allowed on pages must
/// also reach `min_priority`; the template's own `NoIndex` marker always
/// applies.
pub fn is_template_indexed(template: &Template, min_priority: i32) -> bool {
    let qualifies = !template.repository_publishable
        || !template.allow_on_page
        || template.priority >= min_priority;
    if !qualifies {
        log::debug!(
            "Template {} priority {} below threshold {min_priority}",
            template.id,
            template.priority
        );
        return false;
    }
    is_item_indexed(template.metadata.as_ref())
}

/// Item numbers of the structure groups from `start` up to the root.
pub fn container_ancestry(repository: &dyn ContentRepository, start: ItemId) -> Result<Vec<u32>> {
    let mut ancestry = Vec::new();
    let mut visited = HashSet::new();
    let mut current = Some(start);

    while let Some(id) = current {
        if id.kind != ItemKind::StructureGroup || !visited.insert(id) {
            break;
        }
        ancestry.push(id.item);
        current = repository.container(id)?.parent;
    }
    Ok(ancestry)
}

// ============================================================================
// Tests
// ============================================================================
