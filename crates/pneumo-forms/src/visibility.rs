use std::collections::{BTreeMap, BTreeSet};

use pneumo_core::models::patient::PatientContext;
use serde::Serialize;

use crate::catalog::{Catalog, FieldDescriptor};
use crate::path::FieldPath;
use crate::state::FormState;

/// Result of one visibility pass.
///
/// Fields of sections that are not mounted have no entry at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VisibilityMap {
    mounted_sections: BTreeSet<String>,
    fields: BTreeMap<FieldPath, bool>,
}

impl VisibilityMap {
    pub fn is_mounted(&self, section_id: &str) -> bool {
        self.mounted_sections.contains(section_id)
    }

    /// `false` for hidden fields and for fields of unmounted sections.
    pub fn is_visible(&self, path: &FieldPath) -> bool {
        self.fields.get(path).copied().unwrap_or(false)
    }

    /// `true` only when the field belongs to a mounted section.
    pub fn is_rendered(&self, path: &FieldPath) -> bool {
        self.fields.contains_key(path)
    }

    pub fn visible_fields(&self) -> impl Iterator<Item = &FieldPath> {
        self.fields
            .iter()
            .filter_map(|(path, visible)| visible.then_some(path))
    }

    pub fn hidden_fields(&self) -> impl Iterator<Item = &FieldPath> {
        self.fields
            .iter()
            .filter_map(|(path, visible)| (!visible).then_some(path))
    }
}

/// Evaluate every mounted field in one pass, parents before children.
///
/// A field is visible when its parent is visible and its own predicate holds.
/// Predicates under a hidden parent are not evaluated.
pub fn evaluate(
    catalog: &Catalog,
    state: &FormState,
    patient: Option<&PatientContext>,
) -> VisibilityMap {
    let mut map = VisibilityMap::default();
    for section in catalog.sections() {
        if !section.is_mounted(patient) {
            continue;
        }
        map.mounted_sections.insert(section.id.clone());
        for field in &section.fields {
            visit(field, true, state, &mut map);
        }
    }
    map
}

fn visit(field: &FieldDescriptor, parent_visible: bool, state: &FormState, map: &mut VisibilityMap) {
    let visible = parent_visible
        && field
            .visible_when
            .as_ref()
            .is_none_or(|condition| condition.evaluate(state));
    map.fields.insert(field.path.clone(), visible);
    for child in &field.children {
        visit(child, visible, state, map);
    }
}
