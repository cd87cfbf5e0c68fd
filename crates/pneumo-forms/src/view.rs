use serde::Serialize;
use ts_rs::TS;

use crate::catalog::{Catalog, FieldDescriptor};
use crate::path::FieldPath;
use crate::state::FormState;
use crate::value::{FieldKind, FieldValue};
use crate::visibility::VisibilityMap;

/// The field tree as it should currently be rendered.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct FormView {
    pub pathology_id: String,
    pub sections: Vec<SectionView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct SectionView {
    pub id: String,
    pub title: String,
    pub fields: Vec<FieldView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct FieldView {
    pub path: FieldPath,
    pub label: String,
    pub kind: FieldKind,
    pub value: FieldValue,
    pub children: Vec<FieldView>,
}

impl FormView {
    pub fn section(&self, id: &str) -> Option<&SectionView> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Find a rendered field anywhere in the tree.
    pub fn field(&self, path: &FieldPath) -> Option<&FieldView> {
        self.sections
            .iter()
            .flat_map(|s| &s.fields)
            .find_map(|f| f.find(path))
    }
}

impl FieldView {
    fn find(&self, path: &FieldPath) -> Option<&FieldView> {
        if &self.path == path {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(path))
    }
}

pub(crate) fn render(catalog: &Catalog, state: &FormState, visibility: &VisibilityMap) -> FormView {
    let sections = catalog
        .sections()
        .iter()
        .filter(|section| visibility.is_mounted(&section.id))
        .map(|section| SectionView {
            id: section.id.clone(),
            title: section.title.clone(),
            fields: render_fields(&section.fields, state, visibility),
        })
        .collect();

    FormView {
        pathology_id: catalog.pathology_id().to_string(),
        sections,
    }
}

fn render_fields(fields: &[FieldDescriptor], state: &FormState, visibility: &VisibilityMap) -> Vec<FieldView> {
    fields
        .iter()
        .filter(|field| visibility.is_visible(&field.path))
        .map(|field| FieldView {
            path: field.path.clone(),
            label: field.label.clone(),
            kind: field.kind.clone(),
            value: field.kind.read(state.get(&field.path)),
            children: render_fields(&field.children, state, visibility),
        })
        .collect()
}
