use std::collections::{BTreeMap, BTreeSet, HashSet};

use pneumo_core::models::patient::{PatientContext, Sex};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::condition::Condition;
use crate::error::CatalogError;
use crate::path::{FieldPath, path};
use crate::value::FieldKind;

/// Static description of one field and the dependent fields it hosts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FieldDescriptor {
    pub path: FieldPath,
    pub label: String,
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible_when: Option<Condition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FieldDescriptor>,
}

impl FieldDescriptor {
    pub fn new(path: FieldPath, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            path,
            label: label.into(),
            kind,
            visible_when: None,
            children: Vec::new(),
        }
    }

    pub(crate) fn boolean(raw: &str, label: &str) -> Self {
        Self::new(path(raw), label, FieldKind::Boolean)
    }

    pub(crate) fn number(raw: &str, label: &str, unit: Option<&str>) -> Self {
        Self::new(
            path(raw),
            label,
            FieldKind::Number {
                unit: unit.map(str::to_string),
            },
        )
    }

    pub(crate) fn text(raw: &str, label: &str) -> Self {
        Self::new(path(raw), label, FieldKind::Text { multiline: false })
    }

    pub(crate) fn textarea(raw: &str, label: &str) -> Self {
        Self::new(path(raw), label, FieldKind::Text { multiline: true })
    }

    pub(crate) fn choice(raw: &str, label: &str, options: &[&str]) -> Self {
        Self::new(
            path(raw),
            label,
            FieldKind::Choice {
                options: options.iter().map(|o| o.to_string()).collect(),
            },
        )
    }

    pub(crate) fn multi_choice(raw: &str, label: &str, options: &[&str]) -> Self {
        Self::new(
            path(raw),
            label,
            FieldKind::MultiChoice {
                options: options.iter().map(|o| o.to_string()).collect(),
            },
        )
    }

    pub fn when(mut self, condition: Condition) -> Self {
        self.visible_when = Some(match self.visible_when.take() {
            Some(existing) => Condition::All {
                conditions: vec![existing, condition],
            },
            None => condition,
        });
        self
    }

    /// Nest `children` under this boolean field, shown only while it is `true`.
    pub fn reveals(mut self, children: Vec<FieldDescriptor>) -> Self {
        let gate = Condition::is_true(self.path.clone());
        self.children
            .extend(children.into_iter().map(|child| child.when(gate.clone())));
        self
    }

    /// Nest `children` under this choice field, shown only while it equals `value`.
    pub fn reveals_when(mut self, value: &str, children: Vec<FieldDescriptor>) -> Self {
        let gate = Condition::equals(self.path.clone(), value);
        self.children
            .extend(children.into_iter().map(|child| child.when(gate.clone())));
        self
    }

    fn collect<'a>(&'a self, out: &mut Vec<&'a FieldDescriptor>) {
        out.push(self);
        for child in &self.children {
            child.collect(out);
        }
    }
}

/// Patient-level predicate deciding whether a whole section exists at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "attribute", rename_all = "snake_case")]
#[ts(export)]
pub enum PatientGate {
    Sex { sex: Sex },
}

impl PatientGate {
    /// Fail-closed: without a patient, or without the attribute, the gate stays shut.
    pub fn admits(&self, patient: Option<&PatientContext>) -> bool {
        match self {
            PatientGate::Sex { sex } => patient.and_then(|p| p.sex) == Some(*sex),
        }
    }
}

/// A titled group of top-level fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Section {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gate: Option<PatientGate>,
    pub fields: Vec<FieldDescriptor>,
}

impl Section {
    pub fn new(id: impl Into<String>, title: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            gate: None,
            fields,
        }
    }

    pub fn gated(mut self, gate: PatientGate) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn is_mounted(&self, patient: Option<&PatientContext>) -> bool {
        self.gate.as_ref().is_none_or(|gate| gate.admits(patient))
    }

    /// All descriptors of the section, parents before children.
    pub fn descriptors(&self) -> Vec<&FieldDescriptor> {
        let mut out = Vec::new();
        for field in &self.fields {
            field.collect(&mut out);
        }
        out
    }
}

/// Which descriptors read which field.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    dependents: BTreeMap<FieldPath, Vec<FieldPath>>,
}

impl DependencyGraph {
    /// Descriptors whose own predicate reads `path`.
    pub fn dependents(&self, path: &FieldPath) -> &[FieldPath] {
        self.dependents.get(path).map(Vec::as_slice).unwrap_or_default()
    }
}

/// Position of a descriptor: section index, then child indexes from the top-level field down.
#[derive(Debug, Clone)]
struct Location {
    section: usize,
    route: Vec<usize>,
}

/// The validated field tree of one pathology.
#[derive(Debug, Clone)]
pub struct Catalog {
    pathology_id: String,
    sections: Vec<Section>,
    index: BTreeMap<FieldPath, Location>,
    graph: DependencyGraph,
}

impl Catalog {
    pub fn new(pathology_id: impl Into<String>, sections: Vec<Section>) -> Result<Self, CatalogError> {
        let mut section_ids = HashSet::new();
        for section in &sections {
            if !section_ids.insert(section.id.as_str()) {
                return Err(CatalogError::DuplicateSection(section.id.clone()));
            }
        }

        let mut index = BTreeMap::new();
        for (section_idx, section) in sections.iter().enumerate() {
            for (field_idx, field) in section.fields.iter().enumerate() {
                index_field(field, section_idx, vec![field_idx], &mut index)?;
            }
        }

        for path in index.keys() {
            let mut ancestor = path.parent();
            while let Some(prefix) = ancestor {
                if index.contains_key(&prefix) {
                    return Err(CatalogError::PathConflict {
                        prefix,
                        value: path.clone(),
                    });
                }
                ancestor = prefix.parent();
            }
        }

        let mut graph = DependencyGraph::default();
        for section in &sections {
            for descriptor in section.descriptors() {
                if descriptor.kind.options().is_empty()
                    && matches!(
                        descriptor.kind,
                        FieldKind::Choice { .. } | FieldKind::MultiChoice { .. }
                    )
                {
                    return Err(CatalogError::EmptyChoice(descriptor.path.clone()));
                }
                let Some(condition) = &descriptor.visible_when else {
                    continue;
                };
                let reads: BTreeSet<&FieldPath> = condition.reads().into_iter().collect();
                for read in reads {
                    if !index.contains_key(read) {
                        return Err(CatalogError::UnknownReference {
                            field: descriptor.path.clone(),
                            reference: read.clone(),
                        });
                    }
                    graph
                        .dependents
                        .entry(read.clone())
                        .or_default()
                        .push(descriptor.path.clone());
                }
            }
        }

        Ok(Self {
            pathology_id: pathology_id.into(),
            sections,
            index,
            graph,
        })
    }

    pub fn pathology_id(&self) -> &str {
        &self.pathology_id
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    pub fn contains(&self, path: &FieldPath) -> bool {
        self.index.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn descriptor(&self, path: &FieldPath) -> Option<&FieldDescriptor> {
        let location = self.index.get(path)?;
        let section = self.sections.get(location.section)?;
        let (first, rest) = location.route.split_first()?;
        let mut current = section.fields.get(*first)?;
        for idx in rest {
            current = current.children.get(*idx)?;
        }
        Some(current)
    }

    /// The section a field belongs to.
    pub fn section_of(&self, path: &FieldPath) -> Option<&Section> {
        self.index
            .get(path)
            .and_then(|location| self.sections.get(location.section))
    }

    /// Every descriptor of every section, parents before children.
    pub fn descriptors(&self) -> Vec<&FieldDescriptor> {
        self.sections.iter().flat_map(Section::descriptors).collect()
    }

    /// Descriptors whose visibility must be re-evaluated after `path` is written:
    /// the direct dependents and everything nested under them.
    pub fn affected_by(&self, path: &FieldPath) -> Vec<FieldPath> {
        let mut affected = BTreeSet::new();
        for dependent in self.graph.dependents(path) {
            if let Some(descriptor) = self.descriptor(dependent) {
                let mut subtree = Vec::new();
                descriptor.collect(&mut subtree);
                affected.extend(subtree.into_iter().map(|d| d.path.clone()));
            }
        }
        affected.into_iter().collect()
    }
}

fn index_field(
    field: &FieldDescriptor,
    section: usize,
    route: Vec<usize>,
    index: &mut BTreeMap<FieldPath, Location>,
) -> Result<(), CatalogError> {
    let location = Location {
        section,
        route: route.clone(),
    };
    if index.insert(field.path.clone(), location).is_some() {
        return Err(CatalogError::DuplicateField(field.path.clone()));
    }
    for (child_idx, child) in field.children.iter().enumerate() {
        let mut child_route = route.clone();
        child_route.push(child_idx);
        index_field(child, section, child_route, index)?;
    }
    Ok(())
}
