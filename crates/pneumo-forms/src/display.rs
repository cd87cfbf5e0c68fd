use pneumo_core::models::patient::PatientContext;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::PatientGate;
use crate::path::{FieldPath, path};

/// Accent used by the read-only summary for a value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum DisplayColor {
    #[default]
    Neutral,
    Info,
    Warning,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DisplayEntry {
    pub path: FieldPath,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default)]
    pub color: DisplayColor,
}

impl DisplayEntry {
    pub(crate) fn new(raw: &str, label: &str) -> Self {
        Self {
            path: path(raw),
            label: label.to_string(),
            unit: None,
            color: DisplayColor::Neutral,
        }
    }

    pub(crate) fn unit(mut self, unit: &str) -> Self {
        self.unit = Some(unit.to_string());
        self
    }

    pub(crate) fn color(mut self, color: DisplayColor) -> Self {
        self.color = color;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DisplayGroup {
    pub title: String,
    /// Same gate as the section its entries come from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gate: Option<PatientGate>,
    pub entries: Vec<DisplayEntry>,
}

impl DisplayGroup {
    pub(crate) fn gated(mut self, gate: PatientGate) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Whether the group belongs on this patient's summary. Fail-closed like
    /// section gates.
    pub fn admits(&self, patient: Option<&PatientContext>) -> bool {
        self.gate.as_ref().is_none_or(|gate| gate.admits(patient))
    }
}

/// Which fields a saved record shows on its summary, in which order and how.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DisplayConfig {
    pub groups: Vec<DisplayGroup>,
}

impl DisplayConfig {
    pub fn entries(&self) -> impl Iterator<Item = &DisplayEntry> {
        self.groups.iter().flat_map(|g| &g.entries)
    }
}

pub(crate) fn group(title: &str, entries: Vec<DisplayEntry>) -> DisplayGroup {
    DisplayGroup {
        title: title.to_string(),
        gate: None,
        entries,
    }
}
