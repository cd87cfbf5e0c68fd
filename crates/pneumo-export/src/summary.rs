use serde::{Deserialize, Serialize};
use serde_json::Value;

use pneumo_core::models::patient::{PatientContext, Sex};
use pneumo_forms::display::{DisplayColor, DisplayConfig, DisplayEntry};
use pneumo_forms::path::FieldPath;

/// Placeholder shown for an unanswered field when unanswered fields are kept.
pub const UNANSWERED: &str = "Non renseigné";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummaryOptions {
    /// Keep entries whose value is `null`, `""`, `[]` or `false`.
    #[serde(default)]
    pub show_unanswered: bool,
    /// Patient sex; groups gated on it are left out when absent.
    #[serde(default)]
    pub sex: Option<Sex>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub title: String,
    pub groups: Vec<SummaryGroup>,
}

impl Summary {
    pub fn entry(&self, label: &str) -> Option<&SummaryEntry> {
        self.groups
            .iter()
            .flat_map(|g| &g.entries)
            .find(|e| e.label == label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryGroup {
    pub title: String,
    pub entries: Vec<SummaryEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryEntry {
    pub label: String,
    pub value: String,
    pub color: DisplayColor,
}

/// Build the read-only summary of a saved record.
///
/// `data` is the record's form state. Entries follow the order of `display`;
/// groups left without any entry are dropped, and so are groups whose patient
/// gate does not admit `options.sex`.
pub fn build_summary(
    title: &str,
    display: &DisplayConfig,
    data: &Value,
    options: &SummaryOptions,
) -> Summary {
    let patient = options.sex.map(PatientContext::with_sex);
    let groups: Vec<SummaryGroup> = display
        .groups
        .iter()
        .filter(|group| group.admits(patient.as_ref()))
        .filter_map(|group| {
            let entries: Vec<SummaryEntry> = group
                .entries
                .iter()
                .filter_map(|entry| summarize(entry, lookup(data, &entry.path), options))
                .collect();
            (!entries.is_empty()).then(|| SummaryGroup {
                title: group.title.clone(),
                entries,
            })
        })
        .collect();

    tracing::debug!(
        title,
        groups = groups.len(),
        entries = groups.iter().map(|g| g.entries.len()).sum::<usize>(),
        "built record summary"
    );

    Summary {
        title: title.to_string(),
        groups,
    }
}

fn lookup<'a>(data: &'a Value, path: &FieldPath) -> Option<&'a Value> {
    let pointer: String = path.segments().map(|s| format!("/{s}")).collect();
    data.pointer(&pointer)
}

fn summarize(entry: &DisplayEntry, value: Option<&Value>, options: &SummaryOptions) -> Option<SummaryEntry> {
    let formatted = match value {
        Some(Value::Bool(true)) => Some("Oui".to_string()),
        Some(Value::Number(n)) => n.as_f64().map(|n| format_number(n, entry.unit.as_deref())),
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        Some(Value::Array(items)) if !items.is_empty() => Some(
            items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(", "),
        ),
        _ => None,
    };

    let value = match (formatted, value) {
        (Some(text), _) => text,
        (None, _) if !options.show_unanswered => return None,
        (None, Some(Value::Bool(false))) => "Non".to_string(),
        (None, _) => UNANSWERED.to_string(),
    };

    Some(SummaryEntry {
        label: entry.label.clone(),
        value,
        color: entry.color,
    })
}

fn format_number(n: f64, unit: Option<&str>) -> String {
    match unit {
        Some(unit) => format!("{n} {unit}"),
        None => n.to_string(),
    }
}
