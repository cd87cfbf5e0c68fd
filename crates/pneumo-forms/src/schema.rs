use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use ts_rs::TS;

use crate::catalog::{Catalog, FieldDescriptor};
use crate::path::FieldPath;
use crate::state::{FormState, json_type_name};
use crate::value::{FieldKind, coerce_number, number_to_json};

/// A pathology record after schema parsing: every declared field present,
/// defaults applied, numbers coerced. Undeclared keys are dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ValidatedRecord {
    pub pathology_id: String,
    #[ts(type = "Record<string, unknown>")]
    pub data: Map<String, Value>,
}

impl ValidatedRecord {
    pub fn get(&self, path: &FieldPath) -> Option<&Value> {
        let mut segments = path.segments();
        let mut current = self.data.get(segments.next()?)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.data.clone())
    }
}

/// One rejected field. `path` is empty when the record itself is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FieldIssue {
    pub path: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{pathology_id}: {} field(s) failed validation", issues.len())]
pub struct ValidationFailure {
    pub pathology_id: String,
    pub issues: Vec<FieldIssue>,
}

impl ValidationFailure {
    pub fn issue(&self, path: &str) -> Option<&FieldIssue> {
        self.issues.iter().find(|i| i.path == path)
    }
}

/// Parse a submitted form state against a pathology's catalog.
///
/// Numeric fields never fail. Objects that are absent or `null` default to `{}`,
/// so an empty submission always validates. Every issue is collected before
/// returning; one bad field does not stop the others from being checked.
pub fn validate(catalog: &Catalog, input: &Value) -> Result<ValidatedRecord, ValidationFailure> {
    let pathology_id = catalog.pathology_id().to_string();
    let root = match input {
        Value::Object(map) => Some(map),
        Value::Null => None,
        other => {
            return Err(ValidationFailure {
                pathology_id,
                issues: vec![FieldIssue {
                    path: String::new(),
                    message: format!("expected an object, got {}", json_type_name(other)),
                }],
            });
        }
    };

    // Keyed by path so a malformed parent object is reported once.
    let mut issues: BTreeMap<String, String> = BTreeMap::new();
    let mut output = FormState::new();

    for descriptor in catalog.descriptors() {
        let raw = match lookup(root, &descriptor.path) {
            Ok(raw) => raw,
            Err((prefix, found)) => {
                issues
                    .entry(prefix)
                    .or_insert_with(|| format!("expected an object, got {found}"));
                continue;
            }
        };
        match parse_field(descriptor, raw) {
            Ok(value) => output.set(&descriptor.path, value),
            Err(message) => {
                issues.insert(descriptor.path.to_string(), message);
            }
        }
    }

    if issues.is_empty() {
        Ok(ValidatedRecord {
            pathology_id,
            data: output.into_map(),
        })
    } else {
        tracing::warn!(
            pathology = %pathology_id,
            issues = issues.len(),
            "pathology record failed validation"
        );
        Err(ValidationFailure {
            pathology_id,
            issues: issues
                .into_iter()
                .map(|(path, message)| FieldIssue { path, message })
                .collect(),
        })
    }
}

/// Walk `path` through nested objects. Missing or `null` anywhere means absent.
/// A non-object in the way is reported with the offending prefix.
fn lookup<'a>(
    root: Option<&'a Map<String, Value>>,
    path: &FieldPath,
) -> Result<Option<&'a Value>, (String, &'static str)> {
    let Some(mut current) = root else {
        return Ok(None);
    };
    let segments: Vec<&str> = path.segments().collect();
    let Some((last, parents)) = segments.split_last() else {
        return Ok(None);
    };

    let mut prefix = String::new();
    for segment in parents {
        if !prefix.is_empty() {
            prefix.push('.');
        }
        prefix.push_str(segment);
        match current.get(*segment) {
            None | Some(Value::Null) => return Ok(None),
            Some(Value::Object(map)) => current = map,
            Some(other) => return Err((prefix, json_type_name(other))),
        }
    }
    Ok(current.get(*last).filter(|v| !v.is_null()))
}

fn parse_field(descriptor: &FieldDescriptor, raw: Option<&Value>) -> Result<Value, String> {
    match (&descriptor.kind, raw) {
        (FieldKind::Number { .. }, raw) => Ok(number_to_json(coerce_number(raw))),
        (kind, None) => Ok(kind.default_value().to_json()),
        (FieldKind::Boolean, Some(Value::Bool(b))) => Ok(Value::Bool(*b)),
        (FieldKind::Text { .. }, Some(Value::String(s))) => Ok(Value::String(s.clone())),
        (FieldKind::Choice { options }, Some(Value::String(s))) => {
            if s.is_empty() || options.contains(s) {
                Ok(Value::String(s.clone()))
            } else {
                Err(format!("'{s}' is not one of: {}", options.join(", ")))
            }
        }
        (FieldKind::MultiChoice { .. }, Some(Value::Array(items)))
            if items.iter().all(Value::is_string) =>
        {
            Ok(Value::Array(items.clone()))
        }
        (FieldKind::Boolean, Some(other)) => {
            Err(format!("expected a boolean, got {}", json_type_name(other)))
        }
        (FieldKind::Text { .. } | FieldKind::Choice { .. }, Some(other)) => {
            Err(format!("expected text, got {}", json_type_name(other)))
        }
        (FieldKind::MultiChoice { .. }, Some(_)) => Err("expected a list of text values".to_string()),
    }
}
