use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use crate::path::FieldPath;
use crate::state::FormState;

/// Visibility predicate over the current form state.
///
/// Kept as data rather than a closure so the catalog can list what each
/// predicate reads and ship it to the front end as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "op", rename_all = "snake_case")]
#[ts(export)]
pub enum Condition {
    /// The boolean field is `true`.
    IsTrue { field: FieldPath },
    /// The choice or text field equals `value`.
    Equals { field: FieldPath, value: String },
    /// The multi-choice field contains `value`.
    Includes { field: FieldPath, value: String },
    All { conditions: Vec<Condition> },
    Any { conditions: Vec<Condition> },
}

impl Condition {
    pub fn is_true(field: FieldPath) -> Self {
        Condition::IsTrue { field }
    }

    pub fn equals(field: FieldPath, value: impl Into<String>) -> Self {
        Condition::Equals {
            field,
            value: value.into(),
        }
    }

    pub fn includes(field: FieldPath, value: impl Into<String>) -> Self {
        Condition::Includes {
            field,
            value: value.into(),
        }
    }

    pub fn evaluate(&self, state: &FormState) -> bool {
        match self {
            Condition::IsTrue { field } => state.get(field).and_then(Value::as_bool) == Some(true),
            Condition::Equals { field, value } => {
                state.get(field).and_then(Value::as_str) == Some(value.as_str())
            }
            Condition::Includes { field, value } => state
                .get(field)
                .and_then(Value::as_array)
                .is_some_and(|items| items.iter().any(|v| v.as_str() == Some(value.as_str()))),
            Condition::All { conditions } => conditions.iter().all(|c| c.evaluate(state)),
            Condition::Any { conditions } => conditions.iter().any(|c| c.evaluate(state)),
        }
    }

    /// Every field path this predicate reads.
    pub fn reads(&self) -> Vec<&FieldPath> {
        let mut out = Vec::new();
        self.collect_reads(&mut out);
        out
    }

    fn collect_reads<'a>(&'a self, out: &mut Vec<&'a FieldPath>) {
        match self {
            Condition::IsTrue { field }
            | Condition::Equals { field, .. }
            | Condition::Includes { field, .. } => out.push(field),
            Condition::All { conditions } | Condition::Any { conditions } => {
                for condition in conditions {
                    condition.collect_reads(out);
                }
            }
        }
    }
}
