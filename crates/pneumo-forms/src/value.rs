use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

/// The value space of a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export)]
pub enum FieldKind {
    /// Checkbox or toggle.
    Boolean,
    /// Numeric input; blank or unparseable input is stored as `null`.
    Number {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        unit: Option<String>,
    },
    /// Free text.
    Text {
        #[serde(default)]
        multiline: bool,
    },
    /// Single choice among fixed options. `""` means nothing selected.
    Choice { options: Vec<String> },
    /// Several checkboxes sharing one path, stored as a list of option strings.
    MultiChoice { options: Vec<String> },
}

impl FieldKind {
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Boolean => "boolean",
            FieldKind::Number { .. } => "number",
            FieldKind::Text { .. } => "text",
            FieldKind::Choice { .. } => "choice",
            FieldKind::MultiChoice { .. } => "multi_choice",
        }
    }

    pub fn default_value(&self) -> FieldValue {
        match self {
            FieldKind::Boolean => FieldValue::Bool(false),
            FieldKind::Number { .. } => FieldValue::Number(None),
            FieldKind::Text { .. } | FieldKind::Choice { .. } => FieldValue::Text(String::new()),
            FieldKind::MultiChoice { .. } => FieldValue::List(Vec::new()),
        }
    }

    /// Read a stored value leniently, falling back to the kind's default.
    pub fn read(&self, raw: Option<&Value>) -> FieldValue {
        match self {
            FieldKind::Boolean => FieldValue::Bool(raw.and_then(Value::as_bool).unwrap_or(false)),
            FieldKind::Number { .. } => FieldValue::Number(coerce_number(raw)),
            FieldKind::Text { .. } | FieldKind::Choice { .. } => FieldValue::Text(
                raw.and_then(Value::as_str).unwrap_or_default().to_string(),
            ),
            FieldKind::MultiChoice { .. } => FieldValue::List(
                raw.and_then(Value::as_array)
                    .map(|items| {
                        items
                            .iter()
                            .filter_map(Value::as_str)
                            .map(str::to_string)
                            .collect()
                    })
                    .unwrap_or_default(),
            ),
        }
    }

    pub fn options(&self) -> &[String] {
        match self {
            FieldKind::Choice { options } | FieldKind::MultiChoice { options } => options,
            _ => &[],
        }
    }
}

/// A coerced field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum FieldValue {
    Bool(bool),
    Number(Option<f64>),
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Bool(b) => Value::Bool(*b),
            FieldValue::Number(n) => number_to_json(*n),
            FieldValue::Text(s) => Value::String(s.clone()),
            FieldValue::List(items) => {
                Value::Array(items.iter().cloned().map(Value::String).collect())
            }
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => *n,
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }
}

/// Raw input coming from a form control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export)]
pub enum FieldInput {
    /// Checkbox or switch state.
    Toggle { checked: bool },
    /// Text box, number box, select or radio value.
    Text { value: String },
    /// One checkbox of a multi-choice group.
    Check { value: String, checked: bool },
}

impl FieldInput {
    pub fn toggle(checked: bool) -> Self {
        FieldInput::Toggle { checked }
    }

    pub fn text(value: impl Into<String>) -> Self {
        FieldInput::Text {
            value: value.into(),
        }
    }

    pub fn check(value: impl Into<String>, checked: bool) -> Self {
        FieldInput::Check {
            value: value.into(),
            checked,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FieldInput::Toggle { .. } => "toggle",
            FieldInput::Text { .. } => "text",
            FieldInput::Check { .. } => "check",
        }
    }
}

/// Parse user-typed numeric text. Blank, unparseable and non-finite input
/// all come back as `None`.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Numeric pre-processing shared by the binder and the validator:
/// numbers pass through, strings are parsed, everything else is `None`.
pub fn coerce_number(raw: Option<&Value>) -> Option<f64> {
    match raw? {
        Value::Number(n) => n.as_f64().filter(|n| n.is_finite()),
        Value::String(s) => parse_number(s),
        _ => None,
    }
}

pub(crate) fn number_to_json(n: Option<f64>) -> Value {
    n.and_then(serde_json::Number::from_f64)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}
