use crate::catalog::FieldDescriptor;
use crate::engine::FormEngine;
use crate::error::FormError;
use crate::path::FieldPath;
use crate::value::{FieldInput, FieldKind, FieldValue, parse_number};

/// A field bound to an open form: read the coerced value, push raw input.
pub struct FieldBinder<'e, 'c> {
    engine: &'e mut FormEngine<'c>,
    descriptor: &'c FieldDescriptor,
}

impl<'e, 'c> FieldBinder<'e, 'c> {
    pub(crate) fn new(engine: &'e mut FormEngine<'c>, descriptor: &'c FieldDescriptor) -> Self {
        Self { engine, descriptor }
    }

    pub fn descriptor(&self) -> &'c FieldDescriptor {
        self.descriptor
    }

    pub fn value(&self) -> FieldValue {
        self.descriptor
            .kind
            .read(self.engine.state().get(&self.descriptor.path))
    }

    /// Coerce `input`, store it, and re-evaluate visibility.
    /// Returns the descriptors whose visibility was recomputed because of this write.
    pub fn on_change(&mut self, input: FieldInput) -> Result<Vec<FieldPath>, FormError> {
        let next = coerce(self.descriptor, &self.value(), input)?;
        Ok(self.engine.store(self.descriptor, next))
    }
}

/// Turn raw control input into the value stored for `descriptor`.
///
/// Numeric input never fails: blank, unparseable or non-finite text becomes `null`.
fn coerce(
    descriptor: &FieldDescriptor,
    current: &FieldValue,
    input: FieldInput,
) -> Result<FieldValue, FormError> {
    match (&descriptor.kind, input) {
        (FieldKind::Boolean, FieldInput::Toggle { checked }) => Ok(FieldValue::Bool(checked)),
        (FieldKind::Number { .. }, FieldInput::Text { value }) => {
            Ok(FieldValue::Number(parse_number(&value)))
        }
        (FieldKind::Text { .. } | FieldKind::Choice { .. }, FieldInput::Text { value }) => {
            Ok(FieldValue::Text(value))
        }
        (FieldKind::MultiChoice { .. }, FieldInput::Check { value, checked }) => {
            let mut items = current.as_list().map(<[String]>::to_vec).unwrap_or_default();
            let present = items.iter().any(|item| *item == value);
            if checked && !present {
                items.push(value);
            } else if !checked {
                items.retain(|item| *item != value);
            }
            Ok(FieldValue::List(items))
        }
        (kind, input) => Err(FormError::InputMismatch {
            path: descriptor.path.clone(),
            kind: kind.name(),
            input: input.name(),
        }),
    }
}
