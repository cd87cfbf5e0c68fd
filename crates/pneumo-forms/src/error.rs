use thiserror::Error;

use crate::path::FieldPath;

/// Misuse of the form engine by calling code.
///
/// Data-entry problems never show up here: bad numeric input is coerced to
/// `null` and schema problems are reported by [`crate::schema::ValidationFailure`].
#[derive(Debug, Error)]
pub enum FormError {
    #[error("invalid field path: {0:?}")]
    InvalidPath(String),

    #[error("unknown field '{path}' in pathology '{pathology_id}'")]
    UnknownField {
        pathology_id: String,
        path: FieldPath,
    },

    #[error("field '{path}' of kind {kind} cannot take {input} input")]
    InputMismatch {
        path: FieldPath,
        kind: &'static str,
        input: &'static str,
    },

    #[error("form state must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// A pathology field catalog that does not hold together.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("duplicate section id '{0}'")]
    DuplicateSection(String),

    #[error("field '{0}' is declared twice")]
    DuplicateField(FieldPath),

    #[error("field '{value}' is nested under field '{prefix}'")]
    PathConflict { prefix: FieldPath, value: FieldPath },

    #[error("condition on '{field}' reads undeclared field '{reference}'")]
    UnknownReference {
        field: FieldPath,
        reference: FieldPath,
    },

    #[error("choice field '{0}' declares no options")]
    EmptyChoice(FieldPath),
}
