use pneumo_core::models::patient::PatientContext;

use crate::binder::FieldBinder;
use crate::catalog::{Catalog, FieldDescriptor};
use crate::error::FormError;
use crate::path::FieldPath;
use crate::schema::{self, ValidatedRecord, ValidationFailure};
use crate::state::FormState;
use crate::value::{FieldInput, FieldValue};
use crate::view::{self, FormView};
use crate::visibility::{self, VisibilityMap};

/// One open pathology form.
///
/// Holds the live form state, the patient attributes the form was opened
/// with, and the visibility computed from both after the latest write.
#[derive(Debug, Clone)]
pub struct FormEngine<'c> {
    catalog: &'c Catalog,
    patient: Option<PatientContext>,
    state: FormState,
    visibility: VisibilityMap,
}

impl<'c> FormEngine<'c> {
    /// An empty form.
    pub fn new(catalog: &'c Catalog, patient: Option<PatientContext>) -> Self {
        Self::from_state(catalog, patient, FormState::new())
    }

    /// A form pre-populated from a previously saved record.
    pub fn from_record(
        catalog: &'c Catalog,
        patient: Option<PatientContext>,
        record: &ValidatedRecord,
    ) -> Self {
        Self::from_state(catalog, patient, FormState::from_map(record.data.clone()))
    }

    pub fn from_state(catalog: &'c Catalog, patient: Option<PatientContext>, state: FormState) -> Self {
        let visibility = visibility::evaluate(catalog, &state, patient.as_ref());
        Self {
            catalog,
            patient,
            state,
            visibility,
        }
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    pub fn patient(&self) -> Option<&PatientContext> {
        self.patient.as_ref()
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn visibility(&self) -> &VisibilityMap {
        &self.visibility
    }

    pub fn bind(&mut self, path: &FieldPath) -> Result<FieldBinder<'_, 'c>, FormError> {
        let descriptor = self.descriptor(path)?;
        Ok(FieldBinder::new(self, descriptor))
    }

    /// Current coerced value, or the kind's default when never written.
    pub fn value(&self, path: &FieldPath) -> Result<FieldValue, FormError> {
        let descriptor = self.descriptor(path)?;
        Ok(descriptor.kind.read(self.state.get(path)))
    }

    /// Shorthand for `bind(path)?.on_change(input)`.
    pub fn change(&mut self, path: &FieldPath, input: FieldInput) -> Result<Vec<FieldPath>, FormError> {
        self.bind(path)?.on_change(input)
    }

    pub fn is_visible(&self, path: &FieldPath) -> bool {
        self.visibility.is_visible(path)
    }

    pub fn is_mounted(&self, section_id: &str) -> bool {
        self.visibility.is_mounted(section_id)
    }

    pub fn view(&self) -> FormView {
        view::render(self.catalog, &self.state, &self.visibility)
    }

    /// Parse the whole form state against the pathology schema.
    ///
    /// Hidden fields keep whatever was last entered in them.
    pub fn submit(&self) -> Result<ValidatedRecord, ValidationFailure> {
        schema::validate(self.catalog, &self.state.to_value())
    }

    pub fn into_state(self) -> FormState {
        self.state
    }

    pub(crate) fn store(&mut self, descriptor: &FieldDescriptor, value: FieldValue) -> Vec<FieldPath> {
        self.state.set(&descriptor.path, value.to_json());
        let affected = self.catalog.affected_by(&descriptor.path);
        self.visibility = visibility::evaluate(self.catalog, &self.state, self.patient.as_ref());
        tracing::debug!(
            pathology = %self.catalog.pathology_id(),
            field = %descriptor.path,
            affected = affected.len(),
            "field written"
        );
        affected
    }

    fn descriptor(&self, path: &FieldPath) -> Result<&'c FieldDescriptor, FormError> {
        let catalog: &'c Catalog = self.catalog;
        catalog
            .descriptor(path)
            .ok_or_else(|| FormError::UnknownField {
                pathology_id: self.catalog.pathology_id().to_string(),
                path: path.clone(),
            })
    }
}
