//! pneumo-forms
//!
//! Conditional form engine for the respiratory pathology intake forms, and
//! the field catalogs of each supported pathology. Pure data and logic, no I/O.
//!
//! A form is a static [`catalog::Catalog`] of fields whose visibility depends
//! on other fields, a mutable [`state::FormState`], and a schema validator
//! run once on submit.

pub mod binder;
pub mod catalog;
pub mod condition;
pub mod display;
pub mod engine;
pub mod error;
pub mod path;
pub mod pathologies;
pub mod schema;
pub mod state;
pub mod value;
pub mod view;
pub mod visibility;

use pneumo_core::models::patient::PatientContext;

use catalog::Catalog;
use display::DisplayConfig;
use engine::FormEngine;
use schema::{ValidatedRecord, ValidationFailure};

/// Trait implemented by each pathology form.
pub trait Pathology: Send + Sync {
    /// Unique identifier (e.g., "copd", "pneumothorax").
    fn id(&self) -> &str;

    /// Human-readable name shown to clinicians.
    fn name(&self) -> &str;

    /// The field tree of this pathology.
    fn catalog(&self) -> &'static Catalog;

    /// What the read-only summary shows for a saved record.
    fn display(&self) -> &'static DisplayConfig;

    /// Parse a submitted form state against this pathology's schema.
    fn validate(&self, data: &serde_json::Value) -> Result<ValidatedRecord, ValidationFailure> {
        schema::validate(self.catalog(), data)
    }

    /// Open an empty form for a patient.
    fn open(&self, patient: Option<PatientContext>) -> FormEngine<'static> {
        FormEngine::new(self.catalog(), patient)
    }
}

/// Return all registered pathologies.
pub fn all_pathologies() -> Vec<Box<dyn Pathology>> {
    vec![
        Box::new(pathologies::ild::InterstitialLungDisease),
        Box::new(pathologies::pleural_effusion::PleuralEffusion),
        Box::new(pathologies::pneumothorax::Pneumothorax),
        Box::new(pathologies::copd::Copd),
    ]
}

/// Look up a pathology by ID.
pub fn get_pathology(id: &str) -> Option<Box<dyn Pathology>> {
    all_pathologies().into_iter().find(|p| p.id() == id)
}
