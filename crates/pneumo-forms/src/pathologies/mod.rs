//! Field catalogs of the supported pathologies.
//!
//! Every pathology form opens with the same general, functional and history
//! sections, built in [`common`], followed by its own clinical sections.

pub mod common;
pub mod copd;
pub mod ild;
pub mod pleural_effusion;
pub mod pneumothorax;

use crate::catalog::{Catalog, Section};

/// Build a built-in catalog.
///
/// # Panics
///
/// Panics if the definition is inconsistent. Built-in catalogs are static
/// literals, so a panic indicates a catalog definition bug.
pub(crate) fn build(pathology_id: &str, sections: Vec<Section>) -> Catalog {
    Catalog::new(pathology_id, sections)
        .unwrap_or_else(|e| panic!("invalid catalog for pathology '{pathology_id}': {e}"))
}
