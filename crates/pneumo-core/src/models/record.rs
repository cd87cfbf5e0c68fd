use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// A validated pathology form as persisted for one patient.
///
/// `data` is the fully defaulted record produced by the form validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PathologyRecord {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub pathology_id: String,
    pub data: serde_json::Value,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

impl PathologyRecord {
    pub fn new(patient_id: Uuid, pathology_id: impl Into<String>, data: serde_json::Value) -> Self {
        let now = jiff::Timestamp::now();
        Self {
            id: Uuid::new_v4(),
            patient_id,
            pathology_id: pathology_id.into(),
            data,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the record body, keeping identity and creation time.
    pub fn replace_data(&mut self, data: serde_json::Value) {
        self.data = data;
        self.updated_at = jiff::Timestamp::now();
    }
}
