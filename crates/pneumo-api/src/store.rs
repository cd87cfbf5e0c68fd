use std::collections::HashMap;
use std::collections::hash_map::Entry;

use serde_json::Value;
use uuid::Uuid;

use pneumo_core::models::record::PathologyRecord;

/// In-memory pathology records, one per (patient, pathology).
#[derive(Debug, Default)]
pub struct RecordStore {
    records: HashMap<(Uuid, String), PathologyRecord>,
}

impl RecordStore {
    pub fn get(&self, patient_id: Uuid, pathology_id: &str) -> Option<&PathologyRecord> {
        self.records.get(&(patient_id, pathology_id.to_string()))
    }

    /// Insert or replace the record body. A replaced record keeps its id and
    /// creation time.
    pub fn upsert(&mut self, patient_id: Uuid, pathology_id: &str, data: Value) -> PathologyRecord {
        let record = match self.records.entry((patient_id, pathology_id.to_string())) {
            Entry::Occupied(slot) => {
                let existing = slot.into_mut();
                existing.replace_data(data);
                existing
            }
            Entry::Vacant(slot) => slot.insert(PathologyRecord::new(patient_id, pathology_id, data)),
        };

        tracing::info!(
            record_id = %record.id,
            patient_id = %patient_id,
            pathology = pathology_id,
            "saved pathology record"
        );
        record.clone()
    }
}
