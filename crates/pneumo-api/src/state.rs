use std::sync::Arc;

use tokio::sync::Mutex;

use crate::store::RecordStore;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone, Default)]
pub struct AppState {
    pub records: Arc<Mutex<RecordStore>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}
