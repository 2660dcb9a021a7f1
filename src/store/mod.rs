use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::error::StoreError;
use crate::models::workers::WorkerRecord;

/// Read-only worker records, loaded once from the static fixture.
#[derive(Debug, Clone, Default)]
pub struct WorkerStore {
    records: Arc<Vec<WorkerRecord>>,
}

impl WorkerStore {
    pub fn from_records(records: Vec<WorkerRecord>) -> Self {
        Self {
            records: Arc::new(records),
        }
    }

    /// Parse a JSON array of worker records.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let records: Vec<WorkerRecord> = serde_json::from_str(json)?;
        Ok(Self::from_records(records))
    }

    /// Every record in fixture order, placeholders included.
    pub fn records(&self) -> &[WorkerRecord] {
        &self.records
    }

    pub fn get_worker_by_id(&self, id: i64) -> Option<&WorkerRecord> {
        self.records
            .iter()
            .find(|record| record.id == Some(id) && record.is_listable())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Load the worker fixture from `path`.
pub async fn load_store(path: impl AsRef<Path>) -> Result<WorkerStore, StoreError> {
    let path = path.as_ref();
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| StoreError::Io {
            path: path.display().to_string(),
            source,
        })?;

    let store = WorkerStore::from_json(&json)?;
    info!(count = store.len(), path = %path.display(), "Loaded worker fixture");
    Ok(store)
}
