use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use core_types::BackendError;

use crate::{metadata_store::MetadataStoreOps, models::Snapshot};

#[derive(Default)]
struct MockState {
    snapshots: HashMap<String, Snapshot>,
    fail_get: Option<BackendError>,
    fail_delete: Option<BackendError>,
    get_calls: Vec<String>,
    delete_calls: Vec<String>,
}

/// In-memory MetadataStoreOps for testing.
///
/// Records every call so tests can verify which stages of a workflow ran.
#[derive(Clone, Default)]
pub struct MockMetadataStore {
    state: Arc<Mutex<MockState>>,
}

impl MockMetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_snapshot(&self, snapshot: Snapshot) {
        let mut state = self.state.lock().unwrap();
        state.snapshots.insert(snapshot.id.clone(), snapshot);
    }

    pub fn contains(&self, snapshot_id: &str) -> bool {
        let state = self.state.lock().unwrap();
        state.snapshots.contains_key(snapshot_id)
    }

    /// Make every get call fail with the given error
    pub fn fail_get_with(&self, error: BackendError) {
        let mut state = self.state.lock().unwrap();
        state.fail_get = Some(error);
    }

    /// Make every delete call fail with the given error
    pub fn fail_delete_with(&self, error: BackendError) {
        let mut state = self.state.lock().unwrap();
        state.fail_delete = Some(error);
    }

    pub fn clear_failures(&self) {
        let mut state = self.state.lock().unwrap();
        state.fail_get = None;
        state.fail_delete = None;
    }

    pub fn get_call_count(&self) -> usize {
        let state = self.state.lock().unwrap();
        state.get_calls.len()
    }

    pub fn delete_call_count(&self) -> usize {
        let state = self.state.lock().unwrap();
        state.delete_calls.len()
    }
}

#[async_trait]
impl MetadataStoreOps for MockMetadataStore {
    async fn get_snapshot(&self, snapshot_id: &str) -> Result<Option<Snapshot>, BackendError> {
        let mut state = self.state.lock().unwrap();
        state.get_calls.push(snapshot_id.to_string());

        if let Some(error) = &state.fail_get {
            return Err(error.clone());
        }
        Ok(state.snapshots.get(snapshot_id).cloned())
    }

    async fn delete_snapshot(&self, snapshot_id: &str) -> Result<(), BackendError> {
        let mut state = self.state.lock().unwrap();
        state.delete_calls.push(snapshot_id.to_string());

        if let Some(error) = &state.fail_delete {
            return Err(error.clone());
        }
        state.snapshots.remove(snapshot_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use core_types::BackendErrorDetail;

    use super::*;

    #[async_std::test]
    async fn test_mock_get_and_delete() {
        let mock = MockMetadataStore::new();
        mock.add_snapshot(Snapshot::new("abc123", "demo"));

        assert!(mock.get_snapshot("abc123").await.unwrap().is_some());
        mock.delete_snapshot("abc123").await.unwrap();

        assert!(!mock.contains("abc123"));
        assert_eq!(mock.get_call_count(), 1);
        assert_eq!(mock.delete_call_count(), 1);
    }

    #[async_std::test]
    async fn test_mock_delete_failure_keeps_record() {
        let mock = MockMetadataStore::new();
        mock.add_snapshot(Snapshot::new("abc123", "demo"));
        mock.fail_delete_with(BackendError::Transient(BackendErrorDetail::new("busy")));

        assert!(mock.delete_snapshot("abc123").await.is_err());
        assert!(mock.contains("abc123"));

        mock.clear_failures();
        assert_eq!(mock.delete_snapshot("abc123").await, Ok(()));
        assert!(!mock.contains("abc123"));
    }
}
