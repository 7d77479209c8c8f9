use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use core_types::{BackendError, BackendErrorDetail};

use crate::{SNAPSHOT_FILES, ObjectStoreOps, snapshot_object_key, snapshot_prefix};

/// Internal state for MockObjectStore.
///
/// Groups all mutable state into a single struct for simplified locking.
#[derive(Default)]
struct MockState {
    /// Stored objects (key -> content)
    objects: BTreeMap<String, Vec<u8>>,
    /// Keys removed by delete calls
    deleted_keys: HashSet<String>,
    /// Keys whose deletion fails, other keys of the same call may already be gone
    fail_delete_keys: HashMap<String, BackendError>,
    /// Fails every delete call before anything is removed
    fail_all_deletes: Option<BackendError>,
    /// (snapshot_id, project) of every delete_snapshot_objects call
    delete_calls: Vec<(String, String)>,
}

/// Mock implementation of ObjectStoreOps for testing
///
/// This mock allows you to:
/// - Seed objects under snapshot prefixes
/// - Inject backend failures for whole calls or single keys
/// - Verify which delete calls were made
#[derive(Clone, Default)]
pub struct MockObjectStore {
    state: Arc<Mutex<MockState>>,
}

impl MockObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_object(&self, key: impl Into<String>, content: Vec<u8>) {
        let mut state = self.state.lock().unwrap();
        state.objects.insert(key.into(), content);
    }

    /// Add the standard snapshot files with dummy content
    pub fn add_snapshot_files(&self, project: &str, snapshot_id: &str) {
        for file_name in SNAPSHOT_FILES {
            let key = snapshot_object_key(project, snapshot_id, file_name);
            let content = format!("mock-content-for-{}", key).into_bytes();
            self.add_object(key, content);
        }
    }

    /// Make every delete call fail with the given error
    pub fn fail_deletes_with(&self, error: BackendError) {
        let mut state = self.state.lock().unwrap();
        state.fail_all_deletes = Some(error);
    }

    /// Make deletion of a single key fail
    pub fn fail_delete_for(&self, key: impl Into<String>, error: BackendError) {
        let mut state = self.state.lock().unwrap();
        state.fail_delete_keys.insert(key.into(), error);
    }

    /// Remove all injected failures
    pub fn clear_failures(&self) {
        let mut state = self.state.lock().unwrap();
        state.fail_all_deletes = None;
        state.fail_delete_keys.clear();
    }

    pub fn contains(&self, key: &str) -> bool {
        let state = self.state.lock().unwrap();
        state.objects.contains_key(key)
    }

    pub fn was_deleted(&self, key: &str) -> bool {
        let state = self.state.lock().unwrap();
        state.deleted_keys.contains(key)
    }

    pub fn object_count(&self) -> usize {
        let state = self.state.lock().unwrap();
        state.objects.len()
    }

    pub fn deleted_count(&self) -> usize {
        let state = self.state.lock().unwrap();
        state.deleted_keys.len()
    }

    pub fn delete_calls(&self) -> Vec<(String, String)> {
        let state = self.state.lock().unwrap();
        state.delete_calls.clone()
    }

    pub fn delete_call_count(&self) -> usize {
        let state = self.state.lock().unwrap();
        state.delete_calls.len()
    }

    fn keys_under(state: &MockState, prefix: &str) -> Vec<String> {
        state
            .objects
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect()
    }
}

/// Error value matching what S3 returns for a denied request, handy in tests
pub fn access_denied_error() -> BackendError {
    BackendError::classify(
        BackendErrorDetail::new("Access Denied")
            .with_request_id("mock-request-id")
            .with_error_type("Client")
            .with_error_code("AccessDenied"),
    )
}

#[async_trait]
impl ObjectStoreOps for MockObjectStore {
    async fn list_snapshot_objects(
        &self,
        snapshot_id: &str,
        project: &str,
    ) -> Result<Vec<String>, BackendError> {
        let state = self.state.lock().unwrap();
        Ok(Self::keys_under(&state, &snapshot_prefix(project, snapshot_id)))
    }

    async fn delete_snapshot_objects(
        &self,
        snapshot_id: &str,
        project: &str,
    ) -> Result<usize, BackendError> {
        let mut state = self.state.lock().unwrap();
        state
            .delete_calls
            .push((snapshot_id.to_string(), project.to_string()));

        if let Some(error) = &state.fail_all_deletes {
            return Err(error.clone());
        }

        let keys = Self::keys_under(&state, &snapshot_prefix(project, snapshot_id));
        let mut deleted = 0;
        for key in keys {
            if let Some(error) = state.fail_delete_keys.get(&key) {
                return Err(error.clone());
            }
            state.objects.remove(&key);
            state.deleted_keys.insert(key);
            deleted += 1;
        }

        Ok(deleted)
    }
}
