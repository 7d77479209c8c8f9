use async_trait::async_trait;
use core_types::BackendError;

/// Trait for object store operations to enable testing
#[async_trait]
pub trait ObjectStoreOps: Send + Sync {
    /// List the keys of all objects stored for a snapshot.
    async fn list_snapshot_objects(
        &self,
        snapshot_id: &str,
        project: &str,
    ) -> Result<Vec<String>, BackendError>;

    /// Delete every object stored for a snapshot and return how many were removed.
    ///
    /// Implementations must be idempotent: when nothing is stored under the
    /// snapshot's prefix the call succeeds with `Ok(0)`, and an object that
    /// disappears between listing and deletion counts as deleted.
    async fn delete_snapshot_objects(
        &self,
        snapshot_id: &str,
        project: &str,
    ) -> Result<usize, BackendError>;
}
