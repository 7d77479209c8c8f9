use std::sync::Arc;

use cloud_storage::ObjectStoreOps;
use database::MetadataStoreOps;

use crate::{
    pipeline::Pipeline,
    snapshot_deletion::{
        context::DeletionContext,
        model::DeletionOutcome,
    },
};

pub struct SnapshotDeletionService {
    metadata_store: Arc<dyn MetadataStoreOps>,
    object_store: Arc<dyn ObjectStoreOps>,
}

impl SnapshotDeletionService {
    pub fn new(
        metadata_store: Arc<dyn MetadataStoreOps>,
        object_store: Arc<dyn ObjectStoreOps>,
    ) -> Self {
        Self {
            metadata_store,
            object_store,
        }
    }

    /// Deletes the snapshot's objects and then its metadata record.
    ///
    /// Every backend call is made at most once, failures are reported and not
    /// retried. Calling this again after a failure is safe.
    pub async fn delete_snapshot(&self, snapshot_id: &str) -> DeletionOutcome {
        let mut context = DeletionContext::new(
            snapshot_id,
            self.metadata_store.clone(),
            self.object_store.clone(),
        );

        let pipeline = Pipeline::<DeletionContext, DeletionOutcome>::new();
        let outcome = match pipeline.execute(&mut context).await {
            Ok(()) => DeletionOutcome::Success,
            Err(outcome) => outcome,
        };

        // detail fields are logged at debug only
        match outcome.backend_error() {
            None if outcome.is_success() => tracing::info!(
                "Snapshot {} deleted, {} objects removed",
                snapshot_id,
                context.deleted_object_count
            ),
            None => tracing::info!("Snapshot {} was not deleted: not found", snapshot_id),
            Some(error) => tracing::info!(
                "Snapshot {} was not deleted: {}",
                snapshot_id,
                error.kind()
            ),
        }

        outcome
    }
}
