use core_types::BackendError;

use crate::{
    pipeline::{PipelineStep, StepAction},
    snapshot_deletion::{
        context::DeletionContext,
        model::{DeletionOutcome, MetadataOperation},
    },
};

/// Step 1: Resolve the snapshot record. Nothing is deleted if this fails.
pub struct ResolveSnapshotStep;

#[async_trait::async_trait]
impl PipelineStep<DeletionContext, DeletionOutcome> for ResolveSnapshotStep {
    fn name(&self) -> &'static str {
        "resolve_snapshot"
    }

    async fn execute(&self, context: &mut DeletionContext) -> StepAction<DeletionOutcome> {
        tracing::info!("Resolving snapshot with id {}", context.snapshot_id);

        let res = context
            .metadata_store
            .get_snapshot(&context.snapshot_id)
            .await;

        match res {
            Ok(Some(snapshot)) => {
                tracing::info!(
                    "Found snapshot {} in project {}",
                    snapshot.id,
                    snapshot.project
                );
                context.snapshot = Some(snapshot);
                StepAction::Continue
            }
            Ok(None) | Err(BackendError::NotFound(_)) => {
                tracing::info!("Snapshot with id {} does not exist", context.snapshot_id);
                StepAction::Abort(DeletionOutcome::NotFound(context.snapshot_id.clone()))
            }
            Err(error) => {
                tracing::info!(
                    "Resolving snapshot {} failed: {}",
                    context.snapshot_id,
                    error.kind()
                );
                tracing::debug!("Metadata store lookup error: {}", error);
                StepAction::Abort(DeletionOutcome::MetadataStoreFailure {
                    operation: MetadataOperation::Lookup,
                    error,
                })
            }
        }
    }
}

/// Step 2: Delete the payload objects stored under the snapshot's project prefix.
/// The metadata record stays untouched when this fails, so the deletion can be retried.
pub struct DeleteSnapshotObjectsStep;

#[async_trait::async_trait]
impl PipelineStep<DeletionContext, DeletionOutcome> for DeleteSnapshotObjectsStep {
    fn name(&self) -> &'static str {
        "delete_snapshot_objects"
    }

    async fn execute(&self, context: &mut DeletionContext) -> StepAction<DeletionOutcome> {
        let Some(snapshot) = &context.snapshot else {
            return StepAction::Abort(DeletionOutcome::NotFound(context.snapshot_id.clone()));
        };

        tracing::info!(
            "Deleting objects of snapshot {} in project {}",
            snapshot.id,
            snapshot.project
        );

        let res = context
            .object_store
            .delete_snapshot_objects(&snapshot.id, &snapshot.project)
            .await;

        match res {
            Ok(count) => {
                tracing::info!("Deleted {} objects of snapshot {}", count, snapshot.id);
                context.deleted_object_count = count;
                StepAction::Continue
            }
            Err(error) => {
                tracing::info!(
                    "Failed to delete objects of snapshot {}: {}",
                    snapshot.id,
                    error.kind()
                );
                tracing::debug!("Object store delete error: {}", error);
                StepAction::Abort(DeletionOutcome::ObjectStoreFailure(error))
            }
        }
    }
}

/// Step 3: Delete the metadata record.
/// The objects are already gone at this point, a failure leaves an orphaned record
/// that a repeated deletion removes.
pub struct DeleteSnapshotRecordStep;

#[async_trait::async_trait]
impl PipelineStep<DeletionContext, DeletionOutcome> for DeleteSnapshotRecordStep {
    fn name(&self) -> &'static str {
        "delete_snapshot_record"
    }

    async fn execute(&self, context: &mut DeletionContext) -> StepAction<DeletionOutcome> {
        tracing::info!("Deleting snapshot record {}", context.snapshot_id);

        let res = context
            .metadata_store
            .delete_snapshot(&context.snapshot_id)
            .await;

        match res {
            Ok(()) => {
                tracing::info!("Deleted snapshot record {}", context.snapshot_id);
                StepAction::Continue
            }
            Err(error) => {
                tracing::info!(
                    "Objects of snapshot {} were deleted but its record could not be: {}",
                    context.snapshot_id,
                    error.kind()
                );
                tracing::debug!("Metadata store delete error: {}", error);
                StepAction::Abort(DeletionOutcome::MetadataStoreFailure {
                    operation: MetadataOperation::Removal,
                    error,
                })
            }
        }
    }
}
