use crate::{
    pipeline::Pipeline,
    snapshot_deletion::{
        context::DeletionContext,
        model::DeletionOutcome,
        steps::{DeleteSnapshotObjectsStep, DeleteSnapshotRecordStep, ResolveSnapshotStep},
    },
};

impl Pipeline<DeletionContext, DeletionOutcome> {
    // The record must outlive the objects it points to.
    pub fn new() -> Self {
        Self::with_steps(vec![
            Box::new(ResolveSnapshotStep),
            Box::new(DeleteSnapshotObjectsStep),
            Box::new(DeleteSnapshotRecordStep),
        ])
    }
}

impl Default for Pipeline<DeletionContext, DeletionOutcome> {
    fn default() -> Self {
        Self::new()
    }
}
