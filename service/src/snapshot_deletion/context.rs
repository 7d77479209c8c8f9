use std::sync::Arc;

use cloud_storage::ObjectStoreOps;
use database::{MetadataStoreOps, models::Snapshot};

/// Context object that flows through the pipeline, accumulating state
pub struct DeletionContext {
    pub snapshot_id: String,
    pub metadata_store: Arc<dyn MetadataStoreOps>,
    pub object_store: Arc<dyn ObjectStoreOps>,

    // Accumulated state as pipeline progresses
    pub snapshot: Option<Snapshot>,
    pub deleted_object_count: usize,
}

impl DeletionContext {
    pub fn new(
        snapshot_id: impl Into<String>,
        metadata_store: Arc<dyn MetadataStoreOps>,
        object_store: Arc<dyn ObjectStoreOps>,
    ) -> Self {
        Self {
            snapshot_id: snapshot_id.into(),
            metadata_store,
            object_store,
            snapshot: None,
            deleted_object_count: 0,
        }
    }
}
