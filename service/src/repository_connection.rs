use std::sync::Arc;

use cloud_storage::{ObjectStoreOps, S3ObjectStore};
use credentials_storage::RepositoryCredentials;
use database::{MetadataStoreOps, get_db_pool, repository::snapshot_repository::SnapshotRepository};

use crate::{
    error::Error, settings::RepositorySettings, snapshot_deletion::SnapshotDeletionService,
};

/// Open handles to both parts of the snapshot repository.
#[derive(Clone)]
pub struct RepositoryConnection {
    metadata_store: Arc<dyn MetadataStoreOps>,
    object_store: Arc<dyn ObjectStoreOps>,
}

impl RepositoryConnection {
    /// Opens the metadata database and connects to the object store bucket.
    pub async fn connect(
        settings: &RepositorySettings,
        credentials: &RepositoryCredentials,
    ) -> Result<Self, Error> {
        let pool = get_db_pool(&settings.database_url).await.map_err(|e| {
            tracing::debug!("Failed to open metadata database: {}", e);
            Error::ConnectionFailure(format!("Failed to open metadata database: {}", e))
        })?;

        let object_store = S3ObjectStore::connect(
            settings.endpoint.as_str(),
            settings.region.as_str(),
            settings.bucket.as_str(),
            credentials.access_key_id.as_str(),
            credentials.secret_access_key.as_str(),
            settings.path_style,
        )
        .await
        .map_err(|e| {
            tracing::debug!("Failed to connect to object store: {}", e);
            Error::ConnectionFailure(format!("Failed to connect to object store: {}", e))
        })?;

        Ok(Self::from_stores(
            Arc::new(SnapshotRepository::new(pool)),
            Arc::new(object_store),
        ))
    }

    pub fn from_stores(
        metadata_store: Arc<dyn MetadataStoreOps>,
        object_store: Arc<dyn ObjectStoreOps>,
    ) -> Self {
        Self {
            metadata_store,
            object_store,
        }
    }

    pub fn metadata_store(&self) -> Arc<dyn MetadataStoreOps> {
        self.metadata_store.clone()
    }

    pub fn object_store(&self) -> Arc<dyn ObjectStoreOps> {
        self.object_store.clone()
    }

    pub fn snapshot_deletion_service(&self) -> SnapshotDeletionService {
        SnapshotDeletionService::new(self.metadata_store(), self.object_store())
    }
}
