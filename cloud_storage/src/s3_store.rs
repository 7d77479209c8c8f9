use async_trait::async_trait;
use core_types::BackendError;
use s3::bucket::Bucket;
use s3::creds::Credentials;
use s3::region::Region;

use crate::{
    CloudStorageError, ObjectStoreOps, s3_error::classify_s3_error, snapshot_prefix,
};

/// Outcome of deleting one listed key: `true` when this request removed it,
/// `false` when it had already disappeared.
fn key_deleted<T>(result: Result<T, BackendError>) -> Result<bool, BackendError> {
    match result {
        Ok(_) => Ok(true),
        Err(BackendError::NotFound(_)) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Object store backed by an S3 compatible bucket.
#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    bucket: Box<Bucket>,
}

impl S3ObjectStore {
    pub async fn connect(
        endpoint: &str,
        region: &str,
        bucket_name: &str,
        access_key_id: &str,
        secret_access_key: &str,
        path_style: bool,
    ) -> Result<Self, CloudStorageError> {
        let region = Region::Custom {
            region: region.into(),
            endpoint: endpoint.into(),
        };

        let credentials = Credentials::new(
            Some(access_key_id),
            Some(secret_access_key),
            None,
            None,
            None,
        )
        .map_err(|e| CloudStorageError::Credentials(e.to_string()))?;

        let mut bucket = Bucket::new(bucket_name, region, credentials)?;
        if path_style {
            bucket = bucket.with_path_style();
        }

        tracing::info!("Connected to bucket {} at {}", bucket_name, endpoint);

        Ok(Self { bucket })
    }
}

#[async_trait]
impl ObjectStoreOps for S3ObjectStore {
    async fn list_snapshot_objects(
        &self,
        snapshot_id: &str,
        project: &str,
    ) -> Result<Vec<String>, BackendError> {
        let prefix = snapshot_prefix(project, snapshot_id);
        tracing::debug!("Listing objects under {}", prefix);

        // list() follows continuation tokens and returns every page
        let pages = self
            .bucket
            .list(prefix, None)
            .await
            .map_err(classify_s3_error)?;

        Ok(pages
            .into_iter()
            .flat_map(|page| page.contents)
            .map(|object| object.key)
            .collect())
    }

    async fn delete_snapshot_objects(
        &self,
        snapshot_id: &str,
        project: &str,
    ) -> Result<usize, BackendError> {
        let keys = self.list_snapshot_objects(snapshot_id, project).await?;

        if keys.is_empty() {
            tracing::info!(
                "No objects stored for snapshot {} in project {}",
                snapshot_id,
                project
            );
            return Ok(0);
        }

        let total = keys.len();
        for (index, key) in keys.iter().enumerate() {
            tracing::debug!("Deleting object {} ({}/{})", key, index + 1, total);
            let result = self.bucket.delete_object(key).await.map_err(classify_s3_error);
            if !key_deleted(result)? {
                tracing::debug!("Object {} was already gone", key);
            }
        }

        tracing::info!(
            "Deleted {} objects for snapshot {} in project {}",
            total,
            snapshot_id,
            project
        );

        Ok(total)
    }
}
