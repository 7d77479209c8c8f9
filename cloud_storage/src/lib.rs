// Object store of the snapshot repository. Payloads of a snapshot live under
// `{project}/{snapshot_id}/`, for example:
// - demo/abc123/data.sql.gz
// - demo/abc123/files.tar.gz
//
// The S3 connection needs:
// - key id (AWS_ACCESS_KEY_ID)
// - application key (AWS_SECRET_ACCESS_KEY)
// - endpoint, for example: s3.eu-central-003.backblazeb2.com
// - region, for example: eu-central-003
// - bucket name

pub mod mock;
mod ops;
mod s3_error;
mod s3_store;

pub use ops::ObjectStoreOps;
pub use s3_store::S3ObjectStore;

use s3::error::S3Error;

/// Files every snapshot is expected to contain.
pub const SNAPSHOT_FILES: [&str; 2] = ["data.sql.gz", "files.tar.gz"];

#[derive(Debug, thiserror::Error)]
pub enum CloudStorageError {
    #[error("S3 error: {0}")]
    S3(#[from] S3Error),

    #[error("Credentials error: {0}")]
    Credentials(String),
}

/// Prefix under which all objects of a snapshot are stored.
pub fn snapshot_prefix(project: &str, snapshot_id: &str) -> String {
    format!("{}/{}/", project, snapshot_id)
}

pub fn snapshot_object_key(project: &str, snapshot_id: &str, file_name: &str) -> String {
    format!("{}{}", snapshot_prefix(project, snapshot_id), file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_prefix() {
        assert_eq!(snapshot_prefix("demo", "abc123"), "demo/abc123/");
        assert_eq!(
            snapshot_object_key("demo", "abc123", "data.sql.gz"),
            "demo/abc123/data.sql.gz"
        );
    }
}
