use async_trait::async_trait;
use core_types::{BackendError, BackendErrorDetail, ErrorKind};
use uuid::Uuid;

use crate::{
    database_error::DatabaseError, models::Snapshot,
    repository::snapshot_repository::SnapshotRepository,
};

/// Trait for metadata store operations to enable testing
#[async_trait]
pub trait MetadataStoreOps: Send + Sync {
    /// Look up a snapshot record, `Ok(None)` when no record has the id.
    async fn get_snapshot(&self, snapshot_id: &str) -> Result<Option<Snapshot>, BackendError>;

    /// Delete a snapshot record. Deleting a missing record succeeds.
    async fn delete_snapshot(&self, snapshot_id: &str) -> Result<(), BackendError>;
}

/// Maps an SQLite result code to an error kind and the code reported to the user.
/// Codes without a kind of their own are reported by number, e.g. `SQLITE_1555`.
fn kind_for_sqlite_code(code: i32) -> (ErrorKind, String) {
    // extended result codes keep the primary code in the low byte
    let (kind, name) = match code & 0xff {
        3 => (ErrorKind::AccessDenied, "SQLITE_PERM"),
        5 => (ErrorKind::Transient, "SQLITE_BUSY"),
        6 => (ErrorKind::Transient, "SQLITE_LOCKED"),
        8 => (ErrorKind::AccessDenied, "SQLITE_READONLY"),
        23 => (ErrorKind::AccessDenied, "SQLITE_AUTH"),
        _ => return (ErrorKind::Other, format!("SQLITE_{}", code)),
    };
    (kind, name.to_string())
}

fn classify_sqlx_error(error: &sqlx::Error) -> (ErrorKind, &'static str, String) {
    match error {
        sqlx::Error::Database(db_error) => {
            let code = db_error
                .code()
                .and_then(|code| code.parse::<i32>().ok())
                .unwrap_or_default();
            let (kind, name) = kind_for_sqlite_code(code);
            (kind, "Database", name)
        }
        sqlx::Error::RowNotFound => (ErrorKind::NotFound, "Database", "NotFound".to_string()),
        sqlx::Error::PoolTimedOut => (
            ErrorKind::Transient,
            "Connection",
            "PoolTimedOut".to_string(),
        ),
        sqlx::Error::PoolClosed => (ErrorKind::Transient, "Connection", "PoolClosed".to_string()),
        sqlx::Error::Io(_) => (ErrorKind::Transient, "Connection", "IoError".to_string()),
        _ => (ErrorKind::Other, "Database", "DatabaseError".to_string()),
    }
}

/// Turns a repository error into a classified backend error tagged with `request_id`.
pub(crate) fn classify_database_error(error: &DatabaseError, request_id: &str) -> BackendError {
    let (kind, error_type, error_code) = match error {
        DatabaseError::SqlxError(e) => classify_sqlx_error(e),
        DatabaseError::SerializationError(_) => (
            ErrorKind::Other,
            "Serialization",
            "SerializationError".to_string(),
        ),
        DatabaseError::MigrationError(_) | DatabaseError::PathError(_) => {
            (ErrorKind::Other, "Database", "DatabaseError".to_string())
        }
    };

    BackendError::from_kind(
        kind,
        BackendErrorDetail::new(error.to_string())
            .with_request_id(request_id)
            .with_error_type(error_type)
            .with_error_code(error_code),
    )
}

#[async_trait]
impl MetadataStoreOps for SnapshotRepository {
    async fn get_snapshot(&self, snapshot_id: &str) -> Result<Option<Snapshot>, BackendError> {
        let request_id = Uuid::new_v4().to_string();
        tracing::debug!(request_id = %request_id, "Fetching snapshot record {}", snapshot_id);

        SnapshotRepository::get_snapshot(self, snapshot_id)
            .await
            .map_err(|e| classify_database_error(&e, &request_id))
    }

    async fn delete_snapshot(&self, snapshot_id: &str) -> Result<(), BackendError> {
        let request_id = Uuid::new_v4().to_string();
        tracing::debug!(request_id = %request_id, "Deleting snapshot record {}", snapshot_id);

        let deleted = SnapshotRepository::delete_snapshot(self, snapshot_id)
            .await
            .map_err(|e| classify_database_error(&e, &request_id))?;
        if !deleted {
            tracing::debug!(request_id = %request_id, "Snapshot record {} was already gone", snapshot_id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::setup_test_db;

    #[test]
    fn test_kind_for_sqlite_code() {
        assert_eq!(kind_for_sqlite_code(5).0, ErrorKind::Transient);
        // SQLITE_BUSY_SNAPSHOT
        assert_eq!(
            kind_for_sqlite_code(517),
            (ErrorKind::Transient, "SQLITE_BUSY".to_string())
        );
        // SQLITE_READONLY_DBMOVED
        assert_eq!(kind_for_sqlite_code(1032).0, ErrorKind::AccessDenied);
        assert_eq!(kind_for_sqlite_code(23).0, ErrorKind::AccessDenied);
        // SQLITE_CONSTRAINT_PRIMARYKEY
        assert_eq!(
            kind_for_sqlite_code(1555),
            (ErrorKind::Other, "SQLITE_1555".to_string())
        );
        // SQLITE_CORRUPT
        assert_eq!(
            kind_for_sqlite_code(11),
            (ErrorKind::Other, "SQLITE_11".to_string())
        );
    }

    #[async_std::test]
    async fn test_constraint_violation_reports_its_code() {
        let pool = Arc::new(setup_test_db().await);
        let repository = SnapshotRepository::new(pool);
        let snapshot = Snapshot::new("abc123", "demo");
        repository.add_snapshot(&snapshot).await.unwrap();

        let db_error = repository.add_snapshot(&snapshot).await.unwrap_err();
        let error = classify_database_error(&db_error, "req-7");

        assert_eq!(error.kind(), ErrorKind::Other);
        assert_eq!(error.detail().error_type, "Database");
        let code = &error.detail().error_code;
        assert!(code.starts_with("SQLITE_"), "unexpected code {}", code);
        assert_ne!(code, "SQLITE_ERROR");
        assert_ne!(code, "SQLITE_0");
    }

    #[test]
    fn test_classify_keeps_request_id() {
        let error = classify_database_error(
            &DatabaseError::SqlxError(sqlx::Error::PoolTimedOut),
            "req-42",
        );

        assert_eq!(error.kind(), ErrorKind::Transient);
        assert_eq!(error.detail().request_id, "req-42");
        assert_eq!(error.detail().error_type, "Connection");
        assert_eq!(error.detail().error_code, "PoolTimedOut");
    }

    #[async_std::test]
    async fn test_metadata_store_roundtrip() {
        let pool = Arc::new(setup_test_db().await);
        let repository = SnapshotRepository::new(pool);
        repository
            .add_snapshot(&Snapshot::new("abc123", "demo"))
            .await
            .unwrap();
        let store: &dyn MetadataStoreOps = &repository;

        let snapshot = store.get_snapshot("abc123").await.unwrap().unwrap();
        assert_eq!(snapshot.project, "demo");

        store.delete_snapshot("abc123").await.unwrap();
        assert_eq!(store.get_snapshot("abc123").await.unwrap(), None);

        // deleting a missing record still succeeds
        assert_eq!(store.delete_snapshot("abc123").await, Ok(()));
    }

    #[async_std::test]
    async fn test_closed_pool_is_transient() {
        let pool = Arc::new(setup_test_db().await);
        let repository = SnapshotRepository::new(pool.clone());
        pool.close().await;

        let error = MetadataStoreOps::get_snapshot(&repository, "abc123")
            .await
            .unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Transient);
        assert!(!error.detail().request_id.is_empty());
    }
}
