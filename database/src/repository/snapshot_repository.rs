use std::sync::Arc;

use sqlx::{FromRow, Pool, Row, Sqlite, sqlite::SqliteRow};

use crate::{database_error::DatabaseError, models::Snapshot};

impl FromRow<'_, SqliteRow> for Snapshot {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        let attributes_json: String = row.try_get("attributes")?;
        let attributes =
            serde_json::from_str(&attributes_json).map_err(|e| sqlx::Error::ColumnDecode {
                index: "attributes".to_string(),
                source: Box::new(e),
            })?;
        Ok(Self {
            id: row.try_get("id")?,
            project: row.try_get("project")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            author: row.try_get("author")?,
            created_at: row.try_get("created_at")?,
            size_bytes: row.try_get("size_bytes")?,
            attributes,
        })
    }
}

#[derive(Debug)]
pub struct SnapshotRepository {
    pool: Arc<Pool<Sqlite>>,
}

impl SnapshotRepository {
    pub fn new(pool: Arc<Pool<Sqlite>>) -> Self {
        Self { pool }
    }

    pub async fn add_snapshot(&self, snapshot: &Snapshot) -> Result<(), DatabaseError> {
        let attributes = serde_json::to_string(&snapshot.attributes)
            .map_err(|e| DatabaseError::SerializationError(e.to_string()))?;
        sqlx::query(
            "INSERT INTO snapshot (id, project, name, description, author, created_at, size_bytes, attributes)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&snapshot.id)
        .bind(&snapshot.project)
        .bind(&snapshot.name)
        .bind(&snapshot.description)
        .bind(&snapshot.author)
        .bind(snapshot.created_at)
        .bind(snapshot.size_bytes)
        .bind(attributes)
        .execute(&*self.pool)
        .await?;
        Ok(())
    }

    pub async fn get_snapshot(&self, id: &str) -> Result<Option<Snapshot>, DatabaseError> {
        let snapshot = sqlx::query_as::<_, Snapshot>(
            "SELECT id, project, name, description, author, created_at, size_bytes, attributes
             FROM snapshot
             WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&*self.pool)
        .await?;
        Ok(snapshot)
    }

    /// Deletes the snapshot record. Returns `false` if there was nothing to delete.
    pub async fn delete_snapshot(&self, id: &str) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM snapshot WHERE id = ?")
            .bind(id)
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn list_snapshots_by_project(
        &self,
        project: &str,
    ) -> Result<Vec<Snapshot>, DatabaseError> {
        let snapshots = sqlx::query_as::<_, Snapshot>(
            "SELECT id, project, name, description, author, created_at, size_bytes, attributes
             FROM snapshot
             WHERE project = ?
             ORDER BY created_at DESC",
        )
        .bind(project)
        .fetch_all(&*self.pool)
        .await?;
        Ok(snapshots)
    }
}
