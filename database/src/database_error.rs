use sqlx::Error as SqlxError;
use sqlx::migrate::MigrateError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Database error: {0}")]
    SqlxError(#[from] SqlxError),

    #[error("Migration error: {0}")]
    MigrationError(#[from] MigrateError),

    #[error("Parse error: {0}")]
    SerializationError(String),

    #[error("Path error: {0}")]
    PathError(String),
}

