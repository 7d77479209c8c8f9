pub mod database_error;
mod database_path;
pub mod metadata_store;
pub mod mock;
pub mod models;
pub mod repository;

use std::sync::Arc;

use sqlx::{Pool, Sqlite, SqlitePool, migrate};

use crate::database_error::DatabaseError;

pub use database_path::default_database_url;
pub use metadata_store::MetadataStoreOps;

/// Connects to the snapshot metadata database and brings its schema up to date.
pub async fn get_db_pool(db_url: &str) -> Result<Arc<Pool<Sqlite>>, DatabaseError> {
    tracing::info!("Connecting to metadata database");
    let pool = SqlitePool::connect(db_url).await?;
    migrate!("./migrations").run(&pool).await?;
    Ok(Arc::new(pool))
}

pub async fn setup_test_db() -> SqlitePool {
    // Create an in-memory database connection
    let pool = SqlitePool::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to the in-memory SQLite database");

    // Run migrations
    migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}
