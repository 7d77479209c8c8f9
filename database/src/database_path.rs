use file_system::get_database_path;

use crate::database_error::DatabaseError;

/// Returns the URL of the database file in the default data dir.
pub fn default_database_url() -> Result<String, DatabaseError> {
    let db_path = get_database_path().map_err(|e| DatabaseError::PathError(e.to_string()))?;

    // mode=rwc creates the file on first use
    Ok(format!("sqlite://{}?mode=rwc", db_path.display()))
}
