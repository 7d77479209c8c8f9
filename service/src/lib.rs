pub mod error;
pub mod pipeline;
pub mod repository_connection;
pub mod settings;
pub mod snapshot_deletion;
