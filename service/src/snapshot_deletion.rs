//! Deletes a snapshot from the repository: the payload objects first, then the
//! metadata record. A failed object deletion leaves the repository unchanged, a
//! failed record deletion leaves a record without objects which the next
//! attempt cleans up.

mod context;
mod model;
mod pipeline;
mod service;
mod steps;

pub use context::DeletionContext;
pub use model::{DeletionOutcome, MetadataOperation};
pub use service::SnapshotDeletionService;
