use chrono::{DateTime, Utc};

/// Metadata record of a snapshot stored in the repository.
///
/// `project` names the object store scope, the payload files of the snapshot
/// are stored under `{project}/{id}/`.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub id: String,
    pub project: String,
    pub name: String,
    pub description: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub size_bytes: i64,
    pub attributes: serde_json::Value,
}

impl Snapshot {
    pub fn new(id: impl Into<String>, project: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            project: project.into(),
            description: String::new(),
            author: String::new(),
            created_at: Utc::now(),
            size_bytes: 0,
            attributes: serde_json::Value::Object(Default::default()),
        }
    }
}
