use core_types::BackendErrorDetail;
use credentials_storage::CredentialsError;
use service::{
    error::Error,
    snapshot_deletion::{DeletionOutcome, MetadataOperation},
};

pub const SNAPSHOT_DELETED: &str = "Snapshot deleted.";
pub const COULD_NOT_CONNECT: &str = "Could not connect to repository.";
pub const COULD_NOT_GET_SNAPSHOT: &str = "Could not get snapshot from database.";
pub const COULD_NOT_DELETE: &str = "Could not delete snapshot.";
pub const ACCESS_DENIED_HINT: &str = "Access denied. You might not have access to this project.";
pub const CREDENTIALS_STORED: &str = "Credentials stored.";
pub const CREDENTIALS_REMOVED: &str = "Credentials removed.";
pub const COULD_NOT_STORE_CREDENTIALS: &str = "Could not store credentials.";
pub const COULD_NOT_REMOVE_CREDENTIALS: &str = "Could not remove credentials.";
pub const MISSING_CREDENTIALS: &str = "No credentials given. Use --access-key-id and --secret-access-key or set AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY.";

/// A line of command output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Info(String),
    Error(String),
}

fn error(message: impl Into<String>) -> Line {
    Line::Error(message.into())
}

fn detail_lines(detail: &BackendErrorDetail) -> [Line; 4] {
    [
        error(format!("Error Message: {}", detail.message)),
        error(format!("Request ID: {}", detail.request_id)),
        error(format!("Error Type: {}", detail.error_type)),
        error(format!("Error Code: {}", detail.error_code)),
    ]
}

/// Renders the outcome of a deletion. Backend details are only shown when verbose.
pub fn outcome_lines(outcome: &DeletionOutcome, verbose: bool) -> Vec<Line> {
    let mut lines = Vec::new();

    match outcome {
        DeletionOutcome::Success => lines.push(Line::Info(SNAPSHOT_DELETED.to_string())),
        DeletionOutcome::NotFound(id) => {
            lines.push(error(format!("Snapshot {} not found in repository.", id)));
        }
        DeletionOutcome::MetadataStoreFailure {
            operation: MetadataOperation::Lookup,
            error: backend_error,
        } => {
            lines.push(error(COULD_NOT_GET_SNAPSHOT));
            if backend_error.is_access_denied() {
                lines.push(error(ACCESS_DENIED_HINT));
            }
            if verbose {
                lines.extend(detail_lines(backend_error.detail()));
            }
        }
        DeletionOutcome::ObjectStoreFailure(backend_error)
        | DeletionOutcome::MetadataStoreFailure {
            operation: MetadataOperation::Removal,
            error: backend_error,
        } => {
            if verbose {
                let header = match outcome {
                    DeletionOutcome::ObjectStoreFailure(_) => "Object store delete error:",
                    _ => "Metadata store delete error:",
                };
                lines.push(error(header));
                lines.extend(detail_lines(backend_error.detail()));
            }
            if backend_error.is_access_denied() {
                lines.push(error(ACCESS_DENIED_HINT));
            }
            lines.push(error(COULD_NOT_DELETE));
        }
    }

    lines
}

pub fn connection_failure_lines(connection_error: &Error, verbose: bool) -> Vec<Line> {
    let mut lines = vec![error(COULD_NOT_CONNECT)];
    if verbose {
        lines.push(error(format!("Error Message: {}", connection_error)));
    }
    lines
}

pub fn credentials_failure_lines(
    summary: &str,
    credentials_error: &CredentialsError,
    verbose: bool,
) -> Vec<Line> {
    let mut lines = vec![error(summary)];
    if verbose {
        lines.push(error(format!("Error Message: {}", credentials_error)));
    }
    lines
}
