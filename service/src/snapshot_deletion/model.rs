use std::fmt::{Display, Formatter};

use core_types::BackendError;

/// Metadata store call that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataOperation {
    /// Resolving the snapshot record, nothing has been deleted yet
    Lookup,
    /// Deleting the snapshot record, the objects are already gone
    Removal,
}

/// Result of a snapshot deletion as reported to the caller.
///
/// The failure variants double as the abort value of the deletion pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum DeletionOutcome {
    Success,
    NotFound(String),
    ObjectStoreFailure(BackendError),
    MetadataStoreFailure {
        operation: MetadataOperation,
        error: BackendError,
    },
}

impl DeletionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, DeletionOutcome::Success)
    }

    pub fn backend_error(&self) -> Option<&BackendError> {
        match self {
            DeletionOutcome::Success | DeletionOutcome::NotFound(_) => None,
            DeletionOutcome::ObjectStoreFailure(error)
            | DeletionOutcome::MetadataStoreFailure { error, .. } => Some(error),
        }
    }

    pub fn is_access_denied(&self) -> bool {
        self.backend_error()
            .is_some_and(|error| error.is_access_denied())
    }
}

impl Display for DeletionOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DeletionOutcome::Success => write!(f, "Snapshot deleted"),
            DeletionOutcome::NotFound(id) => write!(f, "Snapshot {} not found", id),
            DeletionOutcome::ObjectStoreFailure(error) => {
                write!(f, "Object store error: {}", error)
            }
            DeletionOutcome::MetadataStoreFailure {
                operation: MetadataOperation::Lookup,
                error,
            } => write!(f, "Metadata store lookup error: {}", error),
            DeletionOutcome::MetadataStoreFailure {
                operation: MetadataOperation::Removal,
                error,
            } => write!(f, "Metadata store delete error: {}", error),
        }
    }
}

#[cfg(test)]
mod tests {
    use core_types::BackendErrorDetail;

    use super::*;

    #[test]
    fn test_access_denied_outcome() {
        let outcome = DeletionOutcome::MetadataStoreFailure {
            operation: MetadataOperation::Lookup,
            error: BackendError::classify(
                BackendErrorDetail::new("not authorized").with_error_code("AccessDeniedException"),
            ),
        };

        assert!(outcome.is_access_denied());
        assert!(!outcome.is_success());
        assert_eq!(
            outcome.to_string(),
            "Metadata store lookup error: Access denied: not authorized (code: AccessDeniedException)"
        );
    }

    #[test]
    fn test_not_found_has_no_backend_error() {
        let outcome = DeletionOutcome::NotFound("abc123".to_string());

        assert!(outcome.backend_error().is_none());
        assert!(!outcome.is_access_denied());
        assert_eq!(outcome.to_string(), "Snapshot abc123 not found");
    }

    #[test]
    fn test_success() {
        assert!(DeletionOutcome::Success.is_success());
        assert!(DeletionOutcome::Success.backend_error().is_none());
    }
}
