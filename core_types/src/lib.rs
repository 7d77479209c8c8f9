use strum_macros::{Display, EnumIter};

/// Error codes that mean the caller is not allowed to touch the resource.
/// Any code starting with `AccessDenied` is treated the same way.
const ACCESS_DENIED_CODES: [&str; 4] = [
    "Forbidden",
    "InvalidAccessKeyId",
    "SignatureDoesNotMatch",
    "UnrecognizedClientException",
];

const TRANSIENT_CODES: [&str; 8] = [
    "SlowDown",
    "RequestTimeout",
    "ServiceUnavailable",
    "InternalError",
    "InternalServerError",
    "ProvisionedThroughputExceededException",
    "RequestLimitExceeded",
    "Busy",
];

const NOT_FOUND_CODES: [&str; 4] = [
    "NoSuchKey",
    "NoSuchBucket",
    "ResourceNotFoundException",
    "NotFound",
];

/// Diagnostic fields reported by a storage backend when a request fails.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BackendErrorDetail {
    pub message: String,
    pub request_id: String,
    pub error_type: String,
    pub error_code: String,
}

impl BackendErrorDetail {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = request_id.into();
        self
    }

    pub fn with_error_type(mut self, error_type: impl Into<String>) -> Self {
        self.error_type = error_type.into();
        self
    }

    pub fn with_error_code(mut self, error_code: impl Into<String>) -> Self {
        self.error_code = error_code.into();
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum ErrorKind {
    #[strum(serialize = "Access denied")]
    AccessDenied,
    Transient,
    #[strum(serialize = "Not found")]
    NotFound,
    Other,
}

impl ErrorKind {
    /// Maps a raw backend error code to its kind.
    pub fn from_error_code(code: &str) -> Self {
        if code.starts_with("AccessDenied") || ACCESS_DENIED_CODES.contains(&code) {
            ErrorKind::AccessDenied
        } else if code.starts_with("Throttling") || TRANSIENT_CODES.contains(&code) {
            ErrorKind::Transient
        } else if NOT_FOUND_CODES.contains(&code) {
            ErrorKind::NotFound
        } else {
            ErrorKind::Other
        }
    }
}

/// A failed backend request, classified once where the raw response is received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    AccessDenied(BackendErrorDetail),
    Transient(BackendErrorDetail),
    NotFound(BackendErrorDetail),
    Other(BackendErrorDetail),
}

impl BackendError {
    /// Classifies the error by its error code.
    pub fn classify(detail: BackendErrorDetail) -> Self {
        let kind = ErrorKind::from_error_code(&detail.error_code);
        Self::from_kind(kind, detail)
    }

    pub fn from_kind(kind: ErrorKind, detail: BackendErrorDetail) -> Self {
        match kind {
            ErrorKind::AccessDenied => BackendError::AccessDenied(detail),
            ErrorKind::Transient => BackendError::Transient(detail),
            ErrorKind::NotFound => BackendError::NotFound(detail),
            ErrorKind::Other => BackendError::Other(detail),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            BackendError::AccessDenied(_) => ErrorKind::AccessDenied,
            BackendError::Transient(_) => ErrorKind::Transient,
            BackendError::NotFound(_) => ErrorKind::NotFound,
            BackendError::Other(_) => ErrorKind::Other,
        }
    }

    pub fn detail(&self) -> &BackendErrorDetail {
        match self {
            BackendError::AccessDenied(detail)
            | BackendError::Transient(detail)
            | BackendError::NotFound(detail)
            | BackendError::Other(detail) => detail,
        }
    }

    pub fn is_access_denied(&self) -> bool {
        matches!(self, BackendError::AccessDenied(_))
    }
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let detail = self.detail();
        write!(f, "{}: {}", self.kind(), detail.message)?;
        if !detail.error_code.is_empty() {
            write!(f, " (code: {})", detail.error_code)?;
        }
        if !detail.request_id.is_empty() {
            write!(f, " (request id: {})", detail.request_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for BackendError {}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_access_denied_codes() {
        for code in [
            "AccessDenied",
            "AccessDeniedException",
            "Forbidden",
            "InvalidAccessKeyId",
        ] {
            assert_eq!(ErrorKind::from_error_code(code), ErrorKind::AccessDenied);
        }
    }

    #[test]
    fn test_transient_and_not_found_codes() {
        assert_eq!(
            ErrorKind::from_error_code("ThrottlingException"),
            ErrorKind::Transient
        );
        assert_eq!(ErrorKind::from_error_code("SlowDown"), ErrorKind::Transient);
        assert_eq!(ErrorKind::from_error_code("NoSuchKey"), ErrorKind::NotFound);
        assert_eq!(
            ErrorKind::from_error_code("ValidationException"),
            ErrorKind::Other
        );
        assert_eq!(ErrorKind::from_error_code(""), ErrorKind::Other);
    }

    #[test]
    fn test_classify_keeps_detail() {
        let detail = BackendErrorDetail::new("User is not authorized")
            .with_request_id("req-1")
            .with_error_type("Client")
            .with_error_code("AccessDeniedException");
        let error = BackendError::classify(detail.clone());

        assert!(error.is_access_denied());
        assert_eq!(error.detail(), &detail);
    }

    #[test]
    fn test_from_kind_matches_kind() {
        for kind in ErrorKind::iter() {
            let error = BackendError::from_kind(kind, BackendErrorDetail::new("boom"));
            assert_eq!(error.kind(), kind);
        }
    }

    #[test]
    fn test_display() {
        let error = BackendError::classify(
            BackendErrorDetail::new("Rate exceeded")
                .with_error_code("ThrottlingException")
                .with_request_id("abc"),
        );
        assert_eq!(
            error.to_string(),
            "Transient: Rate exceeded (code: ThrottlingException) (request id: abc)"
        );
    }
}
