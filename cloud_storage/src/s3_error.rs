use core_types::{BackendError, BackendErrorDetail, ErrorKind};
use s3::error::S3Error;
use serde::Deserialize;

/// Error document returned by S3 compatible services:
/// `<Error><Code/><Message/><RequestId/></Error>`
#[derive(Debug, Deserialize)]
#[serde(rename = "Error")]
struct S3ErrorBody {
    #[serde(rename = "Code")]
    code: String,
    #[serde(rename = "Message", default)]
    message: String,
    #[serde(rename = "RequestId", default)]
    request_id: String,
}

fn error_type_for_status(status: u16) -> &'static str {
    if status >= 500 { "Server" } else { "Client" }
}

fn kind_for_status(status: u16) -> ErrorKind {
    match status {
        401 | 403 => ErrorKind::AccessDenied,
        404 => ErrorKind::NotFound,
        429 | 500..=599 => ErrorKind::Transient,
        _ => ErrorKind::Other,
    }
}

/// Classifies a failed HTTP response. The error code of the body decides the
/// kind, the status code is used when the code is unknown or the body is not XML.
pub(crate) fn classify_response(status: u16, body: &str) -> BackendError {
    let error_type = error_type_for_status(status);

    match quick_xml::de::from_str::<S3ErrorBody>(body) {
        Ok(parsed) => {
            let kind = match ErrorKind::from_error_code(&parsed.code) {
                ErrorKind::Other => kind_for_status(status),
                kind => kind,
            };
            BackendError::from_kind(
                kind,
                BackendErrorDetail::new(parsed.message)
                    .with_request_id(parsed.request_id)
                    .with_error_type(error_type)
                    .with_error_code(parsed.code),
            )
        }
        Err(_) => {
            let message = if body.trim().is_empty() {
                format!("HTTP status {}", status)
            } else {
                body.trim().to_string()
            };
            BackendError::from_kind(
                kind_for_status(status),
                BackendErrorDetail::new(message)
                    .with_error_type(error_type)
                    .with_error_code(status.to_string()),
            )
        }
    }
}

pub(crate) fn classify_s3_error(error: S3Error) -> BackendError {
    match error {
        S3Error::HttpFailWithBody(status, body) => classify_response(status, &body),
        S3Error::Credentials(e) => BackendError::AccessDenied(
            BackendErrorDetail::new(e.to_string())
                .with_error_type("Client")
                .with_error_code("InvalidCredentials"),
        ),
        // connection refused or reset, timeouts and TLS failures
        S3Error::Io(_) | S3Error::Surf(_) => BackendError::Transient(
            BackendErrorDetail::new(error.to_string())
                .with_error_type("Transport")
                .with_error_code("ConnectionError"),
        ),
        other => BackendError::Other(
            BackendErrorDetail::new(other.to_string()).with_error_type("Transport"),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACCESS_DENIED_BODY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Error>
    <Code>AccessDenied</Code>
    <Message>Access Denied</Message>
    <RequestId>4442587FB7D0A2F9</RequestId>
</Error>"#;

    #[test]
    fn test_classify_access_denied_body() {
        let error = classify_response(403, ACCESS_DENIED_BODY);

        assert!(error.is_access_denied());
        let detail = error.detail();
        assert_eq!(detail.message, "Access Denied");
        assert_eq!(detail.request_id, "4442587FB7D0A2F9");
        assert_eq!(detail.error_type, "Client");
        assert_eq!(detail.error_code, "AccessDenied");
    }

    #[test]
    fn test_classify_slow_down_body() {
        let body = "<Error><Code>SlowDown</Code><Message>Reduce your request rate.</Message><RequestId>r1</RequestId></Error>";
        let error = classify_response(503, body);

        assert_eq!(error.kind(), ErrorKind::Transient);
        assert_eq!(error.detail().error_type, "Server");
    }

    #[test]
    fn test_unknown_code_falls_back_to_status() {
        let body = "<Error><Code>SomethingNew</Code><Message>odd</Message></Error>";
        let error = classify_response(500, body);

        assert_eq!(error.kind(), ErrorKind::Transient);
        assert_eq!(error.detail().error_code, "SomethingNew");
        assert_eq!(error.detail().request_id, "");
    }

    #[test]
    fn test_classify_non_xml_body() {
        let error = classify_response(403, "");

        assert!(error.is_access_denied());
        assert_eq!(error.detail().message, "HTTP status 403");
        assert_eq!(error.detail().error_code, "403");

        let error = classify_response(400, "bad request");
        assert_eq!(error.kind(), ErrorKind::Other);
        assert_eq!(error.detail().message, "bad request");
    }

    #[test]
    fn test_classify_s3_http_failure() {
        let error = classify_s3_error(S3Error::HttpFailWithBody(
            403,
            ACCESS_DENIED_BODY.to_string(),
        ));
        assert!(error.is_access_denied());
    }

    #[test]
    fn test_transport_failures_are_transient() {
        let reset = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "connection reset");
        let error = classify_s3_error(S3Error::Io(reset));
        assert_eq!(error.kind(), ErrorKind::Transient);
        assert_eq!(error.detail().error_type, "Transport");
        assert_eq!(error.detail().error_code, "ConnectionError");

        let error = classify_s3_error(S3Error::Surf("request timed out".to_string()));
        assert_eq!(error.kind(), ErrorKind::Transient);
        assert!(error.detail().message.contains("request timed out"));
    }

    #[test]
    fn test_other_client_failures_are_not_transient() {
        let error = classify_s3_error(S3Error::HttpFail);
        assert_eq!(error.kind(), ErrorKind::Other);
        assert_eq!(error.detail().error_type, "Transport");
    }
}
