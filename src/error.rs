//! Error types for the StudentVUE client.

use thiserror::Error;

/// StudentVUE client errors.
///
/// Each variant maps to one failure class of the pipeline, so callers can
/// tell network problems apart from protocol and data-shape problems:
/// transport-class errors are the only ones worth retrying, while escaping
/// and result-decode errors indicate bad input or bad credentials.
#[derive(Error, Debug)]
pub enum Error {
    /// Input contains characters that cannot be represented in XML text.
    #[error("XML escaping error: {0}")]
    Escaping(String),

    /// Network-level failure issuing the HTTP request (connection refused,
    /// timeout, DNS failure, invalid endpoint URL).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success HTTP status.
    #[error("unexpected HTTP status {0}")]
    HttpStatus(u16),

    /// The outer SOAP envelope is not well-formed XML or the expected
    /// result element path is missing.
    #[error("malformed SOAP envelope: {0}")]
    MalformedEnvelope(String),

    /// The inner result payload is not well-formed XML, has an unexpected
    /// root element, or carries a service error report.
    #[error("malformed result payload: {0}")]
    MalformedResult(String),
}

impl Error {
    /// True for transport-class failures, the only class where a retry can
    /// help.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::HttpStatus(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_transport_classification() {
        assert!(Error::HttpStatus(503).is_transport());
        assert!(!Error::Escaping("bad char".to_string()).is_transport());
        assert!(!Error::MalformedEnvelope("truncated".to_string()).is_transport());
        assert!(!Error::MalformedResult("not xml".to_string()).is_transport());
    }

    #[test]
    fn test_display_includes_status_code() {
        let err = Error::HttpStatus(500);
        assert_eq!(err.to_string(), "unexpected HTTP status 500");
    }

    #[test]
    fn test_display_includes_detail() {
        let err = Error::MalformedResult("expected <ChildList> root".to_string());
        assert!(err.to_string().contains("expected <ChildList> root"));
    }
}
