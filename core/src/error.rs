use std::fmt;

use http::StatusCode;
use thiserror::Error;

/// The error type for OVH API calls.
#[derive(Error, Debug)]
#[error("{kind}: {message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    status: Option<StatusCode>,
    body: Option<String>,
    #[source]
    source: Option<anyhow::Error>,
}

/// The kind of error that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Request payload could not be serialized to JSON.
    Encode,

    /// The transport could not complete the exchange (DNS, connect, TLS, timeout, reset).
    Network,

    /// The API answered with a status code of 300 or above.
    Api,

    /// The response body could not be decoded.
    Decode,

    /// Request cannot be built (invalid header value, invalid url, etc.)
    RequestInvalid,

    /// Configuration error (missing fields, invalid values)
    ConfigInvalid,

    /// Unexpected errors (no transport configured, runtime failures, etc.)
    Unexpected,
}

impl Error {
    /// Create a new error with the given kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            body: None,
            source: None,
        }
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Attach the response body returned along with an API error.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Get the error message.
    ///
    /// For [`ErrorKind::Api`] this is the status text, for example `404 Not Found`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status code, only present for [`ErrorKind::Api`].
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    /// Response body returned by the API along with a failing status, if any.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Check if the failed call may succeed when issued again.
    ///
    /// Network failures and server side (5xx) API errors are retryable. This crate never
    /// retries on its own; the decision belongs to the caller.
    pub fn is_retryable(&self) -> bool {
        match self.kind {
            ErrorKind::Network => true,
            ErrorKind::Api => self.status.is_some_and(|s| s.is_server_error()),
            _ => false,
        }
    }
}

// Convenience constructors
impl Error {
    /// Create an encode error
    pub fn encode(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Encode, message)
    }

    /// Create a network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Network, message)
    }

    /// Create an API error from the response status.
    ///
    /// The message is the status text in `<code> <reason>` form.
    pub fn api(status: StatusCode) -> Self {
        let mut err = Self::new(ErrorKind::Api, status_text(status));
        err.status = Some(status);
        err
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Decode, message)
    }

    /// Create a request invalid error
    pub fn request_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RequestInvalid, message)
    }

    /// Create a config invalid error
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }

    /// Create an unexpected error
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }
}

fn status_text(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {reason}", status.as_u16()),
        None => status.as_u16().to_string(),
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Encode => write!(f, "encode error"),
            ErrorKind::Network => write!(f, "network error"),
            ErrorKind::Api => write!(f, "unexpected HTTP return code"),
            ErrorKind::Decode => write!(f, "decode error"),
            ErrorKind::RequestInvalid => write!(f, "invalid request"),
            ErrorKind::ConfigInvalid => write!(f, "invalid configuration"),
            ErrorKind::Unexpected => write!(f, "unexpected error"),
        }
    }
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

impl From<http::Error> for Error {
    fn from(err: http::Error) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::InvalidHeaderValue> for Error {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error() {
        let err = Error::api(StatusCode::NOT_FOUND);
        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(err.message(), "404 Not Found");
        assert_eq!(
            err.to_string(),
            "unexpected HTTP return code: 404 Not Found"
        );
        assert!(err.body().is_none());
    }

    #[test]
    fn test_is_retryable() {
        let cases = vec![
            (Error::network("connection reset"), true),
            (Error::api(StatusCode::SERVICE_UNAVAILABLE), true),
            (Error::api(StatusCode::FORBIDDEN), false),
            (Error::encode("key must be a string"), false),
            (Error::decode("expected value"), false),
            (Error::config_invalid("missing endpoint"), false),
        ];

        for (err, expected) in cases {
            assert_eq!(err.is_retryable(), expected, "Failed on error: {}", err);
        }
    }

    #[test]
    fn test_non_api_errors_have_no_status() {
        let err = Error::network("dns failure");
        assert_eq!(err.status(), None);
        assert_eq!(err.to_string(), "network error: dns failure");
    }
}
