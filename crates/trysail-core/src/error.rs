//! Error types for Trysail operations.
//!
//! Every failure surfaced by the SDK is a single [`Error`] value carrying the
//! HTTP status code (0 when no response was received), the raw response body
//! and, when the body was valid JSON, its decoded form. Callers classify
//! failures through predicates such as [`Error::is_not_found`] rather than by
//! matching on distinct error types.

use serde_json::Value;
use thiserror::Error;

/// Where an [`Error`] originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The connection to the control plane could not be established
    Connect,
    /// The request timed out
    Timeout,
    /// Any other transport-level failure (request building, body reads, redirects)
    Request,
    /// The control plane answered with a non-2xx status
    Status,
    /// A 2xx response carried a body that is not valid JSON
    Decode,
    /// The client could not be configured
    Config,
}

impl ErrorKind {
    /// Returns a stable code for this kind, suitable for logs and metrics labels.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Connect => "CONNECT",
            Self::Timeout => "TIMEOUT",
            Self::Request => "REQUEST",
            Self::Status => "STATUS",
            Self::Decode => "DECODE",
            Self::Config => "CONFIG",
        }
    }
}

/// Main error type for Trysail operations.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    status_code: u16,
    raw_body: Option<String>,
    response_data: Option<Value>,
}

/// Specialized result type for Trysail operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error that carries no response.
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status_code: 0,
            raw_body: None,
            response_data: None,
        }
    }

    /// Create a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config, message)
    }

    /// Map a non-2xx response onto an error.
    ///
    /// The body is decoded as JSON when possible. A top-level `error` field is
    /// preferred as the message, then `message`; otherwise `fallback` is kept.
    /// A body that is empty or not valid JSON leaves [`Error::response_data`]
    /// unset but is still available through [`Error::raw_body`].
    #[must_use]
    pub fn from_response(status_code: u16, body: String, fallback: impl Into<String>) -> Self {
        let response_data = parse_response_data(&body);
        let message = response_data
            .as_ref()
            .and_then(message_from_data)
            .unwrap_or_else(|| fallback.into());

        Self {
            kind: ErrorKind::Status,
            message,
            status_code,
            raw_body: (!body.is_empty()).then_some(body),
            response_data,
        }
    }

    /// Create an error for a successful response whose body could not be decoded.
    #[must_use]
    pub fn decode(status_code: u16, err: &serde_json::Error) -> Self {
        Self {
            kind: ErrorKind::Decode,
            message: format!("Failed to parse JSON response: {err}"),
            status_code,
            raw_body: None,
            response_data: None,
        }
    }

    /// Attach the status code of the response being processed.
    #[must_use]
    pub const fn with_status_code(mut self, status_code: u16) -> Self {
        self.status_code = status_code;
        self
    }

    /// Attach the raw body of the response being processed.
    #[must_use]
    pub fn with_raw_body(mut self, body: impl Into<String>) -> Self {
        self.raw_body = Some(body.into());
        self
    }

    /// Origin of the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status code, or 0 when no response was received.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Raw response body, when a non-empty body was received.
    #[must_use]
    pub fn raw_body(&self) -> Option<&str> {
        self.raw_body.as_deref()
    }

    /// Decoded JSON response body, when the body was valid JSON.
    #[must_use]
    pub fn response_data(&self) -> Option<&Value> {
        self.response_data.as_ref()
    }

    /// Consume the error and return the decoded response body.
    #[must_use]
    pub fn into_response_data(self) -> Option<Value> {
        self.response_data
    }

    /// Status is in the 4xx range.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status_code >= 400 && self.status_code < 500
    }

    /// Status is in the 5xx range.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status_code >= 500 && self.status_code < 600
    }

    /// Status is 404.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        self.status_code == 404
    }

    /// Status is 401.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        self.status_code == 401
    }

    /// Status is 403.
    #[must_use]
    pub const fn is_forbidden(&self) -> bool {
        self.status_code == 403
    }

    /// The request failed below the HTTP layer.
    #[must_use]
    pub const fn is_transport_error(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::Connect | ErrorKind::Timeout | ErrorKind::Request
        )
    }

    /// The request timed out.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self.kind, ErrorKind::Timeout)
    }
}

fn parse_response_data(body: &str) -> Option<Value> {
    if body.is_empty() {
        return None;
    }
    serde_json::from_str(body).ok()
}

fn message_from_data(data: &Value) -> Option<String> {
    let object = data.as_object()?;
    ["error", "message"]
        .iter()
        .find_map(|key| match object.get(*key)? {
            Value::Null => None,
            Value::String(text) => Some(text.clone()),
            other => Some(other.to_string()),
        })
}

// Conversions from external error types
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            ErrorKind::Timeout
        } else if err.is_connect() {
            ErrorKind::Connect
        } else {
            ErrorKind::Request
        };

        Self::new(kind, err.to_string()).with_status_code(err.status().map_or(0, |s| s.as_u16()))
    }
}
