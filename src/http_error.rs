//! HTTP-status error surfaced to callers when runtime values are invalid.
//!
//! [`HttpError`] is the only error a caller sees for bad request data (as
//! opposed to a badly written template). The HTTP layer that owns the
//! request turns it into a response via [`HttpError::into_response`].

use http::StatusCode;
use serde_json::Value;
use std::fmt;

/// Status codes an [`HttpError`] may carry
pub const SUPPORTED_STATUS_CODES: [u16; 41] = [
    400, 401, 402, 403, 404, 405, 406, 407, 408, 409, 410, 411, 412, 413, 414, 415, 416, 417,
    418, 421, 422, 423, 424, 425, 426, 428, 429, 431, 451, 500, 501, 502, 503, 504, 505, 506,
    507, 508, 509, 510, 511,
];

/// Returned when an [`HttpError`] is built with a status outside
/// [`SUPPORTED_STATUS_CODES`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnsupportedStatusCode(pub u16);

impl fmt::Display for UnsupportedStatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unsupported HTTP error status code: {}", self.0)
    }
}

impl std::error::Error for UnsupportedStatusCode {}

/// Error carrying an HTTP status code and an optional body
#[derive(Debug, Clone, PartialEq)]
pub struct HttpError {
    status: StatusCode,
    body: Option<Value>,
}

impl HttpError {
    /// Build an error for the given status code.
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedStatusCode`] if `status` is not a 4xx/5xx code
    /// in [`SUPPORTED_STATUS_CODES`].
    pub fn new(status: u16) -> Result<Self, UnsupportedStatusCode> {
        Self::with_body(status, None)
    }

    /// Build an error for the given status code with a response body.
    ///
    /// # Errors
    ///
    /// Same as [`HttpError::new`].
    pub fn with_body(status: u16, body: Option<Value>) -> Result<Self, UnsupportedStatusCode> {
        if !SUPPORTED_STATUS_CODES.contains(&status) {
            return Err(UnsupportedStatusCode(status));
        }
        let status = StatusCode::from_u16(status).map_err(|_| UnsupportedStatusCode(status))?;
        Ok(Self { status, body })
    }

    /// 404 Not Found, raised when a required value is missing or cannot be
    /// coerced to its declared type.
    #[must_use]
    pub fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            body: None,
        }
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    #[must_use]
    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Split into the status and JSON body an HTTP layer would send.
    ///
    /// Without a body, a `{"error": <reason phrase>}` object is used.
    #[must_use]
    pub fn into_response(self) -> (StatusCode, Value) {
        let body = self.body.unwrap_or_else(|| {
            serde_json::json!({
                "error": self.status.canonical_reason().unwrap_or("Unknown"),
            })
        });
        (self.status, body)
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP status {}", self.status.as_u16())
    }
}

impl std::error::Error for HttpError {}

impl TryFrom<StatusCode> for HttpError {
    type Error = UnsupportedStatusCode;

    fn try_from(status: StatusCode) -> Result<Self, Self::Error> {
        Self::new(status.as_u16())
    }
}
