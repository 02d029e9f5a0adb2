//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::NotAuthenticated => StatusCode::UNAUTHORIZED,

            Self::TimeoutError => StatusCode::REQUEST_TIMEOUT,

            // 400 Bad Request (malformed payloads, order rules)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
