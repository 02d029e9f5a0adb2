//! Unified error codes for the intake service
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 4xxx: Order errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so the browser extension can
/// branch on them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Payload could not be decoded
    InvalidFormat = 6,

    // ==================== 1xxx: Auth ====================
    /// Extension key missing or wrong
    NotAuthenticated = 1001,

    // ==================== 4xxx: Order ====================
    /// Batch request carried no orders
    BatchEmpty = 4001,
    /// Order number missing or empty
    OrderNumberMissing = 4002,
    /// Order date missing or empty
    OrderDateMissing = 4003,
    /// Order total absent or not positive
    OrderTotalInvalid = 4004,
    /// Order has no items
    OrderEmpty = 4005,
    /// Item price is negative
    ItemPriceInvalid = 4006,
    /// Item quantity is not positive
    ItemQuantityInvalid = 4007,

    // ==================== 9xxx: System ====================
    /// Request timed out
    TimeoutError = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::InvalidFormat => "Invalid JSON or validation error",

            // Auth
            ErrorCode::NotAuthenticated => "Unauthorized: Missing or invalid extension key",

            // Order
            ErrorCode::BatchEmpty => "No orders provided in batch request",
            ErrorCode::OrderNumberMissing => "missing order number",
            ErrorCode::OrderDateMissing => "missing order date",
            ErrorCode::OrderTotalInvalid => "invalid order total: must be positive",
            ErrorCode::OrderEmpty => "order must contain at least one item",
            ErrorCode::ItemPriceInvalid => "invalid item price: must be non-negative",
            ErrorCode::ItemQuantityInvalid => "invalid item quantity: must be positive",

            // System
            ErrorCode::TimeoutError => "Request timed out",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            6 => Ok(ErrorCode::InvalidFormat),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),

            // Order
            4001 => Ok(ErrorCode::BatchEmpty),
            4002 => Ok(ErrorCode::OrderNumberMissing),
            4003 => Ok(ErrorCode::OrderDateMissing),
            4004 => Ok(ErrorCode::OrderTotalInvalid),
            4005 => Ok(ErrorCode::OrderEmpty),
            4006 => Ok(ErrorCode::ItemPriceInvalid),
            4007 => Ok(ErrorCode::ItemQuantityInvalid),

            // System
            9003 => Ok(ErrorCode::TimeoutError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
