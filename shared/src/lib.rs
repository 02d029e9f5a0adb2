//! Shared types for the order intake service
//!
//! Wire models exchanged with the browser extension, and the unified error
//! system.

pub mod error;
pub mod models;

pub use error::{AppError, AppResult, ErrorCategory, ErrorCode, ErrorResponse};
pub use models::{
    BatchOrderResult, BatchOrdersRequest, BatchOrdersResponse, Order, OrderItem, OrderResponse,
    SyncStatusResponse,
};
