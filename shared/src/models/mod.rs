//! Data models
//!
//! Wire types shared between the intake server and its clients.

mod amount;
pub mod order;
pub mod sync;

// Re-exports
pub use order::*;
pub use sync::*;
