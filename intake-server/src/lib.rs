//! Order intake server
//!
//! Receives purchase orders captured by the browser extension, validates
//! them, and keeps running counts of what was accepted.
//!
//! - [`intake`]: validation, processing, batch aggregation, sync tracking
//! - [`api`]: HTTP routes and middleware stack
//! - [`telemetry`]: structured order events
//! - [`core`]: configuration, state and server lifecycle

/// Security event on the `security` target
///
/// ```ignore
/// security_log!(WARN, "extension_key_rejected", path = %uri.path(), "Rejected request");
/// ```
#[macro_export]
macro_rules! security_log {
    ($level:ident, $event:expr, $($fields:tt)*) => {
        ::tracing::event!(
            target: "security",
            ::tracing::Level::$level,
            event = $event,
            $($fields)*
        )
    };
}

pub mod api;
pub mod auth;
pub mod core;
pub mod intake;
pub mod middleware;
pub mod telemetry;
pub mod utils;

pub use crate::core::{Config, Server, ServerError, ServerState};
pub use intake::{BatchAggregator, OrderProcessor, SyncTracker};
