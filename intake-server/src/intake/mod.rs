//! Order intake pipeline
//!
//! ```text
//! single order ──► OrderProcessor (strict) ──┐
//!                                            ├──► validator ──► SyncTracker (on success)
//! batch ──► BatchAggregator ──► OrderProcessor (lenient)
//! ```
//!
//! Everything here is synchronous; the only shared state is the
//! [`SyncTracker`].

pub mod batch;
pub mod clock;
pub mod processor;
pub mod tracker;
pub mod validator;

pub use batch::BatchAggregator;
pub use clock::{Clock, ManualClock, SystemClock};
pub use processor::{Acknowledgement, OrderProcessor, ProcessingOutcome, processing_id};
pub use tracker::{SyncHealth, SyncSnapshot, SyncTracker};
pub use validator::{ValidationMode, Violation, validate};
