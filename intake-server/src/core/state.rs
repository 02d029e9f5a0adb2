//! Shared application state

use std::sync::Arc;

use crate::core::Config;
use crate::intake::{BatchAggregator, OrderProcessor, SyncTracker};
use crate::telemetry::{DisabledTelemetry, TelemetrySink, TracingTelemetry};

/// State handed to every handler
///
/// Cheap to clone; the tracker is the only mutable part and is shared by
/// all clones.
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub processor: OrderProcessor,
    pub batch: BatchAggregator,
    pub telemetry: Arc<dyn TelemetrySink>,
}

impl ServerState {
    pub fn new(config: Config) -> Self {
        let telemetry: Arc<dyn TelemetrySink> = if config.telemetry_enabled {
            Arc::new(TracingTelemetry)
        } else {
            Arc::new(DisabledTelemetry)
        };
        Self::with_parts(config, SyncTracker::new(), telemetry)
    }

    /// Assemble state around an existing tracker and sink
    pub fn with_parts(
        config: Config,
        tracker: SyncTracker,
        telemetry: Arc<dyn TelemetrySink>,
    ) -> Self {
        let processor = OrderProcessor::new(tracker);
        Self {
            config: Arc::new(config),
            batch: BatchAggregator::new(processor.clone()),
            processor,
            telemetry,
        }
    }

    pub fn tracker(&self) -> &SyncTracker {
        self.processor.tracker()
    }
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState")
            .field("environment", &self.config.environment)
            .field("tracker", self.tracker())
            .finish_non_exhaustive()
    }
}
