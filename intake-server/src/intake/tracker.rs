//! Sync tracker
//!
//! Counts accepted orders for the sync-status endpoint: a lifetime total and
//! a per-day count that resets when the host's local calendar date changes.
//!
//! # Locking
//!
//! A single `parking_lot::RwLock` guards [`SyncState`]:
//!
//! - [`SyncTracker::snapshot`] takes an upgradable read lock and upgrades to
//!   exclusive only when it has to apply the daily reset.
//! - [`SyncTracker::record_success`] always takes the exclusive lock.
//!
//! Neither holds the lock beyond the counter update.
//!
//! # Day rollover
//!
//! The reset is applied lazily by whichever operation first observes a new
//! date. A reading older than the tracked day (a writer that sampled the clock
//! just before midnight but locked just after) is counted against the tracked
//! day instead of rolling the counter back, so each date transition resets the
//! daily counter exactly once.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use parking_lot::{RwLock, RwLockUpgradableReadGuard};
use shared::models::SyncStatusResponse;

use super::clock::{Clock, SystemClock};

/// Counter state, owned exclusively by [`SyncTracker`]
#[derive(Debug, Default)]
struct SyncState {
    last_sync: Option<DateTime<Utc>>,
    processed_today: u64,
    processed_total: u64,
    pending_errors: Vec<String>,
    current_day: Option<NaiveDate>,
}

impl SyncState {
    fn is_new_day(&self, day: NaiveDate) -> bool {
        self.current_day.is_none_or(|current| day > current)
    }

    fn check_invariants(&self) {
        debug_assert!(
            self.processed_today <= self.processed_total,
            "daily count {} exceeds total {}",
            self.processed_today,
            self.processed_total
        );
    }
}

/// Overall health derived from the pending-error list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncHealth {
    Operational,
    Degraded,
}

impl SyncHealth {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Operational => "operational",
            Self::Degraded => "degraded",
        }
    }
}

/// Point-in-time copy of the tracker state
#[derive(Debug, Clone, PartialEq)]
pub struct SyncSnapshot {
    pub last_sync_timestamp: Option<DateTime<Utc>>,
    pub orders_processed_today: u64,
    pub orders_processed_total: u64,
    pub pending_errors: Vec<String>,
    /// Local date the daily counter belongs to
    pub current_day: Option<NaiveDate>,
}

impl SyncSnapshot {
    fn capture(state: &SyncState) -> Self {
        Self {
            last_sync_timestamp: state.last_sync,
            orders_processed_today: state.processed_today,
            orders_processed_total: state.processed_total,
            pending_errors: state.pending_errors.clone(),
            current_day: state.current_day,
        }
    }

    pub fn health(&self) -> SyncHealth {
        if self.pending_errors.is_empty() {
            SyncHealth::Operational
        } else {
            SyncHealth::Degraded
        }
    }
}

impl From<SyncSnapshot> for SyncStatusResponse {
    fn from(snapshot: SyncSnapshot) -> Self {
        let status = snapshot.health().as_str().to_string();
        Self {
            last_sync_timestamp: snapshot.last_sync_timestamp,
            orders_processed_today: snapshot.orders_processed_today,
            orders_processed_total: snapshot.orders_processed_total,
            pending_errors: snapshot.pending_errors,
            status,
        }
    }
}

/// Shared handle to the order counters
///
/// Cheap to clone; all clones observe the same state.
#[derive(Clone)]
pub struct SyncTracker {
    state: Arc<RwLock<SyncState>>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for SyncTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncTracker")
            .field("state", &*self.state.read())
            .finish_non_exhaustive()
    }
}

impl Default for SyncTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncTracker {
    /// Tracker on the host clock, zero counts
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Arc::new(RwLock::new(SyncState::default())),
            clock,
        }
    }

    /// Current reading of the tracker's clock
    pub fn now(&self) -> DateTime<FixedOffset> {
        self.clock.now()
    }

    /// Read the counters, applying the daily reset if the date has changed
    pub fn snapshot(&self) -> SyncSnapshot {
        self.snapshot_at(self.clock.now())
    }

    /// [`snapshot`](Self::snapshot) as of `now`
    pub fn snapshot_at(&self, now: DateTime<FixedOffset>) -> SyncSnapshot {
        let day = now.date_naive();
        let state = self.state.upgradable_read();
        if !state.is_new_day(day) {
            return SyncSnapshot::capture(&state);
        }

        let mut state = RwLockUpgradableReadGuard::upgrade(state);
        let previous_day = state.current_day;
        let reset_count = state.processed_today;
        state.processed_today = 0;
        state.current_day = Some(day);
        state.check_invariants();
        let snapshot = SyncSnapshot::capture(&state);
        drop(state);

        tracing::debug!(?previous_day, %day, reset_count, "Daily order counter rolled over");
        snapshot
    }

    /// Count one accepted order
    pub fn record_success(&self) {
        self.record_success_at(self.clock.now());
    }

    /// [`record_success`](Self::record_success) as of `now`
    pub fn record_success_at(&self, now: DateTime<FixedOffset>) {
        let day = now.date_naive();
        let mut state = self.state.write();

        if state.is_new_day(day) {
            state.processed_today = 1;
            state.current_day = Some(day);
        } else {
            state.processed_today += 1;
        }
        state.processed_total += 1;
        state.last_sync = Some(now.with_timezone(&Utc));
        state.check_invariants();
    }
}
