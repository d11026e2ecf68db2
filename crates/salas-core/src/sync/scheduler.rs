//! Sync scheduler: the reconcile decision tree.
//!
//! Evaluated on every lifecycle trigger (app start, screen focus). The
//! branches are checked in a fixed order and the first qualifying one
//! wins, so at most one sync runs per call. The exact-minute branch can
//! only fire while the app happens to be running during that minute;
//! the catch-up branches compensate for all the minutes it was not.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{NaiveDateTime, Timelike};
use tracing::{error, info, warn};

use crate::clock::Clock;
use crate::storage::cache;
use crate::storage::keys;
use crate::storage::kv::KvStore;
use crate::sync::executor::{SyncExecutor, SyncRequest};
use crate::sync::schedule::{ensure_scheduled_time, ScheduledTime};

/// Outcome of one reconcile pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileAction {
    /// First launch: schedule generated, initial full sync, flag set.
    Bootstrap,
    /// No sync history at all; full sync.
    NoHistory,
    /// Current hour:minute matches the scheduled time exactly.
    ScheduledMinute,
    /// A previous attempt never succeeded; retried.
    RetryFailed,
    /// More than one day since the last successful sync.
    CatchUpGap,
    /// The scheduled minute already passed today without a sync.
    CatchUpMissedToday,
    /// Nothing to do.
    UpToDate,
    /// Another sync was already in flight; nothing ran.
    Skipped,
}

impl std::fmt::Display for ReconcileAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ReconcileAction::Bootstrap => "first-launch bootstrap",
            ReconcileAction::NoHistory => "no-history sync",
            ReconcileAction::ScheduledMinute => "scheduled sync",
            ReconcileAction::RetryFailed => "retry after failed attempt",
            ReconcileAction::CatchUpGap => "multi-day catch-up",
            ReconcileAction::CatchUpMissedToday => "missed-today catch-up",
            ReconcileAction::UpToDate => "up to date",
            ReconcileAction::Skipped => "skipped (sync in flight)",
        };
        f.write_str(label)
    }
}

/// The orchestrator: consults bookkeeping and the clock, and invokes the
/// executor when a sync is due.
pub struct SyncScheduler {
    store: Arc<dyn KvStore>,
    clock: Arc<dyn Clock>,
    executor: SyncExecutor,
    sync_in_flight: AtomicBool,
}

impl SyncScheduler {
    pub fn new(store: Arc<dyn KvStore>, clock: Arc<dyn Clock>, executor: SyncExecutor) -> Self {
        Self {
            store,
            clock,
            executor,
            sync_in_flight: AtomicBool::new(false),
        }
    }

    /// One evaluation of the decision tree.
    ///
    /// Never fails: every error on the sync path is logged and
    /// swallowed, leaving the bookkeeping to drive a retry on the next
    /// call.
    pub fn reconcile(&self) -> ReconcileAction {
        let action = self.decide();
        if action == ReconcileAction::UpToDate {
            return action;
        }

        if self.sync_in_flight.swap(true, Ordering::SeqCst) {
            warn!("sync already in flight, skipping reconcile trigger");
            return ReconcileAction::Skipped;
        }

        info!("reconcile: {action}");
        match action {
            ReconcileAction::Bootstrap => self.run_bootstrap(),
            _ => {
                self.executor.run_sync(SyncRequest::FULL);
            }
        }
        self.sync_in_flight.store(false, Ordering::SeqCst);
        action
    }

    /// Manual "sync now": bypasses the decision tree entirely and runs a
    /// full sync of both collections. Returns the combined result so the
    /// caller can surface failures to the user.
    pub fn sync_now(&self) -> bool {
        if self.sync_in_flight.swap(true, Ordering::SeqCst) {
            warn!("sync already in flight, skipping manual trigger");
            return false;
        }

        let result = self.executor.run_sync(SyncRequest::FULL);
        self.sync_in_flight.store(false, Ordering::SeqCst);
        result
    }

    fn decide(&self) -> ReconcileAction {
        let now = self.clock.now();

        if self.first_launch_pending() {
            return ReconcileAction::Bootstrap;
        }

        let last_sync = cache::read_timestamp(&*self.store, keys::LAST_SYNC);
        if last_sync.is_none() {
            return ReconcileAction::NoHistory;
        }

        let scheduled = ensure_scheduled_time(&*self.store);
        if now.hour() == scheduled.hour && now.minute() == scheduled.minute {
            return ReconcileAction::ScheduledMinute;
        }

        match cache::read_timestamp(&*self.store, keys::LAST_SUCCESSFUL_SYNC) {
            None => ReconcileAction::RetryFailed,
            Some(last_successful) => {
                if (now - last_successful).num_days() > 1 {
                    return ReconcileAction::CatchUpGap;
                }
                if last_successful.date() < now.date() && past_scheduled_time(now, scheduled) {
                    return ReconcileAction::CatchUpMissedToday;
                }
                ReconcileAction::UpToDate
            }
        }
    }

    /// First launch means the flag key is absent. A store read failure
    /// counts as "not first launch".
    fn first_launch_pending(&self) -> bool {
        match self.store.get(keys::FIRST_LAUNCH) {
            Ok(value) => value.is_none(),
            Err(err) => {
                warn!("could not read first-launch flag: {err}");
                false
            }
        }
    }

    fn run_bootstrap(&self) {
        let time = ensure_scheduled_time(&*self.store);
        info!("first launch detected, daily sync scheduled at {time}");

        self.executor.run_sync(SyncRequest::FULL);

        if let Err(err) = self.store.set(keys::FIRST_LAUNCH, "false") {
            error!("could not record first-launch completion: {err}");
        }
    }
}

/// Time of day at or after the scheduled pair: hour greater, or same
/// hour with a greater minute.
fn past_scheduled_time(now: NaiveDateTime, scheduled: ScheduledTime) -> bool {
    now.hour() > scheduled.hour || (now.hour() == scheduled.hour && now.minute() > scheduled.minute)
}
