//! Data-synchronization scheduler.
//!
//! Decides on every lifecycle trigger whether the cached timetable is
//! due for a refresh, performs the refresh at most once per trigger,
//! and catches up when a scheduled sync was missed because the process
//! was not running at the time.

pub mod executor;
pub mod fetch;
pub mod schedule;
pub mod scheduler;

#[cfg(test)]
mod executor_tests;

pub use executor::{SyncExecutor, SyncRequest};
pub use fetch::{Collection, EventFetcher, FetchError, HttpFetcher};
pub use schedule::{draw_scheduled_time, ensure_scheduled_time, ScheduledTime, DEFAULT_SCHEDULED_TIME};
pub use scheduler::{ReconcileAction, SyncScheduler};
