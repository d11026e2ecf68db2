//! # Salas Core Library
//!
//! Core business logic for the Salas campus timetable viewer. The
//! interesting part of the app is not the UI but the data layer: a local
//! cache of two event collections ("current" and the full catalog) kept
//! fresh by a sync scheduler that fires once per day at a randomized
//! pre-dawn time and catches up when the scheduled sync was missed.
//!
//! ## Architecture
//!
//! - **Sync Scheduler**: a decision tree evaluated on every lifecycle
//!   trigger (app start, screen focus); performs at most one sync per
//!   evaluation
//! - **Sync Executor**: fetch-and-persist for the event collections,
//!   with attempt/success bookkeeping
//! - **Storage**: string-keyed JSON-file store plus TOML-based
//!   configuration
//! - **Widget channel**: mirrors today's events to a storage channel the
//!   home-screen widget reads
//!
//! ## Key Components
//!
//! - [`SyncScheduler`]: the reconcile state machine
//! - [`SyncExecutor`]: fetch-and-persist for one or both collections
//! - [`KvStore`]: durable string-keyed storage
//! - [`Config`]: application configuration management

pub mod clock;
pub mod error;
pub mod event;
pub mod storage;
pub mod sync;
pub mod widget;

pub use clock::{weekday_label, Clock, FixedClock, SystemClock};
pub use error::{ConfigError, CoreError, StoreError};
pub use event::EventRecord;
pub use storage::{Config, FileStore, KvStore, MemoryStore, SyncInfo};
pub use sync::{
    Collection, EventFetcher, FetchError, HttpFetcher, ReconcileAction, ScheduledTime,
    SyncExecutor, SyncRequest, SyncScheduler,
};
pub use widget::{StoreWidgetChannel, WidgetChannel, WidgetEvent};
