//! Tests for the sync executor.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, NaiveDateTime};

use crate::clock::{Clock, FixedClock};
use crate::error::StoreError;
use crate::event::EventRecord;
use crate::storage::cache::{load_events, read_timestamp};
use crate::storage::keys;
use crate::storage::kv::{KvStore, MemoryStore};
use crate::sync::executor::{SyncExecutor, SyncRequest};
use crate::sync::fetch::{Collection, EventFetcher, FetchError};
use crate::widget::{WidgetChannel, WidgetEvent};

/// 2025-03-01 was a Saturday.
fn saturday_morning() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, 1)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

fn sample_event(id: &str, date: &str) -> EventRecord {
    EventRecord {
        id: id.to_string(),
        kind: "Clase".to_string(),
        title: "Cálculo".to_string(),
        date: date.to_string(),
        start: "08:30".to_string(),
        end: "10:00".to_string(),
        room: "101-A".to_string(),
        building: "Edificio C".to_string(),
        campus: "Peñalolén".to_string(),
        updated_at: String::new(),
        weekday: None,
    }
}

struct StubFetcher {
    calls: AtomicUsize,
    fail_current: bool,
    fail_all: bool,
    events: Vec<EventRecord>,
}

impl StubFetcher {
    fn with_events(events: Vec<EventRecord>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail_current: false,
            fail_all: false,
            events,
        }
    }

    fn failing() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail_current: true,
            fail_all: true,
            events: Vec::new(),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl EventFetcher for StubFetcher {
    fn fetch(&self, collection: Collection) -> Result<Vec<EventRecord>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let fail = match collection {
            Collection::Current => self.fail_current,
            Collection::All => self.fail_all,
        };
        if fail {
            Err(FetchError::Status {
                endpoint: collection.endpoint(),
                status: 503,
            })
        } else {
            Ok(self.events.clone())
        }
    }
}

#[derive(Default)]
struct RecordingWidget {
    published: Mutex<Vec<Vec<WidgetEvent>>>,
}

impl WidgetChannel for RecordingWidget {
    fn publish(&self, events: &[WidgetEvent]) -> Result<(), StoreError> {
        self.published.lock().unwrap().push(events.to_vec());
        Ok(())
    }
}

struct FailingWidget;

impl WidgetChannel for FailingWidget {
    fn publish(&self, _events: &[WidgetEvent]) -> Result<(), StoreError> {
        Err(StoreError::Io(std::io::Error::other("channel down")))
    }
}

fn executor(
    store: &Arc<MemoryStore>,
    fetcher: &Arc<StubFetcher>,
    widget: Arc<dyn WidgetChannel>,
) -> SyncExecutor {
    let kv: Arc<dyn KvStore> = store.clone();
    let fetch: Arc<dyn EventFetcher> = fetcher.clone();
    let clock: Arc<dyn Clock> = Arc::new(FixedClock::new(saturday_morning()));
    SyncExecutor::new(kv, fetch, widget, clock)
}

#[test]
fn full_sync_persists_both_collections_and_bookkeeping() {
    let store = Arc::new(MemoryStore::new());
    let fetcher = Arc::new(StubFetcher::with_events(vec![sample_event(
        "e1",
        "2025-03-01",
    )]));
    let exec = executor(&store, &fetcher, Arc::new(RecordingWidget::default()));

    assert!(exec.run_sync(SyncRequest::FULL));
    assert_eq!(fetcher.calls(), 2);
    assert_eq!(load_events(&*store, Collection::Current).len(), 1);
    assert_eq!(load_events(&*store, Collection::All).len(), 1);

    let now = saturday_morning();
    assert_eq!(read_timestamp(&*store, keys::SYNC_ATTEMPT), Some(now));
    assert_eq!(read_timestamp(&*store, keys::LAST_SYNC), Some(now));
    assert_eq!(read_timestamp(&*store, keys::LAST_SUCCESSFUL_SYNC), Some(now));
}

#[test]
fn repeated_sync_yields_identical_cache() {
    let store = Arc::new(MemoryStore::new());
    let fetcher = Arc::new(StubFetcher::with_events(vec![
        sample_event("e1", "2025-03-01"),
        sample_event("e2", "2025-03-03"),
    ]));
    let exec = executor(&store, &fetcher, Arc::new(RecordingWidget::default()));

    assert!(exec.run_sync(SyncRequest::FULL));
    let first = load_events(&*store, Collection::Current);
    assert!(exec.run_sync(SyncRequest::FULL));
    let second = load_events(&*store, Collection::Current);

    assert_eq!(first, second);
}

#[test]
fn attempt_recorded_even_when_fetch_fails() {
    let store = Arc::new(MemoryStore::new());
    let fetcher = Arc::new(StubFetcher::failing());
    let exec = executor(&store, &fetcher, Arc::new(RecordingWidget::default()));

    assert!(!exec.run_sync(SyncRequest::FULL));

    assert!(read_timestamp(&*store, keys::SYNC_ATTEMPT).is_some());
    assert_eq!(read_timestamp(&*store, keys::LAST_SYNC), None);
    assert_eq!(read_timestamp(&*store, keys::LAST_SUCCESSFUL_SYNC), None);
    assert!(load_events(&*store, Collection::Current).is_empty());
}

#[test]
fn partial_failure_fails_the_combined_result() {
    let store = Arc::new(MemoryStore::new());
    let mut fetcher = StubFetcher::with_events(vec![sample_event("e1", "2025-03-01")]);
    fetcher.fail_all = true;
    let fetcher = Arc::new(fetcher);
    let exec = executor(&store, &fetcher, Arc::new(RecordingWidget::default()));

    assert!(!exec.run_sync(SyncRequest::FULL));

    // the current collection still landed, and the shared bookkeeping
    // pair advanced with it
    assert_eq!(load_events(&*store, Collection::Current).len(), 1);
    assert!(load_events(&*store, Collection::All).is_empty());
    assert!(read_timestamp(&*store, keys::LAST_SUCCESSFUL_SYNC).is_some());
}

#[test]
fn missing_weekday_is_derived_before_caching() {
    let store = Arc::new(MemoryStore::new());
    // 2024-06-10 is a Monday
    let fetcher = Arc::new(StubFetcher::with_events(vec![sample_event(
        "e1",
        "2024-06-10",
    )]));
    let exec = executor(&store, &fetcher, Arc::new(RecordingWidget::default()));

    assert!(exec.run_sync(SyncRequest {
        current: true,
        all: false
    }));

    let cached = load_events(&*store, Collection::Current);
    assert_eq!(cached[0].weekday.as_deref(), Some("Lunes"));
}

#[test]
fn widget_snapshot_holds_only_todays_events() {
    let store = Arc::new(MemoryStore::new());
    let widget = Arc::new(RecordingWidget::default());
    // clock date 2025-03-01 is a Saturday; 2025-03-03 is a Monday
    let fetcher = Arc::new(StubFetcher::with_events(vec![
        sample_event("today", "2025-03-01"),
        sample_event("monday", "2025-03-03"),
    ]));
    let exec = executor(&store, &fetcher, widget.clone());

    assert!(exec.run_sync(SyncRequest {
        current: true,
        all: false
    }));

    let published = widget.published.lock().unwrap();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].len(), 1);
    assert_eq!(published[0][0].id, "today");
    assert_eq!(published[0][0].text, "Cálculo");
}

#[test]
fn widget_failure_does_not_fail_the_sync() {
    let store = Arc::new(MemoryStore::new());
    let fetcher = Arc::new(StubFetcher::with_events(vec![sample_event(
        "e1",
        "2025-03-01",
    )]));
    let exec = executor(&store, &fetcher, Arc::new(FailingWidget));

    assert!(exec.run_sync(SyncRequest::FULL));
    assert!(read_timestamp(&*store, keys::LAST_SUCCESSFUL_SYNC).is_some());
}

#[test]
fn current_only_request_leaves_the_catalog_untouched() {
    let store = Arc::new(MemoryStore::new());
    let fetcher = Arc::new(StubFetcher::with_events(vec![sample_event(
        "e1",
        "2025-03-01",
    )]));
    let exec = executor(&store, &fetcher, Arc::new(RecordingWidget::default()));

    assert!(exec.run_sync(SyncRequest {
        current: true,
        all: false
    }));

    assert_eq!(fetcher.calls(), 1);
    assert!(load_events(&*store, Collection::All).is_empty());
}
