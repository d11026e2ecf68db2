//! Sync executor: fetch-and-persist for the event collections.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::clock::Clock;
use crate::error::{CoreError, StoreError};
use crate::event::{self, EventRecord};
use crate::storage::cache;
use crate::storage::keys;
use crate::storage::kv::KvStore;
use crate::sync::fetch::{Collection, EventFetcher};
use crate::widget::{WidgetChannel, WidgetEvent};

/// Which collections a sync call should refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncRequest {
    pub current: bool,
    pub all: bool,
}

impl SyncRequest {
    /// Refresh both collections.
    pub const FULL: SyncRequest = SyncRequest {
        current: true,
        all: true,
    };
}

/// Performs the fetch-and-persist for one or both collections, recording
/// attempt and success bookkeeping.
///
/// The attempt/success timestamp pair is shared across both collections;
/// there is one cursor, not one per collection.
pub struct SyncExecutor {
    store: Arc<dyn KvStore>,
    fetcher: Arc<dyn EventFetcher>,
    widget: Arc<dyn WidgetChannel>,
    clock: Arc<dyn Clock>,
}

impl SyncExecutor {
    pub fn new(
        store: Arc<dyn KvStore>,
        fetcher: Arc<dyn EventFetcher>,
        widget: Arc<dyn WidgetChannel>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            fetcher,
            widget,
            clock,
        }
    }

    /// Run one sync attempt. Returns true only if every requested
    /// collection was fetched and persisted.
    ///
    /// Safe to call repeatedly: each call fully overwrites the
    /// collection caches, never merges. The attempt timestamp is
    /// recorded once per call, before any network I/O.
    pub fn run_sync(&self, request: SyncRequest) -> bool {
        if let Err(err) = cache::write_timestamp(&*self.store, keys::SYNC_ATTEMPT, self.clock.now())
        {
            error!("could not record sync attempt: {err}");
            return false;
        }

        let mut success = true;
        if request.current {
            success &= self.sync_collection(Collection::Current);
        }
        if request.all {
            success &= self.sync_collection(Collection::All);
        }
        success
    }

    fn sync_collection(&self, collection: Collection) -> bool {
        match self.try_sync_collection(collection) {
            Ok(count) => {
                info!("synced {count} records for {collection}");
                true
            }
            Err(err) => {
                error!("sync failed for {collection}: {err}");
                false
            }
        }
    }

    fn try_sync_collection(&self, collection: Collection) -> Result<usize, CoreError> {
        let mut events = self.fetcher.fetch(collection)?;
        event::fill_missing_weekdays(&mut events);
        cache::save_events(&*self.store, collection, &events)?;
        self.record_success()?;

        if collection == Collection::Current {
            self.publish_widget_snapshot(&events);
        }
        Ok(events.len())
    }

    fn record_success(&self) -> Result<(), StoreError> {
        let now = self.clock.now();
        cache::write_timestamp(&*self.store, keys::LAST_SYNC, now)?;
        cache::write_timestamp(&*self.store, keys::LAST_SUCCESSFUL_SYNC, now)
    }

    /// Mirror today's records to the widget channel. Channel failures
    /// are logged and never affect the sync result.
    fn publish_widget_snapshot(&self, events: &[EventRecord]) {
        let today = self.clock.now().date();
        let snapshot: Vec<WidgetEvent> = event::filter_today_events(events, today)
            .iter()
            .map(WidgetEvent::from_record)
            .collect();

        if let Err(err) = self.widget.publish(&snapshot) {
            warn!("could not publish widget snapshot: {err}");
        }
    }
}
