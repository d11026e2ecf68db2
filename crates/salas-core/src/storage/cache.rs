//! Typed access to cached events and sync bookkeeping.
//!
//! Event collections are stored as a single JSON-array blob per
//! collection key; bookkeeping instants as local ISO-8601 strings.
//! Reads never fail: missing or malformed data comes back as empty or
//! absent, with a warning.

use chrono::NaiveDateTime;
use tracing::warn;

use crate::error::StoreError;
use crate::event::EventRecord;
use crate::storage::keys;
use crate::storage::kv::KvStore;
use crate::sync::fetch::Collection;
use crate::sync::schedule::ScheduledTime;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// Persist a collection's records as one JSON blob, replacing whatever
/// was cached before.
pub fn save_events(
    store: &dyn KvStore,
    collection: Collection,
    events: &[EventRecord],
) -> Result<(), StoreError> {
    let blob = serde_json::to_string(events)?;
    store.set(collection.storage_key(), &blob)
}

/// Cached records for a collection. Missing or malformed data reads as
/// the empty collection.
pub fn load_events(store: &dyn KvStore, collection: Collection) -> Vec<EventRecord> {
    match store.get(collection.storage_key()) {
        Ok(Some(blob)) => match serde_json::from_str(&blob) {
            Ok(events) => events,
            Err(err) => {
                warn!("cached {collection} data is malformed, treating as empty: {err}");
                Vec::new()
            }
        },
        Ok(None) => Vec::new(),
        Err(err) => {
            warn!("could not read cached {collection} data: {err}");
            Vec::new()
        }
    }
}

/// Write a bookkeeping instant under `key`.
pub fn write_timestamp(
    store: &dyn KvStore,
    key: &str,
    instant: NaiveDateTime,
) -> Result<(), StoreError> {
    store.set(key, &instant.format(TIMESTAMP_FORMAT).to_string())
}

/// Stored instant under `key`, or `None` when absent or unparseable.
pub fn read_timestamp(store: &dyn KvStore, key: &str) -> Option<NaiveDateTime> {
    let value = store.get(key).ok()??;
    match value.parse::<NaiveDateTime>() {
        Ok(instant) => Some(instant),
        Err(err) => {
            warn!("stored timestamp {key}={value:?} is unparseable, ignoring: {err}");
            None
        }
    }
}

/// Sync bookkeeping summary for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncInfo {
    pub scheduled_time: Option<ScheduledTime>,
    pub last_attempt: Option<NaiveDateTime>,
    pub last_sync: Option<NaiveDateTime>,
    pub last_successful_sync: Option<NaiveDateTime>,
}

/// Assemble the bookkeeping summary from the store.
pub fn read_sync_info(store: &dyn KvStore) -> SyncInfo {
    SyncInfo {
        scheduled_time: ScheduledTime::read(store).unwrap_or_else(|err| {
            warn!("could not read scheduled sync time: {err}");
            None
        }),
        last_attempt: read_timestamp(store, keys::SYNC_ATTEMPT),
        last_sync: read_timestamp(store, keys::LAST_SYNC),
        last_successful_sync: read_timestamp(store, keys::LAST_SUCCESSFUL_SYNC),
    }
}

/// Remove the cached payloads and sync bookkeeping, key by key.
///
/// Keys are removed independently; a failure aborts the pass and keys
/// already removed stay removed. The first-launch flag and scheduled
/// time survive a reset.
pub fn clear_sync_data(store: &dyn KvStore) -> Result<(), StoreError> {
    for key in [
        keys::EVENTS_DATA,
        keys::ALL_EVENTS_DATA,
        keys::LAST_SYNC,
        keys::LAST_SUCCESSFUL_SYNC,
        keys::SYNC_ATTEMPT,
    ] {
        store.remove(key)?;
    }
    Ok(())
}
