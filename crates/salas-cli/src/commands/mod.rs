//! CLI subcommands and shared stack assembly.

pub mod events;
pub mod reset;
pub mod status;
pub mod sync;

use std::sync::Arc;
use std::time::Duration;

use salas_core::storage::data_dir;
use salas_core::{
    Clock, Config, EventFetcher, FileStore, HttpFetcher, KvStore, StoreWidgetChannel, SyncExecutor,
    SyncScheduler, SystemClock, WidgetChannel,
};

/// Open the main key-value store under the data directory.
pub fn open_store() -> Result<Arc<FileStore>, Box<dyn std::error::Error>> {
    let dir = data_dir()?;
    Ok(Arc::new(FileStore::open(dir.join("store.json"))?))
}

/// Assemble the full sync stack from the on-disk config and stores.
pub fn build_scheduler() -> Result<SyncScheduler, Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let dir = data_dir()?;

    let store: Arc<dyn KvStore> = Arc::new(FileStore::open(dir.join("store.json"))?);
    let widget_store: Arc<dyn KvStore> = Arc::new(FileStore::open(dir.join("widget.json"))?);

    let fetcher: Arc<dyn EventFetcher> = Arc::new(HttpFetcher::new(
        config.api.base_url.clone(),
        Duration::from_secs(config.api.timeout_secs),
    )?);
    let widget: Arc<dyn WidgetChannel> = Arc::new(StoreWidgetChannel::new(widget_store));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let executor = SyncExecutor::new(store.clone(), fetcher, widget, clock.clone());
    Ok(SyncScheduler::new(store, clock, executor))
}
