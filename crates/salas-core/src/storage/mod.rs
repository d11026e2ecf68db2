pub mod cache;
mod config;
pub mod keys;
pub mod kv;

pub use cache::{clear_sync_data, load_events, read_sync_info, save_events, SyncInfo};
pub use config::Config;
pub use kv::{FileStore, KvStore, MemoryStore};

use std::path::PathBuf;

use crate::error::StoreError;

/// Returns `~/.config/salas[-dev]/` based on SALAS_ENV.
///
/// Set SALAS_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the data directory fails.
pub fn data_dir() -> Result<PathBuf, StoreError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("SALAS_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("salas-dev")
    } else {
        base_dir.join("salas")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
