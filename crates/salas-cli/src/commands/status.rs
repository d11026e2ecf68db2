//! Sync bookkeeping and cache status.

use chrono::NaiveDateTime;
use salas_core::storage::{load_events, read_sync_info};
use salas_core::Collection;

fn format_instant(instant: Option<NaiveDateTime>) -> String {
    instant
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "never".to_string())
}

/// Run the status command.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let store = super::open_store()?;
    let info = read_sync_info(&*store);

    match info.scheduled_time {
        Some(time) => println!("Daily sync scheduled at {time}."),
        None => println!("Daily sync time not drawn yet (first sync pending)."),
    }
    println!("Last attempt:    {}", format_instant(info.last_attempt));
    println!("Last sync:       {}", format_instant(info.last_sync));
    println!(
        "Last successful: {}",
        format_instant(info.last_successful_sync)
    );

    let current = load_events(&*store, Collection::Current);
    let all = load_events(&*store, Collection::All);
    println!(
        "Cached records:  {} current, {} in the full catalog",
        current.len(),
        all.len()
    );

    Ok(())
}
