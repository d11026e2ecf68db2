//! Clear cached events and sync bookkeeping.

use salas_core::storage::clear_sync_data;

/// Run the reset command.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let store = super::open_store()?;
    clear_sync_data(&*store)?;
    println!("Cached events and sync bookkeeping cleared.");
    println!("The scheduled sync time and first-launch flag were kept.");
    Ok(())
}
