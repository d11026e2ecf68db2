//! Sync triggers.
//!
//! `reconcile` is what the mobile app runs on start and on screen
//! focus; `now` is the user-facing "sync now" button.

use clap::Subcommand;

#[derive(Subcommand)]
pub enum SyncAction {
    /// Evaluate the schedule and sync only if due
    Reconcile,
    /// Sync both collections immediately
    Now,
}

/// Run the sync command.
pub fn run(action: SyncAction) -> Result<(), Box<dyn std::error::Error>> {
    let scheduler = super::build_scheduler()?;
    match action {
        SyncAction::Reconcile => {
            let outcome = scheduler.reconcile();
            println!("reconcile: {outcome}");
        }
        SyncAction::Now => {
            if scheduler.sync_now() {
                println!("Sync completed successfully.");
            } else {
                return Err("sync failed; see the log for details".into());
            }
        }
    }
    Ok(())
}
