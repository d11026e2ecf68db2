//! Storage keys for sync bookkeeping and cached payloads.

/// Absent until the first-launch bootstrap sequence has run.
pub const FIRST_LAUNCH: &str = "app_first_launch";
/// Hour of the randomized daily sync time, stored as a decimal string.
pub const SCHEDULED_HOUR: &str = "scheduled_sync_hour";
/// Minute of the randomized daily sync time, stored as a decimal string.
pub const SCHEDULED_MINUTE: &str = "scheduled_sync_minute";
/// JSON blob of the "current" event collection.
pub const EVENTS_DATA: &str = "events_data";
/// JSON blob of the full catalog collection.
pub const ALL_EVENTS_DATA: &str = "all_events_data";
/// Written whenever a sync is initiated.
pub const LAST_SYNC: &str = "last_sync_date";
/// Written only after fetch and persist both succeed.
pub const LAST_SUCCESSFUL_SYNC: &str = "last_successful_sync_date";
/// Written before the network call of every attempt.
pub const SYNC_ATTEMPT: &str = "sync_attempt_date";
/// Reduced snapshot shared with the home-screen widget.
pub const WIDGET_EVENTS: &str = "widget_events";
