//! Widget mirror channel.
//!
//! After every successful sync of the "current" collection, today's
//! records are reduced to the display shape the home-screen widget
//! understands and written to a storage channel the native widget code
//! reads. Failures on this channel are reported to the caller, who logs
//! and moves on; they never affect sync bookkeeping.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::StoreError;
use crate::event::EventRecord;
use crate::storage::keys;
use crate::storage::kv::KvStore;

/// Reduced display shape shared with the widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetEvent {
    pub id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub room: String,
    pub color: String,
    #[serde(rename = "startTime")]
    pub start_time: String,
    #[serde(rename = "endTime")]
    pub end_time: String,
    pub building: String,
}

impl WidgetEvent {
    pub fn from_record(record: &EventRecord) -> Self {
        Self {
            id: record.id.clone(),
            text: record.title.clone(),
            kind: record.kind.clone(),
            room: record.room.clone(),
            color: card_color(&record.building).to_string(),
            start_time: record.start.clone(),
            end_time: record.end.clone(),
            building: record.building.clone(),
        }
    }
}

const DEFAULT_COLOR: &str = "#2bb5ec";

/// Card color for a building label, keyed by the first letter A-F that
/// follows a space (as in "Edificio C").
pub fn card_color(building: &str) -> &'static str {
    match building_letter(building) {
        Some('A') => "#2bb5ec",
        Some('B') => "#2becc6",
        Some('C') => "#bbef4c",
        Some('D') => "#9d6bce",
        Some('E') => "#b32580",
        Some('F') => "#FFE135",
        _ => DEFAULT_COLOR,
    }
}

fn building_letter(building: &str) -> Option<char> {
    building.as_bytes().windows(2).find_map(|pair| {
        if pair[0] == b' ' && (b'A'..=b'F').contains(&pair[1]) {
            Some(pair[1] as char)
        } else {
            None
        }
    })
}

/// Storage channel accessible to the native widget code.
pub trait WidgetChannel: Send + Sync {
    /// Replace the widget-visible snapshot.
    fn publish(&self, events: &[WidgetEvent]) -> Result<(), StoreError>;
}

/// Widget channel backed by a dedicated key-value store.
pub struct StoreWidgetChannel {
    store: Arc<dyn KvStore>,
}

impl StoreWidgetChannel {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }
}

impl WidgetChannel for StoreWidgetChannel {
    fn publish(&self, events: &[WidgetEvent]) -> Result<(), StoreError> {
        let blob = serde_json::to_string(events)?;
        self.store.set(keys::WIDGET_EVENTS, &blob)?;
        debug!("published {} events to the widget channel", events.len());
        Ok(())
    }
}
