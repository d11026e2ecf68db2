//! Event records and cached-event queries.
//!
//! [`EventRecord`] mirrors the catalog's wire shape; the serde renames
//! keep the server's Spanish field spelling while the Rust side stays
//! idiomatic. The free functions here are the pure query helpers the UI
//! layers run over cached records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::clock::weekday_label;

/// One timetable entry as served by the remote catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Stable identifier assigned by the catalog.
    #[serde(rename = "_id")]
    pub id: String,
    /// Event type label ("Clase", "Ayudantía", ...).
    #[serde(rename = "Tipo")]
    pub kind: String,
    /// Display name.
    #[serde(rename = "Evento")]
    pub title: String,
    /// Calendar date, `YYYY-MM-DD`.
    #[serde(rename = "Fecha")]
    pub date: String,
    /// Start time of day, `HH:MM`.
    #[serde(rename = "Inicio")]
    pub start: String,
    /// End time of day, `HH:MM`.
    #[serde(rename = "Fin")]
    pub end: String,
    #[serde(rename = "Sala")]
    pub room: String,
    #[serde(rename = "Edificio")]
    pub building: String,
    #[serde(rename = "Campus")]
    pub campus: String,
    #[serde(rename = "fechaActualizacion", default)]
    pub updated_at: String,
    /// Precomputed weekday label; filled in locally when absent.
    #[serde(rename = "diaSemana", default, skip_serializing_if = "Option::is_none")]
    pub weekday: Option<String>,
}

/// Assign a weekday label derived from the record date to any record
/// missing one. Records with unparseable dates are left untouched.
pub fn fill_missing_weekdays(events: &mut [EventRecord]) {
    for event in events.iter_mut() {
        if event.weekday.is_some() || event.date.is_empty() {
            continue;
        }
        match event.date.parse::<NaiveDate>() {
            Ok(date) => event.weekday = Some(weekday_label(date).to_string()),
            Err(err) => warn!(
                "could not derive weekday for event {}: {err}",
                event.id
            ),
        }
    }
}

/// Case-insensitive substring search across the searchable fields.
/// An empty or whitespace-only term matches everything.
pub fn filter_events(events: &[EventRecord], term: &str) -> Vec<EventRecord> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return events.to_vec();
    }

    events
        .iter()
        .filter(|event| {
            [
                &event.title,
                &event.kind,
                &event.date,
                &event.room,
                &event.building,
                &event.campus,
            ]
            .iter()
            .any(|field| field.to_lowercase().contains(&term))
        })
        .cloned()
        .collect()
}

/// Sort by calendar date, then by start time.
pub fn sort_events_by_datetime(events: &[EventRecord]) -> Vec<EventRecord> {
    let mut sorted = events.to_vec();
    sorted.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.start.cmp(&b.start)));
    sorted
}

/// Events whose weekday label matches today's, deriving the label from
/// the record date when it is missing.
pub fn filter_today_events(events: &[EventRecord], today: NaiveDate) -> Vec<EventRecord> {
    let today_label = weekday_label(today);
    events
        .iter()
        .filter(|event| match &event.weekday {
            Some(label) => label == today_label,
            None => event
                .date
                .parse::<NaiveDate>()
                .map(|date| weekday_label(date) == today_label)
                .unwrap_or(false),
        })
        .cloned()
        .collect()
}

/// Parse `HH:MM` into minutes since midnight.
pub fn parse_time_minutes(time: &str) -> Option<u32> {
    let (hours, minutes) = time.split_once(':')?;
    let hours: u32 = hours.trim().parse().ok()?;
    let minutes: u32 = minutes.trim().parse().ok()?;
    Some(hours * 60 + minutes)
}

/// Whole minutes between two `HH:MM` times of the same day.
pub fn gap_minutes(end_of_first: &str, start_of_next: &str) -> Option<i64> {
    let end = parse_time_minutes(end_of_first)?;
    let start = parse_time_minutes(start_of_next)?;
    Some(i64::from(start) - i64::from(end))
}
