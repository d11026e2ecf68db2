//! Cached event queries.

use clap::Subcommand;

use salas_core::clock::{Clock, SystemClock};
use salas_core::event::{filter_events, filter_today_events, sort_events_by_datetime};
use salas_core::storage::load_events;
use salas_core::Collection;

#[derive(Subcommand)]
pub enum EventsAction {
    /// List cached events
    List {
        /// Use the full catalog instead of the current collection
        #[arg(long)]
        all: bool,
        /// Only events on today's weekday
        #[arg(long)]
        today: bool,
        /// Case-insensitive search across event fields
        #[arg(short, long)]
        search: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Run the events command.
pub fn run(action: EventsAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        EventsAction::List {
            all,
            today,
            search,
            json,
        } => list(all, today, search.as_deref(), json),
    }
}

fn list(
    all: bool,
    today: bool,
    search: Option<&str>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = super::open_store()?;
    let collection = if all {
        Collection::All
    } else {
        Collection::Current
    };

    let mut events = load_events(&*store, collection);
    if today {
        events = filter_today_events(&events, SystemClock.now().date());
    }
    if let Some(term) = search {
        events = filter_events(&events, term);
    }
    let events = sort_events_by_datetime(&events);

    if json {
        println!("{}", serde_json::to_string_pretty(&events)?);
        return Ok(());
    }

    if events.is_empty() {
        println!("No cached events. Run 'salas-cli sync now' first.");
        return Ok(());
    }

    for event in &events {
        let weekday = event.weekday.as_deref().unwrap_or("-");
        println!(
            "{} {} {}-{}  {} [{}] {} ({})",
            event.date,
            weekday,
            event.start,
            event.end,
            event.title,
            event.kind,
            event.room,
            event.building,
        );
    }
    println!("{} event(s).", events.len());

    Ok(())
}
