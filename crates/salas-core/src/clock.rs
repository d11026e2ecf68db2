//! Wall-clock abstraction and weekday labels.
//!
//! Every scheduling decision in this crate is an hour/minute-of-day or
//! calendar-day comparison in local time, so the clock hands out the
//! local naive date-time. Tests inject a [`FixedClock`].

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};

/// Supplies the current local wall-clock date and time.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// System clock, backed by [`Local::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock pinned to a preset instant, for tests and simulations.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: NaiveDateTime,
}

impl FixedClock {
    pub fn new(instant: NaiveDateTime) -> Self {
        Self { instant }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.instant
    }
}

/// Weekday labels indexed Sunday=0 through Saturday=6.
pub const WEEKDAYS: [&str; 7] = [
    "Domingo",
    "Lunes",
    "Martes",
    "Miércoles",
    "Jueves",
    "Viernes",
    "Sábado",
];

/// Human-readable weekday label for a calendar date.
pub fn weekday_label(date: NaiveDate) -> &'static str {
    WEEKDAYS[date.weekday().num_days_from_sunday() as usize]
}
