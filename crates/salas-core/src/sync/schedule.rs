//! Randomized daily sync schedule.
//!
//! Each install draws its own pre-dawn time-of-day target once and keeps
//! it for the lifetime of the install.

use rand::Rng;
use tracing::{error, info};

use crate::error::StoreError;
use crate::storage::keys;
use crate::storage::kv::KvStore;

/// Inclusive hour window for the randomized draw.
pub const SCHEDULE_HOUR_MIN: u32 = 3;
pub const SCHEDULE_HOUR_MAX: u32 = 4;

/// Fallback when the store cannot be read or written.
pub const DEFAULT_SCHEDULED_TIME: ScheduledTime = ScheduledTime {
    hour: 2,
    minute: 30,
};

/// Daily time-of-day target for automatic syncs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTime {
    pub hour: u32,
    pub minute: u32,
}

impl std::fmt::Display for ScheduledTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl ScheduledTime {
    /// Stored pair, or `None` when either key is missing or unparseable.
    pub fn read(store: &dyn KvStore) -> Result<Option<Self>, StoreError> {
        let hour = store.get(keys::SCHEDULED_HOUR)?;
        let minute = store.get(keys::SCHEDULED_MINUTE)?;
        match (hour, minute) {
            (Some(hour), Some(minute)) => match (hour.parse(), minute.parse()) {
                (Ok(hour), Ok(minute)) => Ok(Some(Self { hour, minute })),
                _ => Ok(None),
            },
            _ => Ok(None),
        }
    }
}

/// Draw a scheduled time within the configured window.
pub fn draw_scheduled_time(rng: &mut impl Rng) -> ScheduledTime {
    ScheduledTime {
        hour: rng.gen_range(SCHEDULE_HOUR_MIN..=SCHEDULE_HOUR_MAX),
        minute: rng.gen_range(1..=59),
    }
}

/// Stored scheduled time, drawing and persisting one on first use.
///
/// Store failures fall back to [`DEFAULT_SCHEDULED_TIME`] so the
/// scheduler can still make progress; the draw is retried on the next
/// call.
pub fn ensure_scheduled_time(store: &dyn KvStore) -> ScheduledTime {
    match ScheduledTime::read(store) {
        Ok(Some(time)) => return time,
        Ok(None) => {}
        Err(err) => {
            error!("could not read scheduled sync time: {err}");
            return DEFAULT_SCHEDULED_TIME;
        }
    }

    let time = draw_scheduled_time(&mut rand::thread_rng());
    let persisted = store
        .set(keys::SCHEDULED_HOUR, &time.hour.to_string())
        .and_then(|()| store.set(keys::SCHEDULED_MINUTE, &time.minute.to_string()));

    match persisted {
        Ok(()) => {
            info!("scheduled daily sync time set to {time}");
            time
        }
        Err(err) => {
            error!("could not persist scheduled sync time: {err}");
            DEFAULT_SCHEDULED_TIME
        }
    }
}
